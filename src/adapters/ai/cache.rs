use crate::domain::ports::TextService;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

struct CacheEntry {
    stored_at: Instant,
    completion: String,
}

/// Caches completions per prompt for a fixed time-to-live.
pub struct CachedTextService<S: TextService> {
    inner: S,
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl<S: TextService> CachedTextService<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    // 有人在持鎖時 panic 也繼續使用快取, 但留下警告
    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("AI cache lock was poisoned, recovering cached entries");
            poisoned.into_inner()
        })
    }

    fn lookup(&self, prompt: &str) -> Option<String> {
        let mut entries = self.entries();
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        entries.get(prompt).map(|entry| entry.completion.clone())
    }

    fn store(&self, prompt: &str, completion: &str) {
        self.entries().insert(
            prompt.to_string(),
            CacheEntry {
                stored_at: Instant::now(),
                completion: completion.to_string(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries().clear();
    }
}

#[async_trait]
impl<S: TextService> TextService for CachedTextService<S> {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if let Some(hit) = self.lookup(prompt) {
            tracing::debug!("AI cache hit ({} chars prompt)", prompt.len());
            return Ok(hit);
        }

        let completion = self.inner.complete(prompt).await?;
        // 空回應不快取
        if !completion.is_empty() {
            self.store(prompt, &completion);
        }
        Ok(completion)
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
