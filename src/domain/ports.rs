use crate::domain::model::SavedList;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Entropy for shuffling and leader picks.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let index = (self.next_unit() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Produces the display name of the group at a zero-based index.
pub trait Namer {
    fn name(&self, index: usize) -> String;
}

impl<F> Namer for F
where
    F: Fn(usize) -> String,
{
    fn name(&self, index: usize) -> String {
        self(index)
    }
}

/// Free-text completion from an external AI provider.
#[async_trait]
pub trait TextService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;

    fn provider_name(&self) -> &str;
}

pub trait ListStore: Send + Sync {
    fn load_all(&self) -> Result<Vec<SavedList>>;
    fn save(&self, list: SavedList) -> Result<()>;
    fn delete(&self, id: &str) -> Result<bool>;

    fn get(&self, id: &str) -> Result<Option<SavedList>> {
        Ok(self.load_all()?.into_iter().find(|list| list.id == id))
    }
}
