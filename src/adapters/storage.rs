use crate::domain::model::SavedList;
use crate::domain::ports::ListStore;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Saved lists kept as one JSON array on disk.
#[derive(Debug, Clone)]
pub struct FileListStore {
    path: PathBuf,
}

impl FileListStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, lists: &[SavedList]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(lists)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl ListStore for FileListStore {
    fn load_all(&self) -> Result<Vec<SavedList>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read(&self.path)?;
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&data)?)
    }

    fn save(&self, list: SavedList) -> Result<()> {
        let mut lists = self.load_all()?;
        match lists.iter_mut().find(|existing| existing.id == list.id) {
            Some(existing) => *existing = list,
            None => lists.push(list),
        }
        self.write_all(&lists)?;
        tracing::debug!("Saved lists written to {}", self.path.display());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let mut lists = self.load_all()?;
        let before = lists.len();
        lists.retain(|list| list.id != id);
        if lists.len() == before {
            return Ok(false);
        }
        self.write_all(&lists)?;
        Ok(true)
    }
}

/// Saves `names` as a new list and returns it once the store has accepted it.
pub fn save_roster(store: &dyn ListStore, name: &str, names: Vec<String>) -> Result<SavedList> {
    let mut list = SavedList::new(name.trim(), names);
    while store.get(&list.id)?.is_some() {
        list = SavedList::new(name.trim(), list.names);
    }
    store.save(list.clone())?;
    tracing::info!("Saved list \"{}\" ({} names)", list.name, list.names.len());
    Ok(list)
}

#[derive(Debug, Default)]
pub struct MemoryListStore {
    lists: Mutex<Vec<SavedList>>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListStore for MemoryListStore {
    fn load_all(&self) -> Result<Vec<SavedList>> {
        Ok(self.lists.lock().map(|lists| lists.clone()).unwrap_or_default())
    }

    fn save(&self, list: SavedList) -> Result<()> {
        if let Ok(mut lists) = self.lists.lock() {
            match lists.iter_mut().find(|existing| existing.id == list.id) {
                Some(existing) => *existing = list,
                None => lists.push(list),
            }
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let Ok(mut lists) = self.lists.lock() else {
            return Ok(false);
        };
        let before = lists.len();
        lists.retain(|list| list.id != id);
        Ok(lists.len() != before)
    }
}
