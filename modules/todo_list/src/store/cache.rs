use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use crate::contract::model::Todo;

/// Fixed slot name for the todo store cache file.
pub const CACHE_SLOT: &str = "todo-storage.json";

/// Best-effort local persistence for the store's item list.
/// A write-through cache, never a source of truth.
pub trait StoreCache: Send + Sync {
    /// Read the cached items, `Ok(None)` when the slot has never been written.
    fn load(&self) -> anyhow::Result<Option<Vec<Todo>>>;
    /// Overwrite the slot with the full item list.
    fn save(&self, items: &[Todo]) -> anyhow::Result<()>;
}

/// serde_json file-backed cache keyed by [`CACHE_SLOT`] inside a directory.
pub struct JsonFileCache {
    path: PathBuf,
}

impl JsonFileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(CACHE_SLOT),
        }
    }
}

impl StoreCache for JsonFileCache {
    fn load(&self) -> anyhow::Result<Option<Vec<Todo>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let items = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(Some(items))
    }

    fn save(&self, items: &[Todo]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string(items).context("failed to serialize todo items")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}
