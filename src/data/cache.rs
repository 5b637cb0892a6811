use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use serde::Deserialize;

use super::error::LoadError;
use super::loader::load_with_columns;
use super::model::{KeyColumns, RecordTable};

/// When a cached table is considered stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Load once per process run.
    Never,
    /// Reload when the file's modification time changes.
    #[default]
    OnModified,
}

#[derive(Debug)]
struct Entry {
    table: Arc<RecordTable>,
    modified: Option<SystemTime>,
}

/// Memoized loader for one source file.
///
/// The file is read outside the lock: racing first calls may each load,
/// and the last complete table wins.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    keys: KeyColumns,
    policy: CachePolicy,
    entry: Mutex<Option<Entry>>,
    /// Modification time of the last load that failed.
    failed: Mutex<Option<Option<SystemTime>>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, keys: KeyColumns, policy: CachePolicy) -> Self {
        Self {
            path: path.into(),
            keys,
            policy,
            entry: Mutex::new(None),
            failed: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached table, loading it first if absent or stale.
    pub fn get(&self) -> Result<Arc<RecordTable>, LoadError> {
        let modified = self.modified_time();
        if let Some(table) = self.cached(modified) {
            return Ok(table);
        }
        self.load(modified)
    }

    /// Load only when the file changed since the last attempt.
    ///
    /// `Ok(None)` means nothing new: the cached table is still fresh, or the
    /// file already failed to load at its current modification time.
    pub fn poll(&self) -> Result<Option<Arc<RecordTable>>, LoadError> {
        let modified = self.modified_time();
        if *self.failed.lock().unwrap_or_else(|e| e.into_inner()) == Some(modified) {
            return Ok(None);
        }
        if self.cached(modified).is_some() {
            return Ok(None);
        }
        self.load(modified).map(Some)
    }

    fn cached(&self, modified: Option<SystemTime>) -> Option<Arc<RecordTable>> {
        let guard = self.entry.lock().unwrap_or_else(|e| e.into_inner());
        let entry = guard.as_ref()?;
        let fresh = match self.policy {
            CachePolicy::Never => true,
            CachePolicy::OnModified => entry.modified == modified,
        };
        if !fresh {
            log::info!("{} changed on disk; reloading", self.path.display());
            return None;
        }
        Some(Arc::clone(&entry.table))
    }

    /// Drop the cached table and load again.
    pub fn reload(&self) -> Result<Arc<RecordTable>, LoadError> {
        self.invalidate();
        self.load(self.modified_time())
    }

    pub fn invalidate(&self) {
        *self.entry.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    fn load(&self, modified: Option<SystemTime>) -> Result<Arc<RecordTable>, LoadError> {
        let loaded = load_with_columns(&self.path, &self.keys);
        *self.failed.lock().unwrap_or_else(|e| e.into_inner()) =
            loaded.is_err().then_some(modified);
        let table = Arc::new(loaded?);
        *self.entry.lock().unwrap_or_else(|e| e.into_inner()) = Some(Entry {
            table: Arc::clone(&table),
            modified,
        });
        Ok(table)
    }

    fn modified_time(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
    }
}
