//! Durable session storage for the terminal: one JSON file of string keys.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use agricompass::util::storage::{KeyValueStorage, StorageError};

/// JSON-file storage. The whole map is rewritten on every mutation via a
/// temp file + rename so a crash never leaves a half-written file behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the storage file at `path`. A missing file is an empty storage.
    /// An unreadable or corrupt file is also treated as empty (and logged)
    /// so a damaged session file never blocks start-up.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "session file corrupt; starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "session file unreadable; starting empty");
                BTreeMap::new()
            }
        };
        Self { path, items }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io { path: parent.to_path_buf(), source })?;
        }
        let raw = serde_json::to_string_pretty(&self.items)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(|source| StorageError::Io { path: tmp.clone(), source })?;
        fs::rename(&tmp, &self.path).map_err(|source| StorageError::Io { path: self.path.clone(), source })
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.items.remove(key).is_none() {
            return Ok(());
        }
        self.flush()
    }
}
