//! Key/value storage backing the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store reads two string keys once at start-up and writes them
//! on every session change. In the browser that is `localStorage`
//! ([`LocalStorage`], hydrate only); `MemoryStorage` serves SSR and tests.
//! Other front ends plug in their own durable backend through
//! [`KeyValueStorage`].

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("storage encode failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Minimal `localStorage`-shaped contract.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] if the value could not be made durable.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] if the removal could not be made durable.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage; nothing survives the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a storage with existing entries.
    #[must_use]
    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Browser `window.localStorage`. Holds no handle; the storage object is
/// looked up per call, so the type stays `Send + Sync`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
impl LocalStorage {
    fn handle() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let read = Self::handle().and_then(|storage| {
            storage
                .get_item(key)
                .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
        });
        match read {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "localStorage read failed");
                None
            }
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::handle()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        Self::handle()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}
