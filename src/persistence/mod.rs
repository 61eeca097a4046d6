//! Named string slots for persisted data
//!
//! - `LocalStorage` in the browser
//! - `MemoryStorage` natively and in tests
//!
//! Reads never fail: an unavailable backend reads as an empty slot.

use std::collections::HashMap;
use std::fmt;

/// A write that the backend refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageError {
    pub key: String,
    pub reason: String,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to write slot '{}': {}", self.key, self.reason)
    }
}

impl std::error::Error for StorageError {}

/// Key/value slot backend
pub trait Storage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str);
}

/// In-process storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.slots.remove(key);
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn backend() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        Self::backend()?.get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let err = |reason: String| StorageError {
            key: key.to_string(),
            reason,
        };
        let storage = Self::backend().ok_or_else(|| err("LocalStorage unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| err(format!("{:?}", e)))
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = Self::backend() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read("rank"), None);

        storage.write("rank", "[]").unwrap();
        assert_eq!(storage.read("rank").as_deref(), Some("[]"));

        storage.remove("rank");
        assert_eq!(storage.read("rank"), None);
    }

    #[test]
    fn test_error_display() {
        let err = StorageError {
            key: "rank".into(),
            reason: "quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "failed to write slot 'rank': quota exceeded");
    }
}
