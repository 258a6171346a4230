//! Key/value persistence for settings and records
//!
//! Features:
//! - `Storage` trait over string values
//! - In-memory, file and (wasm32) LocalStorage backends
//! - JSON helpers on top of any backend
//!
//! Callers treat storage as best effort: a failure is logged and the game
//! carries on.

mod file;
mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

pub use file::FileStorage;
pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key/value store
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read and decode a JSON value; `None` if the key is absent
pub fn load_json<T: DeserializeOwned>(
    storage: &impl Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub fn save_json<T: Serialize>(
    storage: &mut impl Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_json_helpers() {
        let mut storage = MemoryStorage::new();
        let mut value = BTreeMap::new();
        value.insert("apples".to_string(), 3u32);

        save_json(&mut storage, "stats", &value).unwrap();
        let loaded: Option<BTreeMap<String, u32>> = load_json(&storage, "stats").unwrap();
        assert_eq!(loaded, Some(value));

        let missing: Option<u32> = load_json(&storage, "nope").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_corrupt_json_is_an_error() {
        let mut storage = MemoryStorage::new();
        storage.set("stats", "{not json").unwrap();
        let result: Result<Option<u32>, _> = load_json(&storage, "stats");
        assert!(matches!(result, Err(StorageError::Json(_))));
    }
}
