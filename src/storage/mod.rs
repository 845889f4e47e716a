//! Snapshot persistence.
//!
//! The store writes each collection as one JSON document under a fixed key
//! (`goals`, `categories`). Anything that can get and set strings by key can
//! back it: [`SqliteStorage`] on disk, [`MemoryStorage`] for tests.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::internal_error::InternalResult;

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub const GOALS_KEY: &str = "goals";
pub const CATEGORIES_KEY: &str = "categories";

pub trait KeyValueStorage {
    fn get(&self, key: &str) -> InternalResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> InternalResult<()>;
}

/// Reads and decodes the snapshot stored under `key`.
///
/// `Ok(None)` when nothing is stored or the stored text does not decode; the
/// decode failure is logged and callers fall back to their defaults. A
/// backend failure is returned as `Err` so callers can avoid overwriting data
/// they could not read.
pub fn read_snapshot<T: DeserializeOwned>(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> InternalResult<Option<T>> {
    let raw = match storage.get(key)? {
        Some(raw) => raw,
        None => {
            debug!(key, "no stored snapshot");
            return Ok(None);
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            error!(key, error = %e, "failed to parse stored snapshot, using defaults");
            Ok(None)
        }
    }
}

pub fn write_snapshot<T: Serialize + ?Sized>(
    storage: &mut dyn KeyValueStorage,
    key: &str,
    value: &T,
) -> InternalResult<()> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{default_categories, Category};

    #[test]
    fn missing_and_corrupt_snapshots_read_as_none() {
        let mut storage = MemoryStorage::new();

        assert!(read_snapshot::<Vec<Category>>(&storage, CATEGORIES_KEY)
            .unwrap()
            .is_none());

        storage.set(CATEGORIES_KEY, "{not json").unwrap();
        assert!(read_snapshot::<Vec<Category>>(&storage, CATEGORIES_KEY)
            .unwrap()
            .is_none());
    }

    #[test]
    fn snapshot_survives_write_then_read() {
        let mut storage = MemoryStorage::new();
        let categories = default_categories();

        write_snapshot(&mut storage, CATEGORIES_KEY, &categories).unwrap();

        let loaded: Vec<Category> = read_snapshot(&storage, CATEGORIES_KEY).unwrap().unwrap();
        assert_eq!(loaded, categories);
    }
}
