use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::internal_error::InternalResult;

use super::KeyValueStorage;

/// Process-local storage. Clones share the same map, so a test can hand one
/// clone to a store and inspect what it wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> InternalResult<Option<String>> {
        let entries = self.entries.lock()?;

        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> InternalResult<()> {
        let mut entries = self.entries.lock()?;
        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }
}
