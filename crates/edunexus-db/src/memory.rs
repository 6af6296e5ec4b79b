use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::LocalStore;

/// Non-durable store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| anyhow::anyhow!("Store lock poisoned: {}", e))?;
        Ok(entries.get(key).cloned())
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| anyhow::anyhow!("Store lock poisoned: {}", e))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
