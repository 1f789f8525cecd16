use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::errors::{FlatlinkerError, Result};
use crate::storage::KeyValueStore;

/// In-process store with the same contract as [`super::FileStore`].
///
/// Nothing survives a restart; useful for tests and throwaway instances.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.entries.contains_key(key))
    }

    async fn get(&self, key: &str) -> Result<String> {
        self.entries
            .get(key)
            .map(|v| v.value().clone())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| FlatlinkerError::not_found(format!("shorturl {} doesn't exist", key)))
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .insert(key.to_string(), value.trim().to_string());
        Ok(())
    }

    async fn create(&self, key: &str, value: &str) -> Result<()> {
        // entry() 持有分片写锁，检查与插入是原子的
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(_) => Err(FlatlinkerError::already_exists(format!(
                "shorturl {} already exists",
                key
            ))),
            Entry::Vacant(slot) => {
                slot.insert(value.trim().to_string());
                Ok(())
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
