//! Flat key/value store
//!
//! Every entry is one unit in a single flat namespace: the key names the unit,
//! the content is the (trimmed) destination URL, and membership is nothing more
//! than the unit existing. There is no index.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::errors::{FlatlinkerError, Result};

pub mod backend;

pub use backend::{FileStore, MemoryStore};

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `Ok(false)` only when the unit is definitely absent. A check that fails for
    /// any other reason is a `StorageFault`.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Trimmed content of `key`, or `NotFound`.
    async fn get(&self, key: &str) -> Result<String>;

    /// Write `value.trim()` as the whole content of `key`, overwriting.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Create-exclusive write: fails with `AlreadyExists` instead of overwriting.
    async fn create(&self, key: &str, value: &str) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>> {
        let store: Arc<dyn KeyValueStore> = match config.backend.as_str() {
            "file" => Arc::new(FileStore::open(&config.data_folder).await?),
            "memory" => Arc::new(MemoryStore::new()),
            other => {
                return Err(FlatlinkerError::config_fault(format!(
                    "Unknown store backend '{}'. Valid: file, memory",
                    other
                )));
            }
        };
        Ok(store)
    }
}
