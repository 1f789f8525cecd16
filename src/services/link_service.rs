//! Link management service
//!
//! Provides the create/resolve flow shared between the HTTP handlers and the
//! CLI commands.

use std::sync::Arc;

use tracing::{info, trace};

use crate::errors::{FlatlinkerError, Result};
use crate::storage::KeyValueStore;
use crate::utils::{RandomSource, validate_key};

use super::key_allocator::{AllocationPolicy, KeyAllocator};

// ============ Request/Response DTOs ============

/// Request to create a new link
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    /// Explicit key. Empty or `None` means one is generated.
    pub hash: Option<String>,
    /// Destination URL
    pub url: String,
}

/// Result of link creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCreateResult {
    pub key: String,
    pub url: String,
    /// Whether the key was generated
    pub generated: bool,
}

// ============ Service ============

pub struct LinkService {
    store: Arc<dyn KeyValueStore>,
    allocator: KeyAllocator,
}

impl LinkService {
    pub fn new(store: Arc<dyn KeyValueStore>, random: Arc<dyn RandomSource>) -> Self {
        let allocator = KeyAllocator::new(store.clone(), random);
        Self { store, allocator }
    }

    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.allocator = self.allocator.with_policy(policy);
        self
    }

    pub fn allocator(&self) -> &KeyAllocator {
        &self.allocator
    }

    /// Create a new short link
    ///
    /// An explicit hash is written as-is and silently replaces whatever was stored
    /// under it. A generated key is claimed create-exclusively and never replaces an
    /// existing entry.
    pub async fn create_link(&self, req: CreateLinkRequest) -> Result<LinkCreateResult> {
        let url = req.url.trim();
        if url.is_empty() {
            return Err(FlatlinkerError::bad_request(
                "You didn't provide a url to redirect to",
            ));
        }

        let hash = req
            .hash
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty());

        let result = match hash {
            Some(key) => {
                validate_key(key)?;
                self.store.put(key, url).await?;
                LinkCreateResult {
                    key: key.to_string(),
                    url: url.to_string(),
                    generated: false,
                }
            }
            None => {
                let key = self.allocator.claim(url).await?;
                LinkCreateResult {
                    key,
                    url: url.to_string(),
                    generated: true,
                }
            }
        };

        info!(
            "LinkService: stored '{}' -> '{}' (generated: {})",
            result.key, result.url, result.generated
        );
        Ok(result)
    }

    /// Destination URL for `key`, or `NotFound`.
    ///
    /// An empty key names nothing and is reported as absent.
    pub async fn resolve(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(FlatlinkerError::not_found("shorturl key is empty"));
        }
        validate_key(key)?;
        let url = self.store.get(key).await?;
        trace!("LinkService: resolved '{}' -> '{}'", key, url);
        Ok(url)
    }
}
