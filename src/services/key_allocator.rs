//! Collision-avoiding random key allocation
//!
//! Candidates are drawn from the 62-symbol alphabet starting at
//! [`DEFAULT_KEY_LENGTH`]. Every [`RANDOM_RETRY_AMOUNT`] consecutive collisions
//! at one length grow the length by one, so the search widens the key space
//! instead of hammering a crowded one.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::errors::{FlatlinkerError, Result};
use crate::storage::KeyValueStore;
use crate::utils::{RandomSource, generate_random_code};

/// 生成短码的起始长度
pub const DEFAULT_KEY_LENGTH: usize = 4;

/// 同一长度下的最大重试次数，用完后长度加一
pub const RANDOM_RETRY_AMOUNT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationPolicy {
    pub initial_length: usize,
    pub retries_per_length: u32,
    /// `None` keeps searching until a free key turns up.
    pub max_attempts: Option<u64>,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            initial_length: DEFAULT_KEY_LENGTH,
            retries_per_length: RANDOM_RETRY_AMOUNT,
            max_attempts: None,
        }
    }
}

/// Walks the length schedule: `retries_per_length` tries per length, then grow.
#[derive(Debug)]
struct Escalation {
    length: usize,
    remaining: u32,
    retries_per_length: u32,
    attempts: u64,
    max_attempts: Option<u64>,
}

impl Escalation {
    fn new(policy: &AllocationPolicy) -> Self {
        let retries_per_length = policy.retries_per_length.max(1);
        Self {
            length: policy.initial_length.max(1),
            remaining: retries_per_length,
            retries_per_length,
            attempts: 0,
            max_attempts: policy.max_attempts,
        }
    }

    /// Length for the next candidate, or `AllocationExhausted` once the cap is hit.
    fn next_length(&mut self) -> Result<usize> {
        if let Some(max) = self.max_attempts
            && self.attempts >= max
        {
            return Err(FlatlinkerError::allocation_exhausted(format!(
                "No free key found after {} attempts (reached length {})",
                self.attempts, self.length
            )));
        }
        self.attempts += 1;
        Ok(self.length)
    }

    fn collided(&mut self, candidate: &str) {
        trace!("Key collision: {}", candidate);
        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = self.retries_per_length;
            self.length += 1;
            debug!(
                "{} collisions in a row, growing key length to {}",
                self.retries_per_length, self.length
            );
        }
    }
}

pub struct KeyAllocator {
    store: Arc<dyn KeyValueStore>,
    random: Arc<dyn RandomSource>,
    policy: AllocationPolicy,
}

impl KeyAllocator {
    pub fn new(store: Arc<dyn KeyValueStore>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            store,
            random,
            policy: AllocationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    /// Find a key that does not exist at the moment it is checked.
    ///
    /// Read-only. The key is not reserved: another writer may take it before the
    /// caller does. Use [`KeyAllocator::claim`] when the key is about to be written.
    pub async fn allocate(&self) -> Result<String> {
        let mut schedule = Escalation::new(&self.policy);
        loop {
            let length = schedule.next_length()?;
            let candidate = generate_random_code(length, self.random.as_ref());
            if !self.store.exists(&candidate).await? {
                return Ok(candidate);
            }
            schedule.collided(&candidate);
        }
    }

    /// Allocate a key and store `value` under it in one create-exclusive step.
    ///
    /// A candidate taken by someone else between generation and write shows up as
    /// `AlreadyExists` and is treated like any other collision.
    pub async fn claim(&self, value: &str) -> Result<String> {
        let mut schedule = Escalation::new(&self.policy);
        loop {
            let length = schedule.next_length()?;
            let candidate = generate_random_code(length, self.random.as_ref());
            match self.store.create(&candidate, value).await {
                Ok(()) => return Ok(candidate),
                Err(FlatlinkerError::AlreadyExists(_)) => schedule.collided(&candidate),
                Err(e) => return Err(e),
            }
        }
    }
}
