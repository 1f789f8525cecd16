//! Service layer for business logic
//!
//! This module provides the logic shared between the HTTP API and the CLI.

pub mod key_allocator;
mod link_service;

pub use key_allocator::{AllocationPolicy, DEFAULT_KEY_LENGTH, KeyAllocator, RANDOM_RETRY_AMOUNT};
pub use link_service::*;
