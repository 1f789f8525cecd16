//! HTTP surface
//!
//! - `services`: request handlers and route registration
//! - `middleware`: request timing/logging

pub mod middleware;
pub mod services;

pub use services::{ShortUrlSettings, shorturl_routes};
