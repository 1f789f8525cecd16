//! flatlinker - a URL shortener without a database
//!
//! Every short link is a file: the file name is the key, the content is the
//! destination URL. The data folder is the whole database.
//!
//! # Architecture
//! - `storage`: the flat key/value store (`FileStore`, `MemoryStore`)
//! - `services`: collision-avoiding key allocation and the link service
//! - `api`: HTTP handlers and middleware (actix-web)
//! - `config`: configuration loading (TOML + environment + CLI flags)
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
