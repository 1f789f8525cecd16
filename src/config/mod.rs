mod r#impl;
mod structs;

pub use r#impl::{ConfigOverrides, resolve_config};
pub use structs::*;
