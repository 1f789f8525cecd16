//! System-level modules
//!
//! Process-wide concerns that are not part of the link logic.

pub mod logging;
