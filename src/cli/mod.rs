//! CLI command handling

pub mod notify;

pub use notify::*;
