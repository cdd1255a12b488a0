//! Error handling module
//!
//! Defines the generator's error types with their process exit codes

pub mod types;

pub use types::*;
