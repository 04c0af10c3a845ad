//! Shared building blocks for the CSV store binaries and crates:
//! response payload types, tracing setup, and runtime environment checks.

pub mod types;
pub mod utils;
pub mod env;
