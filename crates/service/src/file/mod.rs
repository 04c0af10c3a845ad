//! Filesystem-backed store implementations.

pub mod csv_store;

pub use csv_store::FileCsvStore;
