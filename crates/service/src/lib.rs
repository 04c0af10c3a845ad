//! Service layer for the CSV store.
//! - `csv` defines the allow-listed files and the `CsvStore` seam.
//! - `file` holds the filesystem-backed implementation.
//! - `auth` checks the optional shared secret.

pub mod errors;
pub mod auth;
pub mod csv;
pub mod file;
pub mod runtime;
