//! Allow-listed CSV files and the storage abstraction over them.

pub mod file;
pub mod store;

pub use file::CsvFile;
pub use store::{CsvDocument, CsvStore};
