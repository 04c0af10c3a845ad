use async_trait::async_trait;

use super::CsvFile;
use crate::errors::ServiceError;

/// Content returned by a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    pub bytes: Vec<u8>,
    /// `true` when the file has never been written and the header row was served.
    pub is_default: bool,
}

impl CsvDocument {
    pub fn stored(bytes: Vec<u8>) -> Self {
        Self { bytes, is_default: false }
    }

    pub fn default_for(file: CsvFile) -> Self {
        Self { bytes: file.default_contents().as_bytes().to_vec(), is_default: true }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Trait abstraction over where the CSV files live.
/// Reads may run concurrently; a write excludes every other read and write.
#[async_trait]
pub trait CsvStore: Send + Sync {
    /// Stored bytes, or the header-only default if the file does not exist yet.
    async fn read(&self, file: CsvFile) -> Result<CsvDocument, ServiceError>;
    /// Replace the whole file with `content`, creating it if needed.
    async fn write(&self, file: CsvFile, content: &str) -> Result<(), ServiceError>;
}
