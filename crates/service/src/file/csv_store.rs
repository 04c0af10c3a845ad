use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};
use tracing::debug;

use crate::csv::{CsvDocument, CsvFile, CsvStore};
use crate::errors::ServiceError;

#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// CSV files kept as flat files in one data directory.
///
/// The directory path lives behind a single process-wide `RwLock`: reads
/// share it, a write holds it exclusively for the whole open/write/sync.
/// One lock covers both files, so writing one file also blocks reads of the
/// other. Nothing coordinates with other processes using the same directory.
#[derive(Clone)]
pub struct FileCsvStore {
    dir: Arc<RwLock<PathBuf>>,
}

impl FileCsvStore {
    /// Open the store over `data_dir`, creating the directory if missing.
    pub async fn new<P: Into<PathBuf>>(data_dir: P) -> Result<Arc<Self>, ServiceError> {
        let dir = data_dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Arc::new(Self { dir: Arc::new(RwLock::new(dir)) }))
    }
}

async fn overwrite(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut opts = fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    opts.mode(FILE_MODE);
    let mut f = opts.open(path).await?;
    f.write_all(content).await?;
    f.flush().await?;
    f.sync_all().await
}

#[async_trait]
impl CsvStore for FileCsvStore {
    async fn read(&self, file: CsvFile) -> Result<CsvDocument, ServiceError> {
        let dir = self.dir.read().await;
        let path = dir.join(file.file_name());
        match fs::read(&path).await {
            Ok(bytes) => {
                debug!(file = %file, bytes = bytes.len(), "read stored csv");
                Ok(CsvDocument::stored(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(file = %file, "csv not written yet; serving header row");
                Ok(CsvDocument::default_for(file))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, file: CsvFile, content: &str) -> Result<(), ServiceError> {
        let dir = self.dir.write().await;
        let path = dir.join(file.file_name());
        overwrite(&path, content.as_bytes()).await?;
        debug!(file = %file, bytes = content.len(), "csv overwritten");
        Ok(())
    }
}
