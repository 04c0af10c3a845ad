//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate prepares the data
//! directory through the service layer it already depends on.

use std::path::Path;

/// Ensure the data directory exists; an error here should abort startup.
pub async fn ensure_env(data_dir: &Path) -> anyhow::Result<()> {
    common::env::ensure_data_dir(data_dir).await
}
