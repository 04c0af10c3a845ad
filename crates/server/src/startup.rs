use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::{auth::StaticTokenAuth, csv::CsvStore, file::FileCsvStore, runtime};
use tracing::{info, warn};

use crate::routes::{self, auth::ServerState};

/// Prepare the data directory and the shared state handed to every handler.
///
/// A data directory that cannot be created is fatal.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let data_dir = &cfg.storage.data_dir;
    runtime::ensure_env(data_dir).await?;

    let store: Arc<dyn CsvStore> = FileCsvStore::new(data_dir.clone()).await?;
    let auth = StaticTokenAuth::new(cfg.auth.api_key.clone());
    if !auth.is_enabled() {
        warn!(event = "auth_disabled", "no API_KEY set - authentication disabled");
    }
    info!(data_dir = %data_dir.display(), "data directory ready");

    Ok(ServerState { store, auth })
}

/// Build the app from configuration and serve it until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state);

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server starting");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!(%addr, "server stopped accepting connections");
    Ok(())
}
