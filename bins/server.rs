use tracing::{error, info, warn};
use uuid::Uuid;

fn init_logging() {
    // load .env before reading RUST_LOG / LOG_FORMAT
    let dotenv = dotenvy::dotenv();
    common::utils::logging::init_logging_from_env();
    info!(service = "csv-store", event = "logger_init", "tracing subscriber initialized");
    if dotenv.is_err() {
        info!(service = "csv-store", event = "dotenv_missing", "no .env file found, using environment variables");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(service = "csv-store", event = "signal_error", error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(service = "csv-store", event = "shutdown_signal", "received Ctrl+C, shutting down");
}

fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "csv-store",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let cfg = match configs::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "csv-store", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    let worker_threads = cfg.server.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "csv-store", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "csv-store",
        event = "start",
        %service_id,
        pid,
        version,
        port = cfg.server.port,
        data_dir = %cfg.storage.data_dir.display(),
        threads = worker_threads.unwrap_or_default(),
        "csv store service starting"
    );

    rt.block_on(async move {
        match server::run(cfg, shutdown_signal()).await {
            Ok(()) => {
                info!(service = "csv-store", event = "stop", %service_id, pid, "server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "csv-store", event = "run_failed", error = %e, "server::run returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
