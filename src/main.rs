use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod handlers;
mod middleware;
mod mock_data;
mod server;
mod telemetry;

use config::{Cli, Command};
use telemetry::{StoreError, TelemetryStore};

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Telemetry snapshot loaded once at start-up, or why it could not be.
    /// A failed load is answered with a 500 on every request.
    pub telemetry: Result<TelemetryStore, StoreError>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("region_latency={0},tower_http={0}", cli.serve.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    if let Some(Command::Generate(args)) = cli.command {
        return mock_data::write(&args.out, args.records_per_region, args.seed);
    }
    let args = cli.serve;

    // ── 1. Load telemetry ────────────────────────────────────────
    let telemetry = TelemetryStore::load(&args.data_file);
    match &telemetry {
        Ok(store) if store.is_empty() => {
            warn!(path = %args.data_file.display(), "telemetry file holds no records")
        }
        Ok(store) => info!(
            path = %args.data_file.display(),
            records = store.len(),
            regions = ?store.regions(),
            "telemetry loaded"
        ),
        Err(e) if args.require_data => {
            anyhow::bail!("telemetry is required at start-up: {e}");
        }
        Err(e) => error!(error = %e, "telemetry unavailable, every query will fail with 500"),
    }

    // ── 2. Build router ──────────────────────────────────────────
    let state = Arc::new(AppState { telemetry });
    let app = server::create_router(state);

    // ── 3. Bind & serve ──────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!("listening on http://{}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
