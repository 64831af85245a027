//! PawTrack HTTP Server Binary
//!
//! Loads configuration, initializes the repository, sets up the HTTP router
//! and serves requests until Ctrl+C or SIGTERM.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin pawtrack-server
//!
//! # Fixed zone for statistics, strict timestamp handling
//! PAWTRACK_TIMEZONE=+02:00 PAWTRACK_INVALID_TIMESTAMPS=reject cargo run --bin pawtrack-server
//! ```
//!
//! # Environment Variables
//!
//! - `PAWTRACK_CONFIG`: Path to a `pawtrack.toml` file
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 3000)
//! - `REPOSITORY_TYPE`: Repository backend (default: local)
//! - `PAWTRACK_TIMEZONE`: `local`, `utc` or a fixed offset (default: local)
//! - `PAWTRACK_INVALID_TIMESTAMPS`: `skip` or `reject` (default: skip)
//! - `RUST_LOG`: Log filter (default: info)

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pawtrack::config::AppConfig;
use pawtrack::db;
use pawtrack::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; `log` records from the library are forwarded too
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting PawTrack HTTP Server");

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        "Configuration: repository={}, timezone={}, invalid_timestamps={:?}, window_days={}",
        config.repository.repo_type,
        config.stats.timezone,
        config.stats.invalid_timestamps,
        config.stats.window_days
    );

    // Initialize global repository once and reuse it across the app
    db::init_repository_with(&config)?;
    let repository = Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    let state = AppState::from_config(repository, &config);
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on http://{}", listener.local_addr()?);
    info!("Health check: http://{}/health", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
