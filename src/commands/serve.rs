//! Serve command implementation.
//!
//! Runs the HTTP query service until SIGINT or SIGTERM.

use anyhow::Context;
use axum::{routing::get, Router};
use pidstat::ProcStatReader;
use prometheus::Registry;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;
use tokio::{net::TcpListener, signal};
use tracing::{debug, info};

use crate::config::{Config, DEFAULT_BIND_ADDR, DEFAULT_PORT};
use crate::handlers::{
    health_handler, metrics_handler, process_handler, processes_handler, root_handler,
};
use crate::metrics::SnapshotMetrics;
use crate::state::{AppState, SharedState};

/// Builds the router for the configured endpoints.
pub fn build_router(state: SharedState) -> Router {
    let mut app = Router::new()
        .route("/", get(root_handler))
        .route("/processes", get(processes_handler))
        .route("/processes/{pid}", get(process_handler));

    if state.config.enable_health.unwrap_or(true) {
        app = app.route("/health", get(health_handler));
    }
    if state.config.enable_metrics.unwrap_or(true) {
        app = app.route("/metrics", get(metrics_handler));
    } else {
        debug!("/metrics endpoint disabled");
    }

    app.with_state(state)
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), shutting down gracefully...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }
}

/// Runs the HTTP server.
pub async fn command_serve(config: Config) -> anyhow::Result<()> {
    let bind_ip_str = config.bind.clone().unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
    let port = config.port.unwrap_or(DEFAULT_PORT);
    let bind_ip: IpAddr = bind_ip_str
        .parse()
        .with_context(|| format!("invalid bind address {}", bind_ip_str))?;
    let addr = SocketAddr::new(bind_ip, port);

    let registry = Registry::new();
    let metrics = SnapshotMetrics::new(&registry).context("failed to register metrics")?;
    debug!("Prometheus registry initialized");

    let state = Arc::new(AppState {
        reader: ProcStatReader::new(config.proc_root()),
        registry,
        metrics,
        config: Arc::new(config),
        start_time: Instant::now(),
    });
    let app = build_router(state.clone());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(
        "pidstat listening on http://{} (process root {})",
        addr,
        state.reader.root().display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("pidstat stopped gracefully");
    Ok(())
}
