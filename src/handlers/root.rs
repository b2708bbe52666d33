//! Root endpoint handler listing the available endpoints.

use axum::extract::State;
use std::fmt::Write as FmtWrite;
use tracing::{debug, instrument};

use crate::state::SharedState;

/// Handler for the root `/` endpoint.
#[instrument(skip(state))]
pub async fn root_handler(State(state): State<SharedState>) -> String {
    debug!("Processing / request");
    state.metrics.record_request("/");

    let uptime_secs = state.start_time.elapsed().as_secs();
    let hours = uptime_secs / 3600;
    let minutes = (uptime_secs % 3600) / 60;
    let seconds = uptime_secs % 60;

    let mut out = String::new();
    let _ = writeln!(out, "pidstat {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out, "Process root: {}", state.reader.root().display());
    let _ = writeln!(out, "Uptime: {}h {}m {}s", hours, minutes, seconds);
    let _ = writeln!(out);
    let _ = writeln!(out, "Endpoints:");
    let _ = writeln!(out, "  /processes                              snapshot of all processes (JSON)");
    let _ = writeln!(out, "  /processes?field=rss&condition=gt:300   filtered snapshot");
    let _ = writeln!(out, "  /processes/{{pid}}                        single process record");
    if state.config.enable_health.unwrap_or(true) {
        let _ = writeln!(out, "  /health                                 process root availability");
    }
    if state.config.enable_metrics.unwrap_or(true) {
        let _ = writeln!(out, "  /metrics                                Prometheus self-metrics");
    }
    out
}
