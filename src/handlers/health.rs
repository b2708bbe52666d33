//! Health check endpoint handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::{debug, instrument, warn};

use crate::state::SharedState;

/// Handler for the /health endpoint.
///
/// Healthy means the process root can be listed, i.e. `/processes` would not
/// fail outright.
#[instrument(skip(state))]
pub async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    debug!("Processing /health request");
    state.metrics.record_request("/health");

    let root = state.reader.root().to_path_buf();
    match tokio::fs::read_dir(&root).await {
        Ok(_) => (StatusCode::OK, "OK\n".to_string()),
        Err(e) => {
            warn!("Process root {} unavailable: {}", root.display(), e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Process root {} unavailable: {}\n", root.display(), e),
            )
        }
    }
}
