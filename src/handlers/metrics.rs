//! Metrics endpoint handler for Prometheus scraping.

use axum::extract::State;
use prometheus::{Encoder, TextEncoder};
use tracing::{debug, error, instrument};

use crate::handlers::error::ApiError;
use crate::state::SharedState;

/// Handler for the /metrics endpoint.
#[instrument(skip(state))]
pub async fn metrics_handler(State(state): State<SharedState>) -> Result<String, ApiError> {
    debug!("Processing /metrics request");
    state.metrics.record_request("/metrics");

    let families = state.registry.gather();
    let mut buffer = Vec::with_capacity(4 * 1024);
    let encoder = TextEncoder::new();

    if let Err(e) = encoder.encode(&families, &mut buffer) {
        error!("Failed to encode Prometheus metrics: {}", e);
        return Err(ApiError::Internal("Failed to encode metrics".into()));
    }

    String::from_utf8(buffer).map_err(|e| {
        error!("Metrics output is not valid UTF-8: {}", e);
        ApiError::Internal("Failed to encode metrics".into())
    })
}
