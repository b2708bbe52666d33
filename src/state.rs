//! Application state shared by the HTTP handlers.

use pidstat::ProcStatReader;
use prometheus::Registry;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::metrics::SnapshotMetrics;

/// Type alias for shared application state.
pub type SharedState = Arc<AppState>;

/// State shared across requests. Snapshots are never cached here; every
/// request builds its own.
pub struct AppState {
    pub reader: ProcStatReader,
    pub registry: Registry,
    pub metrics: SnapshotMetrics,
    pub config: Arc<Config>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

/// State over an arbitrary process root with a fresh registry.
#[cfg(test)]
pub fn test_state(root: &std::path::Path) -> SharedState {
    let registry = Registry::new();
    let metrics = SnapshotMetrics::new(&registry).expect("metrics register");
    Arc::new(AppState {
        reader: ProcStatReader::new(root),
        registry,
        metrics,
        config: Arc::new(Config::default()),
        start_time: Instant::now(),
    })
}
