//! Prometheus self-metrics for the HTTP query service.
//!
//! Only the service's own activity is exported: snapshot size and build time,
//! snapshot and filter error counts, and requests per endpoint. Per-process
//! values are served as JSON by `/processes`, not as metrics.

use prometheus::{Counter, CounterVec, Gauge, Opts, Registry};

/// Collection of self-metrics registered on the service registry.
#[derive(Clone)]
pub struct SnapshotMetrics {
    pub snapshot_processes: Gauge,
    pub snapshot_build_duration_seconds: Gauge,
    pub snapshots_total: Counter,
    pub filter_errors_total: Counter,
    pub http_requests_total: CounterVec, // labels: endpoint
}

impl SnapshotMetrics {
    /// Creates all metrics and registers them on `registry`.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let snapshot_processes = Gauge::new(
            "pidstat_snapshot_processes",
            "Number of processes in the most recent snapshot",
        )?;
        let snapshot_build_duration_seconds = Gauge::new(
            "pidstat_snapshot_build_duration_seconds",
            "Time spent building the most recent snapshot",
        )?;
        let snapshots_total = Counter::new(
            "pidstat_snapshots_total",
            "Total number of snapshots built",
        )?;
        let filter_errors_total = Counter::new(
            "pidstat_filter_errors_total",
            "Total number of rejected filter requests",
        )?;
        let http_requests_total = CounterVec::new(
            Opts::new("pidstat_http_requests_total", "Total HTTP requests by endpoint"),
            &["endpoint"],
        )?;

        registry.register(Box::new(snapshot_processes.clone()))?;
        registry.register(Box::new(snapshot_build_duration_seconds.clone()))?;
        registry.register(Box::new(snapshots_total.clone()))?;
        registry.register(Box::new(filter_errors_total.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;

        Ok(Self {
            snapshot_processes,
            snapshot_build_duration_seconds,
            snapshots_total,
            filter_errors_total,
            http_requests_total,
        })
    }

    /// Records a completed snapshot build.
    pub fn observe_snapshot(&self, processes: usize, seconds: f64) {
        self.snapshot_processes.set(processes as f64);
        self.snapshot_build_duration_seconds.set(seconds);
        self.snapshots_total.inc();
    }

    pub fn record_request(&self, endpoint: &str) {
        self.http_requests_total.with_label_values(&[endpoint]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::{Encoder, TextEncoder};

    #[test]
    fn test_metrics_register_and_update() {
        let registry = Registry::new();
        let metrics = SnapshotMetrics::new(&registry).expect("metrics register");

        metrics.observe_snapshot(42, 0.25);
        metrics.observe_snapshot(40, 0.5);
        metrics.record_request("/processes");

        assert_eq!(metrics.snapshot_processes.get(), 40.0);
        assert_eq!(metrics.snapshot_build_duration_seconds.get(), 0.5);
        assert_eq!(metrics.snapshots_total.get(), 2.0);
        assert_eq!(
            metrics
                .http_requests_total
                .with_label_values(&["/processes"])
                .get(),
            1.0
        );

        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&registry.gather(), &mut buffer)
            .expect("metrics encode");
        let text = String::from_utf8(buffer).expect("utf-8 exposition");
        assert!(text.contains("pidstat_snapshots_total 2"));
        assert!(text.contains("pidstat_http_requests_total{endpoint=\"/processes\"} 1"));
    }

    #[test]
    fn test_double_registration_fails() {
        let registry = Registry::new();
        SnapshotMetrics::new(&registry).expect("first registration");
        assert!(SnapshotMetrics::new(&registry).is_err());
    }
}
