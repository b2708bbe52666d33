//! HTTP endpoint handlers for the query service.
//!
//! This module provides handlers for all HTTP endpoints:
//! - `/`: Endpoint index
//! - `/processes`: Filtered snapshot as JSON
//! - `/processes/{pid}`: Single record as JSON
//! - `/health`: Process root availability
//! - `/metrics`: Prometheus self-metrics

pub mod error;
pub mod health;
pub mod metrics;
pub mod processes;
pub mod root;

// Re-export handlers
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use processes::{process_handler, processes_handler};
pub use root::root_handler;
