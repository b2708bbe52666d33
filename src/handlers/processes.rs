//! Snapshot query endpoints.
//!
//! `/processes` builds a fresh snapshot per request and applies an optional
//! `field` + `condition` filter. `/processes/{pid}` returns one record.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use pidstat::{Filter, FilterArg, FilterError, FilterSpec, Snapshot, StatRecord};
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, instrument, warn};

use crate::handlers::error::ApiError;
use crate::state::SharedState;

/// Query parameters for `/processes`.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessQuery {
    pub field: Option<String>,
    pub condition: Option<String>,
}

impl ProcessQuery {
    /// Compiles the query into a filter. No parameters means no filter;
    /// exactly one of the two is an argument error.
    pub fn compile(self) -> Result<Option<Filter>, FilterError> {
        let args: Vec<FilterArg> = [self.field, self.condition]
            .into_iter()
            .flatten()
            .map(FilterArg::from)
            .collect();
        if args.is_empty() {
            return Ok(None);
        }
        let spec = FilterSpec::from_args(args)?;
        Filter::compile(spec).map(Some)
    }
}

/// Builds a snapshot off the async runtime and records its metrics.
async fn build_snapshot(state: &SharedState) -> Result<Snapshot, ApiError> {
    let start = Instant::now();
    let reader = state.reader.clone();
    let snapshot = tokio::task::spawn_blocking(move || reader.get_all())
        .await
        .map_err(|e| ApiError::Internal(format!("snapshot task failed: {}", e)))??;

    let elapsed = start.elapsed().as_secs_f64();
    state.metrics.observe_snapshot(snapshot.len(), elapsed);
    debug!(
        "Snapshot built with {} processes in {:.2}ms",
        snapshot.len(),
        elapsed * 1000.0
    );
    Ok(snapshot)
}

/// Handler for the /processes endpoint.
#[instrument(skip(state))]
pub async fn processes_handler(
    State(state): State<SharedState>,
    Query(query): Query<ProcessQuery>,
) -> Result<Json<Snapshot>, ApiError> {
    debug!("Processing /processes request");
    state.metrics.record_request("/processes");

    // Reject bad filters before touching the process root
    let filter = query.compile().map_err(|e| {
        warn!("Rejected filter: {}", e);
        state.metrics.filter_errors_total.inc();
        ApiError::from(e)
    })?;

    let snapshot = build_snapshot(&state).await?;
    let result = match filter {
        Some(f) => f.apply(&snapshot),
        None => snapshot,
    };
    Ok(Json(result))
}

/// Handler for the /processes/{pid} endpoint.
#[instrument(skip(state))]
pub async fn process_handler(
    State(state): State<SharedState>,
    Path(pid): Path<String>,
) -> Result<Json<StatRecord>, ApiError> {
    debug!("Processing /processes/{} request", pid);
    state.metrics.record_request("/processes/{pid}");

    if pid.is_empty() || !pid.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::NotFound(format!("no process with id '{}'", pid)));
    }

    let reader = state.reader.clone();
    let record = tokio::task::spawn_blocking(move || reader.get(&pid))
        .await
        .map_err(|e| ApiError::Internal(format!("read task failed: {}", e)))??;
    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;
    use axum::{http::StatusCode, response::IntoResponse};
    use std::fs;
    use tempfile::tempdir;

    fn write_stat(root: &std::path::Path, pid: &str, content: &str) {
        let dir = root.join(pid);
        fs::create_dir_all(&dir).expect("Failed to create pid dir");
        fs::write(dir.join("stat"), content).expect("Failed to write stat file");
    }

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    fn query(field: Option<&str>, condition: Option<&str>) -> ProcessQuery {
        ProcessQuery {
            field: field.map(String::from),
            condition: condition.map(String::from),
        }
    }

    #[test]
    fn test_empty_query_has_no_filter() {
        assert!(query(None, None).compile().expect("no filter").is_none());
    }

    #[test]
    fn test_full_query_compiles() {
        let filter = query(Some("rss"), Some("gt:300"))
            .compile()
            .expect("valid filter");
        assert!(filter.is_some());
    }

    #[test]
    fn test_partial_query_rejected() {
        assert_eq!(
            query(Some("rss"), None).compile().map(|f| f.is_some()),
            Err(FilterError::InvalidArguments)
        );
        assert_eq!(
            query(None, Some("gt:300")).compile().map(|f| f.is_some()),
            Err(FilterError::InvalidArguments)
        );
    }

    #[test]
    fn test_bad_condition_rejected() {
        assert_eq!(
            query(Some("rss"), Some("ge:300")).compile().map(|f| f.is_some()),
            Err(FilterError::UnknownOperator("ge".into()))
        );
    }

    #[tokio::test]
    async fn test_processes_handler_filters_snapshot() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_stat(dir.path(), "1", "1 (init) S 0 1\n");
        write_stat(dir.path(), "300", "300 (sshd) S 1 300\n");
        let state = test_state(dir.path());

        let Json(all) = processes_handler(State(state.clone()), Query(ProcessQuery::default()))
            .await
            .expect("unfiltered snapshot");
        assert_eq!(all.pids(), vec!["1", "300"]);

        let Json(matched) =
            processes_handler(State(state.clone()), Query(query(Some("ppid"), Some("eq:0"))))
                .await
                .expect("filtered snapshot");
        assert_eq!(matched.pids(), vec!["1"]);
        assert_eq!(state.metrics.snapshots_total.get(), 2.0);
    }

    #[tokio::test]
    async fn test_processes_handler_rejects_bad_filter() {
        let dir = tempdir().expect("Failed to create temp dir");
        let state = test_state(dir.path());

        let err = processes_handler(State(state.clone()), Query(query(Some("rss"), None)))
            .await
            .expect_err("partial query");
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
        assert_eq!(state.metrics.filter_errors_total.get(), 1.0);
        // Rejected before any snapshot is built
        assert_eq!(state.metrics.snapshots_total.get(), 0.0);
    }

    #[tokio::test]
    async fn test_processes_handler_missing_root_is_internal_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let state = test_state(&dir.path().join("absent"));

        let err = processes_handler(State(state), Query(ProcessQuery::default()))
            .await
            .expect_err("root cannot be listed");
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_process_handler_reads_record() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_stat(dir.path(), "1", "1 (init) S 0\n");
        let state = test_state(dir.path());

        let Json(record) = process_handler(State(state.clone()), Path("1".to_string()))
            .await
            .expect("record");
        assert_eq!(record.text("comm"), Some("(init)"));

        let err = process_handler(State(state), Path("42".to_string()))
            .await
            .expect_err("no such process");
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_process_handler_rejects_non_digit_ids() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path().join("proc");
        // Readable stat files that a non-digit id would otherwise reach
        write_stat(&root, "self", "1 (init) S 0\n");
        write_stat(dir.path(), "outside", "2 (outside) S 0\n");
        let state = test_state(&root);

        for pid in ["self", "../outside", "\u{0661}", ""] {
            let err = process_handler(State(state.clone()), Path(pid.to_string()))
                .await
                .expect_err("non-digit id");
            assert_eq!(status_of(err), StatusCode::NOT_FOUND, "pid {:?}", pid);
        }
    }
}
