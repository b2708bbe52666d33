//! Error responses shared by the HTTP handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pidstat::{FilterError, PidstatError};
use serde_json::json;

/// Error type for handler failures, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadFilter(FilterError),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadFilter(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(e: FilterError) -> Self {
        ApiError::BadFilter(e)
    }
}

impl From<PidstatError> for ApiError {
    fn from(e: PidstatError) -> Self {
        match e {
            PidstatError::Filter(e) => ApiError::BadFilter(e),
            e @ PidstatError::StatUnreadable { .. } => ApiError::NotFound(e.to_string()),
            e => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadFilter(e) => e.to_string(),
            ApiError::NotFound(m) | ApiError::Internal(m) => m,
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let bad: ApiError = FilterError::UnknownOperator("ge".into()).into();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let missing: ApiError = PidstatError::StatUnreadable {
            pid: "9".into(),
            path: "/proc/9/stat".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let root: ApiError = PidstatError::RootUnreadable {
            path: "/proc".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        }
        .into();
        assert_eq!(root.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
