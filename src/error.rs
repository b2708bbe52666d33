//! Error types for snapshot building and filter compilation.

use std::num::ParseIntError;

/// Errors raised while compiling a filter specification.
///
/// These are configuration mistakes made by the caller. They are reported
/// before any record is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("malformed condition '{0}': expected <operator>:<value>")]
    MalformedCondition(String),

    #[error("invalid literal '{literal}' in condition: {source}")]
    InvalidLiteral {
        literal: String,
        source: ParseIntError,
    },

    #[error("unknown operator '{0}': expected one of eq, ne, gt, lt")]
    UnknownOperator(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("filter takes a predicate or a field name and a condition, got {0} argument(s)")]
    Arity(usize),

    #[error("filter arguments must be a single predicate or a field name followed by a condition")]
    InvalidArguments,
}

/// Errors that abort a `get`/`get_all` call or a filter request.
#[derive(Debug, thiserror::Error)]
pub enum PidstatError {
    /// The process root could not be opened or listed.
    #[error("failed to list process root {path}: {source}")]
    RootUnreadable {
        path: String,
        source: std::io::Error,
    },

    /// A single status source could not be opened on a direct lookup.
    #[error("failed to read {path} for pid {pid}: {source}")]
    StatUnreadable {
        pid: String,
        path: String,
        source: std::io::Error,
    },

    #[error("invalid process id pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Filter(#[from] FilterError),
}
