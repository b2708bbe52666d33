//! Parsing of a single `/proc/<pid>/stat` line.
//!
//! Tokens are split on single spaces and matched to the schema by position.
//! A command name containing spaces (`(tmux: server)`) shifts every later
//! token; the line is not re-tokenized around the parentheses.

use std::num::ParseIntError;

use crate::record::{FieldValue, StatRecord};
use crate::schema::{self, FieldKind};

/// Where and why parsing stopped before the end of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    /// Schema position of the field that failed.
    pub index: usize,
    pub field: &'static str,
    /// The raw token that did not convert.
    pub token: String,
    pub source: ParseIntError,
}

/// A parsed record plus the truncation point, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub record: StatRecord,
    pub truncation: Option<Truncation>,
}

impl ParseOutcome {
    pub fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }

    /// Name of the first field that failed to convert.
    pub fn stopped_at(&self) -> Option<&'static str> {
        self.truncation.as_ref().map(|t| t.field)
    }

    pub fn into_record(self) -> StatRecord {
        self.record
    }
}

/// Parses one status line into a record.
///
/// `comm` and `state` are stored verbatim. Any other token that does not
/// parse as an `i64` ends parsing; the fields set so far are kept and the
/// failure is reported in [`ParseOutcome::truncation`]. Tokens past the end
/// of the schema are ignored.
pub fn parse_stat_line(line: &str) -> ParseOutcome {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut record = StatRecord::default();
    let mut truncation = None;

    for (token, spec) in line.split(' ').zip(schema::fields()) {
        let value = match spec.kind {
            FieldKind::Text => FieldValue::Text(token.to_string()),
            FieldKind::Integer => match token.parse::<i64>() {
                Ok(v) => FieldValue::Integer(v),
                Err(source) => {
                    truncation = Some(Truncation {
                        index: spec.index,
                        field: spec.name,
                        token: token.to_string(),
                        source,
                    });
                    break;
                }
            },
        };
        record.push(value);
    }

    ParseOutcome { record, truncation }
}
