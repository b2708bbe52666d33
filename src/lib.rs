//! pidstat - queryable snapshots of `/proc/<pid>/stat`
//!
//! This library parses the kernel's per-process status lines into typed
//! records, collects them into point-in-time snapshots and filters those
//! snapshots with either a predicate or a compact `field` + `op:value`
//! condition.
//!
//! # Features
//!
//! - **Typed records**: `comm` and `state` are text, every other field is an `i64`
//! - **Soft truncation**: a field that fails conversion ends the record, and the
//!   truncation point is reported instead of raising an error
//! - **Race tolerant snapshots**: processes that exit mid-scan are skipped
//! - **Two filter modes**: closures or `eq`/`ne`/`gt`/`lt` condition strings
//!
//! # Usage
//!
//! ```rust,no_run
//! use pidstat::{filter_by, FilterSpec, ProcStatReader};
//!
//! let reader = ProcStatReader::default();
//!
//! // Single process
//! let init = reader.get("1")?;
//! println!("comm={:?} ppid={:?}", init.text("comm"), init.integer("ppid"));
//!
//! // Whole system, filtered by resident pages
//! let snapshot = reader.get_all()?;
//! let large = filter_by(&snapshot, "rss", "gt:25600")?;
//! for pid in large.pids() {
//!     println!("{}", pid);
//! }
//!
//! // Same thing with a predicate
//! let large = pidstat::filter(
//!     &snapshot,
//!     FilterSpec::predicate(|r| r.integer("rss").is_some_and(|rss| rss > 25600)),
//! )?;
//! # Ok::<(), pidstat::PidstatError>(())
//! ```

pub mod error;
pub mod filter;
pub mod parser;
pub mod record;
pub mod schema;
pub mod snapshot;

// Re-export main types for convenience
pub use error::{FilterError, PidstatError};
pub use filter::{filter, filter_by, Condition, Filter, FilterArg, FilterSpec, Operator, Predicate};
pub use parser::{parse_stat_line, ParseOutcome, Truncation};
pub use record::{FieldValue, StatRecord};
pub use schema::{FieldKind, FieldSpec, FIELD_COUNT, FIELD_NAMES, TEXT_FIELDS};
pub use snapshot::{ProcStatReader, Snapshot, DEFAULT_PROC_ROOT};
