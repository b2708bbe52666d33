//! Process enumeration and point-in-time snapshots.
//!
//! [`ProcStatReader`] reads `<root>/<pid>/stat` for every numeric entry
//! under a process root and assembles a [`Snapshot`]. A process that exits
//! between listing and reading is skipped without error.

use ahash::AHashMap as HashMap;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

use crate::error::PidstatError;
use crate::filter::Filter;
use crate::parser::{parse_stat_line, ParseOutcome};
use crate::record::StatRecord;

/// Conventional location of the live process information root.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Pattern for directory entries that name a process. ASCII digits only;
/// `\d` would also accept other Unicode decimal digits.
const PID_PATTERN: &str = r"^[0-9]+$";

/// Immutable table of process identifier -> parsed record.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: HashMap<String, StatRecord>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, pid: &str) -> Option<&StatRecord> {
        self.entries.get(pid)
    }

    pub fn contains(&self, pid: &str) -> bool {
        self.entries.contains_key(pid)
    }

    /// Iterates over entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatRecord)> + '_ {
        self.entries.iter().map(|(pid, record)| (pid.as_str(), record))
    }

    /// Identifiers sorted by numeric value. Keys that do not fit a `u64`
    /// sort last, by text.
    pub fn pids(&self) -> Vec<&str> {
        let mut pids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        pids.sort_by_key(|pid| (pid.parse::<u64>().unwrap_or(u64::MAX), *pid));
        pids
    }

    /// Returns a new snapshot holding only the entries that match `filter`.
    pub fn filter(&self, filter: &Filter) -> Snapshot {
        filter.apply(self)
    }
}

impl FromIterator<(String, StatRecord)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, StatRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(pid, record)| other.get(pid) == Some(record))
    }
}

impl Eq for Snapshot {}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for pid in self.pids() {
            if let Some(record) = self.entries.get(pid) {
                map.serialize_entry(pid, record)?;
            }
        }
        map.end()
    }
}

/// Reads process status records below a configurable root.
#[derive(Debug, Clone)]
pub struct ProcStatReader {
    root: PathBuf,
}

impl Default for ProcStatReader {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcStatReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the status source for `pid`.
    pub fn stat_path(&self, pid: &str) -> PathBuf {
        self.root.join(pid).join("stat")
    }

    /// Parses one process's record.
    pub fn get(&self, pid: &str) -> Result<StatRecord, PidstatError> {
        self.get_outcome(pid).map(ParseOutcome::into_record)
    }

    /// Parses one process's record, keeping the truncation point.
    pub fn get_outcome(&self, pid: &str) -> Result<ParseOutcome, PidstatError> {
        let path = self.stat_path(pid);
        let line = read_first_line(&path).map_err(|source| PidstatError::StatUnreadable {
            pid: pid.to_string(),
            path: path.display().to_string(),
            source,
        })?;
        Ok(parse_stat_line(&line))
    }

    /// Builds a snapshot of every process under the root.
    ///
    /// Fails only if the identifier pattern cannot be compiled or the root
    /// cannot be listed. Processes whose status source cannot be read are
    /// left out.
    pub fn get_all(&self) -> Result<Snapshot, PidstatError> {
        let start = Instant::now();
        let pid_pattern = Regex::new(PID_PATTERN)?;

        let root_err = |source: io::Error| PidstatError::RootUnreadable {
            path: self.root.display().to_string(),
            source,
        };
        let entries = fs::read_dir(&self.root).map_err(root_err)?;

        let mut snapshot = HashMap::new();
        let mut skipped = 0usize;
        let mut truncated = 0usize;

        for entry in entries {
            let entry = entry.map_err(root_err)?;
            let name = entry.file_name();
            let pid = match name.to_str() {
                Some(v) if pid_pattern.is_match(v) => v,
                _ => continue,
            };

            let outcome = match self.get_outcome(pid) {
                Ok(v) => v,
                Err(e) => {
                    debug!("Skipping pid {}: {}", pid, e);
                    skipped += 1;
                    continue;
                }
            };
            if let Some(t) = &outcome.truncation {
                debug!(
                    "Record for pid {} stopped at field {} (token {:?})",
                    pid, t.field, t.token
                );
                truncated += 1;
            }
            snapshot.insert(pid.to_string(), outcome.into_record());
        }

        debug!(
            "Snapshot of {} built: {} processes, {} skipped, {} truncated in {:.2}ms",
            self.root.display(),
            snapshot.len(),
            skipped,
            truncated,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Snapshot { entries: snapshot })
    }
}

/// Reads the first line of a file, including its terminator if present.
fn read_first_line(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    reader.read_until(b'\n', &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
