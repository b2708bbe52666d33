//! Fixed field layout of `/proc/<pid>/stat`.
//!
//! Field names and order are taken from `man 5 proc`. Position in
//! [`FIELD_NAMES`] is the only thing that ties a raw token to a field.
//! `comm` and `state` are text; every other field is a signed integer.

use ahash::AHashMap as HashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fields in the schema.
pub const FIELD_COUNT: usize = 44;

/// Field names in the order the kernel writes them.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    /* 0  */ "pid", "comm", "state", "ppid", "pgrp",
    /* 5  */ "session", "tty_nr", "tpgid", "flags", "minflt",
    /* 10 */ "cminflt", "majflt", "cmajflt", "utime", "stime",
    /* 15 */ "cutime", "cstime", "priority", "nice", "num_threads",
    /* 20 */ "itrealvalue", "starttime", "vsize", "rss", "rsslim",
    /* 25 */ "startcode", "endcode", "startstack", "kstkesp", "kstkeip",
    /* 30 */ "signal", "blocked", "sigignore", "sigcatch", "wchan",
    /* 35 */ "nswap", "cnswap", "exit_signal", "processor", "rt_priority",
    /* 40 */ "policy", "delayacct_blkio_ticks", "guest_time", "cguest_time",
];

/// The only fields stored as raw text.
pub const TEXT_FIELDS: [&str; 2] = ["comm", "state"];

/// Value kind expected for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Text,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Integer => f.write_str("integer"),
            FieldKind::Text => f.write_str("text"),
        }
    }
}

/// One named slot in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub index: usize,
    pub name: &'static str,
    pub kind: FieldKind,
}

fn kind_of(name: &str) -> FieldKind {
    if TEXT_FIELDS.contains(&name) {
        FieldKind::Text
    } else {
        FieldKind::Integer
    }
}

/// Name -> slot lookup table, built once.
static FIELDS: Lazy<HashMap<&'static str, FieldSpec>> = Lazy::new(|| {
    FIELD_NAMES
        .iter()
        .enumerate()
        .map(|(index, &name)| {
            (
                name,
                FieldSpec {
                    index,
                    name,
                    kind: kind_of(name),
                },
            )
        })
        .collect()
});

/// Looks up a field by name.
pub fn lookup(name: &str) -> Option<FieldSpec> {
    FIELDS.get(name).copied()
}

/// Returns the expected value kind for a field name.
pub fn field_kind(name: &str) -> Option<FieldKind> {
    lookup(name).map(|spec| spec.kind)
}

/// Returns the field at a schema position.
pub fn field_at(index: usize) -> Option<FieldSpec> {
    FIELD_NAMES.get(index).map(|&name| FieldSpec {
        index,
        name,
        kind: kind_of(name),
    })
}

/// Iterates over all fields in schema order.
pub fn fields() -> impl Iterator<Item = FieldSpec> {
    (0..FIELD_COUNT).filter_map(field_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_positions() {
        assert_eq!(FIELD_NAMES.len(), FIELD_COUNT);
        assert_eq!(FIELD_NAMES[0], "pid");
        assert_eq!(FIELD_NAMES[3], "ppid");
        assert_eq!(FIELD_NAMES[23], "rss");
        assert_eq!(FIELD_NAMES[FIELD_COUNT - 1], "cguest_time");
    }

    #[test]
    fn test_only_comm_and_state_are_text() {
        let text: Vec<_> = fields()
            .filter(|f| f.kind == FieldKind::Text)
            .map(|f| f.name)
            .collect();
        assert_eq!(text, vec!["comm", "state"]);
    }

    #[test]
    fn test_lookup_matches_position() {
        for (i, name) in FIELD_NAMES.iter().enumerate() {
            let spec = lookup(name).expect("every schema name resolves");
            assert_eq!(spec.index, i);
            assert_eq!(field_at(i), Some(spec));
        }
        assert_eq!(field_kind("rss"), Some(FieldKind::Integer));
        assert_eq!(field_kind("state"), Some(FieldKind::Text));
    }

    #[test]
    fn test_unknown_names() {
        assert!(lookup("RSS").is_none());
        assert!(lookup("").is_none());
        assert!(field_at(FIELD_COUNT).is_none());
    }
}
