//! Typed per-process records.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use crate::schema::{self, FieldKind, FIELD_COUNT, FIELD_NAMES};

/// A single parsed field: either a signed integer or raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Text(_) => FieldKind::Text,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Integer(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Parsed contents of one `/proc/<pid>/stat` line.
///
/// Values are stored by schema position, so a record always holds a
/// contiguous prefix of the schema. A record shorter than [`FIELD_COUNT`]
/// comes from a line that ended early or stopped on a conversion failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatRecord {
    values: Vec<FieldValue>,
}

impl StatRecord {
    /// Appends the value for the next schema slot.
    ///
    /// Returns `false` (and stores nothing) when the schema is already full
    /// or the value has the wrong kind for the slot.
    pub(crate) fn push(&mut self, value: FieldValue) -> bool {
        match schema::field_at(self.values.len()) {
            Some(spec) if spec.kind == value.kind() => {
                self.values.push(value);
                true
            }
            _ => false,
        }
    }

    /// Returns the value of a field by name.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        schema::lookup(field).and_then(|spec| self.values.get(spec.index))
    }

    /// Returns the value at a schema position.
    pub fn get_index(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_integer)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every schema field is present.
    pub fn is_complete(&self) -> bool {
        self.values.len() == FIELD_COUNT
    }

    /// Iterates over present fields in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        FIELD_NAMES.iter().copied().zip(self.values.iter())
    }
}

impl Serialize for StatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
