//! Filter compilation and application over snapshots.
//!
//! A filter is given either as a predicate over [`StatRecord`] or as a
//! field name plus a condition string `<operator>:<value>`, with operator
//! one of `eq`, `ne`, `gt`, `lt`. Both forms compile to one evaluator.
//!
//! Text fields (`comm`, `state`) compare as strings for `eq`/`ne` and never
//! satisfy `gt`/`lt`. The literal must parse as an integer even when the
//! target is a text field. A record missing the field never matches.

use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;
use crate::record::{FieldValue, StatRecord};
use crate::schema::{self, FieldKind};
use crate::snapshot::Snapshot;

/// Boxed record predicate.
pub type Predicate = Box<dyn Fn(&StatRecord) -> bool + Send + Sync>;

/// Comparison operator of a condition string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Operator::Eq),
            "ne" => Ok(Operator::Ne),
            "gt" => Ok(Operator::Gt),
            "lt" => Ok(Operator::Lt),
            other => Err(FilterError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
        };
        f.write_str(s)
    }
}

/// Parsed `<operator>:<value>` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub operator: Operator,
    /// Literal as written, used for text comparisons.
    pub literal: String,
    /// Literal parsed as an integer, used for numeric comparisons.
    pub value: i64,
}

impl FromStr for Condition {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let &[operator, literal] = parts.as_slice() else {
            return Err(FilterError::MalformedCondition(s.to_string()));
        };

        let value = literal
            .parse::<i64>()
            .map_err(|source| FilterError::InvalidLiteral {
                literal: literal.to_string(),
                source,
            })?;
        let operator = operator.parse()?;

        Ok(Condition {
            operator,
            literal: literal.to_string(),
            value,
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.operator, self.literal)
    }
}

/// What to filter by.
pub enum FilterSpec {
    Predicate(Predicate),
    FieldCondition { field: String, condition: Condition },
}

impl fmt::Debug for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSpec::Predicate(_) => f.write_str("Predicate(..)"),
            FilterSpec::FieldCondition { field, condition } => f
                .debug_struct("FieldCondition")
                .field("field", field)
                .field("condition", condition)
                .finish(),
        }
    }
}

/// One untyped argument at the filter call boundary.
pub enum FilterArg {
    Predicate(Predicate),
    Text(String),
}

impl From<&str> for FilterArg {
    fn from(s: &str) -> Self {
        FilterArg::Text(s.to_string())
    }
}

impl From<String> for FilterArg {
    fn from(s: String) -> Self {
        FilterArg::Text(s)
    }
}

impl FilterSpec {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&StatRecord) -> bool + Send + Sync + 'static,
    {
        FilterSpec::Predicate(Box::new(f))
    }

    /// Builds a field condition, validating the field and condition string.
    pub fn field_condition(field: &str, condition: &str) -> Result<Self, FilterError> {
        let condition = condition.parse()?;
        if schema::lookup(field).is_none() {
            return Err(FilterError::UnknownField(field.to_string()));
        }
        Ok(FilterSpec::FieldCondition {
            field: field.to_string(),
            condition,
        })
    }

    /// Resolves a list of call arguments into a spec.
    ///
    /// One predicate selects predicate mode, a field name and a condition
    /// string select field mode. Any other count is an arity error.
    pub fn from_args(args: Vec<FilterArg>) -> Result<Self, FilterError> {
        let count = args.len();
        let mut args = args.into_iter();
        match (args.next(), args.next(), count) {
            (Some(FilterArg::Predicate(p)), None, 1) => Ok(FilterSpec::Predicate(p)),
            (Some(FilterArg::Text(field)), Some(FilterArg::Text(condition)), 2) => {
                Self::field_condition(&field, &condition)
            }
            (_, _, 1 | 2) => Err(FilterError::InvalidArguments),
            _ => Err(FilterError::Arity(count)),
        }
    }
}

/// Compiled evaluator.
pub struct Filter {
    evaluator: Predicate,
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

impl Filter {
    /// Compiles a spec into a single evaluator.
    pub fn compile(spec: FilterSpec) -> Result<Self, FilterError> {
        let evaluator = match spec {
            FilterSpec::Predicate(p) => p,
            FilterSpec::FieldCondition { field, condition } => {
                let spec = schema::lookup(&field).ok_or(FilterError::UnknownField(field))?;
                compile_condition(spec.index, spec.kind, condition)
            }
        };
        Ok(Filter { evaluator })
    }

    pub fn matches(&self, record: &StatRecord) -> bool {
        (self.evaluator)(record)
    }

    /// Returns a new snapshot with the matching entries.
    pub fn apply(&self, snapshot: &Snapshot) -> Snapshot {
        snapshot
            .iter()
            .filter(|(_, record)| self.matches(record))
            .map(|(pid, record)| (pid.to_string(), record.clone()))
            .collect()
    }
}

fn compile_condition(index: usize, kind: FieldKind, condition: Condition) -> Predicate {
    let Condition {
        operator,
        literal,
        value,
    } = condition;

    match (kind, operator) {
        (FieldKind::Text, Operator::Eq) => Box::new(move |r: &StatRecord| {
            matches!(r.get_index(index), Some(FieldValue::Text(s)) if *s == literal)
        }),
        (FieldKind::Text, Operator::Ne) => Box::new(move |r: &StatRecord| {
            matches!(r.get_index(index), Some(FieldValue::Text(s)) if *s != literal)
        }),
        (FieldKind::Text, Operator::Gt | Operator::Lt) => Box::new(|_: &StatRecord| false),
        (FieldKind::Integer, op) => Box::new(move |r: &StatRecord| {
            let Some(FieldValue::Integer(v)) = r.get_index(index) else {
                return false;
            };
            match op {
                Operator::Eq => *v == value,
                Operator::Ne => *v != value,
                Operator::Gt => *v > value,
                Operator::Lt => *v < value,
            }
        }),
    }
}

/// Filters a snapshot with a spec.
pub fn filter(snapshot: &Snapshot, spec: FilterSpec) -> Result<Snapshot, FilterError> {
    Ok(Filter::compile(spec)?.apply(snapshot))
}

/// Filters a snapshot with a field name and condition string.
pub fn filter_by(snapshot: &Snapshot, field: &str, condition: &str) -> Result<Snapshot, FilterError> {
    filter(snapshot, FilterSpec::field_condition(field, condition)?)
}
