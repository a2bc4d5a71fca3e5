//! Dotted-path query parsing and resolution.
//!
//! A query path is a dot-delimited ASCII string of segments: field names,
//! nonnegative integer indices, and the `#` wildcard that applies the
//! remaining path to every element of a list. Segments are parsed lazily,
//! one per resolution step -- no segment list is materialized.

use std::fmt;

use crate::value::{Kind, Value};

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors raised while resolving a query path against a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Field access against an object lacking the key. Soft: callers
    /// running an optional check treat this as "nothing to check".
    #[error("attribute '{attribute}' not found in value")]
    NotFound { attribute: String },

    /// Index past the end of a list. Hard: aborts the enclosing check.
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A segment applied to a value of the wrong structural kind. Hard.
    #[error("query segment '{segment}' requires {expected} but value is {got}")]
    TypeMismatch {
        segment: String,
        expected: Kind,
        got: Kind,
    },
}

impl QueryError {
    /// True for the soft not-found case; every other variant aborts the
    /// enclosing check.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::NotFound { .. })
    }
}

// ──────────────────────────────────────────────
// Segments
// ──────────────────────────────────────────────

/// One parsed path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Field(&'a str),
    Index(usize),
    Wildcard,
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Index(index) => write!(f, "{}", index),
            Segment::Wildcard => f.write_str("#"),
        }
    }
}

/// Split a path into its first segment and the remaining path.
///
/// Never fails: `#` is the wildcard, a nonnegative integer is an index,
/// anything else is a field name. A numeric field name is misclassified
/// here and caught structurally during resolution.
pub fn next_segment(path: &str) -> (Segment<'_>, &str) {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, rest),
        None => (path, ""),
    };
    if head == "#" {
        return (Segment::Wildcard, rest);
    }
    match head.parse::<usize>() {
        Ok(index) => (Segment::Index(index), rest),
        Err(_) => (Segment::Field(head), rest),
    }
}

// ──────────────────────────────────────────────
// Resolution
// ──────────────────────────────────────────────

/// Resolve a dotted query path against a value.
///
/// An empty path returns the value unchanged. Traversing a `#` wildcard
/// turns the result into a list of the per-element results; nested
/// wildcards nest the lists. Resolution stops as soon as an `Unknown`
/// value is reached -- an unresolved value must not produce spurious
/// structural errors for the path below it.
///
/// Every recursive step consumes one segment, so resolution terminates
/// after at most path-length steps.
pub fn query(value: &Value, path: &str) -> Result<Value, QueryError> {
    if path.is_empty() {
        return Ok(value.clone());
    }
    if let Value::Unknown(_) = value {
        return Ok(value.clone());
    }
    let (segment, rest) = next_segment(path);
    match segment {
        Segment::Field(name) => {
            let fields = match value {
                Value::Object(fields) => fields,
                other => return Err(type_mismatch(segment, Kind::Object, other)),
            };
            let next = fields.get(name).ok_or_else(|| QueryError::NotFound {
                attribute: name.to_string(),
            })?;
            query(next, rest)
        }
        Segment::Index(index) => {
            let items = as_list(value, segment)?;
            let item = items.get(index).ok_or(QueryError::IndexOutOfBounds {
                index,
                len: items.len(),
            })?;
            query(item, rest)
        }
        Segment::Wildcard => {
            let items = as_list(value, segment)?;
            let mut gathered = Vec::with_capacity(items.len());
            for item in items {
                gathered.push(query(item, rest)?);
            }
            Ok(Value::List(gathered))
        }
    }
}

fn as_list<'v>(value: &'v Value, segment: Segment<'_>) -> Result<&'v [Value], QueryError> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(type_mismatch(segment, Kind::List, other)),
    }
}

fn type_mismatch(segment: Segment<'_>, expected: Kind, got: &Value) -> QueryError {
    QueryError::TypeMismatch {
        segment: segment.to_string(),
        expected,
        got: got.kind(),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
