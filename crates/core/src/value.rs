//! Runtime value model for configuration data.
//!
//! [`Value`] is the tagged-union representation every other component
//! operates on. Unresolved configuration is modelled explicitly with
//! `Value::Unknown`, which carries only the kind the value will
//! eventually have. All numeric values use `rust_decimal::Decimal` --
//! never `f64`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors converting foreign data into a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// A JSON number does not fit in a `Decimal`.
    #[error("number '{text}' does not fit a decimal value")]
    NumberOutOfRange { text: String },
}

// ──────────────────────────────────────────────
// Kinds
// ──────────────────────────────────────────────

/// The structural kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    List,
    Object,
    /// Declared kind of an unknown whose eventual kind was not declared.
    Dynamic,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::List => "list",
            Kind::Object => "object",
            Kind::Dynamic => "dynamic",
        })
    }
}

// ──────────────────────────────────────────────
// Values
// ──────────────────────────────────────────────

/// A dynamically typed configuration value.
///
/// `Unknown` carries no concrete payload -- only that a value of the
/// declared kind will exist once the configuration is resolvable.
/// Structural equality is derived: `Null` equals only `Null`, scalars
/// compare by value (numbers numerically, so `1` equals `1.0`), lists
/// elementwise in order, objects by key and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Unknown(Kind),
    Bool(bool),
    Number(Decimal),
    String(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// The structural kind of this value. For `Unknown` this is the
    /// declared kind the value will eventually have.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Unknown(kind) => *kind,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::List(_) => Kind::List,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Returns a human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Unknown(_) => "unknown",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// True for every value except `Unknown`.
    pub fn is_known(&self) -> bool {
        !matches!(self, Value::Unknown(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrows the elements when this value is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Build a value from JSON. JSON numbers go through their decimal
    /// string form so no `f64` rounding creeps in. JSON cannot express
    /// `Unknown`; unknowns only enter through the external expression
    /// evaluator.
    pub fn from_json(json: &serde_json::Value) -> Result<Value, ValueError> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => {
                let text = n.to_string();
                let d = Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .map_err(|_| ValueError::NumberOutOfRange { text: text.clone() })?;
                Ok(Value::Number(d))
            }
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Array(items) => {
                let items: Result<Vec<Value>, ValueError> =
                    items.iter().map(Value::from_json).collect();
                Ok(Value::List(items?))
            }
            serde_json::Value::Object(fields) => {
                let mut map = BTreeMap::new();
                for (k, v) in fields {
                    map.insert(k.clone(), Value::from_json(v)?);
                }
                Ok(Value::Object(map))
            }
        }
    }

    /// Convert back to JSON. Returns `None` when the value contains an
    /// `Unknown` anywhere, since JSON has no representation for it.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Value::Null => Some(serde_json::Value::Null),
            Value::Unknown(_) => None,
            Value::Bool(b) => Some(serde_json::Value::Bool(*b)),
            Value::Number(d) => {
                let n = d
                    .to_i64()
                    .filter(|_| d.is_integer())
                    .map(serde_json::Number::from)
                    .or_else(|| d.to_f64().and_then(serde_json::Number::from_f64))?;
                Some(serde_json::Value::Number(n))
            }
            Value::String(s) => Some(serde_json::Value::String(s.clone())),
            Value::List(items) => {
                let items: Option<Vec<serde_json::Value>> =
                    items.iter().map(Value::to_json).collect();
                Some(serde_json::Value::Array(items?))
            }
            Value::Object(fields) => {
                let mut map = serde_json::Map::new();
                for (k, v) in fields {
                    map.insert(k.clone(), v.to_json()?);
                }
                Some(serde_json::Value::Object(map))
            }
        }
    }
}

// ──────────────────────────────────────────────
// Diagnostic rendering
// ──────────────────────────────────────────────

/// Deterministic rendering used by every predicate's failure message:
/// booleans as `true`/`false`, integral numbers without a decimal point,
/// non-integral numbers in fixed notation with trailing zeros trimmed,
/// strings verbatim without quoting, lists bracketed and comma-joined
/// recursively, objects in key order.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Unknown(kind) => write!(f, "(unknown {})", kind),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(d) => write!(f, "{}", d.normalize()),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(fields) => {
                f.write_str("{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
