//! Builders for expected-value sets.
//!
//! Rule authors describe the values a query is allowed to return with
//! native literals; these constructors wrap them into [`Value`]s. They
//! are conveniences for building `expected` sets and take no part in
//! query evaluation itself.

use rust_decimal::Decimal;

use crate::value::{Value, ValueError};

/// Wrap string literals: `strings(["a", "b", "c"])`.
pub fn strings<I, S>(vals: I) -> Vec<Value>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    vals.into_iter().map(|s| Value::String(s.into())).collect()
}

/// Wrap numeric literals: `numbers([1, 2, 3])`. Integer literals promote
/// losslessly; fractional values go through a [`Decimal`] constructor.
pub fn numbers<I, N>(vals: I) -> Vec<Value>
where
    I: IntoIterator<Item = N>,
    N: Into<Decimal>,
{
    vals.into_iter().map(|n| Value::Number(n.into())).collect()
}

/// Wrap boolean literals.
pub fn booleans<I>(vals: I) -> Vec<Value>
where
    I: IntoIterator<Item = bool>,
{
    vals.into_iter().map(Value::Bool).collect()
}

/// Wrap composite literals expressed as JSON: objects, lists, or any mix.
///
/// `complex([json!([1, 2, 3])])` builds one expected value that is the
/// whole list `[1, 2, 3]` -- the form a list-valued attribute is compared
/// against.
pub fn complex<I>(vals: I) -> Result<Vec<Value>, ValueError>
where
    I: IntoIterator<Item = serde_json::Value>,
{
    vals.into_iter().map(|v| Value::from_json(&v)).collect()
}
