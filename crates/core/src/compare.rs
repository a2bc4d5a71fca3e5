//! Comparison predicates over query results.
//!
//! Every predicate is a stateless function with the [`ComparePredicate`]
//! signature: it receives the query result (`None` when the queried path
//! was not found) and the expected values, and returns a pass/fail
//! verdict carrying a rendered diagnostic message. A mismatch between
//! actual and expected values is a normal verdict; [`CompareError`] is
//! reserved for structural misuse of a predicate.
//!
//! Absence policy: the base predicates treat an absent result as "nothing
//! to check" and pass vacuously. The `*_and_must_exist` wrappers make
//! absence itself the failure, reported with a fixed message distinct
//! from a value mismatch.

use crate::value::{Kind, Value};

// ──────────────────────────────────────────────
// Verdicts and errors
// ──────────────────────────────────────────────

/// Verdict of a comparison predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Pass,
    Fail(String),
}

impl Comparison {
    pub fn passed(&self) -> bool {
        matches!(self, Comparison::Pass)
    }

    /// The rendered diagnostic message of a failed comparison.
    pub fn message(&self) -> Option<&str> {
        match self {
            Comparison::Pass => None,
            Comparison::Fail(message) => Some(message),
        }
    }
}

/// Structural misuse of a predicate. Hard: aborts the enclosing check
/// instead of becoming a lint finding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    /// An each-element predicate was invoked on a non-list result.
    #[error("expected a list but got {got}")]
    NotAList { got: String },
}

/// A comparison predicate: query result (if found) and expected values
/// in, verdict out. Plain function pointers keep predicates stateless
/// process-lifetime constants that rule descriptors carry by value; new
/// predicates slot in without touching the evaluator.
pub type ComparePredicate = fn(Option<&Value>, &[Value]) -> Result<Comparison, CompareError>;

const NOT_FOUND: &str = "returned value does not exist but expected";

// ──────────────────────────────────────────────
// Existence and identity predicates
// ──────────────────────────────────────────────

/// Pass iff the queried path resolved to a value.
pub fn exists(got: Option<&Value>, _expected: &[Value]) -> Result<Comparison, CompareError> {
    match got {
        Some(_) => Ok(Comparison::Pass),
        None => Ok(Comparison::Fail(NOT_FOUND.to_string())),
    }
}

/// Pass iff the queried path did not resolve to a value.
pub fn not_exists(got: Option<&Value>, _expected: &[Value]) -> Result<Comparison, CompareError> {
    match got {
        Some(_) => Ok(Comparison::Fail(
            "returned value exists but not expected".to_string(),
        )),
        None => Ok(Comparison::Pass),
    }
}

pub fn is_null(got: Option<&Value>, _expected: &[Value]) -> Result<Comparison, CompareError> {
    match got {
        Some(value) if !value.is_null() => Ok(Comparison::Fail(
            "returned value is not null but expected to be".to_string(),
        )),
        _ => Ok(Comparison::Pass),
    }
}

pub fn is_not_null(got: Option<&Value>, _expected: &[Value]) -> Result<Comparison, CompareError> {
    match got {
        Some(value) if value.is_null() => Ok(Comparison::Fail(
            "returned value is null but not expected to be".to_string(),
        )),
        _ => Ok(Comparison::Pass),
    }
}

pub fn is_known(got: Option<&Value>, _expected: &[Value]) -> Result<Comparison, CompareError> {
    match got {
        Some(value) if !value.is_known() => {
            Ok(Comparison::Fail("returned value is unknown".to_string()))
        }
        _ => Ok(Comparison::Pass),
    }
}

pub fn is_not_known(got: Option<&Value>, _expected: &[Value]) -> Result<Comparison, CompareError> {
    match got {
        Some(value) if value.is_known() => {
            Ok(Comparison::Fail("returned value is known".to_string()))
        }
        _ => Ok(Comparison::Pass),
    }
}

// ──────────────────────────────────────────────
// Membership predicates
// ──────────────────────────────────────────────

/// Pass iff the result, or a kind-compatible conversion of it,
/// structurally equals at least one expected value. Absent results pass
/// vacuously; use [`is_one_of_and_must_exist`] to make absence a failure.
pub fn is_one_of(got: Option<&Value>, expected: &[Value]) -> Result<Comparison, CompareError> {
    let Some(got) = got else {
        return Ok(Comparison::Pass);
    };
    if matches_any(got, expected) {
        Ok(Comparison::Pass)
    } else {
        Ok(Comparison::Fail(mismatch(got, expected)))
    }
}

/// Pass iff the result is a list and every element independently
/// satisfies [`is_one_of`] against the same expected set. The failure
/// message enumerates the full actual list and the full expected list,
/// not just the offending element.
pub fn each_is_one_of(got: Option<&Value>, expected: &[Value]) -> Result<Comparison, CompareError> {
    let Some(got) = got else {
        return Ok(Comparison::Pass);
    };
    let items = match got {
        Value::List(items) => items,
        other => {
            return Err(CompareError::NotAList {
                got: other.type_name().to_string(),
            });
        }
    };
    if items.iter().all(|item| matches_any(item, expected)) {
        Ok(Comparison::Pass)
    } else {
        Ok(Comparison::Fail(mismatch(got, expected)))
    }
}

/// [`is_one_of`], with absence as a hard lint failure instead of a
/// vacuous pass.
pub fn is_one_of_and_must_exist(
    got: Option<&Value>,
    expected: &[Value],
) -> Result<Comparison, CompareError> {
    match got {
        None => Ok(Comparison::Fail(NOT_FOUND.to_string())),
        some => is_one_of(some, expected),
    }
}

/// [`each_is_one_of`], with absence as a hard lint failure instead of a
/// vacuous pass.
pub fn each_is_one_of_and_must_exist(
    got: Option<&Value>,
    expected: &[Value],
) -> Result<Comparison, CompareError> {
    match got {
        None => Ok(Comparison::Fail(NOT_FOUND.to_string())),
        some => each_is_one_of(some, expected),
    }
}

// ──────────────────────────────────────────────
// Membership core
// ──────────────────────────────────────────────

/// A value matches a candidate iff it converts to the candidate's kind
/// and the converted value structurally equals the candidate. Candidates
/// the value cannot convert to are skipped, not errors.
fn matches_any(got: &Value, expected: &[Value]) -> bool {
    expected
        .iter()
        .any(|want| convert(got, want.kind()).is_some_and(|converted| converted == *want))
}

/// Kind-directed conversion of `value` to `target`. Only same-kind
/// conversion is compatible -- an integral number and its string literal
/// are distinct kinds and never converted into each other. Unknown is
/// checked before the kind comparison: its declared kind must not make
/// an unresolved value convertible.
fn convert(value: &Value, target: Kind) -> Option<Value> {
    match value {
        Value::Unknown(_) => None,
        v if v.kind() == target => Some(v.clone()),
        _ => None,
    }
}

fn mismatch(got: &Value, expected: &[Value]) -> String {
    format!(
        "returned value {} not in expected values {}",
        got,
        render_expected(expected)
    )
}

/// Expected sets render bracketed, comma-joined, in the order supplied.
fn render_expected(expected: &[Value]) -> String {
    let rendered: Vec<String> = expected.iter().map(Value::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal;
    use serde_json::json;

    fn value(json: serde_json::Value) -> Value {
        Value::from_json(&json).unwrap()
    }

    #[test]
    fn exists_verdicts() {
        let v = value(json!("x"));
        assert!(exists(Some(&v), &[]).unwrap().passed());
        assert_eq!(
            exists(None, &[]).unwrap().message(),
            Some("returned value does not exist but expected")
        );
        assert!(not_exists(None, &[]).unwrap().passed());
        assert_eq!(
            not_exists(Some(&v), &[]).unwrap().message(),
            Some("returned value exists but not expected")
        );
    }

    #[test]
    fn null_verdicts() {
        assert!(is_null(Some(&Value::Null), &[]).unwrap().passed());
        assert_eq!(
            is_null(Some(&value(json!(1))), &[]).unwrap().message(),
            Some("returned value is not null but expected to be")
        );
        assert!(is_not_null(Some(&value(json!(1))), &[]).unwrap().passed());
        assert_eq!(
            is_not_null(Some(&Value::Null), &[]).unwrap().message(),
            Some("returned value is null but not expected to be")
        );
        // Absent results are vacuous passes for both.
        assert!(is_null(None, &[]).unwrap().passed());
        assert!(is_not_null(None, &[]).unwrap().passed());
    }

    #[test]
    fn known_verdicts() {
        let unknown = Value::Unknown(Kind::String);
        assert!(is_not_known(Some(&unknown), &[]).unwrap().passed());
        assert_eq!(
            is_known(Some(&unknown), &[]).unwrap().message(),
            Some("returned value is unknown")
        );
        assert!(is_known(Some(&value(json!("x"))), &[]).unwrap().passed());
        assert_eq!(
            is_not_known(Some(&value(json!("x"))), &[]).unwrap().message(),
            Some("returned value is known")
        );
    }

    #[test]
    fn is_one_of_matches_same_kind() {
        let v = value(json!("fiz"));
        assert!(is_one_of(Some(&v), &literal::strings(["fiz", "buz"]))
            .unwrap()
            .passed());
    }

    #[test]
    fn is_one_of_mismatch_message() {
        let v = value(json!("fiz"));
        assert_eq!(
            is_one_of(Some(&v), &literal::strings(["not_fiz"]))
                .unwrap()
                .message(),
            Some("returned value fiz not in expected values [not_fiz]")
        );
    }

    #[test]
    fn numbers_match_numerically_within_kind() {
        let v = value(json!(1.0));
        assert!(is_one_of(Some(&v), &literal::numbers([1]))
            .unwrap()
            .passed());
    }

    #[test]
    fn number_and_string_literal_are_not_compatible() {
        let number = value(json!(1));
        let string = value(json!("1"));
        assert!(!is_one_of(Some(&number), &literal::strings(["1"]))
            .unwrap()
            .passed());
        assert!(!is_one_of(Some(&string), &literal::numbers([1]))
            .unwrap()
            .passed());
    }

    #[test]
    fn null_matches_only_null_candidates() {
        assert!(is_one_of(Some(&Value::Null), &[Value::Null])
            .unwrap()
            .passed());
        assert!(!is_one_of(Some(&Value::Null), &literal::strings(["null"]))
            .unwrap()
            .passed());
    }

    #[test]
    fn unknown_never_matches_membership() {
        let unknown = Value::Unknown(Kind::String);
        assert!(
            !is_one_of(Some(&unknown), &[Value::Unknown(Kind::String)])
                .unwrap()
                .passed()
        );
        assert!(!is_one_of(Some(&unknown), &literal::strings(["x"]))
            .unwrap()
            .passed());
    }

    #[test]
    fn composite_candidates_compare_elementwise() {
        let v = value(json!([1, 2, 3]));
        let expected = literal::complex([json!([1, 2, 3])]).unwrap();
        assert!(is_one_of(Some(&v), &expected).unwrap().passed());
        let shorter = literal::complex([json!([1, 2])]).unwrap();
        assert!(!is_one_of(Some(&v), &shorter).unwrap().passed());
    }

    #[test]
    fn each_is_one_of_checks_every_element() {
        let v = value(json!([1, 2, 1]));
        assert!(each_is_one_of(Some(&v), &literal::numbers([1, 2, 3]))
            .unwrap()
            .passed());
        let bad = value(json!([1, 9]));
        assert_eq!(
            each_is_one_of(Some(&bad), &literal::numbers([1, 2, 3]))
                .unwrap()
                .message(),
            Some("returned value [1, 9] not in expected values [1, 2, 3]")
        );
    }

    #[test]
    fn each_is_one_of_requires_a_list() {
        let v = value(json!("scalar"));
        assert_eq!(
            each_is_one_of(Some(&v), &[]),
            Err(CompareError::NotAList {
                got: "string".to_string()
            })
        );
        assert_eq!(
            each_is_one_of(Some(&Value::Unknown(Kind::List)), &[]),
            Err(CompareError::NotAList {
                got: "unknown".to_string()
            })
        );
    }

    #[test]
    fn optional_membership_passes_on_absence() {
        assert!(is_one_of(None, &literal::strings(["x"])).unwrap().passed());
        assert!(each_is_one_of(None, &literal::strings(["x"]))
            .unwrap()
            .passed());
    }

    #[test]
    fn must_exist_wrappers_fail_on_absence() {
        assert_eq!(
            is_one_of_and_must_exist(None, &literal::strings(["x"]))
                .unwrap()
                .message(),
            Some("returned value does not exist but expected")
        );
        assert_eq!(
            each_is_one_of_and_must_exist(None, &[]).unwrap().message(),
            Some("returned value does not exist but expected")
        );
        // Present values delegate to the base predicate.
        let v = value(json!("fiz"));
        assert!(
            is_one_of_and_must_exist(Some(&v), &literal::strings(["fiz"]))
                .unwrap()
                .passed()
        );
    }

    #[test]
    fn predicates_coerce_to_the_shared_signature() {
        let predicates: Vec<ComparePredicate> = vec![
            exists,
            not_exists,
            is_null,
            is_not_null,
            is_known,
            is_not_known,
            is_one_of,
            each_is_one_of,
            is_one_of_and_must_exist,
            each_is_one_of_and_must_exist,
        ];
        for predicate in predicates {
            // Every predicate tolerates an absent result without erroring.
            assert!(predicate(None, &[]).is_ok());
        }
    }
}
