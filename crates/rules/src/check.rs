//! Attribute checks and the diagnostic-producing run driver.
//!
//! An [`AttributeCheck`] names the blocks it applies to, the attribute
//! and query path to resolve, and the comparison predicate plus expected
//! values to assert. Running a check turns predicate verdicts into
//! [`Diagnostic`]s at the attribute's source location; structural query
//! errors and predicate misuse abort the run as [`CheckError`]s instead,
//! a distinct severity class from lint findings.

use serde::{Deserialize, Serialize};
use trellis_core::compare::{CompareError, ComparePredicate, Comparison};
use trellis_core::query::{query, QueryError};
use trellis_core::Value;

use crate::source::{BlockSource, SourceError, Span};

// ──────────────────────────────────────────────
// Diagnostics
// ──────────────────────────────────────────────

/// Severity attached to emitted diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A lint finding at a source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the check that produced the finding.
    pub check: String,
    pub message: String,
    pub severity: Severity,
    pub span: Span,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Hard failures while running a check. These abort the run and are
/// reported as tooling-internal errors, never as lint findings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("could not read blocks: {0}")]
    Source(#[from] SourceError),

    #[error("could not query value: {0}")]
    Query(QueryError),

    #[error("could not compare values: {0}")]
    Compare(#[from] CompareError),
}

// ──────────────────────────────────────────────
// Checks
// ──────────────────────────────────────────────

/// One rule: resolve a query path against an attribute of matching
/// blocks and assert the result with a comparison predicate.
///
/// Checks are constructed once and reused across runs; they hold no
/// mutable state.
pub struct AttributeCheck {
    name: String,
    block_type: String,
    label: String,
    attribute: String,
    path: String,
    compare: ComparePredicate,
    expected: Vec<Value>,
    severity: Severity,
    link: Option<String>,
}

impl AttributeCheck {
    pub fn new(
        name: impl Into<String>,
        block_type: impl Into<String>,
        label: impl Into<String>,
        attribute: impl Into<String>,
        path: impl Into<String>,
        compare: ComparePredicate,
        expected: Vec<Value>,
    ) -> Self {
        AttributeCheck {
            name: name.into(),
            block_type: block_type.into(),
            label: label.into(),
            attribute: attribute.into(),
            path: path.into(),
            compare,
            expected,
            severity: Severity::Error,
            link: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Documentation link carried into every diagnostic.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the check against every matching block in the source.
    ///
    /// Per block: a missing attribute is itself a diagnostic; a query
    /// that ends in `NotFound` hands an absent result to the predicate,
    /// whose optional/must-exist policy decides; any other query error
    /// or predicate misuse aborts the whole run.
    pub fn run(&self, source: &impl BlockSource) -> Result<Vec<Diagnostic>, CheckError> {
        let mut diagnostics = Vec::new();
        for block in source.blocks(&self.block_type, &self.label)? {
            let Some(attribute) = block.attributes.get(&self.attribute) else {
                diagnostics.push(self.diagnostic(
                    format!("block does not have a '{}' attribute", self.attribute),
                    block.span.clone(),
                ));
                continue;
            };
            let outcome = match query(&attribute.value, &self.path) {
                Ok(value) => Some(value),
                Err(err) if err.is_not_found() => None,
                Err(err) => return Err(CheckError::Query(err)),
            };
            match (self.compare)(outcome.as_ref(), &self.expected)? {
                Comparison::Pass => {}
                Comparison::Fail(message) => {
                    diagnostics.push(self.diagnostic(message, attribute.span.clone()));
                }
            }
        }
        Ok(diagnostics)
    }

    fn diagnostic(&self, message: String, span: Span) -> Diagnostic {
        Diagnostic {
            check: self.name.clone(),
            message,
            severity: self.severity,
            span,
            link: self.link.clone(),
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
