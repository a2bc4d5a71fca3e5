//! Block extraction boundary.
//!
//! The engine never reads a source tree itself. A [`BlockSource`] is an
//! explicit dependency handed to the check driver; it yields
//! configuration blocks whose attributes have already been evaluated to
//! dynamic values by the external expression evaluator.
//! [`InMemorySource`] serves tests and embedders that assemble blocks by
//! hand.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trellis_core::Value;

// ──────────────────────────────────────────────
// Source model
// ──────────────────────────────────────────────

/// Source position of a block or attribute, attached to every diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub file: String,
    pub line: u32,
}

impl Span {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Span {
            file: file.into(),
            line,
        }
    }
}

/// A configuration attribute with its resolved value and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Value,
    pub span: Span,
}

/// One configuration block: a typed, labelled container of attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub block_type: String,
    pub labels: Vec<String>,
    pub attributes: BTreeMap<String, Attribute>,
    pub span: Span,
}

impl Block {
    pub fn new<L, S>(block_type: impl Into<String>, labels: L, span: Span) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block {
            block_type: block_type.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            attributes: BTreeMap::new(),
            span,
        }
    }

    /// Attach an attribute, replacing any previous one of the same name.
    pub fn attribute(mut self, name: impl Into<String>, value: Value, span: Span) -> Self {
        let name = name.into();
        self.attributes.insert(
            name.clone(),
            Attribute { name, value, span },
        );
        self
    }
}

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors raised by a block source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// A source-specific failure while reading blocks.
    #[error("block source error: {message}")]
    Provider { message: String },
}

// ──────────────────────────────────────────────
// Trait
// ──────────────────────────────────────────────

/// Abstraction over "read blocks from a source tree".
///
/// Implementations wrap whatever extraction layer produced the blocks
/// (a parsed configuration module, a test fixture, a cache). The driver
/// receives the source by reference, so substituting one never touches
/// shared process state.
pub trait BlockSource {
    /// All blocks of the given type whose first label matches `label`,
    /// in source order.
    fn blocks(&self, block_type: &str, label: &str) -> Result<Vec<Block>, SourceError>;
}

/// A block source over a fixed, pre-assembled block list.
pub struct InMemorySource {
    blocks: Vec<Block>,
}

impl InMemorySource {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn empty() -> Self {
        Self { blocks: Vec::new() }
    }
}

impl BlockSource for InMemorySource {
    fn blocks(&self, block_type: &str, label: &str) -> Result<Vec<Block>, SourceError> {
        Ok(self
            .blocks
            .iter()
            .filter(|block| {
                block.block_type == block_type
                    && block.labels.first().map(String::as_str) == Some(label)
            })
            .cloned()
            .collect())
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
