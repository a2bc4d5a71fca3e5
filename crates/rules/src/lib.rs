//! Trellis rule boundary -- turns query-and-compare verdicts into
//! positioned lint diagnostics.
//!
//! The engine in `trellis-core` is purely functional; this crate holds
//! the collaborators at its edge: a [`BlockSource`] abstraction over the
//! caller's extraction layer, and [`AttributeCheck`] descriptors whose
//! `run` method routes outcomes: predicate failures become
//! [`Diagnostic`]s at the attribute's source location, structural errors
//! abort the run as [`CheckError`]s.

pub mod check;
pub mod source;

pub use check::{AttributeCheck, CheckError, Diagnostic, Severity};
pub use source::{Attribute, Block, BlockSource, InMemorySource, SourceError, Span};
