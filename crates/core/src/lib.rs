//! Trellis block-value query engine -- dotted-path queries over dynamic
//! configuration values, plus comparison predicates with deterministic
//! diagnostic messages.
//!
//! A caller obtains a [`Value`] for a configuration attribute from its
//! extraction layer, resolves a dotted path against it with [`query`],
//! and routes the result into a comparison predicate together with
//! expected values built by the [`literal`] constructors. The
//! predicate's verdict -- pass, or fail with a rendered message --
//! becomes the caller's diagnostic decision.
//!
//! Evaluation is synchronous and purely functional: every operation is a
//! function of its explicit inputs, with no shared mutable state and no
//! I/O, so independent evaluations are safe from any number of threads.

pub mod compare;
pub mod literal;
pub mod query;
pub mod value;

pub use compare::{CompareError, ComparePredicate, Comparison};
pub use query::{next_segment, query, QueryError, Segment};
pub use value::{Kind, Value, ValueError};

// ──────────────────────────────────────────────
// Integration tests
// ──────────────────────────────────────────────
