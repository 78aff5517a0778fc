//! Error types for the transformation core.
//!
//! Only request validation and edit application produce `Err` values. The
//! "nothing to do" and "edits broke the program" cases are reported as
//! [`RunOutcome`](crate::pipeline::RunOutcome) variants instead, so callers can
//! tell a rejected request apart from a completed run.

use thiserror::Error;

use crate::model::ByteSpan;

/// Errors that stop a transformation run before or while planning edits.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Instance ordinals are 1-based.
    #[error("Invalid instance ordinal: {0} (ordinals start at 1)")]
    InvalidOrdinal(u32),

    /// The outer class header could not be located in the source text.
    #[error("Cannot locate the opening brace of class '{name}' starting at byte {start}")]
    HeaderNotLocatable { name: String, start: usize },

    /// A member referred to a class declaration the tree does not contain.
    #[error("Unknown class declaration id {0}")]
    UnknownDecl(usize),

    /// Planned edits could not be applied.
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Errors raised while validating or applying an [`EditPlan`](crate::edit::EditPlan).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("Edit {span} is out of bounds for source of length {len}")]
    OutOfBounds { span: ByteSpan, len: usize },

    #[error("Edit {span} does not fall on UTF-8 character boundaries")]
    NotCharBoundary { span: ByteSpan },

    #[error("Edit {second} overlaps edit {first}")]
    Overlap { first: ByteSpan, second: ByteSpan },
}
