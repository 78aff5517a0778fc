//! Edit plans: byte-span removals and replacements against an immutable
//! snapshot, applied in one batch.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::EditError;
use crate::model::ByteSpan;

/// Why an edit was planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EditReason {
    /// `Outer::` removed in front of a reference to the inner class.
    DropQualifier,
    /// Unqualified reference to the inner class renamed to the outer name.
    RenameToOuter,
    /// `class Outer {` removed.
    RemoveHeader,
    /// The outer class's closing `};` removed.
    RemoveTail,
}

/// A single planned edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SourceEdit {
    pub span: ByteSpan,
    /// Empty for removals.
    pub replacement: String,
    pub reason: EditReason,
}

/// Ordered collection of edits planned for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPlan {
    edits: Vec<SourceEdit>,
}

impl EditPlan {
    #[must_use]
    pub const fn new() -> Self {
        Self { edits: Vec::new() }
    }

    pub fn remove(&mut self, span: ByteSpan, reason: EditReason) {
        self.replace(span, String::new(), reason);
    }

    pub fn replace(&mut self, span: ByteSpan, replacement: impl Into<String>, reason: EditReason) {
        self.edits.push(SourceEdit {
            span,
            replacement: replacement.into(),
            reason,
        });
    }

    #[must_use]
    pub fn edits(&self) -> &[SourceEdit] {
        &self.edits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    #[must_use]
    pub fn into_edits(self) -> Vec<SourceEdit> {
        self.edits
    }

    /// Render `original` with every planned edit applied.
    ///
    /// # Errors
    /// Returns [`EditError`] when an edit is out of bounds, splits a UTF-8
    /// character, or overlaps another edit. Nothing is applied in that case.
    pub fn apply(&self, original: &str) -> Result<String, EditError> {
        let mut ordered: Vec<&SourceEdit> = self.edits.iter().collect();
        ordered.sort_by_key(|e| (e.span.start, e.span.end));

        let mut previous: Option<ByteSpan> = None;
        for edit in &ordered {
            let span = edit.span;
            if span.start > span.end || span.end > original.len() {
                return Err(EditError::OutOfBounds {
                    span,
                    len: original.len(),
                });
            }
            if !original.is_char_boundary(span.start) || !original.is_char_boundary(span.end) {
                return Err(EditError::NotCharBoundary { span });
            }
            if let Some(prev) = previous
                && (prev.overlaps(span) || (prev == span && span.is_empty()))
            {
                return Err(EditError::Overlap {
                    first: prev,
                    second: span,
                });
            }
            previous = Some(span);
        }

        let mut output = String::with_capacity(original.len());
        let mut cursor = 0;
        for edit in ordered {
            output.push_str(&original[cursor..edit.span.start]);
            output.push_str(&edit.replacement);
            cursor = edit.span.end;
        }
        output.push_str(&original[cursor..]);
        Ok(output)
    }
}
