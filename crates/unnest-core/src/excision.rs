//! Declaration excision: removes the outer class's header and tail so that
//! the nested class is left standing on its own.

use tracing::{debug, warn};

use crate::edit::{EditPlan, EditReason};
use crate::errors::TransformError;
use crate::model::{ByteSpan, ClassDecl};
use crate::source::SourceText;

/// Result of planning the excision of one outer class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Excision {
    /// Header and tail are both removed.
    Complete,
    /// Only the header is removed; the `}`/`;` tail could not be located.
    HeaderOnly,
}

/// Plan removal of `class Outer {` and of the matching `};`.
///
/// # Errors
/// Returns [`TransformError::HeaderNotLocatable`] when no opening brace
/// follows the declaration start.
pub fn plan_excision(
    decl: &ClassDecl,
    source: SourceText<'_>,
    plan: &mut EditPlan,
) -> Result<Excision, TransformError> {
    let lbrace = decl
        .lbrace
        .or_else(|| source.locate_until(decl.start, '{'))
        .ok_or_else(|| TransformError::HeaderNotLocatable {
            name: decl.name.clone(),
            start: decl.start,
        })?;
    plan.remove(ByteSpan::new(decl.start, lbrace + 1), EditReason::RemoveHeader);

    let terminator = decl
        .terminator
        .or_else(|| decl.rbrace.and_then(|r| source.locate_after(r + 1, ';')));
    let (Some(rbrace), Some(terminator)) = (decl.rbrace, terminator) else {
        warn!(
            class = %decl.name,
            line = decl.line,
            "closing brace or terminator not locatable; keeping the tail"
        );
        return Ok(Excision::HeaderOnly);
    };
    if terminator < rbrace {
        warn!(class = %decl.name, rbrace, terminator, "terminator precedes closing brace");
        return Ok(Excision::HeaderOnly);
    }
    plan.remove(ByteSpan::new(rbrace, terminator + 1), EditReason::RemoveTail);

    debug!(class = %decl.name, "planned excision");
    Ok(Excision::Complete)
}
