//! Reference rewriter: plans the edits that move every reference to the
//! selected inner class out of the outer class's scope.

use tracing::{debug, warn};

use crate::edit::{EditPlan, EditReason};
use crate::model::{ByteSpan, TypeReference};
use crate::provider::ProgramTree;
use crate::selection::WrapperCandidate;
use crate::source::SourceText;

/// A reference that could not be rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedReference {
    pub span: ByteSpan,
}

/// Plan edits for all references to `candidate`'s inner class.
///
/// `Outer::Inner` loses its `Outer::` qualifier. Any other occurrence of the
/// inner class is replaced by the outer class's name followed by a space.
/// References whose `::` marker cannot be found are returned untouched.
pub fn plan_reference_edits<T: ProgramTree + ?Sized>(
    tree: &T,
    source: SourceText<'_>,
    candidate: &WrapperCandidate,
    plan: &mut EditPlan,
) -> Vec<SkippedReference> {
    let mut skipped = Vec::new();
    let mut rewritten = 0usize;

    for reference in tree
        .type_references()
        .iter()
        .filter(|r| r.target == candidate.inner_group)
    {
        if plan_one(reference, source, candidate, plan) {
            rewritten += 1;
        } else {
            warn!(span = %reference.span, "scope marker not found; reference left as is");
            skipped.push(SkippedReference {
                span: reference.span,
            });
        }
    }

    debug!(
        inner = %candidate.inner_name,
        rewritten,
        skipped = skipped.len(),
        "planned reference edits"
    );
    skipped
}

fn plan_one(
    reference: &TypeReference,
    source: SourceText<'_>,
    candidate: &WrapperCandidate,
    plan: &mut EditPlan,
) -> bool {
    match reference.qualifier {
        Some(qualifier) if qualifier.scope == Some(candidate.outer_group) => {
            let Some(marker) = source.locate_scope_marker(qualifier.name_end) else {
                return false;
            };
            plan.remove(
                ByteSpan::new(reference.span.start, marker.end),
                EditReason::DropQualifier,
            );
            true
        }
        _ => {
            plan.replace(
                reference.span,
                format!("{} ", candidate.outer_name),
                EditReason::RenameToOuter,
            );
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{ClassDeclId, DeclGroupId, Program};

    const OUTER: DeclGroupId = DeclGroupId(0);
    const INNER: DeclGroupId = DeclGroupId(1);

    fn candidate() -> WrapperCandidate {
        WrapperCandidate {
            ordinal: 1,
            outer: ClassDeclId(0),
            outer_group: OUTER,
            outer_name: "A".into(),
            inner_group: INNER,
            inner_name: "B".into(),
            line: 1,
        }
    }

    fn rewrite(text: &str, references: Vec<TypeReference>) -> (String, Vec<SkippedReference>) {
        let mut program = Program::new();
        for r in references {
            program.push_reference(r);
        }
        let mut plan = EditPlan::new();
        let skipped = plan_reference_edits(&program, SourceText::new(text), &candidate(), &mut plan);
        (plan.apply(text).expect("edits apply"), skipped)
    }

    #[test]
    fn qualified_reference_drops_outer_scope() {
        let text = "A::B v;";
        let (out, skipped) = rewrite(
            text,
            vec![TypeReference::qualified(ByteSpan::new(0, 4), INNER, Some(OUTER), 1)],
        );
        assert_eq!(out, "B v;");
        assert!(skipped.is_empty());
    }

    #[test]
    fn spaced_scope_marker_is_removed() {
        let text = "ns::A :: B v;";
        let (out, _) = rewrite(
            text,
            vec![TypeReference::qualified(ByteSpan::new(4, 10), INNER, Some(OUTER), 5)],
        );
        assert_eq!(out, "ns:: B v;");
    }

    #[test]
    fn bare_reference_takes_outer_name() {
        let text = "B *next;";
        let (out, _) = rewrite(text, vec![TypeReference::bare(ByteSpan::new(0, 1), INNER)]);
        assert_eq!(out, "A  *next;");
    }

    #[test]
    fn references_to_other_classes_are_untouched() {
        let text = "A a; C::B c;";
        let (out, _) = rewrite(
            text,
            vec![
                TypeReference::bare(ByteSpan::new(0, 1), OUTER),
                TypeReference::qualified(ByteSpan::new(5, 9), DeclGroupId(7), Some(DeclGroupId(6)), 6),
            ],
        );
        assert_eq!(out, text);
    }

    #[test]
    fn missing_scope_marker_is_skipped() {
        let text = "A B v;";
        let (out, skipped) = rewrite(
            text,
            vec![TypeReference::qualified(ByteSpan::new(0, 3), INNER, Some(OUTER), 1)],
        );
        assert_eq!(out, text);
        assert_eq!(skipped, vec![SkippedReference { span: ByteSpan::new(0, 3) }]);
    }
}
