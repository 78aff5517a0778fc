//! Seams to the host: the typed-tree provider and the diagnostic probe.

use crate::model::{ClassDecl, ClassDeclId, TypeReference};

/// Read-only access to a parsed program.
pub trait ProgramTree {
    /// Every class definition, in traversal (pre-)order.
    fn class_decls(&self) -> &[ClassDecl];

    /// Every type reference, in traversal order.
    fn type_references(&self) -> &[TypeReference];

    fn class_decl(&self, id: ClassDeclId) -> Option<&ClassDecl> {
        self.class_decls().iter().find(|d| d.id == id)
    }
}

/// Reports whether text produced by the rewrite still parses cleanly.
pub trait DiagnosticProbe {
    fn has_errors(&self, text: &str) -> bool;
}

/// Probe that never reports errors, for hosts without a re-parse step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl DiagnosticProbe for NoDiagnostics {
    fn has_errors(&self, _text: &str) -> bool {
        false
    }
}

impl<F> DiagnosticProbe for F
where
    F: Fn(&str) -> bool,
{
    fn has_errors(&self, text: &str) -> bool {
        self(text)
    }
}
