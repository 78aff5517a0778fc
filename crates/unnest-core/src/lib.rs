//! # unnest-core
//!
//! Analysis, edit planning, and edit application for the "simplify nested
//! class" transformation.
//!
//! Given a program tree (class declarations plus type references) and its
//! source text, the transformation picks a class whose only member is one
//! nested class, drops the outer qualifier from every reference to the nested
//! class, and removes the outer class's own header and tail so the nested
//! class becomes a free-standing declaration.
//!
//! The crate is parser-agnostic. The pipeline is split in three steps:
//! - **analysis**: [`matcher`] + [`selection`] walk the tree and decide which
//!   wrapper (if any) is the target of this run
//! - **planning**: [`rewrite`] + [`excision`] turn the decision into an
//!   [`edit::EditPlan`] of non-overlapping byte-span edits
//! - **application**: [`edit::EditPlan::apply`] renders the rewritten text from
//!   the untouched original snapshot
//!
//! [`pipeline::run`] ties the steps together and reports a typed
//! [`pipeline::RunOutcome`].

pub mod edit;
pub mod errors;
pub mod excision;
pub mod matcher;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod rewrite;
pub mod selection;
pub mod source;

pub use errors::{EditError, TransformError};
pub use model::{
    ByteSpan, ClassDecl, ClassDeclId, DeclGroupId, Member, MemberKind, NestedClass, Program,
    Qualifier, TypeReference,
};
pub use pipeline::{RunOutcome, RunPhase, TransformRequest, run};
pub use provider::{DiagnosticProbe, NoDiagnostics, ProgramTree};
pub use selection::{SelectionState, WrapperCandidate};
pub use source::SourceText;
