//! Run orchestration: collect → select → plan → apply → check.
//!
//! ```text
//! collecting → selected → rewriting → done
//!                                   → failed
//!            → out_of_range
//!            → done            (query-only runs)
//! ```

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::edit::{EditPlan, SourceEdit};
use crate::errors::TransformError;
use crate::excision::{Excision, plan_excision};
use crate::model::ByteSpan;
use crate::provider::{DiagnosticProbe, ProgramTree};
use crate::rewrite::plan_reference_edits;
use crate::selection::{WrapperCandidate, collect};
use crate::source::SourceText;

// ---------------------------------------------------------------------------
// RunPhase
// ---------------------------------------------------------------------------

/// Lifecycle of a single transformation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Collecting,
    Selected,
    OutOfRange,
    Rewriting,
    Done,
    Failed,
}

impl RunPhase {
    /// Valid next phases from the current phase.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Collecting => &[Self::Selected, Self::OutOfRange, Self::Done],
            Self::Selected => &[Self::Rewriting],
            Self::Rewriting => &[Self::Done, Self::Failed],
            Self::OutOfRange | Self::Done | Self::Failed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.allowed_next_states().is_empty()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collecting => "collecting",
            Self::Selected => "selected",
            Self::OutOfRange => "out_of_range",
            Self::Rewriting => "rewriting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Request / outcome
// ---------------------------------------------------------------------------

/// What the caller wants from a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TransformRequest {
    /// 1-based index of the wrapper to transform.
    pub ordinal: u32,
    /// Stop after counting instances.
    pub query_only: bool,
    /// Re-check the rewritten text with the diagnostic probe.
    pub check_diagnostics: bool,
}

impl TransformRequest {
    #[must_use]
    pub const fn new(ordinal: u32) -> Self {
        Self {
            ordinal,
            query_only: false,
            check_diagnostics: true,
        }
    }

    #[must_use]
    pub const fn query() -> Self {
        Self {
            ordinal: 1,
            query_only: true,
            check_diagnostics: false,
        }
    }

    #[must_use]
    pub const fn with_diagnostics(mut self, check: bool) -> Self {
        self.check_diagnostics = check;
        self
    }
}

/// Non-fatal problems met while rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunWarning {
    /// The outer class's `}`/`;` tail could not be located and was kept.
    MalformedDeclaration { class: String, line: u32 },
    /// A qualified reference whose `::` marker could not be found.
    UnrewrittenReference { span: ByteSpan },
}

/// Result of `query_only` runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QueryReport {
    pub instances: u32,
    pub candidates: Vec<WrapperCandidate>,
}

/// Result of a completed rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RewriteReport {
    pub candidate: WrapperCandidate,
    pub instances: u32,
    pub edits: Vec<SourceEdit>,
    pub warnings: Vec<RunWarning>,
    pub output: String,
}

/// Typed result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Query(QueryReport),
    Done(RewriteReport),
    /// Fewer qualifying wrappers than the requested ordinal; nothing changed.
    OutOfRange { requested: u32, available: u32 },
    /// The rewrite produced an invalid program or could not be applied.
    InternalError { reason: String },
}

impl RunOutcome {
    /// Terminal phase this outcome corresponds to.
    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        match self {
            Self::Query(_) | Self::Done(_) => RunPhase::Done,
            Self::OutOfRange { .. } => RunPhase::OutOfRange,
            Self::InternalError { .. } => RunPhase::Failed,
        }
    }

    /// Rewritten text, when the run completed a rewrite.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Done(report) => Some(&report.output),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

struct PhaseTracker {
    phase: RunPhase,
}

impl PhaseTracker {
    const fn new() -> Self {
        Self {
            phase: RunPhase::Collecting,
        }
    }

    fn advance(&mut self, next: RunPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "invalid run transition {} -> {next}",
            self.phase
        );
        debug!(from = %self.phase, to = %next, "run phase");
        self.phase = next;
    }
}

/// Run the transformation over `tree`, whose positions index into `source`.
///
/// # Errors
/// Returns [`TransformError::InvalidOrdinal`] for ordinal 0. Every other
/// failure is reported through [`RunOutcome`].
pub fn run<T, D>(
    tree: &T,
    source: &str,
    request: TransformRequest,
    probe: &D,
) -> Result<RunOutcome, TransformError>
where
    T: ProgramTree + ?Sized,
    D: DiagnosticProbe + ?Sized,
{
    if request.ordinal == 0 {
        return Err(TransformError::InvalidOrdinal(0));
    }

    let mut tracker = PhaseTracker::new();
    let state = collect(tree, request.ordinal);
    let instances = state.candidate_count();

    if request.query_only {
        tracker.advance(RunPhase::Done);
        return Ok(RunOutcome::Query(QueryReport {
            instances,
            candidates: state.into_candidates(),
        }));
    }

    let selected = if state.is_out_of_range() {
        None
    } else {
        state.selected().cloned()
    };
    let Some(candidate) = selected else {
        tracker.advance(RunPhase::OutOfRange);
        info!(requested = state.target(), available = instances, "no such instance");
        return Ok(RunOutcome::OutOfRange {
            requested: state.target(),
            available: instances,
        });
    };
    tracker.advance(RunPhase::Selected);

    tracker.advance(RunPhase::Rewriting);
    let rewritten = match rewrite(tree, SourceText::new(source), &candidate) {
        Ok(rewritten) => rewritten,
        Err(error) => {
            tracker.advance(RunPhase::Failed);
            return Ok(RunOutcome::InternalError {
                reason: error.to_string(),
            });
        }
    };

    if request.check_diagnostics && probe.has_errors(&rewritten.output) {
        tracker.advance(RunPhase::Failed);
        return Ok(RunOutcome::InternalError {
            reason: format!(
                "rewritten program has errors after unwrapping '{}'",
                candidate.outer_name
            ),
        });
    }

    tracker.advance(RunPhase::Done);
    info!(
        outer = %candidate.outer_name,
        inner = %candidate.inner_name,
        edits = rewritten.edits.len(),
        "unwrapped nested class"
    );
    Ok(RunOutcome::Done(RewriteReport {
        candidate,
        instances,
        edits: rewritten.edits,
        warnings: rewritten.warnings,
        output: rewritten.output,
    }))
}

struct Rewritten {
    edits: Vec<SourceEdit>,
    warnings: Vec<RunWarning>,
    output: String,
}

fn rewrite<T: ProgramTree + ?Sized>(
    tree: &T,
    source: SourceText<'_>,
    candidate: &WrapperCandidate,
) -> Result<Rewritten, TransformError> {
    let outer = tree
        .class_decl(candidate.outer)
        .ok_or(TransformError::UnknownDecl(candidate.outer.0))?;

    let mut plan = EditPlan::new();
    let mut warnings: Vec<RunWarning> = plan_reference_edits(tree, source, candidate, &mut plan)
        .into_iter()
        .map(|skipped| RunWarning::UnrewrittenReference { span: skipped.span })
        .collect();

    if plan_excision(outer, source, &mut plan)? == Excision::HeaderOnly {
        warnings.push(RunWarning::MalformedDeclaration {
            class: outer.name.clone(),
            line: outer.line,
        });
    }

    let output = plan.apply(source.as_str())?;
    Ok(Rewritten {
        edits: plan.into_edits(),
        warnings,
        output,
    })
}
