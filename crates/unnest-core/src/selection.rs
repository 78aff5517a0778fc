//! Instance selection: numbers qualifying wrappers in traversal order and
//! remembers the one matching the requested ordinal.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matcher::match_wrapper;
use crate::model::{ClassDecl, ClassDeclId, DeclGroupId, NestedClass};
use crate::provider::ProgramTree;

/// A qualifying outer class together with its single nested class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WrapperCandidate {
    /// 1-based position among all qualifying wrappers.
    pub ordinal: u32,
    pub outer: ClassDeclId,
    pub outer_group: DeclGroupId,
    pub outer_name: String,
    pub inner_group: DeclGroupId,
    pub inner_name: String,
    /// 1-based line of the outer declaration.
    pub line: u32,
}

/// Per-run selection bookkeeping.
#[derive(Debug, Clone)]
pub struct SelectionState {
    target: u32,
    candidate_count: u32,
    selected: Option<WrapperCandidate>,
    candidates: Vec<WrapperCandidate>,
    seen: HashSet<DeclGroupId>,
}

impl SelectionState {
    /// Fresh state looking for the `target`-th wrapper (1-based).
    #[must_use]
    pub fn new(target: u32) -> Self {
        Self {
            target,
            candidate_count: 0,
            selected: None,
            candidates: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Offer one class definition to the selector.
    ///
    /// Returns the ordinal assigned to `decl` when it qualifies. Definitions
    /// whose declaration group was already counted are ignored.
    pub fn observe(&mut self, decl: &ClassDecl) -> Option<u32> {
        let inner = match match_wrapper(decl) {
            Ok(inner) => inner,
            Err(reason) => {
                debug!(class = %decl.name, line = decl.line, %reason, "not a wrapper");
                return None;
            }
        };
        if !self.seen.insert(decl.group) {
            debug!(class = %decl.name, group = %decl.group, "wrapper already counted");
            return None;
        }

        self.candidate_count += 1;
        let candidate = candidate_for(decl, inner, self.candidate_count);
        debug!(
            ordinal = candidate.ordinal,
            outer = %candidate.outer_name,
            inner = %candidate.inner_name,
            "wrapper candidate"
        );
        if self.candidate_count == self.target {
            self.selected = Some(candidate.clone());
        }
        self.candidates.push(candidate);
        Some(self.candidate_count)
    }

    #[must_use]
    pub const fn target(&self) -> u32 {
        self.target
    }

    #[must_use]
    pub const fn candidate_count(&self) -> u32 {
        self.candidate_count
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&WrapperCandidate> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn candidates(&self) -> &[WrapperCandidate] {
        &self.candidates
    }

    /// True once traversal has ended without reaching the target.
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        self.target > self.candidate_count
    }

    #[must_use]
    pub fn into_candidates(self) -> Vec<WrapperCandidate> {
        self.candidates
    }
}

fn candidate_for(decl: &ClassDecl, inner: &NestedClass, ordinal: u32) -> WrapperCandidate {
    WrapperCandidate {
        ordinal,
        outer: decl.id,
        outer_group: decl.group,
        outer_name: decl.name.clone(),
        inner_group: inner.group,
        inner_name: inner.name.clone(),
        line: decl.line,
    }
}

/// Run the collection pass over every class definition in `tree`.
#[must_use]
pub fn collect<T: ProgramTree + ?Sized>(tree: &T, target: u32) -> SelectionState {
    let mut state = SelectionState::new(target);
    for decl in tree.class_decls() {
        state.observe(decl);
    }
    state
}
