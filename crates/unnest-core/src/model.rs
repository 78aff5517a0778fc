//! Program model consumed by the transformation.
//!
//! The model is a flattened, read-only view of a typed tree: class
//! definitions in traversal order and every type reference in traversal
//! order. Positions are byte offsets into the source text the tree was built
//! from.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::provider::ProgramTree;

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

/// Canonical declaration identity.
///
/// Every syntactic declaration of the same entity (forward declarations,
/// the definition, out-of-line redeclarations) carries the same group id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct DeclGroupId(pub u32);

impl fmt::Display for DeclGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Index of a [`ClassDecl`] inside its [`Program`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct ClassDeclId(pub usize);

// ---------------------------------------------------------------------------
// Spans
// ---------------------------------------------------------------------------

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
}

impl ByteSpan {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// True when the spans share a byte, or when an empty span sits strictly
    /// inside the other one.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for ByteSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Class declarations
// ---------------------------------------------------------------------------

/// A nested class named by a member declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NestedClass {
    pub name: String,
    pub group: DeclGroupId,
}

/// What a member declaration declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberKind {
    /// A nested class, struct or union (definition or forward declaration).
    NestedClass(NestedClass),
    /// A nested class template.
    NestedClassTemplate(NestedClass),
    /// Any other member: fields, methods, aliases, enums, friends, ...
    Other { description: String },
}

/// A member declaration of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Member {
    pub kind: MemberKind,
    /// Compiler-generated members do not count against a wrapper.
    #[serde(default)]
    pub implicit: bool,
}

impl Member {
    #[must_use]
    pub fn nested_class(name: impl Into<String>, group: DeclGroupId) -> Self {
        Self {
            kind: MemberKind::NestedClass(NestedClass {
                name: name.into(),
                group,
            }),
            implicit: false,
        }
    }

    #[must_use]
    pub fn nested_class_template(name: impl Into<String>, group: DeclGroupId) -> Self {
        Self {
            kind: MemberKind::NestedClassTemplate(NestedClass {
                name: name.into(),
                group,
            }),
            implicit: false,
        }
    }

    #[must_use]
    pub fn other(description: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Other {
                description: description.into(),
            },
            implicit: false,
        }
    }

    #[must_use]
    pub const fn into_implicit(mut self) -> Self {
        self.implicit = true;
        self
    }

    /// The nested class this member declares, if it declares one.
    #[must_use]
    pub const fn as_nested_class(&self) -> Option<&NestedClass> {
        match &self.kind {
            MemberKind::NestedClass(nested) | MemberKind::NestedClassTemplate(nested) => {
                Some(nested)
            }
            MemberKind::Other { .. } => None,
        }
    }
}

/// A class/struct/union definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClassDecl {
    pub id: ClassDeclId,
    pub group: DeclGroupId,
    pub name: String,
    /// Base-class specifiers as written, in order.
    pub bases: Vec<String>,
    /// True when this class is the pattern of a class template.
    pub described_template: bool,
    pub members: Vec<Member>,
    /// Offset of the first byte of the declaration (`class`/`struct`/`union`
    /// keyword, or `template` for a class template).
    pub start: usize,
    pub lbrace: Option<usize>,
    pub rbrace: Option<usize>,
    /// Offset of the `;` ending the statement that declares the class.
    pub terminator: Option<usize>,
    /// 1-based line of `start`, for reporting.
    pub line: u32,
}

// ---------------------------------------------------------------------------
// Type references
// ---------------------------------------------------------------------------

/// The scope named immediately to the left of a qualified reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Qualifier {
    /// Class the qualifier resolves to; `None` for namespaces and unresolved
    /// scopes.
    pub scope: Option<DeclGroupId>,
    /// Offset just past the qualifier's name, before the `::` marker.
    pub name_end: usize,
}

/// An occurrence of a name that resolves to a class.
///
/// For a qualified occurrence the span starts at the qualifier's scope name,
/// so `Outer::Inner` covers both segments; an unqualified occurrence covers
/// just the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeReference {
    pub span: ByteSpan,
    pub target: DeclGroupId,
    pub qualifier: Option<Qualifier>,
}

impl TypeReference {
    #[must_use]
    pub const fn bare(span: ByteSpan, target: DeclGroupId) -> Self {
        Self {
            span,
            target,
            qualifier: None,
        }
    }

    #[must_use]
    pub const fn qualified(
        span: ByteSpan,
        target: DeclGroupId,
        scope: Option<DeclGroupId>,
        name_end: usize,
    ) -> Self {
        Self {
            span,
            target,
            qualifier: Some(Qualifier { scope, name_end }),
        }
    }

    #[must_use]
    pub const fn is_qualified(&self) -> bool {
        self.qualifier.is_some()
    }

    /// True when the qualifier on the left names the class `group`.
    #[must_use]
    pub fn is_qualified_by(&self, group: DeclGroupId) -> bool {
        self.qualifier.is_some_and(|q| q.scope == Some(group))
    }
}

// ---------------------------------------------------------------------------
// Program
// ---------------------------------------------------------------------------

/// In-memory program tree: the default [`ProgramTree`] implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    decls: Vec<ClassDecl>,
    references: Vec<TypeReference>,
}

impl Program {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            decls: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Append a class definition in traversal order, assigning its id.
    pub fn push_decl(&mut self, mut decl: ClassDecl) -> ClassDeclId {
        let id = ClassDeclId(self.decls.len());
        decl.id = id;
        self.decls.push(decl);
        id
    }

    pub fn push_reference(&mut self, reference: TypeReference) {
        self.references.push(reference);
    }
}

impl ProgramTree for Program {
    fn class_decls(&self) -> &[ClassDecl] {
        &self.decls
    }

    fn type_references(&self) -> &[TypeReference] {
        &self.references
    }
}
