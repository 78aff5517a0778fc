//! Structural matcher: decides whether a class definition is a wrapper
//! around exactly one nested class.

use std::fmt;

use crate::model::{ClassDecl, MemberKind, NestedClass};

/// Why a class definition does not qualify as a wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    HasBases,
    DescribedTemplate,
    NoNestedClass,
    MultipleNestedClasses,
    OtherMember(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HasBases => f.write_str("has base classes"),
            Self::DescribedTemplate => f.write_str("is a class template pattern"),
            Self::NoNestedClass => f.write_str("declares no nested class"),
            Self::MultipleNestedClasses => f.write_str("declares more than one nested class"),
            Self::OtherMember(what) => write!(f, "declares another member ({what})"),
        }
    }
}

/// Match `decl` against the wrapper criteria.
///
/// A wrapper has no base classes, is not a class template pattern, and its
/// non-implicit members are exactly one nested class or class template.
///
/// # Errors
/// Returns the first [`Rejection`] found when `decl` does not qualify.
pub fn match_wrapper(decl: &ClassDecl) -> Result<&NestedClass, Rejection> {
    if !decl.bases.is_empty() {
        return Err(Rejection::HasBases);
    }
    if decl.described_template {
        return Err(Rejection::DescribedTemplate);
    }

    let mut nested: Option<&NestedClass> = None;
    for member in decl.members.iter().filter(|m| !m.implicit) {
        let class = match &member.kind {
            MemberKind::NestedClass(class) | MemberKind::NestedClassTemplate(class) => class,
            MemberKind::Other { description } => {
                return Err(Rejection::OtherMember(description.clone()));
            }
        };
        if nested.is_some() {
            return Err(Rejection::MultipleNestedClasses);
        }
        nested = Some(class);
    }

    nested.ok_or(Rejection::NoNestedClass)
}
