//! Name handling shared by both passes: qualified-name flattening,
//! left-to-right resolution, and the scope paths of namespaces, classes and
//! function bodies.

use ast_grep_core::Node;

use crate::scope::{Entry, EntryKind, Scope, ScopeTable};

/// One `::`-separated segment of a qualified name.
pub(crate) struct Segment<'r, D: ast_grep_core::Doc> {
    /// Lookup name (template arguments stripped).
    pub name: String,
    pub node: Node<'r, D>,
}

/// A `qualified_identifier` split into its segments.
pub(crate) struct QualifiedName<'r, D: ast_grep_core::Doc> {
    /// Leading `::`.
    pub global: bool,
    pub segments: Vec<Segment<'r, D>>,
}

/// Flatten a right-recursive `qualified_identifier` into segments.
pub(crate) fn flatten<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> QualifiedName<'r, D> {
    let mut segments = Vec::new();
    let global = node.field("scope").is_none();
    let mut current = node.clone();
    loop {
        if let Some(scope) = current.field("scope") {
            segments.push(segment(scope));
        }
        match current.field("name") {
            Some(name) if name.kind().as_ref() == "qualified_identifier" => current = name,
            Some(name) => {
                segments.push(segment(name));
                break;
            }
            None => break,
        }
    }
    QualifiedName { global, segments }
}

fn segment<D: ast_grep_core::Doc>(node: Node<'_, D>) -> Segment<'_, D> {
    let name = match node.kind().as_ref() {
        "template_type" | "template_function" | "template_method" => node
            .field("name")
            .map_or_else(|| node.text().to_string(), |n| n.text().to_string()),
        _ => node.text().to_string(),
    };
    Segment { name, node }
}

/// Resolve each segment left to right. Resolution stops at the first
/// segment that names nothing known; later entries are `None`.
pub(crate) fn resolve<'t, D: ast_grep_core::Doc>(
    name: &QualifiedName<'_, D>,
    scope: &Scope,
    table: &'t ScopeTable,
) -> Vec<Option<&'t Entry>> {
    let mut resolved = Vec::with_capacity(name.segments.len());
    let mut previous: Option<&Entry> = None;
    for (idx, segment) in name.segments.iter().enumerate() {
        let entry = if idx == 0 {
            if name.global {
                table.child(&[], &segment.name)
            } else if scope.is_shadowed(&segment.name) {
                None
            } else {
                table.lookup(&scope.path, &segment.name)
            }
        } else {
            previous.and_then(|p| table.child(&p.path, &segment.name))
        };
        resolved.push(entry);
        if entry.is_none() {
            resolved.resize(name.segments.len(), None);
            break;
        }
        previous = entry;
    }
    resolved
}

/// Path segments a `namespace_definition` adds. Anonymous namespaces add
/// none.
pub(crate) fn namespace_segments<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<String> {
    node.field("name")
        .map(|name| {
            name.text()
                .split("::")
                .map(|s| {
                    let s = s.trim();
                    s.strip_prefix("inline ").unwrap_or(s).trim().to_string()
                })
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Path of the class declared by a class/struct/union specifier, or `None`
/// when a qualified head names an unknown scope.
pub(crate) fn class_path<D: ast_grep_core::Doc>(
    node: &Node<D>,
    scope: &Scope,
    table: &ScopeTable,
) -> Option<Vec<String>> {
    let Some(name) = node.field("name") else {
        let mut path = scope.path.clone();
        path.push(format!("{{anon@{}}}", node.range().start));
        return Some(path);
    };
    match name.kind().as_ref() {
        "qualified_identifier" => {
            let qualified = flatten(&name);
            let resolved = resolve(&qualified, scope, table);
            let (last, prefix) = qualified.segments.split_last()?;
            let parent = if prefix.is_empty() {
                Vec::new()
            } else {
                resolved.get(prefix.len() - 1).copied().flatten()?.path.clone()
            };
            let mut path = parent;
            path.push(last.name.clone());
            Some(path)
        }
        "template_type" => {
            let mut path = scope.path.clone();
            path.push(name.text().split_whitespace().collect());
            Some(path)
        }
        _ => {
            let mut path = scope.path.clone();
            path.push(name.text().to_string());
            Some(path)
        }
    }
}

/// Last segment of a class head name, as shown to users.
pub(crate) fn class_name<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<String> {
    let name = node.field("name")?;
    match name.kind().as_ref() {
        "qualified_identifier" => flatten(&name).segments.pop().map(|s| s.name),
        "template_type" => Some(name.text().split_whitespace().collect()),
        _ => Some(name.text().to_string()),
    }
}

/// Scope for the parameters and body of a function definition.
///
/// Out-of-line member definitions (`void A::f() {}`) are resolved in the
/// scope of the class their declarator names. Each body gets its own
/// segment so local classes stay distinct.
pub(crate) fn function_scope<D: ast_grep_core::Doc>(
    node: &Node<D>,
    scope: &Scope,
    table: &ScopeTable,
) -> Scope {
    let mut path = member_owner(node, scope, table).unwrap_or_else(|| scope.path.clone());
    path.push(format!("{{fn@{}}}", node.range().start));
    scope.with_path(path)
}

fn member_owner<D: ast_grep_core::Doc>(
    node: &Node<D>,
    scope: &Scope,
    table: &ScopeTable,
) -> Option<Vec<String>> {
    let mut declarator = node.field("declarator")?;
    while declarator.kind().as_ref() != "function_declarator" {
        declarator = declarator.field("declarator")?;
    }
    let name = declarator.field("declarator")?;
    if name.kind().as_ref() != "qualified_identifier" {
        return None;
    }
    let qualified = flatten(&name);
    let resolved = resolve(&qualified, scope, table);
    let owner_idx = qualified.segments.len().checked_sub(2)?;
    let owner = resolved.get(owner_idx).copied().flatten()?;
    matches!(owner.kind, EntryKind::Class(_)).then(|| owner.path.clone())
}

/// True for `class B;` style statements that declare a class without a
/// body or a declarator.
pub(crate) fn is_forward_declaration<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    if node.field("body").is_some() {
        return false;
    }
    let Some(parent) = node.parent() else {
        return false;
    };
    match parent.kind().as_ref() {
        "field_declaration" | "declaration" => parent
            .children()
            .all(|c| c.range() == node.range() || matches!(c.kind().as_ref(), ";" | "comment")),
        "translation_unit" | "declaration_list" | "field_declaration_list"
        | "template_declaration" => next_token(node).is_some_and(|n| n.kind().as_ref() == ";"),
        _ => false,
    }
}

/// Next sibling that is not a comment.
pub(crate) fn next_token<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Option<Node<'r, D>> {
    let mut sibling = node.next();
    while let Some(current) = sibling {
        if current.kind().as_ref() != "comment" {
            return Some(current);
        }
        sibling = current.next();
    }
    None
}
