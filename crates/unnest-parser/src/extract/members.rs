//! Class body inspection: member classification, base clauses and the
//! source markers excision needs.

use ast_grep_core::Node;
use unnest_core::{DeclGroupId, Member};

use crate::names::next_token;
use crate::scope::ScopeTable;

/// Classify every member declaration in a `field_declaration_list`.
///
/// Access labels, punctuation and comments are not members.
pub(super) fn class_members<D: ast_grep_core::Doc>(
    body: &Node<D>,
    path: &[String],
    table: &ScopeTable,
) -> Vec<Member> {
    body.children()
        .filter_map(|child| classify(&child, path, table))
        .collect()
}

fn classify<D: ast_grep_core::Doc>(
    child: &Node<D>,
    path: &[String],
    table: &ScopeTable,
) -> Option<Member> {
    let kind = child.kind();
    match kind.as_ref() {
        "{" | "}" | ":" | ";" | "," | "access_specifier" | "comment" => None,
        "class_specifier" | "struct_specifier" | "union_specifier" => {
            Some(nested(child, path, table).map_or_else(
                || Member::other("anonymous class"),
                |(name, group)| Member::nested_class(name, group),
            ))
        }
        "field_declaration" => Some(
            declared_class(child)
                .and_then(|spec| nested(&spec, path, table))
                .map_or_else(
                    || Member::other(field_description(child)),
                    |(name, group)| Member::nested_class(name, group),
                ),
        ),
        "template_declaration" => Some(
            child
                .children()
                .find(|c| is_class_specifier(c))
                .and_then(|spec| nested(&spec, path, table))
                .map_or_else(
                    || Member::other("template_declaration"),
                    |(name, group)| Member::nested_class_template(name, group),
                ),
        ),
        other => Some(Member::other(other)),
    }
}

pub(super) fn is_class_specifier<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    matches!(
        node.kind().as_ref(),
        "class_specifier" | "struct_specifier" | "union_specifier"
    )
}

/// The class specifier of a `field_declaration` that declares nothing but
/// that class: `class B { ... };` or `class B;`.
fn declared_class<'r, D: ast_grep_core::Doc>(field: &Node<'r, D>) -> Option<Node<'r, D>> {
    let mut spec = None;
    for child in field.children() {
        match child.kind().as_ref() {
            ";" | "comment" => {}
            _ if spec.is_none() && is_class_specifier(&child) => spec = Some(child),
            _ => return None,
        }
    }
    spec
}

fn nested<D: ast_grep_core::Doc>(
    spec: &Node<D>,
    path: &[String],
    table: &ScopeTable,
) -> Option<(String, DeclGroupId)> {
    let name = spec.field("name")?;
    if name.kind().as_ref() != "type_identifier" {
        return None;
    }
    let name = name.text().to_string();
    let mut nested_path = path.to_vec();
    nested_path.push(name.clone());
    let group = table.class_group(&nested_path)?;
    Some((name, group))
}

fn field_description<D: ast_grep_core::Doc>(field: &Node<D>) -> String {
    if field.children().any(|c| c.kind().as_ref() == "function_declarator") {
        return "method".to_string();
    }
    match field.field("type") {
        Some(ty) if ty.kind().as_ref() == "enum_specifier" => "enum".to_string(),
        _ => "field".to_string(),
    }
}

/// Base-class specifiers as written.
pub(super) fn base_classes<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<String> {
    let Some(clause) = node
        .children()
        .find(|c| c.kind().as_ref() == "base_class_clause")
    else {
        return Vec::new();
    };
    clause
        .children()
        .filter(|c| {
            matches!(
                c.kind().as_ref(),
                "type_identifier" | "qualified_identifier" | "template_type"
            )
        })
        .map(|c| c.text().to_string())
        .collect()
}

/// Offsets of the body's `{` and `}` tokens. Recovered (zero-width) tokens
/// are treated as absent.
pub(super) fn body_braces<D: ast_grep_core::Doc>(body: &Node<D>) -> (Option<usize>, Option<usize>) {
    let real = |c: &Node<D>, token: &str| c.kind().as_ref() == token && !c.range().is_empty();
    let lbrace = body
        .children()
        .find(|c| real(c, "{"))
        .map(|c| c.range().start);
    let rbrace = body
        .children()
        .filter(|c| real(c, "}"))
        .last()
        .map(|c| c.range().start);
    (lbrace, rbrace)
}

/// Offset of the `;` closing the statement that declares `spec`.
pub(super) fn statement_terminator<D: ast_grep_core::Doc>(spec: &Node<D>) -> Option<usize> {
    let parent = spec.parent()?;
    let end = spec.range().end;
    let semicolon = match parent.kind().as_ref() {
        "declaration" | "field_declaration" | "type_definition" | "friend_declaration" => parent
            .children()
            .find(|c| c.kind().as_ref() == ";" && c.range().start >= end),
        _ => next_token(spec).filter(|n| n.kind().as_ref() == ";"),
    }?;
    (!semicolon.range().is_empty()).then_some(semicolon.range().start)
}
