//! First pass: intern every namespace and class path so the second pass can
//! resolve names declared anywhere in the translation unit.

use ast_grep_core::Node;

use crate::names::{class_path, function_scope, is_forward_declaration, namespace_segments};
use crate::scope::{Scope, ScopeTable};

pub(super) fn declare_scopes<D: ast_grep_core::Doc>(
    node: &Node<D>,
    scope: &Scope,
    table: &mut ScopeTable,
) {
    match node.kind().as_ref() {
        "namespace_definition" => {
            let inner = scope.nested(namespace_segments(node));
            table.declare_namespace(&inner.path);
            if let Some(body) = node.field("body") {
                declare_children(&body, &inner, table);
            }
        }
        "class_specifier" | "struct_specifier" | "union_specifier" => {
            declare_class(node, scope, table);
        }
        "function_definition" => {
            let inner = function_scope(node, scope, table);
            if let Some(body) = node.field("body") {
                declare_children(&body, &inner, table);
            }
        }
        _ => declare_children(node, scope, table),
    }
}

fn declare_children<D: ast_grep_core::Doc>(node: &Node<D>, scope: &Scope, table: &mut ScopeTable) {
    for child in node.children() {
        declare_scopes(&child, scope, table);
    }
}

fn declare_class<D: ast_grep_core::Doc>(node: &Node<D>, scope: &Scope, table: &mut ScopeTable) {
    match node.field("body") {
        Some(body) => {
            let Some(path) = class_path(node, scope, table) else {
                return;
            };
            table.declare_class(&path);
            declare_children(&body, &scope.with_path(path), table);
        }
        None if is_forward_declaration(node) => {
            let named = node
                .field("name")
                .is_some_and(|n| n.kind().as_ref() == "type_identifier");
            if named && let Some(path) = class_path(node, scope, table) {
                table.declare_class(&path);
            }
        }
        None => {}
    }
}
