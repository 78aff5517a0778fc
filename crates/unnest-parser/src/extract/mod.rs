//! Program-tree construction from a C++ syntax tree.
//!
//! Two passes over the tree:
//! 1. [`declare`] interns every namespace and class path in a [`ScopeTable`];
//! 2. the [`Extractor`] emits class definitions in pre-order and resolves
//!    every type name it meets against that table.

mod declare;
mod members;

use ast_grep_core::Node;
use ast_grep_language::SupportLang;
use tracing::debug;
use unnest_core::{ByteSpan, ClassDecl, ClassDeclId, Program, ProgramTree, TypeReference};

use crate::error::ParserError;
use crate::names::{
    class_name, class_path, flatten, function_scope, is_forward_declaration, namespace_segments,
    resolve,
};
use crate::parser::{first_syntax_error, language_name, line_of, parse_source};
use crate::scope::{Entry, Scope, ScopeTable};
use members::{base_classes, body_braces, class_members, is_class_specifier, statement_terminator};

/// Parse `source` and build its program tree.
///
/// # Errors
/// Returns [`ParserError::UnsupportedLanguage`] for anything but C++, and
/// [`ParserError::ParseFailed`] when the source already has syntax errors.
pub fn parse_program(source: &str, lang: SupportLang) -> Result<Program, ParserError> {
    if lang != SupportLang::Cpp {
        return Err(ParserError::UnsupportedLanguage(language_name(lang)));
    }
    let tree = parse_source(source, lang);
    let root = tree.root();
    if let Some(line) = first_syntax_error(&root) {
        return Err(ParserError::ParseFailed {
            language: language_name(lang),
            message: format!("syntax error at line {line}"),
        });
    }
    Ok(build_program(&root))
}

/// Build the program tree for an already parsed translation unit.
pub fn build_program<D: ast_grep_core::Doc>(root: &Node<D>) -> Program {
    let top = Scope::default();
    let mut table = ScopeTable::default();
    declare::declare_scopes(root, &top, &mut table);

    let mut extractor = Extractor {
        table: &table,
        program: Program::new(),
    };
    extractor.visit(root, &top);
    let program = extractor.program;
    debug!(
        scopes = table.len(),
        classes = program.class_decls().len(),
        references = program.type_references().len(),
        "built program tree"
    );
    program
}

struct Extractor<'t> {
    table: &'t ScopeTable,
    program: Program,
}

impl Extractor<'_> {
    fn visit<D: ast_grep_core::Doc>(&mut self, node: &Node<D>, scope: &Scope) {
        match node.kind().as_ref() {
            "namespace_definition" => {
                let inner = scope.nested(namespace_segments(node));
                if let Some(body) = node.field("body") {
                    self.visit_children(&body, &inner);
                }
            }
            "class_specifier" | "struct_specifier" | "union_specifier" => {
                self.visit_class(node, scope, None);
            }
            "template_declaration" => self.visit_template(node, scope),
            "function_definition" => self.visit_function(node, scope),
            "type_identifier" => self.bare_reference(node, scope),
            "qualified_identifier" => self.qualified_reference(node, scope),
            // Only the aliased type is a use; the new name is a declaration.
            "alias_declaration" | "type_definition" => {
                if let Some(ty) = node.field("type") {
                    self.visit(&ty, scope);
                }
            }
            "optional_type_parameter_declaration" => {
                if let Some(ty) = node.field("default_type") {
                    self.visit(&ty, scope);
                }
            }
            "type_parameter_declaration"
            | "variadic_type_parameter_declaration"
            | "template_template_parameter_declaration" => {}
            _ => self.visit_children(node, scope),
        }
    }

    fn visit_children<D: ast_grep_core::Doc>(&mut self, node: &Node<D>, scope: &Scope) {
        for child in node.children() {
            self.visit(&child, scope);
        }
    }

    fn visit_class<'r, D: ast_grep_core::Doc>(
        &mut self,
        node: &Node<'r, D>,
        scope: &Scope,
        template: Option<&Node<'r, D>>,
    ) {
        let head = node.field("name");
        let Some(body) = node.field("body") else {
            // `class B *p;` names B; `class B;` declares it.
            if !is_forward_declaration(node)
                && let Some(head) = head
            {
                self.visit(&head, scope);
            }
            return;
        };

        let head_kind = head.as_ref().map(|h| h.kind().to_string());
        if let Some(head) = &head {
            match head_kind.as_deref() {
                Some("qualified_identifier") => self.qualified_reference(head, scope),
                Some("template_type") => {
                    if let Some(args) = head.field("arguments") {
                        self.visit(&args, scope);
                    }
                }
                _ => {}
            }
        }
        for clause in node
            .children()
            .filter(|c| c.kind().as_ref() == "base_class_clause")
        {
            self.visit(&clause, scope);
        }

        let Some(path) = class_path(node, scope, self.table) else {
            debug!(line = line_of(node), "class head names an unknown scope");
            self.visit_children(&body, scope);
            return;
        };
        if let (Some(group), Some(name)) = (self.table.class_group(&path), class_name(node)) {
            let (lbrace, rbrace) = body_braces(&body);
            let anchor = template.unwrap_or(node);
            self.program.push_decl(ClassDecl {
                id: ClassDeclId(0),
                group,
                name,
                bases: base_classes(node),
                described_template: template.is_some()
                    || head_kind.as_deref() == Some("template_type"),
                members: class_members(&body, &path, self.table),
                start: anchor.range().start,
                lbrace,
                rbrace,
                terminator: statement_terminator(node),
                line: line_of(anchor),
            });
        }
        self.visit_children(&body, &scope.with_path(path));
    }

    fn visit_template<D: ast_grep_core::Doc>(&mut self, node: &Node<D>, scope: &Scope) {
        let inner = node.field("parameters").map_or_else(
            || scope.clone(),
            |params| scope.shadow(template_parameter_names(&params)),
        );
        for child in node.children() {
            if is_class_specifier(&child) {
                self.visit_class(&child, &inner, Some(node));
            } else {
                self.visit(&child, &inner);
            }
        }
    }

    fn visit_function<D: ast_grep_core::Doc>(&mut self, node: &Node<D>, scope: &Scope) {
        let inner = function_scope(node, scope, self.table);
        let return_type = node.field("type").map(|t| t.range());
        for child in node.children() {
            if return_type.as_ref() == Some(&child.range()) {
                self.visit(&child, scope);
            } else {
                self.visit(&child, &inner);
            }
        }
    }

    fn bare_reference<D: ast_grep_core::Doc>(&mut self, node: &Node<D>, scope: &Scope) {
        if is_declared_name(node) {
            return;
        }
        let name = node.text();
        if scope.is_shadowed(&name) {
            return;
        }
        if let Some(target) = self
            .table
            .lookup(&scope.path, &name)
            .and_then(Entry::class_group)
        {
            self.program
                .push_reference(TypeReference::bare(span(node), target));
        }
    }

    /// Every segment of `A::B::C` that names a class becomes a reference
    /// qualified by the segment on its left.
    fn qualified_reference<D: ast_grep_core::Doc>(&mut self, node: &Node<D>, scope: &Scope) {
        let name = flatten(node);
        let resolved = resolve(&name, scope, self.table);

        for (idx, (segment, entry)) in name.segments.iter().zip(&resolved).enumerate() {
            let Some(target) = entry.and_then(Entry::class_group) else {
                continue;
            };
            let own = name_span(&segment.node);
            let reference = match idx.checked_sub(1) {
                None => TypeReference::bare(own, target),
                Some(left_idx) => {
                    let left = name.segments[left_idx].node.range();
                    TypeReference::qualified(
                        ByteSpan::new(left.start, own.end),
                        target,
                        resolved[left_idx].and_then(Entry::class_group),
                        left.end,
                    )
                }
            };
            self.program.push_reference(reference);
        }

        for segment in &name.segments {
            match segment.node.kind().as_ref() {
                "template_type" | "template_function" | "template_method" => {
                    if let Some(args) = segment.node.field("arguments") {
                        self.visit(&args, scope);
                    }
                }
                "decltype" => self.visit(&segment.node, scope),
                _ => {}
            }
        }
    }
}

fn span<D: ast_grep_core::Doc>(node: &Node<D>) -> ByteSpan {
    let range = node.range();
    ByteSpan::new(range.start, range.end)
}

/// Span of a segment's name, without template arguments.
fn name_span<D: ast_grep_core::Doc>(node: &Node<D>) -> ByteSpan {
    match node.kind().as_ref() {
        "template_type" | "template_function" | "template_method" => {
            node.field("name").map_or_else(|| span(node), |name| span(&name))
        }
        _ => span(node),
    }
}

/// Names introduced by enum and concept heads are not uses.
fn is_declared_name<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    node.parent().is_some_and(|parent| {
        matches!(
            parent.kind().as_ref(),
            "enum_specifier" | "concept_definition"
        ) && parent
            .field("name")
            .is_some_and(|name| name.range() == node.range())
    })
}

fn template_parameter_names<D: ast_grep_core::Doc>(params: &Node<D>) -> Vec<String> {
    params
        .children()
        .filter_map(|param| match param.kind().as_ref() {
            "type_parameter_declaration" | "variadic_type_parameter_declaration" => param
                .children()
                .find(|c| c.kind().as_ref() == "type_identifier")
                .map(|c| c.text().to_string()),
            "optional_type_parameter_declaration" => {
                param.field("name").map(|c| c.text().to_string())
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests;
