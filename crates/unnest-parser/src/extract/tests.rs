use ast_grep_language::LanguageExt;
use pretty_assertions::assert_eq;
use unnest_core::{DeclGroupId, MemberKind};

use super::*;

fn program_for(source: &str) -> Program {
    let tree = SupportLang::Cpp.ast_grep(source);
    build_program(&tree.root())
}

fn decl<'a>(program: &'a Program, name: &str) -> &'a ClassDecl {
    program
        .class_decls()
        .iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| {
            let available: Vec<_> = program.class_decls().iter().map(|d| &d.name).collect();
            panic!("no class '{name}', available: {available:?}")
        })
}

/// Source text of each reference to `target`.
fn references_to<'a>(program: &Program, source: &'a str, target: DeclGroupId) -> Vec<&'a str> {
    program
        .type_references()
        .iter()
        .filter(|r| r.target == target)
        .map(|r| &source[r.span.start..r.span.end])
        .collect()
}

// ── Class declarations ─────────────────────────────────────────────

#[test]
fn class_decls_are_emitted_in_pre_order() {
    let program = program_for("class A { class B { int x; }; }; struct C {};");
    let names: Vec<_> = program.class_decls().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    let ids: Vec<_> = program.class_decls().iter().map(|d| d.id.0).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn wrapper_markers_point_at_header_and_tail() {
    let source = "class A { class B { int x; }; };";
    let program = program_for(source);
    let a = decl(&program, "A");
    assert_eq!(a.start, 0);
    assert_eq!(a.lbrace, Some(8));
    assert_eq!(a.rbrace, Some(30));
    assert_eq!(a.terminator, Some(31));
    assert_eq!(a.line, 1);

    let b = decl(&program, "B");
    let MemberKind::NestedClass(nested) = &a.members[0].kind else {
        panic!("expected a nested class member, got {:?}", a.members);
    };
    assert_eq!(nested.name, "B");
    assert_eq!(nested.group, b.group);
}

#[test]
fn class_template_starts_at_template_keyword() {
    let source = "int x;\ntemplate <class T> class A { class B {}; };";
    let program = program_for(source);
    let a = decl(&program, "A");
    assert!(a.described_template);
    assert_eq!(a.start, source.find("template").unwrap_or_default());
    assert_eq!(a.line, 2);
    assert!(!decl(&program, "B").described_template);
}

#[test]
fn bases_are_recorded() {
    let program = program_for("class Base {}; class A : public Base { class B {}; };");
    assert_eq!(decl(&program, "A").bases, vec!["Base"]);
}

#[test]
fn out_of_line_definition_shares_forward_declaration_group() {
    let program = program_for("class A { class B; }; class A::B { int x; };");
    let a = decl(&program, "A");
    let b = decl(&program, "B");
    assert_eq!(a.members.len(), 1);
    assert_eq!(a.members[0].as_nested_class().map(|n| n.group), Some(b.group));
}

#[test]
fn anonymous_outer_class_is_not_emitted() {
    let program = program_for("struct { struct B {}; } value;");
    let names: Vec<_> = program.class_decls().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["B"]);
}

// ── Type references ────────────────────────────────────────────────

#[test]
fn qualified_use_is_qualified_by_outer() {
    let source = "class A { class B {}; }; A::B v;";
    let program = program_for(source);
    let a = decl(&program, "A").group;
    let b = decl(&program, "B").group;

    let refs: Vec<_> = program
        .type_references()
        .iter()
        .filter(|r| r.target == b)
        .collect();
    assert_eq!(refs.len(), 1);
    assert!(refs[0].is_qualified_by(a));
    assert_eq!(&source[refs[0].span.start..refs[0].span.end], "A::B");
    assert_eq!(
        refs[0].qualifier.map(|q| q.name_end),
        source.rfind("A::").map(|at| at + 1)
    );
}

#[test]
fn namespace_qualifier_is_not_a_class_scope() {
    let source = "namespace ns { class A { class B {}; }; } ns::A::B v;";
    let program = program_for(source);
    let a = decl(&program, "A").group;
    let b = decl(&program, "B").group;

    let to_a: Vec<_> = program
        .type_references()
        .iter()
        .filter(|r| r.target == a)
        .collect();
    assert_eq!(to_a.len(), 1);
    assert!(to_a[0].is_qualified());
    assert_eq!(to_a[0].qualifier.and_then(|q| q.scope), None);

    assert_eq!(references_to(&program, source, b), vec!["A::B"]);
}

#[test]
fn bare_uses_resolve_innermost_first() {
    let source = "class B {}; class A { class B { B *next; }; }; B top;";
    let program = program_for(source);
    let groups: Vec<_> = program
        .class_decls()
        .iter()
        .filter(|d| d.name == "B")
        .map(|d| d.group)
        .collect();
    assert_eq!(groups.len(), 2);
    assert_eq!(references_to(&program, source, groups[0]), vec!["B"]);
    assert_eq!(references_to(&program, source, groups[1]), vec!["B"]);
    let inner_use = program
        .type_references()
        .iter()
        .find(|r| r.target == groups[1])
        .map(|r| r.span.start);
    assert_eq!(inner_use, source.find("B *next"));
}

#[test]
fn declared_names_are_not_references() {
    let source = "class A {}; typedef A T; using U = A; enum E { One }; T t; U u;";
    let program = program_for(source);
    let a = decl(&program, "A").group;
    assert_eq!(references_to(&program, source, a), vec!["A", "A"]);
    assert_eq!(program.type_references().len(), 2);
}

#[test]
fn template_parameters_hide_class_names() {
    let source = "class T {}; template <class T> void f(T t); T global;";
    let program = program_for(source);
    let t = decl(&program, "T").group;
    let uses: Vec<_> = program
        .type_references()
        .iter()
        .filter(|r| r.target == t)
        .map(|r| r.span.start)
        .collect();
    assert_eq!(uses, vec![source.rfind("T global").unwrap_or_default()]);
}

#[test]
fn template_arguments_are_searched() {
    let source = "template <class X> class Box {}; class A { class B {}; }; Box<A::B> boxed;";
    let program = program_for(source);
    let b = decl(&program, "B").group;
    assert_eq!(references_to(&program, source, b), vec!["A::B"]);
}

#[test]
fn out_of_line_member_body_resolves_in_class_scope() {
    let source = "class A { class B { void f(); }; }; void A::B::f() { B *self = nullptr; }";
    let program = program_for(source);
    let a = decl(&program, "A").group;
    let b = decl(&program, "B").group;
    let refs: Vec<_> = program
        .type_references()
        .iter()
        .filter(|r| r.target == b)
        .collect();
    assert_eq!(refs.len(), 2);
    assert!(refs[0].is_qualified_by(a));
    assert!(!refs[1].is_qualified());
}

#[test]
fn qualified_class_head_is_a_reference() {
    let source = "class A { class B; }; class A::B {};";
    let program = program_for(source);
    let a = decl(&program, "A").group;
    let b = decl(&program, "B").group;
    let refs: Vec<_> = program
        .type_references()
        .iter()
        .filter(|r| r.target == b)
        .collect();
    assert_eq!(refs.len(), 1);
    assert!(refs[0].is_qualified_by(a));
}

#[test]
fn syntax_errors_are_rejected() {
    let err = parse_program("class A { class B {}; ", SupportLang::Cpp).unwrap_err();
    assert!(matches!(err, ParserError::ParseFailed { .. }));
}

#[test]
fn other_languages_are_rejected() {
    let err = parse_program("fn main() {}", SupportLang::Rust).unwrap_err();
    assert!(matches!(err, ParserError::UnsupportedLanguage(_)));
}
