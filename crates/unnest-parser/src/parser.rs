//! ast-grep wrapper, language detection and syntax checks.

use ast_grep_core::Node;
use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::SupportLang;

/// The concrete AST tree type returned by `parse_source`.
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// Detect the language from a file path extension.
///
/// Only C++ sources are recognized; `.h` headers are read as C++.
/// Returns `None` for anything else.
#[must_use]
pub fn detect_language(file_path: &str) -> Option<SupportLang> {
    let ext = file_path.rsplit('.').next()?;
    match ext {
        "cpp" | "cc" | "cxx" | "c++" | "hpp" | "hh" | "hxx" | "h" | "ipp" | "tpp" => {
            Some(SupportLang::Cpp)
        }
        _ => None,
    }
}

/// Parse source code into an ast-grep tree for the given language.
#[must_use]
pub fn parse_source(source: &str, lang: SupportLang) -> AstTree {
    use ast_grep_language::LanguageExt;
    lang.ast_grep(source)
}

/// Human-readable language name for error messages.
#[must_use]
pub fn language_name(lang: SupportLang) -> String {
    format!("{lang:?}").to_lowercase()
}

/// 1-based line of the first `ERROR` or missing node under `root`.
///
/// Missing nodes are the zero-width leaves tree-sitter inserts to recover
/// from an absent token.
#[must_use]
pub fn first_syntax_error<D: ast_grep_core::Doc>(root: &Node<D>) -> Option<u32> {
    root.dfs()
        .find(|node| {
            node.kind().as_ref() == "ERROR"
                || (node.range().is_empty()
                    && node.children().next().is_none()
                    && node.parent().is_some())
        })
        .map(|node| line_of(&node))
}

/// 1-based start line of `node`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn line_of<D: ast_grep_core::Doc>(node: &Node<D>) -> u32 {
    node.start_pos().line() as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_cpp_variants() {
        assert_eq!(detect_language("main.cpp"), Some(SupportLang::Cpp));
        assert_eq!(detect_language("main.cc"), Some(SupportLang::Cpp));
        assert_eq!(detect_language("header.hpp"), Some(SupportLang::Cpp));
        assert_eq!(detect_language("include/legacy.h"), Some(SupportLang::Cpp));
    }

    #[test]
    fn detect_other_languages_returns_none() {
        assert_eq!(detect_language("src/main.rs"), None);
        assert_eq!(detect_language("app.py"), None);
        assert_eq!(detect_language("Makefile"), None);
    }

    #[test]
    fn parse_source_produces_translation_unit() {
        let tree = parse_source("class A {};", SupportLang::Cpp);
        assert_eq!(tree.root().kind().as_ref(), "translation_unit");
    }

    #[test]
    fn clean_source_has_no_syntax_error() {
        let tree = parse_source("class A { class B {}; };\n", SupportLang::Cpp);
        assert_eq!(first_syntax_error(&tree.root()), None);
    }

    #[test]
    fn unbalanced_braces_are_reported() {
        let tree = parse_source("int ok;\nclass A {\n", SupportLang::Cpp);
        assert!(first_syntax_error(&tree.root()).is_some());
    }

    #[test]
    fn language_name_is_lowercase() {
        assert_eq!(language_name(SupportLang::Cpp), "cpp");
    }
}
