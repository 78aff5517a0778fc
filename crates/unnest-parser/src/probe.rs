//! Syntax-level diagnostics for rewritten text.

use ast_grep_language::SupportLang;
use tracing::debug;
use unnest_core::DiagnosticProbe;

use crate::parser::{first_syntax_error, parse_source};

/// A [`DiagnosticProbe`] that re-parses text and reports tree-sitter
/// `ERROR` or missing nodes.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxProbe {
    lang: SupportLang,
}

impl SyntaxProbe {
    #[must_use]
    pub const fn new(lang: SupportLang) -> Self {
        Self { lang }
    }

    #[must_use]
    pub const fn cpp() -> Self {
        Self::new(SupportLang::Cpp)
    }
}

impl Default for SyntaxProbe {
    fn default() -> Self {
        Self::cpp()
    }
}

impl DiagnosticProbe for SyntaxProbe {
    fn has_errors(&self, text: &str) -> bool {
        let tree = parse_source(text, self.lang);
        let error_line = first_syntax_error(&tree.root());
        if let Some(line) = error_line {
            debug!(line, "syntax error in rewritten text");
        }
        error_line.is_some()
    }
}
