//! # unnest-parser
//!
//! ast-grep-based C++ front end for the unnest transformation.
//!
//! Parses a translation unit with the tree-sitter C++ grammar and builds
//! the [`unnest_core::Program`] the transformation runs over: class
//! definitions with their members and source markers, plus every type
//! reference resolved to a declaration group. [`SyntaxProbe`] re-parses
//! rewritten text to catch syntax errors introduced by a rewrite.

pub mod error;
pub mod parser;
pub mod probe;

mod extract;
mod names;
mod scope;

pub use error::ParserError;
pub use extract::{build_program, parse_program};
pub use parser::{AstTree, detect_language, first_syntax_error, parse_source};
pub use probe::SyntaxProbe;
