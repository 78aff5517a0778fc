use std::path::Path;

use anyhow::Context;
use tracing::debug;
use unnest_core::{Program, ProgramTree};
use unnest_parser::{SyntaxProbe, detect_language, parse_program};

/// A source file read from disk with its program tree.
#[derive(Debug)]
pub struct LoadedSource {
    pub text: String,
    pub program: Program,
    pub probe: SyntaxProbe,
}

/// Read and parse `path`, picking the grammar from its extension.
pub fn load(path: &Path) -> anyhow::Result<LoadedSource> {
    let lang = detect_language(&path.to_string_lossy())
        .with_context(|| format!("unsupported file type: {}", path.display()))?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let program = parse_program(&text, lang)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    debug!(
        path = %path.display(),
        classes = program.class_decls().len(),
        references = program.type_references().len(),
        "loaded source"
    );

    Ok(LoadedSource {
        text,
        program,
        probe: SyntaxProbe::new(lang),
    })
}

#[cfg(test)]
mod tests {
    use super::load;

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "class A {};").expect("write");
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported file type"));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.cpp");
        let err = load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing.cpp"));
    }

    #[test]
    fn broken_source_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.cpp");
        std::fs::write(&path, "class A { class B {}; ").expect("write");
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
