use anyhow::Context;
use tracing::info;
use unnest_config::UnnestConfig;
use unnest_core::{RunOutcome, TransformRequest, run};

use crate::cli::root_commands::ApplyArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::{Status, source};
use crate::output::output;

/// Handle `unnest apply`.
pub fn handle(
    args: &ApplyArgs,
    config: &UnnestConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<Status> {
    let outcome = execute(args, config)?;

    if let (Some(path), Some(text)) = (&args.output, outcome.output()) {
        std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote rewritten source");
    }

    match flags.format {
        OutputFormat::Json => output(&outcome, flags.format)?,
        OutputFormat::Raw => match &outcome {
            RunOutcome::Done(report) if args.output.is_none() => print!("{}", report.output),
            RunOutcome::OutOfRange {
                requested,
                available,
            } if !flags.quiet => {
                eprintln!("unnest: wrapper #{requested} requested, {available} found");
            }
            RunOutcome::InternalError { reason } => eprintln!("unnest: {reason}"),
            _ => {}
        },
    }

    Ok(status_of(&outcome))
}

/// Run the rewrite described by `args`, with config values filling the
/// flags that were not given.
fn execute(args: &ApplyArgs, config: &UnnestConfig) -> anyhow::Result<RunOutcome> {
    let loaded = source::load(&args.file)?;
    let request = TransformRequest::new(args.counter.unwrap_or(config.transform.counter))
        .with_diagnostics(config.transform.check_diagnostics && !args.no_check);
    let outcome = run(&loaded.program, &loaded.text, request, &loaded.probe)?;
    Ok(outcome)
}

const fn status_of(outcome: &RunOutcome) -> Status {
    match outcome {
        RunOutcome::Query(_) | RunOutcome::Done(_) => Status::Done,
        RunOutcome::OutOfRange { .. } => Status::OutOfRange,
        RunOutcome::InternalError { .. } => Status::Failed,
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use pretty_assertions::assert_eq;
    use unnest_config::UnnestConfig;

    use super::{execute, handle};
    use crate::cli::root_commands::ApplyArgs;
    use crate::cli::{GlobalFlags, OutputFormat};
    use crate::commands::Status;

    const TWO_WRAPPERS: &str = "class A { class B {}; };\nclass C { class D {}; };\n";

    fn write_input(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("input.cpp");
        std::fs::write(&path, text).expect("write input");
        path
    }

    fn args(file: PathBuf, counter: Option<u32>, output: Option<PathBuf>) -> ApplyArgs {
        ApplyArgs {
            file,
            counter,
            output,
            no_check: false,
        }
    }

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: true,
        }
    }

    #[test]
    fn output_file_receives_rewritten_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = write_input(dir.path(), TWO_WRAPPERS);
        let target = dir.path().join("out.cpp");

        let status = handle(
            &args(input.clone(), Some(2), Some(target.clone())),
            &UnnestConfig::default(),
            &flags(),
        )
        .expect("apply");

        assert_eq!(status, Status::Done);
        let written = std::fs::read_to_string(&target).expect("read output");
        assert_eq!(written, "class A { class B {}; };\n class D {}; \n");
        let original = std::fs::read_to_string(&input).expect("read input");
        assert_eq!(original, TWO_WRAPPERS);
    }

    #[test]
    fn configured_counter_is_used_without_flag() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = write_input(dir.path(), TWO_WRAPPERS);
        let mut config = UnnestConfig::default();
        config.transform.counter = 2;

        let outcome = execute(&args(input, None, None), &config).expect("apply");
        let candidate = match outcome {
            unnest_core::RunOutcome::Done(report) => report.candidate,
            other => panic!("expected a rewrite, got {other:?}"),
        };
        assert_eq!(candidate.outer_name, "C");
    }

    #[test]
    fn out_of_range_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = write_input(dir.path(), TWO_WRAPPERS);
        let target = dir.path().join("out.cpp");

        let status = handle(
            &args(input, Some(3), Some(target.clone())),
            &UnnestConfig::default(),
            &flags(),
        )
        .expect("apply");

        assert_eq!(status, Status::OutOfRange);
        assert!(!target.exists());
    }
}
