use unnest_core::{NoDiagnostics, TransformRequest, run};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::QueryArgs;
use crate::commands::{Status, source};
use crate::output::output;

/// Handle `unnest query`.
pub fn handle(args: &QueryArgs, flags: &GlobalFlags) -> anyhow::Result<Status> {
    let loaded = source::load(&args.file)?;
    let outcome = run(
        &loaded.program,
        &loaded.text,
        TransformRequest::query(),
        &NoDiagnostics,
    )?;
    output(&outcome, flags.format)?;
    Ok(Status::Done)
}
