use schemars::schema_for;
use unnest_core::{RunOutcome, TransformRequest, WrapperCandidate};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::commands::Status;
use crate::output::output;

/// Handle `unnest schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<Status> {
    let schema = match args.type_name {
        SchemaType::Outcome => schema_for!(RunOutcome),
        SchemaType::Candidate => schema_for!(WrapperCandidate),
        SchemaType::Request => schema_for!(TransformRequest),
    };
    output(&schema, flags.format)?;
    Ok(Status::Done)
}

#[cfg(test)]
mod tests {
    use schemars::schema_for;
    use unnest_core::RunOutcome;

    #[test]
    fn outcome_schema_names_every_status() {
        let schema = serde_json::to_string(&schema_for!(RunOutcome)).expect("serialize");
        for status in ["query", "done", "out_of_range", "internal_error"] {
            assert!(schema.contains(status), "schema lacks {status}");
        }
    }
}
