use unnest_config::UnnestConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands::{self, Status};

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: &Commands,
    config: &UnnestConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<Status> {
    match command {
        Commands::Query(args) => commands::query::handle(args, flags),
        Commands::Apply(args) => commands::apply::handle(args, config, flags),
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
