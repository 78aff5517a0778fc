use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Rewritten source as-is; reports as compact JSON.
    Raw,
    /// Pretty-printed JSON.
    Json,
}

impl From<unnest_config::OutputFormat> for OutputFormat {
    fn from(format: unnest_config::OutputFormat) -> Self {
        match format {
            unnest_config::OutputFormat::Raw => Self::Raw,
            unnest_config::OutputFormat::Json => Self::Json,
        }
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
}
