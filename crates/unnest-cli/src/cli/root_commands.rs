use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Count and list the wrapper classes in a file.
    Query(QueryArgs),
    /// Unwrap one wrapper class.
    Apply(ApplyArgs),
    /// Dump the JSON schema of a report type.
    Schema(SchemaArgs),
}

/// Arguments for `unnest query`.
#[derive(Clone, Debug, Args)]
pub struct QueryArgs {
    /// C++ source file.
    pub file: PathBuf,
}

/// Arguments for `unnest apply`.
#[derive(Clone, Debug, Args)]
pub struct ApplyArgs {
    /// C++ source file.
    pub file: PathBuf,
    /// 1-based ordinal of the wrapper to unwrap.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub counter: Option<u32>,
    /// Write the rewritten source here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Skip the syntax check of the rewritten source.
    #[arg(long)]
    pub no_check: bool,
}

/// Report types with a published schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    /// Result of `query` and `apply`.
    Outcome,
    /// One entry of a query listing.
    Candidate,
    /// Run parameters.
    Request,
}

/// Arguments for `unnest schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum, default_value = "outcome")]
    pub type_name: SchemaType,
}
