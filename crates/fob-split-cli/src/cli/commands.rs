use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::{parse_allow_pattern, parse_scope};

/// Available fob-split subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split the module graph and write package manifests
    ///
    /// Writes `<out-dir>/<package>/package.json` for every package and
    /// `<out-dir>/split-plan.json`. Nothing is written if the split fails.
    Split(SplitArgs),

    /// Run the full pipeline including validation without writing files
    Check(CheckArgs),

    /// Show the reachability sets and owning package of one module
    Explain(ExplainArgs),

    /// Print the JSON schema of fob-split.config.json
    Schema(SchemaArgs),
}

/// Graph and config location shared by every pipeline command.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Module graph snapshot (JSON)
    ///
    /// Defaults to the `graph` field of the config, then `module-graph.json`.
    #[arg(value_name = "GRAPH")]
    pub graph: Option<PathBuf>,

    /// Path to the config file
    ///
    /// Defaults to fob-split.config.json or fob-split.config.toml in the
    /// working directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Working directory for config discovery and relative paths
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the split command
#[derive(Args, Debug, Clone, Default)]
pub struct SplitArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Output directory for package manifests
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Group whose package is validated against the allow list
    #[arg(long, value_name = "GROUP")]
    pub root_group: Option<String>,

    /// Dependency allowed to reach the root package (repeatable)
    ///
    /// Accepts exact names and scope wildcards such as `@types/*`. Added to
    /// the config's allow list.
    #[arg(long, value_name = "NAME", value_parser = parse_allow_pattern)]
    pub allow: Vec<String>,

    /// npm scope prefixed to every package name (e.g. @acme)
    #[arg(long, value_name = "SCOPE", value_parser = parse_scope)]
    pub scope: Option<String>,

    /// Compute the split and report what would be written
    #[arg(long)]
    pub dry_run: bool,

    /// Also write split-plan.dot with the package graph
    #[arg(long)]
    pub dot: bool,
}

/// Arguments for the check command
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Print the plan as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the explain command
#[derive(Args, Debug, Clone)]
pub struct ExplainArgs {
    /// Module id as it appears in the graph (e.g. src/core/log.ts)
    #[arg(value_name = "MODULE")]
    pub module: String,

    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Arguments for the schema command
#[derive(Args, Debug, Clone, Default)]
pub struct SchemaArgs {
    /// Write the schema to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
