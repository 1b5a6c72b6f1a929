//! Command-line interface definition for fob-split.
//!
//! # Command Structure
//!
//! - `fob-split split` - split the graph and write package manifests
//! - `fob-split check` - run the full pipeline, write nothing
//! - `fob-split explain` - show why a module lands in its package
//! - `fob-split schema` - print the config JSON schema

mod commands;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{CheckArgs, Command, ExplainArgs, GraphArgs, SchemaArgs, SplitArgs};
pub use validation::{parse_allow_pattern, parse_scope};

/// fob-split - split a multi-entry module graph into publishable packages
#[derive(Parser, Debug)]
#[command(
    name = "fob-split",
    version,
    about = "Split a multi-entry module graph into publishable packages",
    long_about = "fob-split groups entry points, attributes every module to the groups that\n\
                  import it, hoists shared modules into common packages and checks that no\n\
                  disallowed dependency reaches the root package."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
