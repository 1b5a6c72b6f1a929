//! # fob-split-cli
//!
//! Command-line front end for [`fob_split`]. Reads a module graph snapshot,
//! splits it into packages and writes one `package.json` per package plus
//! a `split-plan.json` describing the assignment.
//!
//! ## Modules
//!
//! - [`cli`] - argument parsing (clap derive)
//! - [`commands`] - `split`, `check`, `explain` and `schema`
//! - [`config`] - layered configuration (figment)
//! - [`error`] - CLI error hierarchy and miette reports
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - terminal status messages and summaries

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
