//! Command implementations for the fob-split CLI.
//!
//! - [`split`] - split the graph and write manifests
//! - [`check`] - run the pipeline with validation, write nothing
//! - [`explain`] - reachability and package of one module
//! - [`schema`] - config JSON schema
//!
//! Each command provides an `execute` function taking its parsed arguments.

pub mod check;
pub mod explain;
pub mod schema;
pub mod split;
pub mod utils;

pub use check::execute as check_execute;
pub use explain::execute as explain_execute;
pub use schema::execute as schema_execute;
pub use split::execute as split_execute;
