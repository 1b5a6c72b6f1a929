//! Miette report conversion for CLI errors.
//!
//! Dependency-policy failures print every violation with its import tree,
//! so one run shows everything that has to move out of the root package.

use fob_split::{SplitError, Violation};
use miette::Report;
use owo_colors::OwoColorize;

use crate::error::CliError;
use crate::ui;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Split(e) => split_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert SplitError to miette Report
pub fn split_error_to_miette(err: SplitError) -> Report {
    match err {
        SplitError::DisallowedDependencies(violations) => {
            let trees = violations
                .iter()
                .map(render_violation)
                .collect::<Vec<_>>()
                .join("\n");
            miette::miette!(
                "{}\n\n{}\nHint: Add the dependency to \"allow\" or move the importing modules out of the root group",
                SplitError::DisallowedDependencies(violations),
                trees
            )
        }
        SplitError::UnnamedEntries(_) => miette::miette!(
            "{}\n\nHint: Add a naming rule that matches these entries or set naming.fallback",
            err
        ),
        SplitError::MissingRootGroup { .. } => miette::miette!(
            "{}\n\nHint: Set rootGroup to one of the available groups",
            err
        ),
        SplitError::NameCollision { .. } | SplitError::DirectoryCollision { .. } => {
            miette::miette!(
                "{}\n\nHint: Rename one of the groups with packageNames",
                err
            )
        }
        SplitError::DependencyNameClash { .. } => miette::miette!(
            "{}\n\nHint: Rename the group with packageNames so it does not shadow the dependency",
            err
        ),
        SplitError::InvalidGroupName { .. } | SplitError::InvalidPattern { .. } => {
            miette::miette!("{}\n\nHint: Check the naming section of your config", err)
        }
        SplitError::GraphInconsistency { .. } => miette::miette!(
            "{}\n\nHint: This is a bug in fob-split; please report it with the graph snapshot",
            err
        ),
        SplitError::Graph(_) => miette::miette!("{}", err),
    }
}

fn render_violation(violation: &Violation) -> String {
    let tree = if ui::colors_enabled() {
        violation
            .tree
            .render_with(|id| id.red().bold().to_string())
    } else {
        violation.tree.render()
    };
    format!("{}\n{}", violation.dependency, tree)
}
