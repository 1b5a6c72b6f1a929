use fob_graph::ModuleId;
use thiserror::Error;

use crate::validate::Violation;

/// Result type alias for splitting operations.
pub type Result<T> = std::result::Result<T, SplitError>;

/// Errors raised while splitting a module graph into packages.
///
/// Every variant is fatal for the build that produced it. Non-fatal
/// conditions are reported as [`crate::Warning`]s instead.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The naming function returned no group for some entry points.
    #[error("{} entry point(s) have no group: {}", .0.len(), join_ids(.0))]
    UnnamedEntries(Vec<ModuleId>),

    /// The designated root group was not produced by any entry.
    #[error("root group '{root}' has no entry points (groups: {})", .available.join(", "))]
    MissingRootGroup {
        root: String,
        available: Vec<String>,
    },

    /// A group or configured package name cannot become a package name.
    #[error("invalid package name for group '{group}': {reason}")]
    InvalidGroupName { group: String, reason: String },

    /// A naming rule pattern failed to compile.
    #[error("invalid naming pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An internal invariant did not hold for a module.
    #[error("graph inconsistency at {module}: {reason}")]
    GraphInconsistency { module: ModuleId, reason: String },

    /// Two distinct reachability sets produced the same package name.
    #[error("package name '{name}' is produced by both {first} and {second}")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },

    /// Two packages would be written to the same output directory.
    #[error("packages '{first}' and '{second}' share the output directory '{dir}'")]
    DirectoryCollision {
        dir: String,
        first: String,
        second: String,
    },

    /// A package depends on a sibling package and an external dependency of
    /// the same name.
    #[error("package '{package}' depends on both the sibling package and the external dependency '{name}'")]
    DependencyNameClash { package: String, name: String },

    /// Disallowed external dependencies reach the root package.
    #[error("{}", describe_violations(.0))]
    DisallowedDependencies(Vec<Violation>),

    /// Graph construction or snapshot loading failed.
    #[error(transparent)]
    Graph(#[from] fob_graph::Error),
}

impl SplitError {
    pub(crate) fn inconsistency(module: &ModuleId, reason: impl Into<String>) -> Self {
        Self::GraphInconsistency {
            module: module.clone(),
            reason: reason.into(),
        }
    }

    /// Violations carried by a dependency-policy failure.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::DisallowedDependencies(violations) => violations,
            _ => &[],
        }
    }
}

fn join_ids(ids: &[ModuleId]) -> String {
    ids.iter()
        .map(ModuleId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_violations(violations: &[Violation]) -> String {
    let names: Vec<&str> = violations.iter().map(|v| v.dependency.as_str()).collect();
    let noun = if names.len() == 1 {
        "dependency reaches"
    } else {
        "dependencies reach"
    };
    format!(
        "{} disallowed {noun} the root package: {}",
        names.len(),
        names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unnamed_entries_message_lists_every_entry() {
        let err = SplitError::UnnamedEntries(vec![
            ModuleId::new("src/a.ts").unwrap(),
            ModuleId::new("src/b.ts").unwrap(),
        ]);
        assert_eq!(
            err.to_string(),
            "2 entry point(s) have no group: src/a.ts, src/b.ts"
        );
    }

    #[test]
    fn test_missing_root_group_message() {
        let err = SplitError::MissingRootGroup {
            root: "main".to_string(),
            available: vec!["x".to_string(), "y".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "root group 'main' has no entry points (groups: x, y)"
        );
        assert!(err.violations().is_empty());
    }
}
