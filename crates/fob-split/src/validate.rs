//! Dependency Validator: rejects disallowed dependencies of the root package.

use std::collections::BTreeSet;

use fob_graph::{ModuleGraph, ModuleId};
use serde::Serialize;
use tracing::{debug, error};

use crate::error::{Result, SplitError};
use crate::grouping::EntryGroups;
use crate::propagate::Propagation;
use crate::synthesize::SplitPlan;
use crate::tree::ImportTree;

/// External dependencies permitted to reach the root package.
///
/// Entries are exact package names or `@scope/*` wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    exact: BTreeSet<String>,
    scopes: BTreeSet<String>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        match pattern.strip_suffix("/*") {
            Some(scope) if scope.starts_with('@') => {
                self.scopes.insert(scope.to_string());
            }
            _ => {
                self.exact.insert(pattern);
            }
        }
    }

    pub fn is_allowed(&self, dependency: &str) -> bool {
        if self.exact.contains(dependency) {
            return true;
        }
        dependency
            .split_once('/')
            .is_some_and(|(scope, _)| scope.starts_with('@') && self.scopes.contains(scope))
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.scopes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut list = Self::new();
        for pattern in iter {
            list.allow(pattern);
        }
        list
    }
}

/// A disallowed dependency and why it reaches the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub dependency: String,
    /// Modules importing the dependency for a value.
    pub culprits: Vec<ModuleId>,
    pub tree: ImportTree,
}

/// Check every required dependency against `allow`.
///
/// All violations are collected before failing.
pub fn validate(
    graph: &ModuleGraph,
    groups: &EntryGroups,
    plan: &SplitPlan,
    propagation: &Propagation,
    allow: &AllowList,
) -> Result<()> {
    let mut violations = Vec::new();

    for dependency in propagation.required() {
        if allow.is_allowed(dependency) {
            continue;
        }

        let tree = ImportTree::build(graph, groups, plan, propagation, dependency);
        let culprits: Vec<ModuleId> = propagation
            .culprits(dependency)
            .iter()
            .map(|&m| graph.id(m).clone())
            .collect();

        error!(
            dependency = %dependency,
            culprits = culprits.len(),
            "disallowed dependency reaches the root package"
        );

        violations.push(Violation {
            dependency: dependency.to_string(),
            culprits,
            tree,
        });
    }

    debug!(
        checked = propagation.required().count(),
        violations = violations.len(),
        "validated root dependencies"
    );

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SplitError::DisallowedDependencies(violations))
    }
}
