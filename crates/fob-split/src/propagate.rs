//! Dependency Propagator: external dependencies reaching the root package.
//!
//! Packages are walked from the root package along sibling edges. A
//! dependency is *required* when some package reached through value edges
//! imports it for a value. Dependencies seen only through type-only paths
//! are *peer-only*.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use fob_graph::{ModuleGraph, ModuleIdx};
use tracing::debug;

use crate::grouping::EntryGroups;
use crate::package::PackageIdx;
use crate::synthesize::SplitPlan;

/// Result of walking the package graph from the root.
#[derive(Debug, Clone, Default)]
pub struct Propagation {
    starts: Vec<PackageIdx>,
    reached: Vec<PackageIdx>,
    parent: Vec<Option<PackageIdx>>,
    on_value_path: Vec<bool>,
    required: BTreeMap<String, Vec<ModuleIdx>>,
    peer_only: BTreeSet<String>,
}

impl Propagation {
    /// Packages owning the root group's entries, root package first.
    pub fn starts(&self) -> &[PackageIdx] {
        &self.starts
    }

    /// Packages reached through value edges, in walk order.
    pub fn reached(&self) -> &[PackageIdx] {
        &self.reached
    }

    pub fn is_reached(&self, package: PackageIdx) -> bool {
        self.on_value_path
            .get(package.index())
            .copied()
            .unwrap_or(false)
    }

    /// Package through which `package` was first reached.
    pub fn parent(&self, package: PackageIdx) -> Option<PackageIdx> {
        self.parent.get(package.index()).copied().flatten()
    }

    /// Chain of packages from a start package down to `package`.
    pub fn path_to(&self, package: PackageIdx) -> Vec<PackageIdx> {
        if !self.is_reached(package) {
            return Vec::new();
        }
        let mut path = vec![package];
        let mut current = package;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Required dependency names, sorted.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.required.keys().map(String::as_str)
    }

    pub fn is_required(&self, dependency: &str) -> bool {
        self.required.contains_key(dependency)
    }

    /// Modules of reached packages that value-import `dependency`.
    pub fn culprits(&self, dependency: &str) -> &[ModuleIdx] {
        self.required
            .get(dependency)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Dependencies that reach the root for types only.
    pub fn peer_only(&self) -> impl Iterator<Item = &str> {
        self.peer_only.iter().map(String::as_str)
    }
}

/// Walk the package graph from the packages owning the root group's entries.
pub fn propagate(graph: &ModuleGraph, groups: &EntryGroups, plan: &SplitPlan) -> Propagation {
    let mut starts: Vec<PackageIdx> = groups
        .root()
        .entries
        .iter()
        .filter_map(|&entry| plan.package_of(entry))
        .collect();
    starts.sort_unstable();
    starts.dedup();

    let mut parent = vec![None; plan.len()];
    let mut on_value_path = vec![false; plan.len()];
    let mut reached = Vec::new();
    let mut queue: VecDeque<PackageIdx> = VecDeque::new();

    for &start in &starts {
        on_value_path[start.index()] = true;
        queue.push_back(start);
    }
    while let Some(current) = queue.pop_front() {
        reached.push(current);
        for next in plan.package(current).value_dependencies() {
            if !on_value_path[next.index()] {
                on_value_path[next.index()] = true;
                parent[next.index()] = Some(current);
                queue.push_back(next);
            }
        }
    }

    let mut seen = on_value_path.clone();
    let mut type_reached = Vec::new();
    queue.extend(reached.iter().copied());
    while let Some(current) = queue.pop_front() {
        for edge in &plan.package(current).edges {
            if !seen[edge.target.index()] {
                seen[edge.target.index()] = true;
                type_reached.push(edge.target);
                queue.push_back(edge.target);
            }
        }
    }

    let mut required: BTreeMap<String, Vec<ModuleIdx>> = BTreeMap::new();
    for &package in &reached {
        for dep in plan.package(package).externals.values() {
            let culprits: Vec<ModuleIdx> = dep
                .value_importers()
                .filter_map(|id| graph.idx_of(id))
                .collect();
            if !culprits.is_empty() {
                required.entry(dep.name.clone()).or_default().extend(culprits);
            }
        }
    }
    for culprits in required.values_mut() {
        culprits.sort_unstable();
        culprits.dedup();
    }

    let peer_only: BTreeSet<String> = reached
        .iter()
        .chain(&type_reached)
        .flat_map(|&package| plan.package(package).externals.keys())
        .filter(|name| !required.contains_key(*name))
        .cloned()
        .collect();

    debug!(
        starts = starts.len(),
        reached = reached.len(),
        type_only_packages = type_reached.len(),
        required = required.len(),
        peer_only = peer_only.len(),
        "propagated root dependencies"
    );

    Propagation {
        starts,
        reached,
        parent,
        on_value_path,
        required,
        peer_only,
    }
}
