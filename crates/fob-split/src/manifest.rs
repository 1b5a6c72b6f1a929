//! Output manifests: one `package.json`-shaped record per package plus a
//! plan document describing the whole split.

use std::collections::BTreeMap;

use fob_graph::ModuleGraph;
use serde::{Deserialize, Serialize};

use crate::grouping::EntryGroups;
use crate::naming::unscoped;
use crate::package::{Package, PackageKind};
use crate::synthesize::SplitPlan;

/// Range used for external dependencies with no configured version.
pub const DEFAULT_VERSION_RANGE: &str = "*";

/// Range used for sibling package references.
pub const DEFAULT_SIBLING_RANGE: &str = "workspace:*";

/// Controls how manifests spell version ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestOptions {
    /// Version range per external dependency.
    pub versions: BTreeMap<String, String>,
    /// Add sibling packages to `dependencies` / `peerDependencies`.
    pub link_siblings: bool,
    pub sibling_range: String,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            versions: BTreeMap::new(),
            link_siblings: true,
            sibling_range: DEFAULT_SIBLING_RANGE.to_string(),
        }
    }
}

impl ManifestOptions {
    fn range_of(&self, dependency: &str) -> String {
        self.versions
            .get(dependency)
            .cloned()
            .unwrap_or_else(|| DEFAULT_VERSION_RANGE.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerDependencyMeta {
    pub optional: bool,
}

/// Manifest of one output package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    pub private: bool,
    /// Owned module ids, sorted.
    pub modules: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub peer_dependencies: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub peer_dependencies_meta: BTreeMap<String, PeerDependencyMeta>,
    /// Sibling packages imported by this one, sorted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub package_dependencies: Vec<String>,
}

impl PackageManifest {
    pub fn from_package(
        graph: &ModuleGraph,
        plan: &SplitPlan,
        package: &Package,
        options: &ManifestOptions,
    ) -> Self {
        let mut modules: Vec<String> = package
            .modules
            .iter()
            .map(|&m| graph.id(m).as_str().to_string())
            .collect();
        modules.sort_unstable();

        let mut dependencies = BTreeMap::new();
        let mut peer_dependencies = BTreeMap::new();
        let mut peer_dependencies_meta = BTreeMap::new();

        for dep in package.dependencies() {
            dependencies.insert(dep.name.clone(), options.range_of(&dep.name));
        }
        for dep in package.peer_dependencies() {
            peer_dependencies.insert(dep.name.clone(), options.range_of(&dep.name));
            peer_dependencies_meta.insert(dep.name.clone(), PeerDependencyMeta { optional: true });
        }

        let mut package_dependencies = Vec::with_capacity(package.edges.len());
        for edge in &package.edges {
            let sibling = plan.package(edge.target).name.clone();
            if options.link_siblings {
                if edge.type_only {
                    peer_dependencies.insert(sibling.clone(), options.sibling_range.clone());
                    peer_dependencies_meta
                        .insert(sibling.clone(), PeerDependencyMeta { optional: true });
                } else {
                    dependencies.insert(sibling.clone(), options.sibling_range.clone());
                }
            }
            package_dependencies.push(sibling);
        }
        package_dependencies.sort_unstable();

        Self {
            name: package.name.clone(),
            private: false,
            modules,
            dependencies,
            peer_dependencies,
            peer_dependencies_meta,
            package_dependencies,
        }
    }

    /// Directory name for the package: the name without its scope.
    pub fn dir_name(&self) -> &str {
        unscoped(&self.name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Manifests of every package, root first.
pub fn manifests(
    graph: &ModuleGraph,
    plan: &SplitPlan,
    options: &ManifestOptions,
) -> Vec<PackageManifest> {
    plan.packages()
        .iter()
        .map(|package| PackageManifest::from_package(graph, plan, package, options))
        .collect()
}

/// One package in the plan document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPackage {
    pub name: String,
    pub kind: PackageKind,
    /// Owning group names, sorted.
    pub groups: Vec<String>,
    pub module_count: usize,
}

/// Machine-readable summary of a split (`split-plan.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    pub root_group: String,
    pub packages: Vec<PlanPackage>,
    /// Module id -> package name.
    pub assignment: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl PlanDocument {
    pub fn new(
        graph: &ModuleGraph,
        groups: &EntryGroups,
        plan: &SplitPlan,
        warnings: Vec<String>,
    ) -> Self {
        let packages = plan
            .packages()
            .iter()
            .map(|package| PlanPackage {
                name: package.name.clone(),
                kind: package.kind,
                groups: package
                    .groups
                    .names(groups.table())
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                module_count: package.modules.len(),
            })
            .collect();

        let assignment = graph
            .indices()
            .filter_map(|m| {
                plan.package_of(m).map(|p| {
                    (
                        graph.id(m).as_str().to_string(),
                        plan.package(p).name.clone(),
                    )
                })
            })
            .collect();

        let dropped = plan
            .dropped()
            .iter()
            .map(|&m| graph.id(m).as_str().to_string())
            .collect();

        Self {
            root_group: groups.root().name.clone(),
            packages,
            assignment,
            dropped,
            warnings,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
