//! Output packages and the edges between them.

use std::collections::BTreeMap;

use fob_graph::{ExternalDependency, ModuleIdx};
use serde::{Deserialize, Serialize};

use crate::group::GroupSet;
use crate::naming::CommonName;

/// Index of a package inside a [`crate::SplitPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageIdx(u32);

impl PackageIdx {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// Owned by the root group alone.
    Root,
    /// Owned by one non-root group.
    Group,
    /// Shared by several groups.
    Common,
}

/// Dependency of one package on a sibling package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEdge {
    pub target: PackageIdx,
    /// Every module edge behind this package edge is type-only.
    pub type_only: bool,
    /// Contributing `(importer, imported)` module pairs, in discovery order.
    pub via: Vec<(ModuleIdx, ModuleIdx)>,
}

/// One synthesized package.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub kind: PackageKind,
    /// Reachability set owning this package.
    pub groups: GroupSet,
    /// Present for common packages.
    pub common_name: Option<CommonName>,
    /// Owned modules in arena order.
    pub modules: Vec<ModuleIdx>,
    /// External dependencies of the owned modules, importers restricted to
    /// those modules.
    pub externals: BTreeMap<String, ExternalDependency>,
    /// Sibling packages, ordered by target.
    pub edges: Vec<PackageEdge>,
}

impl Package {
    /// Externals with at least one value importer.
    pub fn dependencies(&self) -> impl Iterator<Item = &ExternalDependency> {
        self.externals.values().filter(|dep| !dep.is_type_only())
    }

    /// Externals used for types only.
    pub fn peer_dependencies(&self) -> impl Iterator<Item = &ExternalDependency> {
        self.externals.values().filter(|dep| dep.is_type_only())
    }

    pub fn edge_to(&self, target: PackageIdx) -> Option<&PackageEdge> {
        self.edges.iter().find(|edge| edge.target == target)
    }

    /// Targets of value edges.
    pub fn value_dependencies(&self) -> impl Iterator<Item = PackageIdx> + '_ {
        self.edges
            .iter()
            .filter(|edge| !edge.type_only)
            .map(|edge| edge.target)
    }

    pub fn is_common(&self) -> bool {
        self.kind == PackageKind::Common
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fob_graph::ModuleId;

    #[test]
    fn test_dependencies_split_by_type_only() {
        let mut react = ExternalDependency::new("react");
        react.push_importer(ModuleId::new("src/a.ts").unwrap(), true);
        let mut pad = ExternalDependency::new("left-pad");
        pad.push_importer(ModuleId::new("src/a.ts").unwrap(), false);

        let package = Package {
            name: "main".to_string(),
            kind: PackageKind::Root,
            groups: GroupSet::new(),
            common_name: None,
            modules: Vec::new(),
            externals: [react, pad]
                .into_iter()
                .map(|dep| (dep.name.clone(), dep))
                .collect(),
            edges: vec![
                PackageEdge {
                    target: PackageIdx::new(1),
                    type_only: true,
                    via: Vec::new(),
                },
                PackageEdge {
                    target: PackageIdx::new(2),
                    type_only: false,
                    via: Vec::new(),
                },
            ],
        };

        let deps: Vec<_> = package.dependencies().map(|d| d.name.as_str()).collect();
        let peers: Vec<_> = package.peer_dependencies().map(|d| d.name.as_str()).collect();
        assert_eq!(deps, ["left-pad"]);
        assert_eq!(peers, ["react"]);
        assert_eq!(
            package.value_dependencies().collect::<Vec<_>>(),
            [PackageIdx::new(2)]
        );
        assert!(package.edge_to(PackageIdx::new(1)).unwrap().type_only);
    }
}
