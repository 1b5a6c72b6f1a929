//! Package Synthesizer: turns reachability sets into packages.
//!
//! Modules with equal placement sets share a package. Declaration carriers
//! ride along with their implementation twin when the twin is placed, and
//! follow their own set otherwise. Dead modules are dropped.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use fob_graph::{EdgeTarget, ExternalDependency, ModuleGraph, ModuleIdx};
use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, warn};

use crate::error::{Result, SplitError};
use crate::group::GroupSet;
use crate::grouping::EntryGroups;
use crate::naming::{NamingOptions, PackageNamer, unscoped};
use crate::package::{Package, PackageEdge, PackageIdx, PackageKind};
use crate::reachability::ReachabilityMap;

/// Packages and the module -> package assignment.
#[derive(Debug, Clone)]
pub struct SplitPlan {
    packages: Vec<Package>,
    assignment: Vec<Option<PackageIdx>>,
    root: Option<PackageIdx>,
    dropped: Vec<ModuleIdx>,
}

impl SplitPlan {
    /// Packages, root first, then by name.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn package(&self, idx: PackageIdx) -> &Package {
        &self.packages[idx.index()]
    }

    pub fn indices(&self) -> impl Iterator<Item = PackageIdx> + use<> {
        (0..self.packages.len()).map(PackageIdx::new)
    }

    pub fn by_name(&self, name: &str) -> Option<PackageIdx> {
        self.packages
            .iter()
            .position(|p| p.name == name)
            .map(PackageIdx::new)
    }

    /// Package owning `module`, `None` for dropped modules.
    pub fn package_of(&self, module: ModuleIdx) -> Option<PackageIdx> {
        self.assignment.get(module.index()).copied().flatten()
    }

    /// Package owned by the root group alone, if any module has exactly
    /// that placement set.
    pub fn root(&self) -> Option<PackageIdx> {
        self.root
    }

    pub fn root_package(&self) -> Option<&Package> {
        self.root.map(|idx| self.package(idx))
    }

    /// Modules reached by no group, in arena order.
    pub fn dropped(&self) -> &[ModuleIdx] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Export the package graph as DOT.
    ///
    /// The root package is a double circle, common packages are boxes and
    /// type-only package edges are dashed.
    pub fn to_dot_format(&self) -> String {
        let mut output = String::from("digraph SplitPlan {\n");

        for package in &self.packages {
            let shape = match package.kind {
                PackageKind::Root => " [shape=doublecircle]",
                PackageKind::Common => " [shape=box]",
                PackageKind::Group => "",
            };
            let _ = writeln!(output, "    \"{}\"{shape};", package.name);
        }

        for package in &self.packages {
            for edge in &package.edges {
                let style = if edge.type_only { " [style=dashed]" } else { "" };
                let _ = writeln!(
                    output,
                    "    \"{}\" -> \"{}\"{style};",
                    package.name,
                    self.package(edge.target).name
                );
            }
        }

        output.push_str("}\n");
        output
    }
}

/// Build packages from reachability sets.
pub fn synthesize(
    graph: &ModuleGraph,
    groups: &EntryGroups,
    reachability: &ReachabilityMap,
    naming: &NamingOptions,
) -> Result<SplitPlan> {
    let mut buckets: BTreeMap<GroupSet, Vec<ModuleIdx>> = BTreeMap::new();
    let mut attached: Vec<(ModuleIdx, ModuleIdx)> = Vec::new();
    let mut dropped = Vec::new();

    for idx in graph.indices() {
        if let Some(twin) = graph.declaration_twin(idx) {
            if reachability.is_reachable(twin) {
                attached.push((idx, twin));
                continue;
            }
        }

        match reachability.placement(idx) {
            Some(set) => buckets.entry(set.clone()).or_default().push(idx),
            None => {
                warn!(
                    module = %graph.id(idx),
                    "module is unreachable from every entry group, dropping it"
                );
                dropped.push(idx);
            }
        }
    }

    let mut packages = name_packages(groups, naming, buckets)?;
    packages.sort_by(|a, b| {
        (a.kind != PackageKind::Root)
            .cmp(&(b.kind != PackageKind::Root))
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut assignment: Vec<Option<PackageIdx>> = vec![None; graph.len()];
    for (i, package) in packages.iter().enumerate() {
        for &module in &package.modules {
            assignment[module.index()] = Some(PackageIdx::new(i));
        }
    }

    let mut is_attached = vec![false; graph.len()];
    for &(carrier, twin) in &attached {
        let Some(owner) = assignment[twin.index()] else {
            return Err(SplitError::inconsistency(
                graph.id(carrier),
                format!("declaration twin {} has no package", graph.id(twin)),
            ));
        };
        assignment[carrier.index()] = Some(owner);
        is_attached[carrier.index()] = true;
        packages[owner.index()].modules.push(carrier);
    }

    for (i, package) in packages.iter_mut().enumerate() {
        package.modules.sort_unstable();
        link_package(graph, &assignment, PackageIdx::new(i), package)?;
    }

    check_assignment(graph, reachability, groups, &packages, &is_attached)?;
    check_dependency_names(&packages)?;

    let root = packages
        .iter()
        .position(|p| p.kind == PackageKind::Root)
        .map(PackageIdx::new);

    debug!(
        packages = packages.len(),
        common = packages.iter().filter(|p| p.is_common()).count(),
        attached = attached.len(),
        dropped = dropped.len(),
        "synthesized packages"
    );

    Ok(SplitPlan {
        packages,
        assignment,
        root,
        dropped,
    })
}

fn name_packages(
    groups: &EntryGroups,
    naming: &NamingOptions,
    buckets: BTreeMap<GroupSet, Vec<ModuleIdx>>,
) -> Result<Vec<Package>> {
    let table = groups.table();
    let namer = PackageNamer::new(naming, table, groups.root_id());
    // Keyed by output directory; equal names imply equal directories.
    let mut owners: HashMap<String, (String, GroupSet)> = HashMap::default();
    let mut packages = Vec::with_capacity(buckets.len());

    for (set, modules) in buckets {
        let chosen = namer.name(&set)?;

        let dir = unscoped(&chosen.name);
        if let Some((previous, previous_set)) = owners.get(dir) {
            if *previous == chosen.name {
                return Err(SplitError::NameCollision {
                    name: chosen.name,
                    first: previous_set.display(table).to_string(),
                    second: set.display(table).to_string(),
                });
            }
            return Err(SplitError::DirectoryCollision {
                dir: dir.to_string(),
                first: previous.clone(),
                second: chosen.name,
            });
        }
        owners.insert(dir.to_string(), (chosen.name.clone(), set.clone()));

        if let Some(common) = chosen.common.as_ref().filter(|c| c.is_hashed()) {
            warn!(
                package = %chosen.name,
                groups = %set.display(table),
                name = %common,
                "common package name falls back to hashed form"
            );
        }

        let kind = match set.single() {
            Some(group) if group == groups.root_id() => PackageKind::Root,
            Some(_) => PackageKind::Group,
            None => PackageKind::Common,
        };

        packages.push(Package {
            name: chosen.name,
            kind,
            groups: set,
            common_name: chosen.common,
            modules,
            externals: BTreeMap::new(),
            edges: Vec::new(),
        });
    }

    Ok(packages)
}

/// Collect a package's external dependencies and sibling edges.
fn link_package(
    graph: &ModuleGraph,
    assignment: &[Option<PackageIdx>],
    this: PackageIdx,
    package: &mut Package,
) -> Result<()> {
    let mut edges: BTreeMap<PackageIdx, PackageEdge> = BTreeMap::new();

    for &module in &package.modules {
        for edge in graph.edges(module) {
            match &edge.target {
                EdgeTarget::External(name) => {
                    package
                        .externals
                        .entry(name.clone())
                        .or_insert_with(|| ExternalDependency::new(name.clone()))
                        .push_importer(graph.id(module).clone(), edge.type_only);
                }
                EdgeTarget::Internal(target) => {
                    let Some(owner) = assignment[target.index()] else {
                        return Err(SplitError::inconsistency(
                            graph.id(*target),
                            format!("imported by {} but owned by no package", graph.id(module)),
                        ));
                    };
                    if owner == this {
                        continue;
                    }
                    let link = edges.entry(owner).or_insert_with(|| PackageEdge {
                        target: owner,
                        type_only: true,
                        via: Vec::new(),
                    });
                    link.type_only &= edge.type_only;
                    link.via.push((module, *target));
                }
                EdgeTarget::Builtin(_) | EdgeTarget::Unresolved(_) => {}
            }
        }
    }

    package.edges = edges.into_values().collect();
    Ok(())
}

/// A sibling package must not share its name with an external dependency of
/// the package importing it; both would land under one manifest key.
fn check_dependency_names(packages: &[Package]) -> Result<()> {
    for package in packages {
        for edge in &package.edges {
            let sibling = &packages[edge.target.index()].name;
            if package.externals.contains_key(sibling) {
                return Err(SplitError::DependencyNameClash {
                    package: package.name.clone(),
                    name: sibling.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Every placed module must sit in the package of its placement set.
fn check_assignment(
    graph: &ModuleGraph,
    reachability: &ReachabilityMap,
    groups: &EntryGroups,
    packages: &[Package],
    is_attached: &[bool],
) -> Result<()> {
    for package in packages {
        for &module in &package.modules {
            if is_attached[module.index()] {
                continue;
            }
            match reachability.placement(module) {
                Some(set) if *set == package.groups => {}
                Some(set) => {
                    return Err(SplitError::inconsistency(
                        graph.id(module),
                        format!(
                            "placed in '{}' ({}) but its reachability set is {}",
                            package.name,
                            package.groups.display(groups.table()),
                            set.display(groups.table())
                        ),
                    ));
                }
                None => {
                    return Err(SplitError::inconsistency(
                        graph.id(module),
                        format!("unreachable module placed in '{}'", package.name),
                    ));
                }
            }
        }
    }
    Ok(())
}
