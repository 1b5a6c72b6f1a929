//! The split pipeline: grouping, reachability, synthesis, propagation and
//! validation, in that order.

use std::fmt;

use fob_graph::{EdgeTarget, ModuleGraph, ModuleId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::grouping::{EntryGroups, GroupNamer, group_entries};
use crate::manifest::{ManifestOptions, PackageManifest, PlanDocument, manifests};
use crate::naming::NamingOptions;
use crate::propagate::{Propagation, propagate};
use crate::reachability::{ReachabilityMap, resolve};
use crate::synthesize::{SplitPlan, synthesize};
use crate::validate::{AllowList, validate};

/// Options that shape package boundaries and root validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SplitOptions {
    /// Group whose package is validated against the allow list.
    pub root_group: String,
    pub naming: NamingOptions,
    /// Dependencies allowed to reach the root package (`@scope/*` allowed).
    pub allow: Vec<String>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            root_group: "main".to_string(),
            naming: NamingOptions::default(),
            allow: Vec::new(),
        }
    }
}

/// Non-fatal conditions found while splitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Warning {
    /// A module no entry group reaches was left out of every package.
    DroppedModule { module: ModuleId },
    /// A packaged module has a relative import the front end could not
    /// resolve; it is not part of any package's dependencies.
    UnresolvedImport { module: ModuleId, specifier: String },
    /// A common package got a hashed name.
    HashedCommonName { package: String, groups: Vec<String> },
    /// Every root module is shared, so no package belongs to the root
    /// group alone.
    NoRootPackage { root_group: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DroppedModule { module } => {
                write!(f, "{module} is unreachable from every entry group and was dropped")
            }
            Self::UnresolvedImport { module, specifier } => {
                write!(f, "{module} imports '{specifier}', which does not resolve")
            }
            Self::HashedCommonName { package, groups } => write!(
                f,
                "common package for {{{}}} uses hashed name {package}",
                groups.join(", ")
            ),
            Self::NoRootPackage { root_group } => write!(
                f,
                "no package belongs to root group '{root_group}' alone; validating its shared packages"
            ),
        }
    }
}

/// Everything computed for one graph.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub groups: EntryGroups,
    pub reachability: ReachabilityMap,
    pub plan: SplitPlan,
    pub propagation: Propagation,
    pub warnings: Vec<Warning>,
}

impl SplitOutcome {
    /// Check the root package's dependencies against `allow`.
    pub fn validate(&self, graph: &ModuleGraph, allow: &AllowList) -> Result<()> {
        validate(graph, &self.groups, &self.plan, &self.propagation, allow)
    }

    pub fn manifests(&self, graph: &ModuleGraph, options: &ManifestOptions) -> Vec<PackageManifest> {
        manifests(graph, &self.plan, options)
    }

    pub fn plan_document(&self, graph: &ModuleGraph) -> PlanDocument {
        PlanDocument::new(
            graph,
            &self.groups,
            &self.plan,
            self.warnings.iter().map(ToString::to_string).collect(),
        )
    }

    /// Name of the package owning `module`.
    pub fn package_name_of(&self, graph: &ModuleGraph, module: &ModuleId) -> Option<&str> {
        let idx = graph.idx_of(module)?;
        let package = self.plan.package_of(idx)?;
        Some(self.plan.package(package).name.as_str())
    }
}

/// Runs the split pipeline with fixed options.
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    options: SplitOptions,
    allow: AllowList,
}

impl Splitter {
    pub fn new(options: SplitOptions) -> Self {
        let allow = options.allow.iter().cloned().collect();
        Self { options, allow }
    }

    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow
    }

    /// Group, resolve, synthesize and propagate without validating.
    pub fn analyze(&self, graph: &ModuleGraph, namer: &dyn GroupNamer) -> Result<SplitOutcome> {
        let groups = group_entries(graph, namer, &self.options.root_group)?;
        let reachability = resolve(graph, &groups)?;
        let plan = synthesize(graph, &groups, &reachability, &self.options.naming)?;
        let propagation = propagate(graph, &groups, &plan);

        let mut warnings: Vec<Warning> = plan
            .dropped()
            .iter()
            .map(|&m| Warning::DroppedModule {
                module: graph.id(m).clone(),
            })
            .collect();

        for package in plan.packages() {
            for &module in &package.modules {
                for edge in graph.edges(module) {
                    if let EdgeTarget::Unresolved(specifier) = &edge.target {
                        warn!(
                            module = %graph.id(module),
                            specifier = %specifier,
                            "import does not resolve"
                        );
                        warnings.push(Warning::UnresolvedImport {
                            module: graph.id(module).clone(),
                            specifier: specifier.clone(),
                        });
                    }
                }
            }
            if package.common_name.as_ref().is_some_and(|c| c.is_hashed()) {
                warnings.push(Warning::HashedCommonName {
                    package: package.name.clone(),
                    groups: package
                        .groups
                        .names(groups.table())
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                });
            }
        }

        if plan.root().is_none() {
            warn!(
                root_group = %self.options.root_group,
                "no package belongs to the root group alone"
            );
            warnings.push(Warning::NoRootPackage {
                root_group: self.options.root_group.clone(),
            });
        }

        Ok(SplitOutcome {
            groups,
            reachability,
            plan,
            propagation,
            warnings,
        })
    }

    /// Full pipeline. Fails on the first fatal phase, reporting every
    /// disallowed dependency together.
    pub fn split(&self, graph: &ModuleGraph, namer: &dyn GroupNamer) -> Result<SplitOutcome> {
        let outcome = self.analyze(graph, namer)?;
        outcome.validate(graph, &self.allow)?;

        info!(
            modules = graph.len(),
            groups = outcome.groups.len(),
            packages = outcome.plan.len(),
            warnings = outcome.warnings.len(),
            "split complete"
        );

        Ok(outcome)
    }
}
