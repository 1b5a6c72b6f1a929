//! # fob-split
//!
//! Partition a module graph with many entry points into independently
//! publishable packages.
//!
//! Entry points are grouped by a caller-supplied [`GroupNamer`]. Every
//! module is attributed the set of groups that transitively import it;
//! modules with the same set share a package, and sets with several groups
//! become deterministically named common packages. Finally, the external
//! dependencies reaching the root package are checked against an allow
//! list, with an import tree for every violation.
//!
//! ## Pipeline
//!
//! ```text
//!  ModuleGraph ──► group_entries ──► resolve ──► synthesize ──► propagate ──► validate
//!                  (EntryGroups)    (Reachability  (SplitPlan)   (Propagation)  (Violations)
//!                                    Map)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fob_graph::{Import, Module, ModuleGraph, ModuleId};
//! use fob_split::{NamingRules, SplitOptions, Splitter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let id = |p: &str| ModuleId::new(p);
//! let graph = ModuleGraph::from_modules([
//!     Module::builder(id("src/index.ts")?)
//!         .entry(true)
//!         .import(Import::resolved("./shared", id("src/shared.ts")?))
//!         .build(),
//!     Module::builder(id("src/features/editor/index.ts")?)
//!         .entry(true)
//!         .import(Import::resolved("../../shared", id("src/shared.ts")?))
//!         .build(),
//!     Module::builder(id("src/shared.ts")?).build(),
//! ])?;
//!
//! let namer = NamingRules::new()
//!     .rule(r"^src/features/([^/]+)/", "$1")
//!     .fallback("main")
//!     .compile()?;
//!
//! let outcome = Splitter::new(SplitOptions::default()).split(&graph, &namer)?;
//! let names: Vec<_> = outcome.plan.packages().iter().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, ["main", "editor", "editor_main-common"]);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod group;
pub mod grouping;
pub mod manifest;
pub mod naming;
pub mod package;
pub mod pipeline;
pub mod propagate;
pub mod reachability;
pub mod synthesize;
pub mod tree;
pub mod validate;

pub use error::{Result, SplitError};
pub use group::{GroupId, GroupSet, GroupTable};
pub use grouping::{
    EntryGroup, EntryGroups, GroupNamer, NamingRule, NamingRules, RuleNamer, group_entries,
};
pub use manifest::{
    DEFAULT_SIBLING_RANGE, DEFAULT_VERSION_RANGE, ManifestOptions, PackageManifest,
    PeerDependencyMeta, PlanDocument, PlanPackage, manifests,
};
pub use naming::{
    COMMON_SUFFIX, ChosenName, CommonName, DEFAULT_MAX_JOINED_NAME_LENGTH, NamingOptions,
    PackageNamer, is_lossless, sanitize,
};
pub use package::{Package, PackageEdge, PackageIdx, PackageKind};
pub use pipeline::{SplitOptions, SplitOutcome, Splitter, Warning};
pub use propagate::{Propagation, propagate};
pub use reachability::{Reachability, ReachabilityMap, resolve};
pub use synthesize::{SplitPlan, synthesize};
pub use tree::{ImportTree, NodeKind, TreeNode};
pub use validate::{AllowList, Violation, validate};
