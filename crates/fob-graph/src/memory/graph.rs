use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use super::super::classify::Edge;
use super::super::external_dep::ExternalDependency;
use super::super::{Module, ModuleId, ModuleIdx};

/// Immutable module dependency graph.
///
/// Cloning is cheap: the arena lives behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ModuleGraph {
    pub(super) inner: Arc<GraphInner>,
}

#[derive(Debug, Default)]
pub(super) struct GraphInner {
    pub(super) modules: Vec<Module>,
    pub(super) index: HashMap<ModuleId, ModuleIdx>,
    /// Classified import edges, in import order.
    pub(super) edges: Vec<Vec<Edge>>,
    /// Internal importers of each module, sorted and deduplicated.
    pub(super) importers: Vec<Vec<ModuleIdx>>,
    pub(super) entry_points: Vec<ModuleIdx>,
    /// Declaration carrier → implementation twin.
    pub(super) twins: Vec<Option<ModuleIdx>>,
    /// Implementation → declaration carriers describing it.
    pub(super) carriers: Vec<Vec<ModuleIdx>>,
    pub(super) external_deps: BTreeMap<String, ExternalDependency>,
    pub(super) roots: Vec<String>,
}
