//! Query methods for ModuleGraph.

use super::super::classify::Edge;
use super::super::external_dep::ExternalDependency;
use super::super::{Module, ModuleId, ModuleIdx};
use super::graph::ModuleGraph;

impl ModuleGraph {
    /// Number of modules in the graph.
    pub fn len(&self) -> usize {
        self.inner.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.modules.is_empty()
    }

    /// Look up a module by handle.
    ///
    /// # Panics
    ///
    /// Panics if `idx` was issued by a different graph.
    pub fn module(&self, idx: ModuleIdx) -> &Module {
        &self.inner.modules[idx.index()]
    }

    /// Module id for a handle.
    pub fn id(&self, idx: ModuleIdx) -> &ModuleId {
        &self.inner.modules[idx.index()].id
    }

    /// Handle for a module id, if the module exists.
    pub fn idx_of(&self, id: &ModuleId) -> Option<ModuleIdx> {
        self.inner.index.get(id).copied()
    }

    /// All module handles in arena order.
    pub fn indices(&self) -> impl Iterator<Item = ModuleIdx> + use<> {
        (0..self.inner.modules.len()).map(ModuleIdx::new)
    }

    /// All modules in arena order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.inner.modules.iter()
    }

    /// Classified import edges of a module, in import order.
    pub fn edges(&self, idx: ModuleIdx) -> &[Edge] {
        &self.inner.edges[idx.index()]
    }

    /// Internal modules imported by `idx` (value and type-only).
    pub fn dependencies(&self, idx: ModuleIdx) -> impl Iterator<Item = ModuleIdx> + '_ {
        self.edges(idx).iter().filter_map(Edge::internal)
    }

    /// Internal modules that import `idx`.
    pub fn importers(&self, idx: ModuleIdx) -> &[ModuleIdx] {
        &self.inner.importers[idx.index()]
    }

    /// Entry points in configuration order.
    pub fn entry_points(&self) -> &[ModuleIdx] {
        &self.inner.entry_points
    }

    pub fn is_entry(&self, idx: ModuleIdx) -> bool {
        self.module(idx).is_entry
    }

    pub fn is_declaration(&self, idx: ModuleIdx) -> bool {
        self.module(idx).is_declaration()
    }

    /// Implementation twin of a declaration carrier.
    pub fn declaration_twin(&self, idx: ModuleIdx) -> Option<ModuleIdx> {
        self.inner.twins[idx.index()]
    }

    /// Declaration carriers describing an implementation module.
    pub fn declaration_carriers(&self, idx: ModuleIdx) -> &[ModuleIdx] {
        &self.inner.carriers[idx.index()]
    }

    /// Aggregated external dependency records, sorted by package name.
    pub fn external_dependencies(&self) -> impl Iterator<Item = &ExternalDependency> {
        self.inner.external_deps.values()
    }

    pub fn external_dependency(&self, name: &str) -> Option<&ExternalDependency> {
        self.inner.external_deps.get(name)
    }

    /// Normalized graph roots. Empty means every module is internal.
    pub fn roots(&self) -> &[String] {
        &self.inner.roots
    }
}
