//! Construction methods for ModuleGraph.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;
use tracing::debug;

use super::super::classify::{Classifier, EdgeTarget};
use super::super::external_dep::ExternalDependency;
use super::super::module::implementation_candidates;
use super::super::{Module, ModuleId, ModuleIdx};
use super::graph::{GraphInner, ModuleGraph};
use crate::{Error, Result};

/// Collects modules, roots and entry points, then freezes them into a
/// [`ModuleGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    modules: Vec<Module>,
    roots: Vec<String>,
    entries: Vec<ModuleId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a graph root directory. Modules outside every root are external.
    pub fn root(mut self, root: impl AsRef<str>) -> Result<Self> {
        self.add_root(root)?;
        Ok(self)
    }

    pub fn add_root(&mut self, root: impl AsRef<str>) -> Result<()> {
        let raw = root.as_ref().trim();
        let normalized = if raw.is_empty() || raw == "." || raw == "./" {
            ".".to_string()
        } else {
            // A root is a directory, so normalize it like a module path.
            ModuleId::new(raw)
                .map_err(|e| Error::InvalidConfig(format!("invalid graph root '{raw}': {e}")))?
                .as_str()
                .to_string()
        };
        if !self.roots.contains(&normalized) {
            self.roots.push(normalized);
        }
        Ok(())
    }

    pub fn module(mut self, module: Module) -> Self {
        self.add_module(module);
        self
    }

    pub fn add_module(&mut self, module: Module) {
        self.modules.push(module);
    }

    /// Designate an entry point by id, in addition to modules flagged
    /// `is_entry`.
    pub fn entry(mut self, id: ModuleId) -> Self {
        self.add_entry(id);
        self
    }

    pub fn add_entry(&mut self, id: ModuleId) {
        if !self.entries.contains(&id) {
            self.entries.push(id);
        }
    }

    /// Intern ids, classify every edge and build reverse edges.
    pub fn build(self) -> Result<ModuleGraph> {
        let GraphBuilder {
            mut modules,
            roots,
            entries,
        } = self;

        let mut index: HashMap<ModuleId, ModuleIdx> = HashMap::default();
        for (i, module) in modules.iter().enumerate() {
            if index.insert(module.id.clone(), ModuleIdx::new(i)).is_some() {
                return Err(Error::DuplicateModule(module.id.clone()));
            }
        }

        let mut entry_points = Vec::with_capacity(entries.len());
        for id in &entries {
            let idx = *index
                .get(id)
                .ok_or_else(|| Error::UnknownEntry(id.clone()))?;
            modules[idx.index()].mark_entry();
            entry_points.push(idx);
        }
        for (i, module) in modules.iter().enumerate() {
            let idx = ModuleIdx::new(i);
            if module.is_entry && !entry_points.contains(&idx) {
                entry_points.push(idx);
            }
        }

        let classifier = Classifier::new(&index, &roots);
        let edges: Vec<_> = modules
            .iter()
            .map(|module| classifier.classify_module(module))
            .collect();

        let mut importers: Vec<Vec<ModuleIdx>> = vec![Vec::new(); modules.len()];
        let mut external_deps: BTreeMap<String, ExternalDependency> = BTreeMap::new();

        for (i, module_edges) in edges.iter().enumerate() {
            let from = ModuleIdx::new(i);
            for edge in module_edges {
                match &edge.target {
                    EdgeTarget::Internal(to) => importers[to.index()].push(from),
                    EdgeTarget::External(name) => {
                        if edge.specifier.starts_with('.') {
                            debug!(
                                module = %modules[i].id,
                                specifier = %edge.specifier,
                                target = %name,
                                "relative import resolves outside the graph roots, treating it as external"
                            );
                        }
                        external_deps
                            .entry(name.clone())
                            .or_insert_with(|| ExternalDependency::new(name.clone()))
                            .push_importer(modules[i].id.clone(), edge.type_only);
                    }
                    EdgeTarget::Unresolved(specifier) => {
                        debug!(
                            module = %modules[i].id,
                            specifier = %specifier,
                            "relative import has no resolution"
                        );
                    }
                    EdgeTarget::Builtin(_) => {}
                }
            }
        }
        for list in &mut importers {
            list.sort_unstable();
            list.dedup();
        }

        let (twins, carriers) = pair_declarations(&modules, &index);

        Ok(ModuleGraph {
            inner: Arc::new(GraphInner {
                modules,
                index,
                edges,
                importers,
                entry_points,
                twins,
                carriers,
                external_deps,
                roots,
            }),
        })
    }
}

/// Link declaration carriers to their implementation twins.
///
/// An explicit twin wins; otherwise a `.d.ts` file is paired with the first
/// existing implementation candidate sharing its stem.
fn pair_declarations(
    modules: &[Module],
    index: &HashMap<ModuleId, ModuleIdx>,
) -> (Vec<Option<ModuleIdx>>, Vec<Vec<ModuleIdx>>) {
    let mut twins = vec![None; modules.len()];
    let mut carriers = vec![Vec::new(); modules.len()];

    for (i, module) in modules.iter().enumerate() {
        let Some(declaration) = &module.declaration else {
            continue;
        };

        let twin = match &declaration.twin {
            Some(twin_id) => {
                let found = index.get(twin_id).copied();
                if found.is_none() {
                    debug!(
                        module = %module.id,
                        twin = %twin_id,
                        "declaration twin is not part of the graph"
                    );
                }
                found
            }
            None => implementation_candidates(&module.id)
                .iter()
                .filter_map(|candidate| ModuleId::new(candidate).ok())
                .find_map(|candidate| index.get(&candidate).copied()),
        };

        // A declaration module cannot be the twin of another declaration.
        let twin = twin.filter(|t| !modules[t.index()].is_declaration());

        if let Some(twin) = twin {
            twins[i] = Some(twin);
            carriers[twin.index()].push(ModuleIdx::new(i));
        }
    }

    (twins, carriers)
}

impl ModuleGraph {
    /// Start building a graph.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Construct a graph from an iterator of modules, with every module
    /// considered inside the graph root.
    pub fn from_modules<I>(modules: I) -> Result<Self>
    where
        I: IntoIterator<Item = Module>,
    {
        let mut builder = GraphBuilder::new();
        for module in modules {
            builder.add_module(module);
        }
        builder.build()
    }
}
