//! Module classifier: turns raw imports into typed graph edges.
//!
//! Every import of every module is classified exactly once, while the graph
//! is built, and the result is stored in the graph arena. Two independent
//! properties are recorded per edge:
//!
//! - **internal vs. external**: internal edges resolve to another module
//!   that lives inside one of the graph roots. Everything else is external,
//!   either an npm package or a resolved path outside the roots, unless it
//!   is a Node builtin or a relative specifier with no resolution at all.
//! - **value vs. type-only**: type-only edges come from declaration-only
//!   constructs. Every edge leaving a declaration module is type-only.

use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use super::package_name::{extract_package_name, is_node_builtin, package_name_from_path};
use super::{Import, Module, ModuleId, ModuleIdx};

/// Where an edge points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeTarget {
    /// Another module of the graph.
    Internal(ModuleIdx),
    /// An npm package, by package name.
    External(String),
    /// A Node.js builtin (`fs`, `node:path`).
    Builtin(String),
    /// A relative specifier the front end could not resolve at all.
    Unresolved(String),
}

/// A classified import edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub target: EdgeTarget,
    /// Specifier as written in the importing module.
    pub specifier: String,
    pub type_only: bool,
}

impl Edge {
    pub fn is_external(&self) -> bool {
        matches!(self.target, EdgeTarget::External(_))
    }

    /// Internal target, if the edge stays inside the graph.
    pub fn internal(&self) -> Option<ModuleIdx> {
        match self.target {
            EdgeTarget::Internal(idx) => Some(idx),
            _ => None,
        }
    }

    /// Internal target reached by a runtime value import.
    pub fn value_target(&self) -> Option<ModuleIdx> {
        if self.type_only { None } else { self.internal() }
    }

    /// External package name, if any.
    pub fn external(&self) -> Option<&str> {
        match &self.target {
            EdgeTarget::External(name) => Some(name),
            _ => None,
        }
    }
}

/// Classifies imports against the set of interned module ids and the graph
/// roots.
pub struct Classifier<'a> {
    index: &'a HashMap<ModuleId, ModuleIdx>,
    roots: &'a [String],
}

impl<'a> Classifier<'a> {
    /// An empty `roots` slice treats every graph module as internal.
    pub fn new(index: &'a HashMap<ModuleId, ModuleIdx>, roots: &'a [String]) -> Self {
        Self { index, roots }
    }

    /// Classify every import of `module`, preserving import order.
    pub fn classify_module(&self, module: &Module) -> Vec<Edge> {
        module
            .imports
            .iter()
            .map(|import| self.classify(module, import))
            .collect()
    }

    /// Classify a single import of `importer`.
    pub fn classify(&self, importer: &Module, import: &Import) -> Edge {
        let type_only = import.type_only || importer.is_declaration();
        let target = self.target_of(import);

        Edge {
            target,
            specifier: import.source.clone(),
            type_only,
        }
    }

    fn target_of(&self, import: &Import) -> EdgeTarget {
        if let Some(resolved) = &import.resolved_to {
            if let Some(&idx) = self.index.get(resolved) {
                if self.is_within_roots(resolved) {
                    return EdgeTarget::Internal(idx);
                }
            }
            if let Some(name) = package_name_from_path(resolved.as_str()) {
                return EdgeTarget::External(name.to_string());
            }
        }

        if is_node_builtin(&import.source) {
            let name = import.source.trim_start_matches("node:");
            return EdgeTarget::Builtin(extract_package_name(name).to_string());
        }

        if import.is_relative() || import.source.is_empty() {
            return match &import.resolved_to {
                // Resolved outside every root, or to a file the graph does not
                // hold: external, keyed by the resolved path.
                Some(resolved) => EdgeTarget::External(resolved.as_str().to_string()),
                None => EdgeTarget::Unresolved(import.source.clone()),
            };
        }

        EdgeTarget::External(extract_package_name(&import.source).to_string())
    }

    fn is_within_roots(&self, id: &ModuleId) -> bool {
        if id.is_in_node_modules() {
            return false;
        }
        self.roots.is_empty() || self.roots.iter().any(|root| id.is_within(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(path: &str) -> ModuleId {
        ModuleId::new(path).unwrap()
    }

    fn index(ids: &[&str]) -> HashMap<ModuleId, ModuleIdx> {
        ids.iter()
            .enumerate()
            .map(|(i, path)| (id(path), ModuleIdx::new(i)))
            .collect()
    }

    #[test]
    fn test_internal_edge_inside_root() {
        let index = index(&["src/a.ts", "src/b.ts"]);
        let roots = vec!["src".to_string()];
        let classifier = Classifier::new(&index, &roots);

        let module = Module::builder(id("src/a.ts")).build();
        let edge = classifier.classify(&module, &Import::resolved("./b", id("src/b.ts")));

        assert_eq!(edge.target, EdgeTarget::Internal(ModuleIdx::new(1)));
        assert!(!edge.type_only);
        assert_eq!(edge.value_target(), Some(ModuleIdx::new(1)));
    }

    #[test]
    fn test_graph_module_outside_roots_is_external_when_installed() {
        let index = index(&["src/a.ts", "node_modules/left-pad/index.js"]);
        let roots = vec!["src".to_string()];
        let classifier = Classifier::new(&index, &roots);

        let module = Module::builder(id("src/a.ts")).build();
        let edge = classifier.classify(
            &module,
            &Import::resolved("left-pad", id("node_modules/left-pad/index.js")),
        );

        assert_eq!(edge.target, EdgeTarget::External("left-pad".to_string()));
    }

    #[test]
    fn test_relative_import_outside_roots_is_external() {
        let index = index(&["src/main/index.ts", "lib/secret.ts"]);
        let roots = vec!["src".to_string()];
        let classifier = Classifier::new(&index, &roots);
        let module = Module::builder(id("src/main/index.ts")).build();

        let outside = classifier.classify(
            &module,
            &Import::resolved("../../lib/secret", id("lib/secret.ts")),
        );
        assert_eq!(outside.external(), Some("lib/secret.ts"));

        let missing = classifier.classify(
            &module,
            &Import::resolved("./gone", id("src/main/gone.ts")),
        );
        assert_eq!(missing.external(), Some("src/main/gone.ts"));
    }

    #[test]
    fn test_unresolved_bare_specifier_is_external_package() {
        let index = index(&["src/a.ts"]);
        let classifier = Classifier::new(&index, &[]);
        let module = Module::builder(id("src/a.ts")).build();

        let edge = classifier.classify(&module, &Import::new("@scope/pkg/deep/file"));
        assert_eq!(edge.external(), Some("@scope/pkg"));
    }

    #[test]
    fn test_builtins_and_unresolved_relative() {
        let index = index(&["src/a.ts"]);
        let classifier = Classifier::new(&index, &[]);
        let module = Module::builder(id("src/a.ts")).build();

        let builtin = classifier.classify(&module, &Import::new("node:fs/promises"));
        assert_eq!(builtin.target, EdgeTarget::Builtin("fs".to_string()));

        let missing = classifier.classify(&module, &Import::new("./missing"));
        assert_eq!(missing.target, EdgeTarget::Unresolved("./missing".to_string()));
    }

    #[test]
    fn test_declaration_module_edges_are_type_only() {
        let index = index(&["src/a.d.ts", "src/b.ts"]);
        let classifier = Classifier::new(&index, &[]);
        let module = Module::builder(id("src/a.d.ts"))
            .declaration_of(None)
            .build();

        let edge = classifier.classify(&module, &Import::resolved("./b", id("src/b.ts")));
        assert!(edge.type_only);
        assert_eq!(edge.internal(), Some(ModuleIdx::new(1)));
        assert_eq!(edge.value_target(), None);
    }

    #[test]
    fn test_type_only_flag_is_independent_of_externality() {
        let index = index(&["src/a.ts"]);
        let classifier = Classifier::new(&index, &[]);
        let module = Module::builder(id("src/a.ts")).build();

        let edge = classifier.classify(&module, &Import::new("react").type_only());
        assert!(edge.is_external());
        assert!(edge.type_only);
    }
}
