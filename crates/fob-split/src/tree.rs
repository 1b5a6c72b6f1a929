//! Import trees explaining why a dependency reaches the root package.
//!
//! A tree starts at the root package and descends along value imports to
//! the modules importing the dependency (the *culprits*). Only edges that
//! lead to a culprit are kept. A module already rendered elsewhere in the
//! same tree becomes a dedup leaf, which keeps diamonds bounded. Culprits
//! that no module path from the root reaches hang under the chain of
//! packages through which their package was reached.
//!
//! ```text
//! main
//! └── src/index.ts [main]
//!     ├── src/format.ts [main]
//!     │   └── src/pad.ts [main_x-common] (imports "left-pad")
//!     └── src/pad.ts [main_x-common] (dedup)
//! ```

use std::fmt;

use fob_graph::{ModuleGraph, ModuleId, ModuleIdx};
use serde::Serialize;

use crate::grouping::EntryGroups;
use crate::propagate::Propagation;
use crate::synthesize::SplitPlan;

/// What a tree node stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
    /// A module on an import chain.
    Module { module: ModuleId },
    /// A module importing the dependency directly.
    Culprit { module: ModuleId },
    /// A module already shown earlier in the tree.
    Dedup { module: ModuleId },
    /// A package hop with no module path behind it.
    Package,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Owning package name.
    pub package: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn module(&self) -> Option<&ModuleId> {
        match &self.kind {
            NodeKind::Module { module }
            | NodeKind::Culprit { module }
            | NodeKind::Dedup { module } => Some(module),
            NodeKind::Package => None,
        }
    }

    pub fn is_culprit(&self) -> bool {
        matches!(self.kind, NodeKind::Culprit { .. })
    }

    /// Depth-first search for culprit nodes.
    pub fn culprits(&self) -> Vec<&TreeNode> {
        let mut found = Vec::new();
        self.collect_culprits(&mut found);
        found
    }

    fn collect_culprits<'a>(&'a self, found: &mut Vec<&'a TreeNode>) {
        if self.is_culprit() {
            found.push(self);
        }
        for child in &self.children {
            child.collect_culprits(found);
        }
    }
}

/// Import chains from the root package to every culprit of one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportTree {
    pub dependency: String,
    /// Root package name.
    pub root: String,
    pub children: Vec<TreeNode>,
}

impl ImportTree {
    /// Build the tree for `dependency` from the propagation records.
    pub fn build(
        graph: &ModuleGraph,
        groups: &EntryGroups,
        plan: &SplitPlan,
        propagation: &Propagation,
        dependency: &str,
    ) -> Self {
        TreeBuilder::new(graph, plan, propagation, dependency).build(groups)
    }

    /// Every culprit module in the tree, in render order.
    pub fn culprits(&self) -> Vec<&ModuleId> {
        self.children
            .iter()
            .flat_map(TreeNode::culprits)
            .filter_map(TreeNode::module)
            .collect()
    }

    /// Plain-text rendering.
    pub fn render(&self) -> String {
        self.render_with(|text| text.to_string())
    }

    /// Rendering with culprit module ids passed through `highlight`.
    pub fn render_with(&self, highlight: impl Fn(&str) -> String) -> String {
        let mut out = String::new();
        out.push_str(&self.root);
        out.push('\n');
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            self.render_node(child, "", i + 1 == count, &highlight, &mut out);
        }
        out
    }

    fn render_node(
        &self,
        node: &TreeNode,
        prefix: &str,
        last: bool,
        highlight: &dyn Fn(&str) -> String,
        out: &mut String,
    ) {
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });

        match &node.kind {
            NodeKind::Module { module } => {
                out.push_str(&format!("{module} [{}]", node.package));
            }
            NodeKind::Culprit { module } => {
                out.push_str(&format!(
                    "{} [{}] (imports \"{}\")",
                    highlight(module.as_str()),
                    node.package,
                    self.dependency
                ));
            }
            NodeKind::Dedup { module } => {
                out.push_str(&format!("{module} [{}] (dedup)", node.package));
            }
            NodeKind::Package => {
                out.push_str(&format!("[{}] (package dependency)", node.package));
            }
        }
        out.push('\n');

        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            self.render_node(child, &child_prefix, i + 1 == count, highlight, out);
        }
    }
}

impl fmt::Display for ImportTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

struct TreeBuilder<'a> {
    graph: &'a ModuleGraph,
    plan: &'a SplitPlan,
    propagation: &'a Propagation,
    dependency: &'a str,
    culprit: Vec<bool>,
    leads: Vec<bool>,
    rendered: Vec<bool>,
}

impl<'a> TreeBuilder<'a> {
    fn new(
        graph: &'a ModuleGraph,
        plan: &'a SplitPlan,
        propagation: &'a Propagation,
        dependency: &'a str,
    ) -> Self {
        let mut culprit = vec![false; graph.len()];
        for &module in propagation.culprits(dependency) {
            culprit[module.index()] = true;
        }

        Self {
            graph,
            plan,
            propagation,
            dependency,
            leads: leads_to(graph, propagation.culprits(dependency)),
            culprit,
            rendered: vec![false; graph.len()],
        }
    }

    fn build(mut self, groups: &EntryGroups) -> ImportTree {
        let starts = self.propagation.starts();
        let root = starts
            .first()
            .map(|&p| self.plan.package(p).name.clone())
            .unwrap_or_else(|| groups.root().name.clone());

        // Root entries first, then any other module of a start package.
        let mut roots: Vec<ModuleIdx> = groups.root().entries.clone();
        for &start in starts {
            roots.extend(self.plan.package(start).modules.iter().copied());
        }

        let mut children = Vec::new();
        for module in roots {
            if self.leads[module.index()] && !self.rendered[module.index()] {
                children.push(self.node(module));
            }
        }

        let stranded: Vec<ModuleIdx> = self
            .propagation
            .culprits(self.dependency)
            .iter()
            .copied()
            .filter(|m| !self.rendered[m.index()])
            .collect();
        for module in stranded {
            self.attach_through_packages(&mut children, &root, module);
        }

        ImportTree {
            dependency: self.dependency.to_string(),
            root,
            children,
        }
    }

    fn package_name(&self, module: ModuleIdx) -> String {
        self.plan
            .package_of(module)
            .map(|p| self.plan.package(p).name.clone())
            .unwrap_or_default()
    }

    fn node(&mut self, module: ModuleIdx) -> TreeNode {
        let id = self.graph.id(module).clone();
        let package = self.package_name(module);

        if self.rendered[module.index()] {
            return TreeNode {
                kind: NodeKind::Dedup { module: id },
                package,
                children: Vec::new(),
            };
        }
        self.rendered[module.index()] = true;

        let mut targets: Vec<ModuleIdx> = Vec::new();
        for edge in self.graph.edges(module) {
            if let Some(target) = edge.value_target() {
                if self.leads[target.index()] && !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        let children = targets.into_iter().map(|t| self.node(t)).collect();

        let kind = if self.culprit[module.index()] {
            NodeKind::Culprit { module: id }
        } else {
            NodeKind::Module { module: id }
        };

        TreeNode {
            kind,
            package,
            children,
        }
    }

    /// Hang `module` under package hop nodes following the propagation
    /// parent chain of its package.
    fn attach_through_packages(&mut self, children: &mut Vec<TreeNode>, root: &str, module: ModuleIdx) {
        let hops: Vec<String> = self
            .plan
            .package_of(module)
            .map(|p| self.propagation.path_to(p))
            .unwrap_or_default()
            .into_iter()
            .map(|p| self.plan.package(p).name.clone())
            .skip_while(|name| name == root)
            .collect();

        let mut level = children;
        for hop in hops {
            let position = level
                .iter()
                .position(|n| n.kind == NodeKind::Package && n.package == hop);
            let position = match position {
                Some(position) => position,
                None => {
                    level.push(TreeNode {
                        kind: NodeKind::Package,
                        package: hop,
                        children: Vec::new(),
                    });
                    level.len() - 1
                }
            };
            level = &mut level[position].children;
        }

        let node = self.node(module);
        level.push(node);
    }
}

/// Modules from which some value-import chain reaches a culprit.
fn leads_to(graph: &ModuleGraph, culprits: &[ModuleIdx]) -> Vec<bool> {
    let mut leads = vec![false; graph.len()];
    let mut stack: Vec<ModuleIdx> = Vec::new();

    for &culprit in culprits {
        if !leads[culprit.index()] {
            leads[culprit.index()] = true;
            stack.push(culprit);
        }
    }

    while let Some(module) = stack.pop() {
        for &importer in graph.importers(module) {
            if leads[importer.index()] {
                continue;
            }
            let value_edge = graph
                .edges(importer)
                .iter()
                .any(|edge| edge.value_target() == Some(module));
            if value_edge {
                leads[importer.index()] = true;
                stack.push(importer);
            }
        }
    }

    leads
}
