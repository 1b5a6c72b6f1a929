//! Serialization methods for ModuleGraph.

use super::super::classify::EdgeTarget;
use super::super::module::declaration_stem;
use super::super::snapshot::{GraphSnapshot, ImportSnapshot, ModuleSnapshot};
use super::super::{Import, Module, ModuleId};
use super::construction::GraphBuilder;
use super::graph::ModuleGraph;
use crate::{Error, Result};

/// Helper to escape labels for DOT format.
fn escape_label(label: &str) -> String {
    label.replace('"', "\\\"")
}

impl ModuleGraph {
    /// Build a graph from a front-end snapshot.
    ///
    /// Ids are normalized; files ending in `.d.ts` are declaration modules
    /// even without an explicit `declaration` flag.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self> {
        let mut builder = GraphBuilder::new();
        for root in &snapshot.roots {
            builder.add_root(root)?;
        }

        for module in snapshot.modules {
            builder.add_module(module_from_snapshot(module)?);
        }

        for entry in snapshot.entries {
            builder.add_entry(ModuleId::new(&entry)?);
        }

        builder.build()
    }

    /// Parse a JSON snapshot and build the graph.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: GraphSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Convert back into a snapshot (normalized ids).
    pub fn to_snapshot(&self) -> GraphSnapshot {
        let modules = self
            .modules()
            .map(|module| ModuleSnapshot {
                id: module.id.to_string(),
                imports: module
                    .imports
                    .iter()
                    .map(|import| ImportSnapshot {
                        source: import.source.clone(),
                        resolved: import.resolved_to.as_ref().map(ToString::to_string),
                        type_only: import.type_only,
                    })
                    .collect(),
                entry: module.is_entry,
                declaration: module.is_declaration(),
                declaration_of: module
                    .declaration
                    .as_ref()
                    .and_then(|d| d.twin.as_ref())
                    .map(ToString::to_string),
                payload: module.declaration.as_ref().and_then(|d| d.payload.clone()),
            })
            .collect();

        GraphSnapshot {
            roots: self.roots().to_vec(),
            modules,
            entries: self
                .entry_points()
                .iter()
                .map(|&idx| self.id(idx).to_string())
                .collect(),
        }
    }

    /// Export the graph and modules to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_snapshot()).map_err(Error::from)
    }

    /// Export the graph as DOT format for visualization.
    ///
    /// Type-only edges are dashed; external packages are drawn as boxes.
    pub fn to_dot_format(&self) -> String {
        let mut output = String::from("digraph ModuleGraph {\n");

        for module in self.modules() {
            output.push_str("    \"");
            output.push_str(&escape_label(module.id.path_string()));
            output.push('"');
            if module.is_entry {
                output.push_str(" [shape=doublecircle]");
            }
            output.push_str(";\n");
        }

        for dep in self.external_dependencies() {
            output.push_str(&format!(
                "    \"{}\" [shape=box];\n",
                escape_label(&dep.name)
            ));
        }

        for idx in self.indices() {
            let from = escape_label(self.id(idx).path_string());
            for edge in self.edges(idx) {
                let to = match &edge.target {
                    EdgeTarget::Internal(target) => escape_label(self.id(*target).path_string()),
                    EdgeTarget::External(name) => escape_label(name),
                    EdgeTarget::Builtin(_) | EdgeTarget::Unresolved(_) => continue,
                };
                let style = if edge.type_only { " [style=dashed]" } else { "" };
                output.push_str(&format!("    \"{from}\" -> \"{to}\"{style};\n"));
            }
        }

        output.push_str("}\n");
        output
    }
}

fn module_from_snapshot(snapshot: ModuleSnapshot) -> Result<Module> {
    let id = ModuleId::new(&snapshot.id)?;

    let mut imports = Vec::with_capacity(snapshot.imports.len());
    for import in snapshot.imports {
        let resolved_to = match import.resolved.as_deref() {
            Some(path) if !path.trim().is_empty() => Some(ModuleId::new(path)?),
            _ => None,
        };
        imports.push(Import {
            source: import.source,
            resolved_to,
            type_only: import.type_only,
        });
    }

    let twin = snapshot
        .declaration_of
        .as_deref()
        .map(ModuleId::new)
        .transpose()?;
    let is_declaration =
        snapshot.declaration || twin.is_some() || declaration_stem(&id).is_some();

    let mut builder = Module::builder(id).imports(imports).entry(snapshot.entry);
    if is_declaration {
        builder = builder.declaration_of(twin);
    }
    if let Some(payload) = snapshot.payload {
        builder = builder.declaration_payload(payload);
    }

    Ok(builder.build())
}
