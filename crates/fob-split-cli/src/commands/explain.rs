//! Explain command implementation.
//!
//! Prints why a module ends up where it does: its strong and weak group
//! sets, the package owning it, who imports it and which externals it
//! pulls in.

use fob_graph::{ModuleGraph, ModuleId, ModuleIdx};
use fob_split::{SplitOutcome, Splitter};

use crate::cli::ExplainArgs;
use crate::commands::utils;
use crate::config::ConfigOverrides;
use crate::error::{CliError, Result};

/// Execute the explain command.
pub async fn execute(args: ExplainArgs) -> Result<()> {
    let overrides = ConfigOverrides::from(&args.graph);
    let utils::SplitInputs { config, graph, .. } = utils::prepare(&args.graph, &overrides).await?;

    let id = ModuleId::new(&args.module)
        .map_err(|e| CliError::InvalidArgument(format!("{}: {e}", args.module)))?;
    let idx = graph.idx_of(&id).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "Module {id} is not part of the graph\n\nHint: Use the id as written in the graph snapshot, relative to its root"
        ))
    })?;

    let namer = config.namer()?;
    let outcome = Splitter::new(config.split_options()).analyze(&graph, &namer)?;

    print!("{}", explain(&graph, &outcome, idx));
    Ok(())
}

/// Render the explanation for one module.
pub fn explain(graph: &ModuleGraph, outcome: &SplitOutcome, idx: ModuleIdx) -> String {
    let table = outcome.groups.table();
    let reach = outcome.reachability.get(idx);
    let mut lines = vec![graph.id(idx).to_string()];

    let entry = match outcome.groups.group_of(idx) {
        Some(group) => format!("yes ({})", table.name(group)),
        None => "no".to_string(),
    };
    lines.push(format!("  entry:    {entry}"));
    if let Some(twin) = graph.declaration_twin(idx) {
        lines.push(format!("  declares: {}", graph.id(twin)));
    }
    lines.push(format!("  strong:   {}", reach.strong.display(table)));
    lines.push(format!("  weak:     {}", reach.weak.display(table)));

    let package = match outcome.plan.package_of(idx) {
        Some(package) if reach.is_type_only() => {
            format!("{} (placed by type-only imports)", outcome.plan.package(package).name)
        }
        Some(package) => outcome.plan.package(package).name.clone(),
        None => "none (unreachable from every entry group, dropped)".to_string(),
    };
    lines.push(format!("  package:  {package}"));

    let importers = graph.importers(idx);
    if !importers.is_empty() {
        lines.push("  imported by:".to_string());
        for &importer in importers {
            let type_only = graph
                .edges(importer)
                .iter()
                .filter(|edge| edge.internal() == Some(idx))
                .all(|edge| edge.type_only);
            let package = outcome
                .plan
                .package_of(importer)
                .map_or("dropped", |p| outcome.plan.package(p).name.as_str());
            let marker = if type_only { " (type-only)" } else { "" };
            lines.push(format!("    {} [{package}]{marker}", graph.id(importer)));
        }
    }

    let externals: Vec<String> = graph
        .edges(idx)
        .iter()
        .filter_map(|edge| {
            let name = edge.external()?;
            let mut line = format!("    {name}");
            if edge.type_only {
                line.push_str(" (type-only)");
            }
            if outcome.propagation.is_required(name) {
                line.push_str(" (reaches root)");
            }
            Some(line)
        })
        .collect();
    if !externals.is_empty() {
        lines.push("  externals:".to_string());
        lines.extend(externals);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fob_graph::{Import, Module};
    use fob_split::{NamingRules, SplitOptions};

    fn id(path: &str) -> ModuleId {
        ModuleId::new(path).unwrap()
    }

    #[test]
    fn test_explain_shared_module() {
        let graph = ModuleGraph::from_modules([
            Module::builder(id("src/index.ts"))
                .entry(true)
                .import(Import::resolved("./shared", id("src/shared.ts")))
                .build(),
            Module::builder(id("src/features/editor/index.ts"))
                .entry(true)
                .import(Import::resolved("../../shared", id("src/shared.ts")).type_only())
                .build(),
            Module::builder(id("src/shared.ts"))
                .import(Import::new("lodash"))
                .build(),
        ])
        .unwrap();
        let namer = NamingRules::new()
            .rule(r"^src/features/([^/]+)/", "$1")
            .fallback("main")
            .compile()
            .unwrap();
        let outcome = Splitter::new(SplitOptions::default())
            .analyze(&graph, &namer)
            .unwrap();

        let shared = graph.idx_of(&id("src/shared.ts")).unwrap();
        let text = explain(&graph, &outcome, shared);

        assert!(text.starts_with("src/shared.ts\n  entry:    no\n"));
        assert!(text.contains("  strong:   {main}\n"));
        assert!(text.contains("  weak:     {editor, main}\n"));
        assert!(text.contains("  package:  main\n"));
        assert!(text.contains("    src/features/editor/index.ts [editor] (type-only)\n"));
        assert!(text.contains("    lodash (reaches root)\n"));
    }
}
