//! Split command implementation.
//!
//! Runs the whole pipeline and writes `<outDir>/<package>/package.json`
//! for every package, `<outDir>/split-plan.json` and, with `dot`, the
//! package graph as `<outDir>/split-plan.dot`. Outputs are rendered in
//! full before the first file is written, so a failed split leaves the
//! output directory untouched.

use fob_split::Splitter;
use std::path::PathBuf;
use tracing::info;

use crate::cli::SplitArgs;
use crate::commands::utils::{self, resolve_path};
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::ui;

pub const PLAN_FILE: &str = "split-plan.json";
pub const DOT_FILE: &str = "split-plan.dot";
pub const MANIFEST_FILE: &str = "package.json";

/// Execute the split command.
pub async fn execute(args: SplitArgs) -> Result<()> {
    let overrides = ConfigOverrides::from(&args);
    let utils::SplitInputs { cwd, config, graph } = utils::prepare(&args.graph, &overrides).await?;

    ui::info(&format!(
        "Splitting {} modules from {}",
        graph.len(),
        config.graph.display()
    ));

    let namer = config.namer()?;
    let outcome = Splitter::new(config.split_options()).split(&graph, &namer)?;

    for warning in &outcome.warnings {
        ui::warning(&warning.to_string());
    }

    let manifests = outcome.manifests(&graph, &config.manifest_options());
    let document = outcome.plan_document(&graph);

    let mut outputs: Vec<(PathBuf, String)> = Vec::with_capacity(manifests.len() + 2);
    for manifest in &manifests {
        outputs.push((
            PathBuf::from(manifest.dir_name()).join(MANIFEST_FILE),
            with_newline(manifest.to_json()?),
        ));
    }
    outputs.push((PathBuf::from(PLAN_FILE), with_newline(document.to_json()?)));
    if config.dot {
        outputs.push((PathBuf::from(DOT_FILE), outcome.plan.to_dot_format()));
    }

    let out_dir = resolve_path(&config.out_dir, &cwd);

    if args.dry_run {
        ui::print_split_summary(&document);
        for (path, _) in &outputs {
            ui::info(&format!("Would write {}", out_dir.join(path).display()));
        }
        return Ok(());
    }

    for (path, contents) in &outputs {
        utils::write_file(&out_dir.join(path), contents).await?;
    }

    info!(
        packages = manifests.len(),
        out_dir = %out_dir.display(),
        "wrote package manifests"
    );
    ui::success(&format!(
        "Wrote {} packages to {}",
        manifests.len(),
        out_dir.display()
    ));
    Ok(())
}

fn with_newline(mut json: String) -> String {
    json.push('\n');
    json
}
