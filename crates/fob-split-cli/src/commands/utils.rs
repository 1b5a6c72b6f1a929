//! Shared utilities for command implementations: path resolution, config
//! and graph loading, file output.

use fob_graph::ModuleGraph;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::GraphArgs;
use crate::config::{ConfigOverrides, SplitConfig};
use crate::error::{CliError, Result, ResultExt};

/// Resolve `path` against `cwd` unless it is absolute.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| CliError::Custom(format!("Failed to get current directory: {e}")))
}

/// Everything a pipeline command needs.
#[derive(Debug)]
pub struct SplitInputs {
    pub cwd: PathBuf,
    pub config: SplitConfig,
    pub graph: ModuleGraph,
}

/// Load and validate the config, then read the graph snapshot it names.
pub async fn prepare(args: &GraphArgs, overrides: &ConfigOverrides) -> Result<SplitInputs> {
    let process_cwd = get_cwd()?;
    let cwd = match &args.cwd {
        Some(dir) => resolve_path(dir, &process_cwd),
        None => process_cwd,
    };

    let config = SplitConfig::load(overrides, args.config.as_deref(), &cwd)?;
    config.validate()?;

    let graph_path = resolve_path(&config.graph, &cwd);
    let graph = load_graph(&graph_path).await?;

    Ok(SplitInputs { cwd, config, graph })
}

/// Read a JSON graph snapshot.
pub async fn load_graph(path: &Path) -> Result<ModuleGraph> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_path(path)
        .with_hint("Pass the graph snapshot as GRAPH or set \"graph\" in fob-split.config.json")?;

    let graph = ModuleGraph::from_json(&text).context(format!("Failed to load {}", path.display()))?;
    debug!(path = %path.display(), modules = graph.len(), "loaded module graph");
    Ok(graph)
}

/// Write `contents` to `path`, creating parent directories.
pub async fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
