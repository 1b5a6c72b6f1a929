//! # fob-graph
//!
//! Immutable module dependency graphs for package splitting.
//!
//! This crate provides the graph primitives consumed by `fob-split`: an
//! arena-backed [`ModuleGraph`] with interned [`ModuleId`]s, classified
//! import edges, declaration twins and aggregated external dependency
//! records. There is no I/O here beyond (de)serializing a snapshot that the
//! compiler front end already produced.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ModuleGraph                              │
//! │  (Arc<arena>, immutable, indexed by ModuleIdx)              │
//! └────────────────────┬────────────────────────────────────────┘
//!                      │
//!          ┌───────────┼───────────┐
//!          │           │           │
//!          ▼           ▼           ▼
//!    ┌─────────┐ ┌─────────┐ ┌──────────────┐
//!    │ Module  │ │  Edge   │ │  External    │
//!    │ (Node)  │ │ (typed) │ │  Dependency  │
//!    └─────────┘ └─────────┘ └──────────────┘
//!                      ▲
//!                      │
//!          ┌──────────────────────┐
//!          │   Classifier         │
//!          │   (internal/external │
//!          │    value/type-only)  │
//!          └──────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fob_graph::{Import, Module, ModuleGraph, ModuleId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = ModuleId::new("src/index.ts")?;
//! let util = ModuleId::new("src/util.ts")?;
//!
//! let graph = ModuleGraph::builder()
//!     .root("src")?
//!     .module(
//!         Module::builder(index.clone())
//!             .entry(true)
//!             .import(Import::resolved("./util", util.clone()))
//!             .import(Import::new("react").type_only())
//!             .build(),
//!     )
//!     .module(Module::builder(util.clone()).build())
//!     .build()?;
//!
//! let entry = graph.idx_of(&index).unwrap();
//! assert_eq!(graph.dependencies(entry).count(), 1);
//! assert!(graph.external_dependency("react").unwrap().is_type_only());
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! `ModuleGraph` is immutable once built and shares its arena through an
//! `Arc`, so clones can be handed to other threads without locking.

pub mod classify;
pub mod external_dep;
pub mod import;
pub mod module;
pub mod module_id;
pub mod package_name;
pub mod snapshot;

// In-memory arena implementation
mod memory;

pub use classify::{Classifier, Edge, EdgeTarget};
pub use external_dep::{ExternalDependency, ExternalImporter};
pub use import::Import;
pub use memory::{GraphBuilder, ModuleGraph};
pub use module::{Declaration, Module, ModuleBuilder};
pub use module_id::{ModuleId, ModuleIdError, ModuleIdx};
pub use package_name::{extract_package_name, is_node_builtin, package_name_from_path};
pub use snapshot::{GraphSnapshot, ImportSnapshot, ModuleSnapshot};

/// Error types for graph operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A module id could not be normalized.
    #[error("Invalid module id: {0}")]
    InvalidModuleId(#[from] ModuleIdError),

    /// Two modules share the same normalized id.
    #[error("Duplicate module in graph: {0}")]
    DuplicateModule(ModuleId),

    /// An entry point names a module that is not in the graph.
    #[error("Entry point is not part of the graph: {0}")]
    UnknownEntry(ModuleId),

    /// Snapshot (de)serialization error.
    #[error("Invalid graph snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
