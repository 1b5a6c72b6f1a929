//! In-memory ModuleGraph implementation.
//!
//! The graph is an arena: modules, classified edges and reverse edges are
//! stored in vectors indexed by [`ModuleIdx`](crate::ModuleIdx), and module
//! ids are interned once. It is immutable after construction, so it can be
//! shared freely between threads.

mod construction;
mod graph;
mod queries;
mod serialization;

pub use construction::GraphBuilder;
pub use graph::ModuleGraph;
