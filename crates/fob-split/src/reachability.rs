//! Group-Set Resolver: which entry groups transitively import each module.
//!
//! Each group is walked forward from its entries twice:
//!
//! - the **strong** pass follows value edges only;
//! - the **weak** pass follows every internal edge, type-only included,
//!   and steps from an implementation module to its declaration carriers.
//!
//! A module's placement set is its strong set, or its weak set when no group
//! imports it for a runtime value. Type-only edges therefore attribute
//! pure type modules to the groups that describe them, without ever pulling
//! a runtime module into a common package.

use std::collections::VecDeque;

use fob_graph::{ModuleGraph, ModuleIdx};
use tracing::debug;

use crate::error::{Result, SplitError};
use crate::group::GroupSet;
use crate::grouping::EntryGroups;

/// Groups reaching one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reachability {
    /// Groups reaching the module through value edges only.
    pub strong: GroupSet,
    /// Groups reaching the module through any internal edges.
    pub weak: GroupSet,
}

impl Reachability {
    /// Set that decides the owning package, `None` for dead modules.
    pub fn placement(&self) -> Option<&GroupSet> {
        if !self.strong.is_empty() {
            Some(&self.strong)
        } else if !self.weak.is_empty() {
            Some(&self.weak)
        } else {
            None
        }
    }

    /// Reached only through type-only edges.
    pub fn is_type_only(&self) -> bool {
        self.strong.is_empty() && !self.weak.is_empty()
    }

    pub fn is_reachable(&self) -> bool {
        !self.weak.is_empty()
    }
}

/// Reachability of every module, indexed by [`ModuleIdx`].
#[derive(Debug, Clone, Default)]
pub struct ReachabilityMap {
    sets: Vec<Reachability>,
}

impl ReachabilityMap {
    pub fn get(&self, idx: ModuleIdx) -> &Reachability {
        &self.sets[idx.index()]
    }

    pub fn placement(&self, idx: ModuleIdx) -> Option<&GroupSet> {
        self.get(idx).placement()
    }

    pub fn is_reachable(&self, idx: ModuleIdx) -> bool {
        self.get(idx).is_reachable()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Number of modules no group reaches.
    pub fn unreachable_count(&self) -> usize {
        self.sets.iter().filter(|r| !r.is_reachable()).count()
    }
}

/// Compute the reachability set of every module.
///
/// Fails with [`SplitError::GraphInconsistency`] if the computed sets break
/// the entry or monotonicity invariants.
pub fn resolve(graph: &ModuleGraph, groups: &EntryGroups) -> Result<ReachabilityMap> {
    let mut sets = vec![Reachability::default(); graph.len()];
    let mut queue = VecDeque::new();

    for group in groups.groups() {
        walk(graph, &group.entries, true, &mut queue, |idx| {
            sets[idx.index()].strong.insert(group.id)
        });
        walk(graph, &group.entries, false, &mut queue, |idx| {
            sets[idx.index()].weak.insert(group.id)
        });
    }

    let map = ReachabilityMap { sets };
    check_invariants(graph, groups, &map)?;

    debug!(
        modules = map.len(),
        unreachable = map.unreachable_count(),
        "resolved group reachability"
    );

    Ok(map)
}

/// Breadth-first walk from `entries`. `mark` returns false when the module
/// already carries the walked group, which stops re-entering its subtree.
fn walk(
    graph: &ModuleGraph,
    entries: &[ModuleIdx],
    values_only: bool,
    queue: &mut VecDeque<ModuleIdx>,
    mut mark: impl FnMut(ModuleIdx) -> bool,
) {
    queue.clear();
    for &entry in entries {
        if mark(entry) {
            queue.push_back(entry);
        }
    }

    while let Some(idx) = queue.pop_front() {
        for edge in graph.edges(idx) {
            let target = if values_only {
                edge.value_target()
            } else {
                edge.internal()
            };
            if let Some(target) = target {
                if mark(target) {
                    queue.push_back(target);
                }
            }
        }

        // Declaration carriers travel with their implementation, so their
        // type imports are attributed to the same groups.
        if !values_only {
            for &carrier in graph.declaration_carriers(idx) {
                if mark(carrier) {
                    queue.push_back(carrier);
                }
            }
        }
    }
}

fn check_invariants(
    graph: &ModuleGraph,
    groups: &EntryGroups,
    map: &ReachabilityMap,
) -> Result<()> {
    for group in groups.groups() {
        for &entry in &group.entries {
            if !map.get(entry).strong.contains(group.id) {
                return Err(SplitError::inconsistency(
                    graph.id(entry),
                    format!("entry is not reached by its own group '{}'", group.name),
                ));
            }
        }
    }

    for from in graph.indices() {
        let source = map.get(from);
        for edge in graph.edges(from) {
            let Some(to) = edge.internal() else {
                continue;
            };
            let target = map.get(to);
            if !target.weak.is_superset(&source.weak)
                || (!edge.type_only && !target.strong.is_superset(&source.strong))
            {
                return Err(SplitError::inconsistency(
                    graph.id(to),
                    format!(
                        "reachability is not a superset of importer {}",
                        graph.id(from)
                    ),
                ));
            }
        }
    }

    Ok(())
}
