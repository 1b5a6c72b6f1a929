//! Entry Grouper: assigns every entry point to exactly one named group.
//!
//! Group names come from a [`GroupNamer`]. Closures work directly; the
//! data-driven [`NamingRules`] cover the usual "one group per feature
//! folder plus a catch-all" layouts from configuration files.

use fob_graph::{ModuleGraph, ModuleId, ModuleIdx};
use regex::Regex;
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SplitError};
use crate::group::{GroupId, GroupTable};

/// Maps an entry point to the name of its group.
///
/// Returning `None` leaves the entry unnamed, which aborts the split.
pub trait GroupNamer {
    fn group_of(&self, entry: &ModuleId) -> Option<String>;
}

impl<F> GroupNamer for F
where
    F: Fn(&ModuleId) -> Option<String>,
{
    fn group_of(&self, entry: &ModuleId) -> Option<String> {
        self(entry)
    }
}

/// One `pattern -> group` naming rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct NamingRule {
    /// Regular expression matched against the normalized entry id.
    pub pattern: String,
    /// Group name; `$1`, `${name}` expand capture groups.
    pub group: String,
}

/// Ordered naming rules; the first matching rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NamingRules {
    #[serde(default)]
    pub rules: Vec<NamingRule>,
    /// Group for entries no rule matches.
    #[serde(default)]
    pub fallback: Option<String>,
}

impl NamingRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, pattern: impl Into<String>, group: impl Into<String>) -> Self {
        self.rules.push(NamingRule {
            pattern: pattern.into(),
            group: group.into(),
        });
        self
    }

    pub fn fallback(mut self, group: impl Into<String>) -> Self {
        self.fallback = Some(group.into());
        self
    }

    /// Compile every pattern.
    pub fn compile(&self) -> Result<RuleNamer> {
        let rules = self
            .rules
            .iter()
            .map(|rule| {
                Regex::new(&rule.pattern)
                    .map(|regex| (regex, rule.group.clone()))
                    .map_err(|source| SplitError::InvalidPattern {
                        pattern: rule.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RuleNamer {
            rules,
            fallback: self.fallback.clone(),
        })
    }
}

/// Compiled form of [`NamingRules`].
#[derive(Debug, Clone)]
pub struct RuleNamer {
    rules: Vec<(Regex, String)>,
    fallback: Option<String>,
}

impl GroupNamer for RuleNamer {
    fn group_of(&self, entry: &ModuleId) -> Option<String> {
        let path = entry.as_str();
        for (regex, group) in &self.rules {
            if let Some(captures) = regex.captures(path) {
                let mut name = String::new();
                captures.expand(group, &mut name);
                return Some(name);
            }
        }
        self.fallback.clone()
    }
}

/// A named group and its entry modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryGroup {
    pub id: GroupId,
    pub name: String,
    /// Entry modules followed by declaration twins pulled in alongside them.
    pub entries: Vec<ModuleIdx>,
    pub is_root: bool,
}

/// Result of grouping: every entry point belongs to exactly one group.
#[derive(Debug, Clone)]
pub struct EntryGroups {
    table: GroupTable,
    groups: Vec<EntryGroup>,
    root: GroupId,
    membership: HashMap<ModuleIdx, GroupId>,
}

impl EntryGroups {
    pub fn table(&self) -> &GroupTable {
        &self.table
    }

    /// Groups ordered by id, i.e. by name.
    pub fn groups(&self) -> &[EntryGroup] {
        &self.groups
    }

    pub fn get(&self, id: GroupId) -> &EntryGroup {
        &self.groups[id.index()]
    }

    pub fn by_name(&self, name: &str) -> Option<&EntryGroup> {
        self.table.id(name).map(|id| self.get(id))
    }

    pub fn root(&self) -> &EntryGroup {
        self.get(self.root)
    }

    pub fn root_id(&self) -> GroupId {
        self.root
    }

    /// Group that lists `module` among its entries.
    pub fn group_of(&self, module: ModuleIdx) -> Option<GroupId> {
        self.membership.get(&module).copied()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group the graph's entry points.
///
/// All unnamed entries are reported together. A declaration twin of an
/// entry joins the entry's group unless it is an entry of its own.
pub fn group_entries(
    graph: &ModuleGraph,
    namer: &dyn GroupNamer,
    root_group: &str,
) -> Result<EntryGroups> {
    let mut named: Vec<(ModuleIdx, String)> = Vec::with_capacity(graph.entry_points().len());
    let mut unnamed = Vec::new();

    for &entry in graph.entry_points() {
        match namer.group_of(graph.id(entry)) {
            Some(name) if !name.trim().is_empty() => named.push((entry, name.trim().to_string())),
            _ => unnamed.push(graph.id(entry).clone()),
        }
    }

    if !unnamed.is_empty() {
        return Err(SplitError::UnnamedEntries(unnamed));
    }

    let table = GroupTable::from_names(named.iter().map(|(_, name)| name.as_str()));
    let root = table
        .id(root_group)
        .ok_or_else(|| SplitError::MissingRootGroup {
            root: root_group.to_string(),
            available: table.names().to_vec(),
        })?;

    let mut groups: Vec<EntryGroup> = table
        .ids()
        .map(|id| EntryGroup {
            id,
            name: table.name(id).to_string(),
            entries: Vec::new(),
            is_root: id == root,
        })
        .collect();

    let mut membership: HashMap<ModuleIdx, GroupId> = HashMap::default();
    for (entry, name) in &named {
        let Some(id) = table.id(name) else {
            continue;
        };
        membership.insert(*entry, id);
        groups[id.index()].entries.push(*entry);
    }

    // Twins are added after every explicit entry so an entry's own group
    // always wins over a twin relationship.
    for (entry, name) in &named {
        let Some(id) = table.id(name) else {
            continue;
        };
        let twins = graph
            .declaration_carriers(*entry)
            .iter()
            .copied()
            .chain(graph.declaration_twin(*entry));
        for twin in twins {
            if membership.contains_key(&twin) {
                continue;
            }
            debug!(
                entry = %graph.id(*entry),
                twin = %graph.id(twin),
                group = %name,
                "declaration twin joins entry group"
            );
            membership.insert(twin, id);
            groups[id.index()].entries.push(twin);
        }
    }

    debug!(
        groups = groups.len(),
        entries = named.len(),
        root = %root_group,
        "grouped entry points"
    );

    Ok(EntryGroups {
        table,
        groups,
        root,
        membership,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fob_graph::{Module, ModuleGraph};

    fn id(path: &str) -> ModuleId {
        ModuleId::new(path).unwrap()
    }

    fn entries(paths: &[&str]) -> ModuleGraph {
        ModuleGraph::from_modules(
            paths
                .iter()
                .map(|p| Module::builder(id(p)).entry(true).build()),
        )
        .unwrap()
    }

    #[test]
    fn test_rules_first_match_wins_with_captures() {
        let namer = NamingRules::new()
            .rule(r"^src/features/([a-z]+)/", "$1")
            .rule(r"^src/features/", "never")
            .fallback("main")
            .compile()
            .unwrap();

        assert_eq!(
            namer.group_of(&id("src/features/editor/index.ts")),
            Some("editor".to_string())
        );
        assert_eq!(namer.group_of(&id("src/index.ts")), Some("main".to_string()));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = NamingRules::new().rule("(", "x").compile().unwrap_err();
        assert!(matches!(err, SplitError::InvalidPattern { pattern, .. } if pattern == "("));
    }

    #[test]
    fn test_groups_partition_entries() {
        let graph = entries(&["src/a.ts", "src/b.ts", "src/c.ts"]);
        let namer = |entry: &ModuleId| {
            Some(if entry.as_str() == "src/c.ts" { "y" } else { "x" }.to_string())
        };

        let groups = group_entries(&graph, &namer, "x").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.root().name, "x");
        assert!(groups.root().is_root);
        assert_eq!(groups.by_name("x").unwrap().entries.len(), 2);
        assert_eq!(groups.by_name("y").unwrap().entries.len(), 1);

        for &entry in graph.entry_points() {
            assert!(groups.group_of(entry).is_some());
        }
    }

    #[test]
    fn test_unnamed_entries_are_all_reported() {
        let graph = entries(&["src/a.ts", "src/b.ts", "src/c.ts"]);
        let namer = |entry: &ModuleId| (entry.as_str() == "src/a.ts").then(|| "main".to_string());

        let err = group_entries(&graph, &namer, "main").unwrap_err();
        match err {
            SplitError::UnnamedEntries(ids) => assert_eq!(ids.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_root_group() {
        let graph = entries(&["src/a.ts"]);
        let namer = |_: &ModuleId| Some("feature".to_string());

        let err = group_entries(&graph, &namer, "main").unwrap_err();
        assert!(matches!(err, SplitError::MissingRootGroup { root, .. } if root == "main"));
    }

    #[test]
    fn test_declaration_twin_joins_entry_group() {
        let graph = ModuleGraph::from_modules([
            Module::builder(id("src/a.ts")).entry(true).build(),
            Module::builder(id("src/a.d.ts"))
                .declaration_of(Some(id("src/a.ts")))
                .build(),
        ])
        .unwrap();
        let namer = |_: &ModuleId| Some("main".to_string());

        let groups = group_entries(&graph, &namer, "main").unwrap();
        let carrier = graph.idx_of(&id("src/a.d.ts")).unwrap();
        assert_eq!(groups.root().entries.len(), 2);
        assert_eq!(groups.group_of(carrier), Some(groups.root_id()));
    }
}
