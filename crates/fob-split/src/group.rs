//! Interned entry-group names and sets of them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of an entry group inside a [`GroupTable`].
///
/// Ids are handed out in lexicographic order of group names, so comparing
/// ids compares names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(u32);

impl GroupId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Sorted, deduplicated group names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTable {
    names: Vec<String>,
}

impl GroupTable {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort_unstable();
        names.dedup();
        Self { names }
    }

    pub fn id(&self, name: &str) -> Option<GroupId> {
        self.names
            .binary_search_by(|probe| probe.as_str().cmp(name))
            .ok()
            .map(|i| GroupId(i as u32))
    }

    pub fn name(&self, id: GroupId) -> &str {
        &self.names[id.index()]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = GroupId> + use<> {
        (0..self.names.len() as u32).map(GroupId)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// A set of entry groups, kept sorted so equal sets compare, hash and
/// serialize identically regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupSet(Vec<GroupId>);

impl GroupSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(id: GroupId) -> Self {
        Self(vec![id])
    }

    /// Insert `id`; returns false if it was already present.
    pub fn insert(&mut self, id: GroupId) -> bool {
        match self.0.binary_search(&id) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, id);
                true
            }
        }
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.0.binary_search(&id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.0.iter().copied()
    }

    /// The only member of a singleton set.
    pub fn single(&self) -> Option<GroupId> {
        match self.0.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn union(&self, other: &GroupSet) -> GroupSet {
        let mut merged = self.clone();
        for id in other.iter() {
            merged.insert(id);
        }
        merged
    }

    pub fn is_superset(&self, other: &GroupSet) -> bool {
        other.iter().all(|id| self.contains(id))
    }

    /// Member names in sorted order.
    pub fn names<'t>(&self, table: &'t GroupTable) -> Vec<&'t str> {
        self.iter().map(|id| table.name(id)).collect()
    }

    /// `{a, b}` style rendering for diagnostics.
    pub fn display<'a>(&'a self, table: &'a GroupTable) -> impl fmt::Display + 'a {
        DisplaySet { set: self, table }
    }
}

impl FromIterator<GroupId> for GroupSet {
    fn from_iter<T: IntoIterator<Item = GroupId>>(iter: T) -> Self {
        let mut ids: Vec<GroupId> = iter.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }
}

struct DisplaySet<'a> {
    set: &'a GroupSet,
    table: &'a GroupTable,
}

impl fmt::Display for DisplaySet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.set.names(self.table).join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_name_order() {
        let table = GroupTable::from_names(["main", "editor", "main", "debug"]);
        assert_eq!(table.names(), ["debug", "editor", "main"]);
        assert!(table.id("debug").unwrap() < table.id("main").unwrap());
        assert_eq!(table.id("missing"), None);
    }

    #[test]
    fn test_set_is_order_independent() {
        let table = GroupTable::from_names(["x", "y", "z"]);
        let x = table.id("x").unwrap();
        let z = table.id("z").unwrap();

        let mut a = GroupSet::new();
        assert!(a.insert(z));
        assert!(a.insert(x));
        assert!(!a.insert(z));

        let b: GroupSet = [x, z, x].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.names(&table), ["x", "z"]);
        assert_eq!(a.display(&table).to_string(), "{x, z}");
    }

    #[test]
    fn test_union_and_superset() {
        let table = GroupTable::from_names(["x", "y"]);
        let x = GroupSet::singleton(table.id("x").unwrap());
        let y = GroupSet::singleton(table.id("y").unwrap());

        let both = x.union(&y);
        assert_eq!(both.len(), 2);
        assert!(both.is_superset(&x));
        assert!(!x.is_superset(&both));
        assert_eq!(x.single(), table.id("x"));
        assert_eq!(both.single(), None);
    }
}
