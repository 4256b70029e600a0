use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One logical record from a spreadsheet or CSV export: raw header →
/// cell-value pairs in sheet column order. Order matters — when header
/// drift leaves two equivalent headers in one sheet, lookups take the
/// leftmost column, and that choice must not vary between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Append a cell; columns keep their sheet order.
    pub fn push(&mut self, header: String, value: String) {
        self.cells.push((header, value));
    }

    /// Header names in column order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    /// `(header, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Exact-header lookup, panicking on a missing column. Lookup by
/// candidate list belongs to `resolve`; this is for tests and spot
/// checks.
impl std::ops::Index<&str> for Row {
    type Output = String;

    fn index(&self, header: &str) -> &String {
        self.cells
            .iter()
            .find(|(h, _)| h.as_str() == header)
            .map(|(_, v)| v)
            .unwrap_or_else(|| panic!("no column named '{header}'"))
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A volunteer's site/group assignment. All fields trimmed; `first`, `last`
/// and `site` are non-empty by construction (rows missing them are skipped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub first: String,
    pub last: String,
    pub site: String,
    pub group: String,
    pub crew_leader: String,
}

/// A service-site description. `name` is non-empty by construction; sites
/// are never merged or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub site_id: String,
    pub name: String,
    pub address: String,
    pub tasks: String,
    pub volunteers: u32,
    pub notes: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub public_description: String,
    pub bio: String,
}

/// A volunteer signup from the registration form export. `first` and `last`
/// are non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signup {
    pub first: String,
    pub last: String,
    pub email: String,
    pub phone: String,
    pub preferred_org: String,
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Roster table
// ---------------------------------------------------------------------------

/// A table entry: one record, or the ordered records that collided on the
/// same identity key. Serializes untagged — a single object or an array —
/// matching the artifact shape downstream consumers already read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RosterEntry<T> {
    Single(T),
    Multiple(Vec<T>),
}

/// Identity key → entry, preserving key insertion order so identical input
/// ordering yields byte-identical JSON (artifacts are diffed between runs).
///
/// Once a key collides its entry switches irreversibly from `Single` to
/// `Multiple`; further collisions append in encounter order. Duplicate
/// identity is an expected condition (common names), tracked as a metric,
/// never an error.
#[derive(Debug, Clone, Default)]
pub struct RosterTable<T> {
    order: Vec<String>,
    entries: HashMap<String, RosterEntry<T>>,
    duplicate_keys: usize,
}

impl<T> RosterTable<T> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
            duplicate_keys: 0,
        }
    }

    pub fn insert(&mut self, key: String, record: T) {
        match self.entries.remove(&key) {
            None => {
                self.order.push(key.clone());
                self.entries.insert(key, RosterEntry::Single(record));
            }
            Some(RosterEntry::Single(existing)) => {
                self.duplicate_keys += 1;
                self.entries
                    .insert(key, RosterEntry::Multiple(vec![existing, record]));
            }
            Some(RosterEntry::Multiple(mut records)) => {
                records.push(record);
                self.entries.insert(key, RosterEntry::Multiple(records));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&RosterEntry<T>> {
        self.entries.get(key)
    }

    /// Number of unique identity keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of distinct keys that collided at least once.
    pub fn duplicate_keys(&self) -> usize {
        self.duplicate_keys
    }

    /// Entries in key insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RosterEntry<T>)> {
        self.order
            .iter()
            .map(move |k| (k.as_str(), &self.entries[k]))
    }
}

impl<T: Serialize> Serialize for RosterTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for key in &self.order {
            map.serialize_entry(key, &self.entries[key])?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Build stats
// ---------------------------------------------------------------------------

/// Per-build counters reported alongside each artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub rows_read: usize,
    pub accepted: usize,
    pub skipped: usize,
    pub duplicate_keys: usize,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(site: &str) -> Assignment {
        Assignment {
            first: "Ann".into(),
            last: "Lee".into(),
            site: site.into(),
            group: String::new(),
            crew_leader: String::new(),
        }
    }

    #[test]
    fn insert_fresh_key_is_single() {
        let mut table = RosterTable::new();
        table.insert("annlee".into(), assignment("Park"));

        assert_eq!(table.len(), 1);
        assert_eq!(table.duplicate_keys(), 0);
        match table.get("annlee").unwrap() {
            RosterEntry::Single(a) => assert_eq!(a.site, "Park"),
            other => panic!("expected Single, got {other:?}"),
        }
    }

    #[test]
    fn first_collision_folds_to_ordered_pair() {
        let mut table = RosterTable::new();
        table.insert("annlee".into(), assignment("Park"));
        table.insert("annlee".into(), assignment("Shelter"));

        assert_eq!(table.len(), 1);
        assert_eq!(table.duplicate_keys(), 1);
        match table.get("annlee").unwrap() {
            RosterEntry::Multiple(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].site, "Park");
                assert_eq!(records[1].site, "Shelter");
            }
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn later_collisions_append_without_recounting() {
        let mut table = RosterTable::new();
        table.insert("annlee".into(), assignment("Park"));
        table.insert("annlee".into(), assignment("Shelter"));
        table.insert("annlee".into(), assignment("Garden"));

        assert_eq!(table.duplicate_keys(), 1);
        match table.get("annlee").unwrap() {
            RosterEntry::Multiple(records) => {
                assert_eq!(records.len(), 3);
                assert_eq!(records[2].site, "Garden");
            }
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn serializes_in_insertion_order() {
        let mut table = RosterTable::new();
        table.insert("zoewu".into(), assignment("Park"));
        table.insert("annlee".into(), assignment("Shelter"));

        let json = serde_json::to_string(&table).unwrap();
        let zoe = json.find("zoewu").unwrap();
        let ann = json.find("annlee").unwrap();
        assert!(zoe < ann, "insertion order must survive serialization");
    }

    #[test]
    fn entry_serializes_untagged() {
        let single = RosterEntry::Single(assignment("Park"));
        let json = serde_json::to_value(&single).unwrap();
        assert!(json.is_object());
        assert_eq!(json["crewLeader"], "");

        let multiple = RosterEntry::Multiple(vec![assignment("Park"), assignment("Shelter")]);
        let json = serde_json::to_value(&multiple).unwrap();
        assert!(json.is_array());
        assert_eq!(json[1]["site"], "Shelter");
    }
}
