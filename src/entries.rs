//! Ordered, key-unique collection of import map entries.

use indexmap::IndexMap;
use indexmap::map::Values;

use crate::error::{ImportMapError, Result};
use crate::models::ImportMapEntry;

/// Entries keyed by import name, iterated in insertion order.
///
/// Adding an entry under an existing import name replaces the stored entry but keeps the slot
/// of the first insertion, so the iteration order only depends on when a name was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportMapEntries {
  entries: IndexMap<String, ImportMapEntry>,
}

impl ImportMapEntries {
  /// Create an empty table.
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert an entry, replacing any entry registered under the same import name.
  pub fn add(&mut self, entry: ImportMapEntry) {
    self.entries.insert(entry.import_name.clone(), entry);
  }

  /// Returns `true` when an entry exists for the import name.
  pub fn has(&self, import_name: &str) -> bool {
    self.entries.contains_key(import_name)
  }

  /// Look up an entry, failing when the import name is unknown.
  pub fn get(&self, import_name: &str) -> Result<&ImportMapEntry> {
    self
      .find(import_name)
      .ok_or_else(|| ImportMapError::NotFound {
        import_name: import_name.to_string(),
      })
  }

  /// Look up an entry, returning `None` when the import name is unknown.
  pub fn find(&self, import_name: &str) -> Option<&ImportMapEntry> {
    self.entries.get(import_name)
  }

  /// Remove an entry while keeping the relative order of the remaining ones.
  pub fn remove(&mut self, import_name: &str) -> Option<ImportMapEntry> {
    self.entries.shift_remove(import_name)
  }

  /// Number of entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when the table holds no entries.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Iterate the entries in insertion order.
  pub fn iter(&self) -> Values<'_, String, ImportMapEntry> {
    self.entries.values()
  }
}

impl<'a> IntoIterator for &'a ImportMapEntries {
  type Item = &'a ImportMapEntry;
  type IntoIter = Values<'a, String, ImportMapEntry>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl FromIterator<ImportMapEntry> for ImportMapEntries {
  fn from_iter<I: IntoIterator<Item = ImportMapEntry>>(iter: I) -> Self {
    let mut entries = Self::new();
    for entry in iter {
      entries.add(entry);
    }
    entries
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::ImportMapType;

  fn entry(import_name: &str, path: &str) -> ImportMapEntry {
    ImportMapEntry::local(import_name, ImportMapType::Js, path, false)
  }

  #[test]
  fn iterates_in_insertion_order() {
    let entries: ImportMapEntries = [entry("b", "b.js"), entry("a", "a.js"), entry("c", "c.js")]
      .into_iter()
      .collect();

    let names: Vec<&str> = entries.iter().map(|entry| entry.import_name.as_str()).collect();
    assert_eq!(names, vec!["b", "a", "c"]);

    let again: Vec<&str> = (&entries)
      .into_iter()
      .map(|entry| entry.import_name.as_str())
      .collect();
    assert_eq!(again, names);
  }

  #[test]
  fn overwriting_keeps_original_slot() {
    let mut entries = ImportMapEntries::new();
    entries.add(entry("app", "first.js"));
    entries.add(entry("other", "other.js"));
    entries.add(entry("app", "second.js"));

    assert_eq!(entries.len(), 2);
    let first = entries.iter().next().unwrap();
    assert_eq!(first.import_name, "app");
    assert_eq!(first.path, "second.js");
  }

  #[test]
  fn get_fails_for_unknown_import_name() {
    let entries = ImportMapEntries::new();
    let err = entries.get("missing").unwrap_err();
    assert!(matches!(err, ImportMapError::NotFound { ref import_name } if import_name == "missing"));
    assert!(entries.find("missing").is_none());
    assert!(!entries.has("missing"));
    assert!(entries.is_empty());
  }

  #[test]
  fn remove_preserves_remaining_order() {
    let mut entries: ImportMapEntries = [entry("a", "a.js"), entry("b", "b.js"), entry("c", "c.js")]
      .into_iter()
      .collect();

    let removed = entries.remove("a").unwrap();
    assert_eq!(removed.path, "a.js");
    let names: Vec<&str> = entries.iter().map(|entry| entry.import_name.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);
    assert!(entries.get("b").is_ok());
  }
}
