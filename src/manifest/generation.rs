use tracing::debug;

use crate::entries::ImportMapEntries;
use crate::manifest::ManifestDocument;
use crate::models::{ImportMapEntry, ImportMapType};

/// Import name under which the build entrypoint is always reachable.
pub const DEFAULT_ENTRYPOINT_ALIAS: &str = "app";

/// Derive the import map entries described by a manifest.
///
/// Every item with an output `file` yields one local entry keyed by that file name. Entry
/// items additionally register `entrypoint_alias` pointing at the same file, directly after
/// their own entry. Items without a `file` contribute nothing.
pub fn build_entries(document: &ManifestDocument, entrypoint_alias: &str) -> ImportMapEntries {
  let mut entries = ImportMapEntries::new();

  for (_, item) in document.items() {
    let Some(file) = item.file.as_deref() else {
      continue;
    };

    let kind = ImportMapType::from_file_name(file);
    entries.add(ImportMapEntry::local(file, kind, file, item.is_entry));
    if item.is_entry {
      entries.add(ImportMapEntry::local(entrypoint_alias, kind, file, true));
    }
  }

  debug!(
    path = %document.path().display(),
    entries = entries.len(),
    "built import map entries from manifest"
  );
  entries
}
