//! Rendering entries as an import map document.

use serde_json::{Map, Value, json};

use crate::compiler::AssetResolver;
use crate::entries::ImportMapEntries;
use crate::error::{ImportMapError, Result};

/// Build the `{"imports": {...}}` document for `entries`, in table order.
///
/// Local entries resolve their `path` through `resolver`; remote entries keep their path.
pub fn render_import_map(entries: &ImportMapEntries, resolver: &dyn AssetResolver) -> Result<Value> {
  let mut imports = Map::new();
  for entry in entries {
    let url = if entry.is_remote_package() {
      entry.path.clone()
    } else {
      resolver
        .get_asset(&entry.path)
        .map_err(|source| ImportMapError::AssetResolution {
          logical_path: entry.path.clone(),
          source,
        })?
        .public_path
    };
    imports.insert(entry.import_name.clone(), Value::String(url));
  }

  Ok(json!({ "imports": imports }))
}

/// Pretty-printed JSON form of [`render_import_map`].
pub fn render_import_map_json(
  entries: &ImportMapEntries,
  resolver: &dyn AssetResolver,
) -> Result<String> {
  let document = render_import_map(entries, resolver)?;
  Ok(serde_json::to_string_pretty(&document)?)
}
