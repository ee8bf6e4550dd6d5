use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{ImportMapError, Result};
use crate::models::ManifestItem;

/// Validated bundler manifest shared by the reader and the compilers.
#[derive(Debug, Clone, Default)]
pub struct ManifestDocument {
  path: PathBuf,
  items: IndexMap<String, ManifestItem>,
  file_index: HashMap<String, usize>,
}

impl ManifestDocument {
  /// Read and validate the manifest at `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Arc<Self>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|err| {
      ImportMapError::configuration(path, format!("manifest file cannot be read: {err}"))
    })?;
    let document = Self::from_json_str(path, &content)?;
    debug!(
      path = %path.display(),
      items = document.len(),
      "loaded bundler manifest"
    );
    Ok(Arc::new(document))
  }

  /// Validate manifest JSON that is already in memory; `path` is only used in diagnostics.
  pub fn from_json_str(path: impl Into<PathBuf>, json: &str) -> Result<Self> {
    let path = path.into();
    let root: Value = serde_json::from_str(json).map_err(|err| {
      ImportMapError::configuration(&path, format!("manifest is not valid JSON: {err}"))
    })?;
    let raw_items = match root {
      Value::Object(map) => map,
      Value::Null => Map::new(),
      _ => {
        return Err(ImportMapError::configuration(
          &path,
          "manifest must be a JSON object keyed by source module",
        ));
      }
    };

    let mut items = IndexMap::with_capacity(raw_items.len());
    for (import_name, value) in raw_items {
      let item = parse_item(&path, &import_name, value)?;
      items.insert(import_name, item);
    }

    let file_index = index_by_file(&path, &items);
    Ok(Self {
      path,
      items,
      file_index,
    })
  }

  /// Location the manifest was loaded from.
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Manifest items keyed by source module, in manifest order.
  pub fn items(&self) -> impl Iterator<Item = (&str, &ManifestItem)> {
    self.items.iter().map(|(name, item)| (name.as_str(), item))
  }

  /// Manifest item by source module name.
  pub fn item(&self, import_name: &str) -> Option<&ManifestItem> {
    self.items.get(import_name)
  }

  /// Manifest item whose output `file` equals `file`.
  pub fn item_by_file(&self, file: &str) -> Option<&ManifestItem> {
    let index = *self.file_index.get(file)?;
    self.items.get_index(index).map(|(_, item)| item)
  }

  /// Every `assets` filename referenced by the manifest, in manifest order.
  pub fn sibling_assets(&self) -> impl Iterator<Item = &str> {
    self.items.values().flat_map(|item| item.assets.iter().map(String::as_str))
  }

  /// Every `css` filename referenced by the manifest, in manifest order.
  pub fn sibling_stylesheets(&self) -> impl Iterator<Item = &str> {
    self.items.values().flat_map(|item| item.css.iter().map(String::as_str))
  }

  /// Number of manifest items.
  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// Returns `true` when the manifest holds no items.
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

fn parse_item(path: &Path, import_name: &str, value: Value) -> Result<ManifestItem> {
  let Value::Object(fields) = value else {
    return Err(ImportMapError::configuration(
      path,
      format!("the importmap entry \"{import_name}\" must be a JSON object"),
    ));
  };

  let invalid_keys: Vec<String> = fields
    .keys()
    .filter(|key| !ManifestItem::VALID_KEYS.contains(&key.as_str()))
    .cloned()
    .collect();
  if !invalid_keys.is_empty() {
    return Err(ImportMapError::Validation {
      path: path.to_path_buf(),
      import_name: import_name.to_string(),
      invalid_keys,
      valid_keys: ManifestItem::VALID_KEYS.iter().map(|key| key.to_string()).collect(),
    });
  }

  serde_json::from_value(Value::Object(fields)).map_err(|err| {
    ImportMapError::configuration(
      path,
      format!("the importmap entry \"{import_name}\" is malformed: {err}"),
    )
  })
}

fn index_by_file(path: &Path, items: &IndexMap<String, ManifestItem>) -> HashMap<String, usize> {
  let mut index = HashMap::new();
  for (position, (import_name, item)) in items.iter().enumerate() {
    let Some(file) = &item.file else {
      continue;
    };
    match index.entry(file.clone()) {
      Entry::Vacant(slot) => {
        slot.insert(position);
      }
      Entry::Occupied(_) => {
        warn!(
          path = %path.display(),
          file = %file,
          import_name = %import_name,
          "manifest lists the same output file twice, keeping the first item"
        );
      }
    }
  }
  index
}
