//! Readers turning an import map configuration into entries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::config::ManifestConfig;
use crate::entries::ImportMapEntries;
use crate::error::{ImportMapError, Result};
use crate::manifest::{DEFAULT_ENTRYPOINT_ALIAS, ManifestDocument, build_entries};
use crate::models::{ImportMapEntry, ImportMapType};
use crate::paths::{RootPathTranslator, split_package_name_and_file_path};

/// Source of the root import map entries.
pub trait ImportMapConfigReader {
  /// Entries of the root import map.
  fn get_entries(&self) -> Result<&ImportMapEntries>;

  /// Persist a new set of entries.
  fn write_entries(&self, entries: &ImportMapEntries) -> Result<()>;

  /// Entry registered under `module_name`, or `None` when there is none.
  fn find_root_import_map_entry(&self, module_name: &str) -> Result<Option<&ImportMapEntry>> {
    Ok(self.get_entries()?.find(module_name))
  }

  /// Build an entry for a package downloaded from a remote registry.
  fn create_remote_entry(
    &self,
    import_name: &str,
    kind: ImportMapType,
    version: &str,
    package_module_specifier: &str,
    is_entrypoint: bool,
  ) -> Result<ImportMapEntry>;

  /// Convert the `path` of an entry into a filesystem path.
  ///
  /// The path may already be a filesystem path. If it starts with `.` it is relative and the
  /// root directory is prepended.
  fn convert_path_to_filesystem_path(&self, path: &str) -> String;

  /// Convert a filesystem path into a `./`-prefixed path usable in the import map.
  ///
  /// Returns `None` when the file is not below the root directory.
  fn convert_filesystem_path_to_path(&self, filesystem_path: &Path) -> Option<String>;

  /// Directory holding the import map configuration.
  fn root_directory(&self) -> &Path;

  /// Split a package specifier into its package name and sub-path.
  fn split_package_name_and_file_path(package_name: &str) -> (&str, &str)
  where
    Self: Sized,
  {
    split_package_name_and_file_path(package_name)
  }
}

/// Read-only reader deriving entries from a bundler `manifest.json`.
///
/// The manifest is produced by the bundler, so every write-oriented operation is rejected.
/// The parsed manifest and the derived entries are built once and reused by later calls.
#[derive(Debug)]
pub struct ManifestConfigReader {
  manifest_path: PathBuf,
  entrypoint_alias: String,
  translator: RootPathTranslator,
  document: OnceCell<Arc<ManifestDocument>>,
  entries: OnceCell<ImportMapEntries>,
}

impl ManifestConfigReader {
  /// Reader for the manifest at `manifest_path`; nothing is read until entries are requested.
  pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
    let manifest_path = manifest_path.into();
    Self {
      translator: RootPathTranslator::for_config_file(&manifest_path),
      manifest_path,
      entrypoint_alias: DEFAULT_ENTRYPOINT_ALIAS.to_string(),
      document: OnceCell::new(),
      entries: OnceCell::new(),
    }
  }

  /// Reader configured for the project in `project_dir`.
  pub fn from_config(project_dir: &Path, config: &ManifestConfig) -> Self {
    Self::new(config.manifest_path(project_dir)).with_entrypoint_alias(&config.entrypoint_alias)
  }

  /// Reader over a manifest that was already loaded, e.g. one shared with the compilers.
  pub fn with_document(document: Arc<ManifestDocument>) -> Self {
    let mut reader = Self::new(document.path());
    reader.document = OnceCell::with_value(document);
    reader
  }

  /// Register the build entrypoint under `alias` instead of `app`.
  pub fn with_entrypoint_alias(mut self, alias: impl Into<String>) -> Self {
    self.entrypoint_alias = alias.into();
    self
  }

  /// Location of the manifest.
  pub fn manifest_path(&self) -> &Path {
    &self.manifest_path
  }

  /// Parsed manifest, loaded on first access.
  pub fn document(&self) -> Result<Arc<ManifestDocument>> {
    self
      .document
      .get_or_try_init(|| ManifestDocument::load(&self.manifest_path))
      .cloned()
  }
}

impl ImportMapConfigReader for ManifestConfigReader {
  fn get_entries(&self) -> Result<&ImportMapEntries> {
    self.entries.get_or_try_init(|| {
      let document = self.document()?;
      Ok(build_entries(&document, &self.entrypoint_alias))
    })
  }

  fn write_entries(&self, _entries: &ImportMapEntries) -> Result<()> {
    Err(ImportMapError::read_only("write_entries"))
  }

  fn create_remote_entry(
    &self,
    _import_name: &str,
    _kind: ImportMapType,
    _version: &str,
    _package_module_specifier: &str,
    _is_entrypoint: bool,
  ) -> Result<ImportMapEntry> {
    Err(ImportMapError::read_only("create_remote_entry"))
  }

  fn convert_path_to_filesystem_path(&self, path: &str) -> String {
    self.translator.convert_path_to_filesystem_path(path)
  }

  fn convert_filesystem_path_to_path(&self, filesystem_path: &Path) -> Option<String> {
    self.translator.convert_filesystem_path_to_path(filesystem_path)
  }

  fn root_directory(&self) -> &Path {
    self.translator.root_directory()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  const MANIFEST: &str = r#"{
    "assets/assets/logo.svg": { "file": "logo.277e0e97.svg", "src": "assets/assets/logo.svg" },
    "assets/main.css": { "file": "main.9ca0e350.css", "src": "assets/main.css" },
    "assets/main.ts": {
      "assets": ["logo.277e0e97.svg"],
      "css": ["main.9ca0e350.css"],
      "dynamicImports": ["assets/views/AboutView.vue", "assets/views/ContactView.vue"],
      "file": "main.384b8127.js",
      "isEntry": true,
      "src": "assets/main.ts"
    },
    "assets/views/ContactView.vue": {
      "css": ["ContactView.80bdbd08.css"],
      "file": "ContactView.06bda5cf.js",
      "imports": ["assets/main.ts"],
      "isDynamicEntry": true,
      "src": "assets/views/ContactView.vue"
    }
  }"#;

  fn write_manifest(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("manifest.json");
    fs::write(&path, json).unwrap();
    path
  }

  #[test]
  fn reads_entries_from_manifest() {
    let dir = tempdir().unwrap();
    let reader = ManifestConfigReader::new(write_manifest(dir.path(), MANIFEST));

    let entries = reader.get_entries().unwrap();
    let names: Vec<&str> = entries.iter().map(|entry| entry.import_name.as_str()).collect();
    assert_eq!(names, vec![
      "logo.277e0e97.svg",
      "main.9ca0e350.css",
      "main.384b8127.js",
      "app",
      "ContactView.06bda5cf.js",
    ]);
  }

  #[test]
  fn memoizes_entries() {
    let dir = tempdir().unwrap();
    let path = write_manifest(dir.path(), MANIFEST);
    let reader = ManifestConfigReader::new(&path);

    let first = reader.get_entries().unwrap();
    fs::remove_file(&path).unwrap();
    let second = reader.get_entries().unwrap();
    assert!(std::ptr::eq(first, second));
  }

  #[test]
  fn missing_manifest_is_a_configuration_error() {
    let dir = tempdir().unwrap();
    let reader = ManifestConfigReader::new(dir.path().join("manifest.json"));
    let err = reader.get_entries().unwrap_err();
    assert!(matches!(err, ImportMapError::Configuration { .. }));
    assert!(err.to_string().contains("manifest.json"));
  }

  #[test]
  fn invalid_keys_are_a_validation_error() {
    let dir = tempdir().unwrap();
    let reader = ManifestConfigReader::new(write_manifest(
      dir.path(),
      r#"{ "assets/main.ts": { "file": "main.js", "integrity": "sha384-abc" } }"#,
    ));
    let err = reader.get_entries().unwrap_err();
    assert!(matches!(
      err,
      ImportMapError::Validation { ref import_name, .. } if import_name == "assets/main.ts"
    ));
  }

  #[test]
  fn write_operations_are_unsupported() {
    let dir = tempdir().unwrap();
    let reader = ManifestConfigReader::new(write_manifest(dir.path(), MANIFEST));
    let entries = reader.get_entries().unwrap().clone();

    let err = reader.write_entries(&entries).unwrap_err();
    assert!(matches!(
      err,
      ImportMapError::UnsupportedOperation { operation: "write_entries", .. }
    ));

    let err = reader
      .create_remote_entry("lodash", ImportMapType::Js, "4.17.21", "lodash", false)
      .unwrap_err();
    assert!(matches!(
      err,
      ImportMapError::UnsupportedOperation { operation: "create_remote_entry", .. }
    ));
  }

  #[test]
  fn write_entries_fails_even_without_a_manifest() {
    let reader = ManifestConfigReader::new("/nonexistent/manifest.json");
    let err = reader.write_entries(&ImportMapEntries::new()).unwrap_err();
    assert!(matches!(err, ImportMapError::UnsupportedOperation { .. }));
  }

  #[test]
  fn finds_root_entries_by_import_name() {
    let dir = tempdir().unwrap();
    let reader = ManifestConfigReader::new(write_manifest(dir.path(), MANIFEST));

    let entry = reader.find_root_import_map_entry("app").unwrap().unwrap();
    assert_eq!(entry.path, "main.384b8127.js");
    assert!(entry.is_entrypoint);
    assert!(reader.find_root_import_map_entry("assets/main.ts").unwrap().is_none());
  }

  #[test]
  fn root_directory_is_manifest_parent() {
    let dir = tempdir().unwrap();
    let path = write_manifest(dir.path(), MANIFEST);
    let reader = ManifestConfigReader::new(&path);

    assert_eq!(reader.root_directory(), dir.path());
    assert_eq!(reader.convert_path_to_filesystem_path("dir1/file2.js"), "dir1/file2.js");

    fs::create_dir_all(dir.path().join("dir1")).unwrap();
    let file = dir.path().join("dir1").join("file2.js");
    fs::write(&file, "export {};").unwrap();
    assert_eq!(
      reader.convert_filesystem_path_to_path(&file),
      Some("./dir1/file2.js".to_string())
    );
  }

  #[test]
  fn splits_package_names_through_the_reader() {
    assert_eq!(
      ManifestConfigReader::split_package_name_and_file_path("@scope/pkg/sub/path.js"),
      ("@scope/pkg", "/sub/path.js")
    );
  }

  #[test]
  fn builds_reader_from_project_config() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("build")).unwrap();
    fs::write(
      dir.path().join("build").join("manifest.json"),
      r#"{ "src/main.ts": { "file": "main.1.js", "isEntry": true } }"#,
    )
    .unwrap();
    let config = ManifestConfig {
      manifest_file: "build/manifest.json".into(),
      entrypoint_alias: "main".into(),
    };

    let reader = ManifestConfigReader::from_config(dir.path(), &config);
    assert_eq!(reader.root_directory(), dir.path().join("build"));
    assert!(reader.get_entries().unwrap().has("main"));
  }

  #[test]
  fn shares_a_preloaded_document() {
    let document =
      Arc::new(ManifestDocument::from_json_str("memory/manifest.json", MANIFEST).unwrap());
    let reader = ManifestConfigReader::with_document(Arc::clone(&document));

    assert!(Arc::ptr_eq(&reader.document().unwrap(), &document));
    assert_eq!(reader.get_entries().unwrap().len(), 5);
    assert_eq!(reader.root_directory(), Path::new("memory"));
  }
}
