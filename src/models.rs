//! Data structures shared by the manifest reader, the entry table and the compilers.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::paths::split_package_name_and_file_path;

/// Kind of module an import map entry resolves to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMapType {
  /// JavaScript module; the fallback for unknown extensions.
  #[default]
  Js,
  /// Stylesheet.
  Css,
  /// SVG image.
  Svg,
}

impl ImportMapType {
  /// Classify a file extension (without the leading dot).
  pub fn from_extension(extension: &str) -> Self {
    match extension {
      "css" => Self::Css,
      "svg" => Self::Svg,
      _ => Self::Js,
    }
  }

  /// Classify a file name by the text after the last `.` of its final segment.
  ///
  /// Dot-files such as `.css` count as having the extension `css`.
  pub fn from_file_name(file: &str) -> Self {
    let name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    name
      .rsplit_once('.')
      .map(|(_, extension)| Self::from_extension(extension))
      .unwrap_or_default()
  }

  /// Lowercase name used in serialized import maps.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Js => "js",
      Self::Css => "css",
      Self::Svg => "svg",
    }
  }
}

/// Remote package coordinates carried by entries that point at a downloaded package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePackage {
  /// Version of the package that was installed.
  pub version: String,
  /// Package specifier with optional sub-path, e.g. `@hotwired/stimulus/dist/index.js`.
  pub package_module_specifier: String,
}

/// A single resolvable module of an import map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportMapEntry {
  /// Key the module is resolved under.
  pub import_name: String,
  /// Output file name as written by the bundler.
  pub path: String,
  /// Module kind derived from the file extension.
  #[serde(rename = "type")]
  pub kind: ImportMapType,
  /// Whether the module is a top-level entry of the build.
  pub is_entrypoint: bool,
  /// Remote package coordinates, absent for local files.
  #[serde(flatten)]
  pub remote: Option<RemotePackage>,
}

impl ImportMapEntry {
  /// Create an entry pointing at a local file.
  pub fn local(
    import_name: impl Into<String>,
    kind: ImportMapType,
    path: impl Into<String>,
    is_entrypoint: bool,
  ) -> Self {
    Self {
      import_name: import_name.into(),
      path: path.into(),
      kind,
      is_entrypoint,
      remote: None,
    }
  }

  /// Create an entry pointing at a remote package.
  pub fn remote(
    import_name: impl Into<String>,
    kind: ImportMapType,
    path: impl Into<String>,
    version: impl Into<String>,
    package_module_specifier: impl Into<String>,
    is_entrypoint: bool,
  ) -> Self {
    Self {
      import_name: import_name.into(),
      path: path.into(),
      kind,
      is_entrypoint,
      remote: Some(RemotePackage {
        version: version.into(),
        package_module_specifier: package_module_specifier.into(),
      }),
    }
  }

  /// Returns `true` when the entry was installed from a remote package.
  pub fn is_remote_package(&self) -> bool {
    self.remote.is_some()
  }

  /// Package name of a remote entry, without any sub-path.
  pub fn package_name(&self) -> Option<&str> {
    let remote = self.remote.as_ref()?;
    Some(split_package_name_and_file_path(&remote.package_module_specifier).0)
  }

  /// Sub-path inside the remote package, empty when the whole package is imported.
  pub fn package_file_path(&self) -> Option<&str> {
    let remote = self.remote.as_ref()?;
    Some(split_package_name_and_file_path(&remote.package_module_specifier).1)
  }
}

/// One record of a bundler manifest.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestItem {
  /// Fingerprinted output file.
  #[serde(default)]
  pub file: Option<String>,
  /// Source module the output was built from.
  #[serde(default)]
  pub src: Option<String>,
  /// Non-stylesheet assets referenced by the module.
  #[serde(default, deserialize_with = "null_as_default")]
  pub assets: Vec<String>,
  /// Stylesheets emitted for the module.
  #[serde(default, deserialize_with = "null_as_default")]
  pub css: Vec<String>,
  /// Statically imported source modules.
  #[serde(default, deserialize_with = "null_as_default")]
  pub imports: Vec<String>,
  /// Dynamically imported source modules.
  #[serde(default, deserialize_with = "null_as_default")]
  pub dynamic_imports: Vec<String>,
  /// Whether the module is a build entry.
  #[serde(default, deserialize_with = "null_as_default")]
  pub is_entry: bool,
  /// Whether the module is only loaded through a dynamic import.
  #[serde(default, deserialize_with = "null_as_default")]
  pub is_dynamic_entry: bool,
}

impl ManifestItem {
  /// Keys a manifest record may contain.
  pub const VALID_KEYS: [&'static str; 8] = [
    "isEntry",
    "file",
    "src",
    "assets",
    "css",
    "dynamicImports",
    "imports",
    "isDynamicEntry",
  ];
}

/// Treat an explicit JSON `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Asset as seen by the surrounding asset pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedAsset {
  /// Name the asset is looked up by, e.g. `main.384b8127.js`.
  pub logical_path: String,
  /// Public URL path, e.g. `/assets/main.384b8127-2a7b.js`.
  pub public_path: String,
  /// Extension of the public file, without the dot.
  pub public_extension: String,
}

impl MappedAsset {
  /// Build an asset, deriving the public extension from the public path.
  pub fn new(logical_path: impl Into<String>, public_path: impl Into<String>) -> Self {
    let public_path = public_path.into();
    let public_extension = Path::new(&public_path)
      .extension()
      .and_then(|extension| extension.to_str())
      .unwrap_or_default()
      .to_string();
    Self {
      logical_path: logical_path.into(),
      public_path,
      public_extension,
    }
  }

  /// Public path without its leading separator.
  pub fn relative_public_path(&self) -> &str {
    self
      .public_path
      .strip_prefix('/')
      .unwrap_or(&self.public_path)
  }
}
