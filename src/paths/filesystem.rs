use std::path::{Component, Path, PathBuf};

use path_slash::PathExt as _;

/// Converts between root-relative import map paths and filesystem paths.
///
/// The root is the directory holding the manifest. Every produced path uses forward slashes so
/// import maps generated on Windows match the ones generated elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootPathTranslator {
  root: PathBuf,
}

impl RootPathTranslator {
  /// Translator rooted at `root`.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Translator rooted at the directory that contains `config_path`.
  pub fn for_config_file(config_path: &Path) -> Self {
    let root = match config_path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
      _ => PathBuf::from("."),
    };
    Self::new(root)
  }

  /// Directory relative paths are resolved against.
  pub fn root_directory(&self) -> &Path {
    &self.root
  }

  /// Turn an import map path into a filesystem path.
  ///
  /// Paths that do not start with `.` are already filesystem paths and are returned untouched.
  pub fn convert_path_to_filesystem_path(&self, path: &str) -> String {
    if !path.starts_with('.') {
      return path.to_string();
    }

    normalize_lexically(&self.root.join(path))
      .to_slash_lossy()
      .into_owned()
  }

  /// Turn a filesystem path into a `./`-prefixed path relative to the root directory.
  ///
  /// Returns `None` when either path cannot be resolved or when the file does not live below
  /// the root directory.
  pub fn convert_filesystem_path_to_path(&self, filesystem_path: impl AsRef<Path>) -> Option<String> {
    let root = dunce::canonicalize(&self.root).ok()?;
    let path = dunce::canonicalize(filesystem_path.as_ref()).ok()?;
    let relative = path.strip_prefix(&root).ok()?;
    if relative.as_os_str().is_empty() {
      return None;
    }

    Some(format!("./{}", relative.to_slash_lossy()))
  }
}

fn normalize_lexically(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        match normalized.components().next_back() {
          Some(Component::Normal(_)) => {
            normalized.pop();
          }
          Some(Component::RootDir | Component::Prefix(_)) => {}
          _ => normalized.push(component),
        }
      }
      other => normalized.push(other),
    }
  }
  normalized
}
