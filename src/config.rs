//! Project configuration loader describing where the bundler manifest lives.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::manifest::DEFAULT_ENTRYPOINT_ALIAS;

const DEFAULT_CONFIG_FILE: &str = "importmap.config.json";

/// Discoverable configuration describing the manifest location and entry naming.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManifestConfig {
    /// Path from the project directory to the bundler manifest.
    pub manifest_file: String,
    /// Import name under which the build entrypoint is registered.
    pub entrypoint_alias: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            manifest_file: "manifest.json".into(),
            entrypoint_alias: DEFAULT_ENTRYPOINT_ALIAS.into(),
        }
    }
}

impl ManifestConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// When the configuration file does not exist or fails to parse we fall back to default
    /// values so callers can keep working with the conventional manifest location.
    pub fn discover(project_dir: &Path) -> Self {
        let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_else(|| {
            debug!(
                config = %candidate.display(),
                "no usable importmap configuration, using defaults"
            );
            Self::default()
        })
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Location of the manifest for a project rooted at `project_dir`.
    pub fn manifest_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.manifest_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn falls_back_to_defaults_without_config_file() {
        let dir = tempdir().unwrap();
        let config = ManifestConfig::discover(dir.path());
        assert_eq!(config, ManifestConfig::default());
        assert_eq!(config.manifest_path(dir.path()), dir.path().join("manifest.json"));
    }

    #[test]
    fn falls_back_to_defaults_on_malformed_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "{ manifestFile: ").unwrap();
        assert_eq!(ManifestConfig::discover(dir.path()), ManifestConfig::default());
    }

    #[test]
    fn reads_partial_config_with_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{ "manifestFile": "public/build/.vite/manifest.json" }"#,
        )
        .unwrap();

        let config = ManifestConfig::discover(dir.path());
        assert_eq!(config.entrypoint_alias, "app");
        assert_eq!(
            config.manifest_path(dir.path()),
            dir.path().join("public/build/.vite/manifest.json")
        );
    }
}
