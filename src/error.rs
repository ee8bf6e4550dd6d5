//! Error taxonomy shared by the manifest reader, the entry table and the compilers.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = ImportMapError> = std::result::Result<T, E>;

/// Failures raised while reading a manifest or rewriting compiled assets.
#[derive(Debug, Error)]
pub enum ImportMapError {
  /// The manifest file is missing, unreadable or not a JSON object.
  #[error("invalid manifest configuration at {path}: {message}")]
  Configuration {
    /// Manifest location that failed to load.
    path: PathBuf,
    /// Human readable reason.
    message: String,
  },

  /// A manifest item uses keys outside the recognised set.
  #[error(
    "the following keys are not valid for the importmap entry \"{import_name}\" in {path}: \"{}\". Valid keys are: \"{}\"",
    .invalid_keys.join("\", \""),
    .valid_keys.join("\", \"")
  )]
  Validation {
    /// Manifest location containing the item.
    path: PathBuf,
    /// Source module name of the offending item.
    import_name: String,
    /// Keys that are not recognised.
    invalid_keys: Vec<String>,
    /// Keys a manifest item may use.
    valid_keys: Vec<String>,
  },

  /// A write-oriented operation was attempted on a read-only reader.
  #[error("{operation} is not supported: {reason}")]
  UnsupportedOperation {
    /// Name of the rejected operation.
    operation: &'static str,
    /// Why the reader rejects it.
    reason: &'static str,
  },

  /// No entry is registered under the requested import name.
  #[error("the importmap entry \"{import_name}\" does not exist")]
  NotFound {
    /// Import name that was looked up.
    import_name: String,
  },

  /// The asset resolver could not resolve a referenced file.
  #[error("failed to resolve asset \"{logical_path}\"")]
  AssetResolution {
    /// Logical filename that was looked up.
    logical_path: String,
    /// Error reported by the resolver.
    #[source]
    source: anyhow::Error,
  },

  /// The rendered import map could not be serialized.
  #[error("failed to serialize import map")]
  Serialization(#[from] serde_json::Error),
}

impl ImportMapError {
  pub(crate) fn configuration(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
    Self::Configuration {
      path: path.into(),
      message: message.into(),
    }
  }

  pub(crate) fn read_only(operation: &'static str) -> Self {
    Self::UnsupportedOperation {
      operation,
      reason: "the manifest reader is read-only as its only goal is to read the bundler manifest",
    }
  }
}
