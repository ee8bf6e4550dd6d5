//! Loading bundler manifests and deriving import map entries from them.

mod document;
mod generation;

pub use document::ManifestDocument;
pub use generation::{DEFAULT_ENTRYPOINT_ALIAS, build_entries};
