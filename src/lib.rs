#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod compiler;
pub mod config;
pub mod entries;
pub mod error;
pub mod manifest;
pub mod models;
pub mod paths;
pub mod reader;
pub mod render;

pub use compiler::{AssetCompiler, AssetResolver, CompilerChain, SiblingCompiler, SiblingKind};
pub use config::ManifestConfig;
pub use entries::ImportMapEntries;
pub use error::{ImportMapError, Result};
pub use manifest::ManifestDocument;
pub use models::{ImportMapEntry, ImportMapType, ManifestItem, MappedAsset, RemotePackage};
pub use reader::{ImportMapConfigReader, ManifestConfigReader};
pub use render::{render_import_map, render_import_map_json};
