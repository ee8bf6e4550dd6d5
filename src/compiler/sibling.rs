use std::path::Path;
use std::sync::Arc;

use aho_corasick::{AhoCorasick, MatchKind};
use indexmap::IndexSet;
use tracing::debug;

use super::{AssetCompiler, AssetResolver};
use crate::error::{ImportMapError, Result};
use crate::manifest::ManifestDocument;
use crate::models::{ManifestItem, MappedAsset};

/// Which sibling list of a manifest item a [`SiblingCompiler`] rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingKind {
  /// Images, fonts and other files from the `assets` list.
  Assets,
  /// Stylesheets from the `css` list.
  Stylesheets,
}

impl SiblingKind {
  fn files(self, item: &ManifestItem) -> &[String] {
    match self {
      Self::Assets => &item.assets,
      Self::Stylesheets => &item.css,
    }
  }
}

/// Rewrites references to sibling files inside compiled JavaScript.
///
/// The bundler emits sibling files under their manifest names; once the asset pipeline has
/// fingerprinted them again, every literal occurrence of such a name in the JavaScript has to
/// point at the public path instead. Matching is plain substring matching over the whole
/// content, so a name appearing inside an unrelated string literal is rewritten as well.
/// Replacement happens in a single pass: text that was inserted is never matched again.
#[derive(Debug, Clone)]
pub struct SiblingCompiler {
  kind: SiblingKind,
  document: Arc<ManifestDocument>,
  references: Vec<String>,
  matcher: Option<AhoCorasick>,
}

impl SiblingCompiler {
  /// Compiler for the `assets` lists of `document`.
  pub fn assets(document: Arc<ManifestDocument>) -> Result<Self> {
    Self::new(SiblingKind::Assets, document)
  }

  /// Compiler for the `css` lists of `document`.
  pub fn stylesheets(document: Arc<ManifestDocument>) -> Result<Self> {
    Self::new(SiblingKind::Stylesheets, document)
  }

  /// Load the manifest at `path` and build an `assets` compiler over it.
  pub fn load_assets(path: impl AsRef<Path>) -> Result<Self> {
    Self::assets(ManifestDocument::load(path)?)
  }

  /// Load the manifest at `path` and build a `css` compiler over it.
  pub fn load_stylesheets(path: impl AsRef<Path>) -> Result<Self> {
    Self::stylesheets(ManifestDocument::load(path)?)
  }

  /// Build a compiler for the sibling list selected by `kind`.
  pub fn new(kind: SiblingKind, document: Arc<ManifestDocument>) -> Result<Self> {
    let references: IndexSet<String> = document
      .items()
      .flat_map(|(_, item)| kind.files(item))
      .filter(|file| !file.is_empty())
      .cloned()
      .collect();
    let references: Vec<String> = references.into_iter().collect();

    let matcher = if references.is_empty() {
      None
    } else {
      let automaton = AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(&references)
        .map_err(|err| {
          ImportMapError::configuration(
            document.path(),
            format!("cannot index sibling references: {err}"),
          )
        })?;
      Some(automaton)
    };

    Ok(Self {
      kind,
      document,
      references,
      matcher,
    })
  }

  /// Sibling list this compiler rewrites.
  pub fn kind(&self) -> SiblingKind {
    self.kind
  }

  /// Every sibling filename referenced anywhere in the manifest, in manifest order.
  pub fn references(&self) -> &[String] {
    &self.references
  }
}

impl AssetCompiler for SiblingCompiler {
  fn supports(&self, asset: &MappedAsset) -> bool {
    if asset.public_extension != "js" {
      return false;
    }

    self
      .document
      .item_by_file(&asset.logical_path)
      .is_some_and(|item| !self.kind.files(item).is_empty())
  }

  fn compile(
    &self,
    content: &str,
    asset: &MappedAsset,
    resolver: &dyn AssetResolver,
  ) -> Result<String> {
    let Some(matcher) = &self.matcher else {
      return Ok(content.to_string());
    };

    let mut replacements = Vec::with_capacity(self.references.len());
    for reference in &self.references {
      let resolved = resolver
        .get_asset(reference)
        .map_err(|source| ImportMapError::AssetResolution {
          logical_path: reference.clone(),
          source,
        })?;
      replacements.push(resolved.relative_public_path().to_string());
    }

    debug!(
      asset = %asset.logical_path,
      kind = ?self.kind,
      references = self.references.len(),
      "rewriting sibling references"
    );
    Ok(matcher.replace_all(content, &replacements))
  }
}
