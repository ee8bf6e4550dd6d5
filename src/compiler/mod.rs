//! Compilers rewriting asset references inside compiled output.

mod sibling;

pub use sibling::{SiblingCompiler, SiblingKind};

use tracing::debug;

use crate::error::Result;
use crate::models::MappedAsset;

/// Turns logical asset names into their public, fingerprinted location.
pub trait AssetResolver {
  /// Resolve the asset registered under `logical_path`.
  fn get_asset(&self, logical_path: &str) -> anyhow::Result<MappedAsset>;
}

impl<F> AssetResolver for F
where
  F: Fn(&str) -> anyhow::Result<MappedAsset>,
{
  fn get_asset(&self, logical_path: &str) -> anyhow::Result<MappedAsset> {
    self(logical_path)
  }
}

/// Rewrites the content of a compiled asset.
pub trait AssetCompiler: Send + Sync {
  /// Returns `true` when the compiler has something to do for `asset`.
  fn supports(&self, asset: &MappedAsset) -> bool;

  /// Rewrite `content`, which is the compiled body of `asset`.
  fn compile(&self, content: &str, asset: &MappedAsset, resolver: &dyn AssetResolver)
  -> Result<String>;
}

/// Ordered set of compilers applied to each compiled asset.
#[derive(Default)]
pub struct CompilerChain {
  compilers: Vec<Box<dyn AssetCompiler>>,
}

impl CompilerChain {
  /// Create an empty chain.
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a compiler; compilers run in the order they were added.
  pub fn with(mut self, compiler: impl AssetCompiler + 'static) -> Self {
    self.compilers.push(Box::new(compiler));
    self
  }

  /// Number of registered compilers.
  pub fn len(&self) -> usize {
    self.compilers.len()
  }

  /// Returns `true` when no compiler is registered.
  pub fn is_empty(&self) -> bool {
    self.compilers.is_empty()
  }

  /// Run every compiler supporting `asset` over `content`.
  pub fn compile(
    &self,
    content: &str,
    asset: &MappedAsset,
    resolver: &dyn AssetResolver,
  ) -> Result<String> {
    let mut content = content.to_string();
    for compiler in self.compilers.iter().filter(|compiler| compiler.supports(asset)) {
      content = compiler.compile(&content, asset, resolver)?;
    }
    debug!(asset = %asset.logical_path, "compiled asset through compiler chain");
    Ok(content)
  }
}
