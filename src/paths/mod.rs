//! Helpers for translating import map paths and package specifiers.
//!
//! Filesystem translation depends on the location of the manifest, while package specifier
//! parsing is pure string handling; both are kept in focused submodules so they can be tested
//! independently and reused by every reader variant.

mod filesystem;
mod package;

pub use filesystem::RootPathTranslator;
pub use package::split_package_name_and_file_path;
