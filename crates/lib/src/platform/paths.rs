use std::path::{Component, Path, PathBuf};

use crate::consts::{BIN_DIR_NAME, BUILDS_DIR_NAME, SRC_DIR_NAME};

/// On-disk layout of a project checkout.
///
/// ```text
/// <root>/
///   src/                      shared source tree
///   builds/<config>/          one build directory per configuration
///   builds/<config>/bin/      compiled components
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
  root: PathBuf,
}

impl ProjectPaths {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Returns `<root>/builds`
  pub fn builds_dir(&self) -> PathBuf {
    self.root.join(BUILDS_DIR_NAME)
  }

  /// Returns `<root>/src`
  pub fn src_dir(&self) -> PathBuf {
    self.root.join(SRC_DIR_NAME)
  }

  /// Returns the build directory for a configuration: `<root>/builds/<name>`
  pub fn build_dir(&self, config_name: &str) -> PathBuf {
    self.builds_dir().join(config_name)
  }

  /// Returns the binaries directory of a named build: `<root>/builds/<name>/bin`
  pub fn bin_dir(&self, config_name: &str) -> PathBuf {
    self.build_dir(config_name).join(BIN_DIR_NAME)
  }

  /// Path of the source tree relative to the build directory of `config_name`.
  ///
  /// One `..` per level between the root and the build directory, so nested
  /// names such as `gcc/release` still reach `<root>/src`.
  pub fn relative_src_dir(&self, config_name: &str) -> PathBuf {
    let depth = 1 + Path::new(config_name)
      .components()
      .filter(|c| matches!(c, Component::Normal(_)))
      .count();

    let mut rel = PathBuf::new();
    for _ in 0..depth {
      rel.push("..");
    }
    rel.join(SRC_DIR_NAME)
  }
}
