//! Locating stage executables inside a build.
//!
//! A build identifier is tried, in order, as:
//! 1. a directory holding the binaries (absolute or relative to the cwd)
//! 2. a named build at `<builds>/<name>/bin`
//! 3. on multi-config layouts only, `<builds>/bin/Debug` or `<builds>/bin/Release`
//!    for names starting with `debug` / `release`
//!
//! Explicit paths win over named lookups; the layout guess is a last resort.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::BIN_DIR_NAME;
use crate::platform::Platform;
use crate::platform::paths::ProjectPaths;

#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("could not find build '{build}' (looked at {}); please run 'plandrive build {build}'", display_paths(tried))]
  BuildNotFound { build: String, tried: Vec<PathBuf> },

  #[error(
    "could not find '{}' in build '{build}' (looked at {}); please run 'plandrive build {build}'",
    rel_path.display(),
    path.display()
  )]
  ExecutableNotFound {
    component: Component,
    build: String,
    rel_path: PathBuf,
    path: PathBuf,
  },

  #[error("failed to make {} absolute: {source}", path.display())]
  Absolute { path: PathBuf, source: std::io::Error },
}

/// The three independently built pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
  Translate,
  Preprocess,
  Search,
}

impl Component {
  pub const ALL: [Component; 3] = [Component::Translate, Component::Preprocess, Component::Search];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Translate => "translate",
      Self::Preprocess => "preprocess",
      Self::Search => "search",
    }
  }

  /// Path of the component inside a build's binaries directory.
  pub fn relative_path(&self, platform: &Platform) -> PathBuf {
    match self {
      Self::Translate => Path::new("translate").join("translate.py"),
      Self::Preprocess => PathBuf::from(format!("preprocess{}", platform.executable_suffix())),
      Self::Search => PathBuf::from(format!("downward{}", platform.executable_suffix())),
    }
  }
}

impl fmt::Display for Component {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Finds component executables for a build identifier.
#[derive(Debug, Clone)]
pub struct ExecutableResolver {
  paths: ProjectPaths,
  platform: Platform,
  /// Base for relative build directories; the process cwd when `None`.
  base_dir: Option<PathBuf>,
}

impl ExecutableResolver {
  pub fn new(paths: ProjectPaths, platform: Platform) -> Self {
    Self {
      paths,
      platform,
      base_dir: None,
    }
  }

  /// Resolve relative build directories against `dir` instead of the cwd.
  pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.base_dir = Some(dir.into());
    self
  }

  /// Directory holding the binaries of `build`.
  pub fn build_dir(&self, build: &str) -> Result<PathBuf, ResolveError> {
    let direct = match &self.base_dir {
      Some(base) => base.join(build),
      None => PathBuf::from(build),
    };
    let mut candidates = vec![direct, self.paths.bin_dir(build)];

    if self.platform.has_multi_config_layout() {
      let layout_dir = self.paths.builds_dir().join(BIN_DIR_NAME);
      if build.starts_with("debug") {
        candidates.push(layout_dir.join("Debug"));
      } else if build.starts_with("release") {
        candidates.push(layout_dir.join("Release"));
      }
    }

    match candidates.iter().position(|dir| dir.exists()) {
      Some(index) => {
        let dir = candidates.swap_remove(index);
        debug!(build, dir = %dir.display(), "resolved build directory");
        Ok(dir)
      }
      None => Err(ResolveError::BuildNotFound {
        build: build.to_string(),
        tried: candidates,
      }),
    }
  }

  /// Absolute path of `component` in `build`.
  pub fn resolve(&self, build: &str, component: Component) -> Result<PathBuf, ResolveError> {
    let dir = self.build_dir(build)?;
    let rel_path = component.relative_path(&self.platform);
    let path = dir.join(&rel_path);

    if !path.exists() {
      return Err(ResolveError::ExecutableNotFound {
        component,
        build: build.to_string(),
        rel_path,
        path,
      });
    }

    absolute_path(path)
  }
}

/// Canonical form of `path`, or its absolute form when it cannot be canonicalized.
fn absolute_path(path: PathBuf) -> Result<PathBuf, ResolveError> {
  match dunce::canonicalize(&path) {
    Ok(canonical) => Ok(canonical),
    Err(err) => {
      debug!(path = %path.display(), error = %err, "canonicalize failed, using absolute path");
      std::path::absolute(&path).map_err(|source| ResolveError::Absolute { path, source })
    }
  }
}

fn display_paths(paths: &[PathBuf]) -> String {
  paths
    .iter()
    .map(|path| path.display().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}
