//! Runtime settings read from the environment.
//!
//! | Variable           | Meaning                                  | Default                       |
//! |--------------------|------------------------------------------|-------------------------------|
//! | `PLANDRIVE_ROOT`   | project root holding `src/` and `builds/`| current working directory     |
//! | `PLANDRIVE_CMAKE`  | build generator executable               | `cmake`                       |
//! | `PLANDRIVE_MAKE`   | native build tool executable             | platform native tool          |
//! | `PLANDRIVE_PYTHON` | interpreter for script components        | `python3` (`python` on Windows)|

use std::env;
use std::path::PathBuf;

use crate::consts::{ENV_CMAKE, ENV_MAKE, ENV_PYTHON, ENV_ROOT};
use crate::platform::Platform;
use crate::platform::paths::ProjectPaths;

const DEFAULT_GENERATOR_TOOL: &str = "cmake";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  /// Project root containing `src/`, `builds/` and the config sources.
  pub root: PathBuf,
  /// Build generator (CMake) executable.
  pub cmake: PathBuf,
  /// Native build tool executable.
  pub make: PathBuf,
  /// Interpreter used to run script components.
  pub interpreter: PathBuf,
}

impl Settings {
  /// Load settings from the environment, falling back to platform defaults.
  pub fn from_env(platform: &Platform) -> std::io::Result<Self> {
    let root = match non_empty_var(ENV_ROOT) {
      Some(root) => PathBuf::from(root),
      None => env::current_dir()?,
    };

    Ok(Self {
      root,
      cmake: non_empty_var(ENV_CMAKE)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GENERATOR_TOOL)),
      make: non_empty_var(ENV_MAKE)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(platform.native_build_tool())),
      interpreter: non_empty_var(ENV_PYTHON)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(platform.os.default_interpreter())),
    })
  }

  pub fn paths(&self) -> ProjectPaths {
    ProjectPaths::new(&self.root)
  }
}

fn non_empty_var(name: &str) -> Option<String> {
  env::var(name).ok().filter(|v| !v.is_empty())
}
