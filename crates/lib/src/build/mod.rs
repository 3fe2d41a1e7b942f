//! Building named configurations.
//!
//! Each configuration gets its own directory below `<root>/builds`. The build
//! generator is run there with the configuration's flags and a relative path to
//! the shared source tree, then the native build tool compiles the result.

mod selection;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::BuildConfig;
use crate::exec::{CommandLine, ExecError, run_command};
use crate::platform::Platform;
use crate::platform::paths::ProjectPaths;
use crate::settings::Settings;

pub use selection::{BuildSelection, build_usage};

#[derive(Debug, Error)]
pub enum BuildError {
  #[error("failed to create build directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error(transparent)]
  Exec(#[from] ExecError),

  #[error("building configuration '{config}' failed: {} exited with code {code}", tool.display())]
  ToolFailed { config: String, tool: PathBuf, code: i32 },
}

/// External tools driven by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTools {
  /// Build generator executable (CMake).
  pub cmake: PathBuf,
  /// Native build tool executable.
  pub make: PathBuf,
  /// Generator name passed to CMake via `-G`.
  pub generator: String,
}

impl BuildTools {
  pub fn from_settings(settings: &Settings, platform: &Platform) -> Self {
    Self {
      cmake: settings.cmake.clone(),
      make: settings.make.clone(),
      generator: platform.generator_name().to_string(),
    }
  }
}

/// Builds configurations one at a time.
#[derive(Debug, Clone)]
pub struct Builder {
  paths: ProjectPaths,
  tools: BuildTools,
}

impl Builder {
  pub fn new(paths: ProjectPaths, tools: BuildTools) -> Self {
    Self { paths, tools }
  }

  /// `cmake -G <generator> <flags...> <relative src>`, run inside the build directory.
  pub fn generator_command(&self, config: &BuildConfig) -> CommandLine {
    let mut args = vec!["-G".to_string(), self.tools.generator.clone()];
    args.extend(config.generator_args.iter().cloned());
    args.push(self.paths.relative_src_dir(&config.name).to_string_lossy().into_owned());

    CommandLine::new(&self.tools.cmake, args).current_dir(self.paths.build_dir(&config.name))
  }

  /// `make <passthrough...>`, run inside the build directory.
  pub fn native_command(&self, config: &BuildConfig, passthrough: &[String]) -> CommandLine {
    CommandLine::new(&self.tools.make, passthrough.to_vec()).current_dir(self.paths.build_dir(&config.name))
  }

  /// Build one configuration and return its build directory.
  ///
  /// The build directory is created if missing and reused otherwise. The native
  /// build tool only runs if the generator succeeded.
  pub async fn build(&self, config: &BuildConfig, passthrough: &[String]) -> Result<PathBuf, BuildError> {
    info!("Building configuration {}", config.name);

    let build_dir = self.paths.build_dir(&config.name);
    std::fs::create_dir_all(&build_dir).map_err(|source| BuildError::CreateDir {
      path: build_dir.clone(),
      source,
    })?;

    run_checked(&config.name, &self.generator_command(config)).await?;
    run_checked(&config.name, &self.native_command(config, passthrough)).await?;

    info!("Built configuration {} successfully", config.name);
    Ok(build_dir)
  }

  /// Build `configs` in order, stopping at the first failure.
  ///
  /// Configurations after a failing one are not attempted; the error of the
  /// failing configuration is returned.
  pub async fn build_all(&self, configs: &[&BuildConfig], passthrough: &[String]) -> Result<Vec<PathBuf>, BuildError> {
    let mut built = Vec::with_capacity(configs.len());
    for config in configs {
      built.push(self.build(config, passthrough).await?);
    }
    Ok(built)
  }
}

async fn run_checked(config: &str, cmd: &CommandLine) -> Result<(), BuildError> {
  let code = run_command(cmd).await?;
  if code != 0 {
    return Err(BuildError::ToolFailed {
      config: config.to_string(),
      tool: tool_name(&cmd.program),
      code,
    });
  }
  Ok(())
}

fn tool_name(program: &Path) -> PathBuf {
  program.file_name().map(PathBuf::from).unwrap_or_else(|| program.to_path_buf())
}
