//! Implementation of the `plandrive run` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use plandrive_lib::pipeline::{ComponentSelection, OptionGroups};
use plandrive_lib::{ExecutableResolver, PipelineRequest, PipelineRunner};

use super::Project;
use crate::output::print_error;

/// Parsed `run` arguments plus the stage option groups split off beforehand.
#[derive(Debug)]
pub struct RunArgs {
  pub build: Option<String>,
  pub debug: bool,
  pub translate: bool,
  pub preprocess: bool,
  pub search: bool,
  pub run_all: bool,
  pub alias: Option<String>,
  pub portfolio: Option<PathBuf>,
  pub plan_file: PathBuf,
  pub inputs: Vec<String>,
  pub groups: OptionGroups,
}

/// Run the selected stages and return the exit code of the first failing one, or 0.
pub fn cmd_run(args: RunArgs) -> Result<i32> {
  let project = Project::load()?;

  let build = match (args.build, args.debug) {
    (Some(build), _) => build,
    (None, true) => project.configs.debug_name().to_string(),
    (None, false) => project.configs.default_name().to_string(),
  };
  debug!(build = %build, "selected build");

  let components = ComponentSelection::from_flags(args.translate, args.preprocess, args.search, args.run_all);
  let request = PipelineRequest::new(
    build,
    components,
    args.inputs,
    args.groups,
    args.alias,
    args.portfolio,
    args.plan_file,
  )
  .context("Invalid pipeline arguments")?;

  let resolver = ExecutableResolver::new(project.settings.paths(), project.platform);
  let runner = PipelineRunner::new(&resolver, &project.aliases, &project.settings.interpreter);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let outcome = rt.block_on(runner.run(&request)).context("Pipeline failed")?;

  if let Some(stage) = outcome.failed_stage() {
    print_error(&format!("{} exited with code {}", stage.component, stage.exit_code));
  }

  Ok(outcome.exit_code())
}
