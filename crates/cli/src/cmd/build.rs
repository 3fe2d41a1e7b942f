//! Implementation of the `plandrive build` command.

use std::time::Instant;

use anyhow::{Context, Result};

use plandrive_lib::build::{BuildTools, build_usage};
use plandrive_lib::{BuildSelection, Builder};

use super::Project;
use crate::output::{format_duration, print_stat, print_success};

/// Build the configurations selected by `args`, forwarding the rest to the native build tool.
///
/// Stops at the first configuration that fails to build.
pub fn cmd_build(args: &[String]) -> Result<()> {
  let start = Instant::now();
  let project = Project::load()?;
  let tools = BuildTools::from_settings(&project.settings, &project.platform);

  let selection = BuildSelection::parse(args, &project.configs).context("Invalid build arguments")?;
  if selection.help {
    print!("{}", build_usage(&project.configs, &tools));
    return Ok(());
  }
  let configs = selection.resolve(&project.configs)?;

  let builder = Builder::new(project.settings.paths(), tools);
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let built = rt
    .block_on(builder.build_all(&configs, &selection.passthrough))
    .context("Build failed")?;

  println!();
  print_success(&format!("Built {} configuration(s)", built.len()));
  for (config, dir) in configs.iter().zip(&built) {
    print_stat(&config.name, &dir.display().to_string());
  }
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
