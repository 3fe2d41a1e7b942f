use anyhow::Result;
use serde::Serialize;

use super::Project;
use crate::output::{OutputFormat, print_json, print_stat};

#[derive(Serialize)]
struct ConfigList<'a> {
  default: &'a str,
  debug: &'a str,
  configs: Vec<&'a plandrive_lib::BuildConfig>,
}

pub fn cmd_configs(output: OutputFormat) -> Result<()> {
  let project = Project::load()?;
  let configs = &project.configs;

  if output.is_json() {
    return print_json(&ConfigList {
      default: configs.default_name(),
      debug: configs.debug_name(),
      configs: configs.iter().collect(),
    });
  }

  for config in configs.iter() {
    let mut label = config.name.clone();
    if config.name == configs.default_name() {
      label.push_str(" (default)");
    }
    if config.name == configs.debug_name() {
      label.push_str(" (debug)");
    }
    print_stat(&label, &config.generator_args.join(" "));
  }

  Ok(())
}
