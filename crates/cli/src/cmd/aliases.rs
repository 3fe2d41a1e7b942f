use anyhow::Result;
use serde::Serialize;

use super::Project;
use crate::output::OutputFormat;

#[derive(Serialize)]
struct AliasEntry<'a> {
  name: &'a str,
  options: &'a [String],
}

pub fn cmd_aliases(output: OutputFormat) -> Result<()> {
  let project = Project::load()?;

  if output.is_json() {
    let entries: Vec<AliasEntry> = project
      .aliases
      .iter()
      .map(|(name, options)| AliasEntry { name, options })
      .collect();
    crate::output::print_json(&entries)?;
  } else {
    for name in project.aliases.list() {
      println!("{}", name);
    }
  }

  Ok(())
}
