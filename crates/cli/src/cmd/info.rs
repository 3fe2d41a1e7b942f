use anyhow::{Context, Result};

use plandrive_lib::{Platform, Settings};

use crate::output::print_stat;

pub fn cmd_info() -> Result<()> {
  let platform = Platform::current().context("Could not detect platform")?;
  let settings = Settings::from_env(&platform).context("Failed to read settings")?;
  let paths = settings.paths();

  println!("System:");
  print_stat("Platform", &platform.triple());
  if let Some(arch) = platform.arch {
    let bits = if arch.runs_32_bit_builds() { "yes" } else { "no" };
    print_stat("Word size", &format!("{}-bit", arch.word_size()));
    print_stat("32-bit builds", bits);
  }
  print_stat("Generator", platform.generator_name());
  print_stat("Build tool", &settings.make.display().to_string());
  print_stat("Interpreter", &settings.interpreter.display().to_string());
  println!("Project:");
  print_stat("Root", &paths.root().display().to_string());
  print_stat("Builds", &paths.builds_dir().display().to_string());

  Ok(())
}
