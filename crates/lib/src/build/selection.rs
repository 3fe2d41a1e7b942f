//! Parsing the `build` command line.
//!
//! Tokens are classified one by one: selectors pick configurations, everything
//! else is forwarded verbatim to the native build tool.

use std::collections::BTreeSet;

use super::BuildTools;
use crate::config::{BuildConfig, ConfigError, ConfigRegistry};

/// Configurations picked on the command line plus the native-tool arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSelection {
  /// Selected configuration names; duplicates collapse.
  pub configs: BTreeSet<String>,
  /// Arguments forwarded to the native build tool, in order.
  pub passthrough: Vec<String>,
  /// `--help` / `-h` was given; nothing should be built.
  pub help: bool,
}

impl BuildSelection {
  /// Classify `args` against `registry`.
  ///
  /// - `--help`, `-h`: stop and request usage
  /// - `--all`: every configuration
  /// - `--debug`: the debug configuration
  /// - `--config NAME`, `--config=NAME`: NAME, which must exist
  /// - a configuration name: that configuration
  /// - anything else: forwarded to the native build tool
  ///
  /// With nothing selected, the default configuration is used.
  pub fn parse<I, S>(args: I, registry: &ConfigRegistry) -> Result<Self, ConfigError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut selection = Self::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
      let arg = arg.as_ref();
      match arg {
        "--help" | "-h" => {
          selection.help = true;
          return Ok(selection);
        }
        "--debug" => {
          selection.configs.insert(registry.debug_name().to_string());
        }
        "--all" => {
          selection.configs.extend(registry.names().map(str::to_string));
        }
        "--config" => {
          let name = args.next().ok_or(ConfigError::MissingConfigName)?;
          selection.select_explicit(name.as_ref(), registry)?;
        }
        _ => {
          if let Some(name) = arg.strip_prefix("--config=") {
            selection.select_explicit(name, registry)?;
          } else if registry.contains(arg) {
            selection.configs.insert(arg.to_string());
          } else {
            selection.passthrough.push(arg.to_string());
          }
        }
      }
    }

    if selection.configs.is_empty() {
      selection.configs.insert(registry.default_name().to_string());
    }

    Ok(selection)
  }

  fn select_explicit(&mut self, name: &str, registry: &ConfigRegistry) -> Result<(), ConfigError> {
    registry.get(name)?;
    self.configs.insert(name.to_string());
    Ok(())
  }

  /// Look the selected names up in `registry`, in name order.
  pub fn resolve<'r>(&self, registry: &'r ConfigRegistry) -> Result<Vec<&'r BuildConfig>, ConfigError> {
    self.configs.iter().map(|name| registry.get(name)).collect()
  }
}

/// Usage text for the `build` command, listing every configuration.
pub fn build_usage(registry: &ConfigRegistry, tools: &BuildTools) -> String {
  let cmake = display_name(&tools.cmake);
  let make = display_name(&tools.make);
  let generator = tools.generator.to_lowercase();
  let default = registry.default_name();
  let debug = registry.debug_name();

  let configs = registry
    .iter()
    .map(|config| {
      let mut name = config.name.clone();
      if config.name == default {
        name.push_str(" (default)");
      }
      if config.name == debug {
        name.push_str(" (default with --debug)");
      }
      format!("  {}\n    {}", name, config.generator_args.join(" "))
    })
    .collect::<Vec<_>>()
    .join("\n");

  format!(
    "Usage: plandrive build [BUILD ...] [--config BUILD] [--all] [--debug] [MAKE_OPTIONS]

Build one or more predefined build configurations of the planner. Each build
uses {cmake} to generate {generator} and then uses {make} to compile the
code. Build configurations differ in the parameters they pass to {cmake}.

Build configurations
{configs}

--all            Build all build configurations.
--debug          Build the default debug build configuration.
--config BUILD   Build BUILD; fails if BUILD is not a known configuration.
--help           Print this message and exit.

Make options
  All other parameters are forwarded to {make}.

Example usage:
  plandrive build -j4                 # build {default} in 4 threads
  plandrive build -j4 downward        # as above, but only build the planner
  plandrive build --debug -j4         # build {debug} in 4 threads
  plandrive build {default} {debug}   # build both configurations
  plandrive build --all VERBOSE=true  # build all build configs with detailed logs
"
  )
}

fn display_name(program: &std::path::Path) -> String {
  program
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_else(|| program.display().to_string())
}
