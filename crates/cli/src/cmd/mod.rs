mod aliases;
mod build;
mod configs;
mod info;
mod run;

pub use aliases::cmd_aliases;
pub use build::cmd_build;
pub use configs::cmd_configs;
pub use info::cmd_info;
pub use run::{RunArgs, cmd_run};

use anyhow::{Context, Result};

use plandrive_lib::{AliasRegistry, ConfigRegistry, Platform, Settings};

/// Everything a command needs about the project, loaded once.
pub struct Project {
  pub platform: Platform,
  pub settings: Settings,
  pub configs: ConfigRegistry,
  pub aliases: AliasRegistry,
}

impl Project {
  pub fn load() -> Result<Self> {
    let platform = Platform::current().context("Unsupported platform")?;
    let settings = Settings::from_env(&platform).context("Failed to read settings")?;
    let configs = ConfigRegistry::discover(&settings.root).context("Failed to load build configs")?;
    let aliases = AliasRegistry::builtin()
      .with_aliases(configs.aliases())
      .context("Failed to load search aliases")?;

    Ok(Self {
      platform,
      settings,
      configs,
      aliases,
    })
  }
}
