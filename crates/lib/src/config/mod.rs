//! Build configuration registry.
//!
//! Merges any number of declarative sources into one immutable mapping from
//! configuration name to generator flags, and resolves the default and debug
//! designations once at construction.

mod source;

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

pub use source::{ConfigSource, discover_source_files};

/// Errors raised while loading or querying build configurations.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config source {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to list config sources in {}: {source}", path.display())]
  ReadDir { path: PathBuf, source: std::io::Error },

  #[error("invalid config source {origin}: {source}")]
  Parse {
    origin: String,
    #[source]
    source: toml::de::Error,
  },

  #[error("invalid build config name '{name}' in {origin}: names must be relative paths without '..'")]
  InvalidConfigName { name: String, origin: String },

  #[error("build config '{name}' is defined differently in {first} and {second}")]
  DuplicateConfig { name: String, first: String, second: String },

  #[error("alias '{name}' is defined differently in {first} and {second}")]
  DuplicateAlias { name: String, first: String, second: String },

  #[error("'{key}' build config is designated in both {first} and {second}")]
  DuplicateDesignation {
    key: &'static str,
    first: String,
    second: String,
  },

  #[error("no config source designates a '{key}' build config")]
  MissingDesignation { key: &'static str },

  #[error("'{key}' designates unknown build config '{name}'")]
  UnknownDesignation { key: &'static str, name: String },

  #[error("unknown build config '{name}' (known: {known})")]
  UnknownConfig { name: String, known: String },

  #[error("--config requires a build config name")]
  MissingConfigName,
}

/// A named set of flags passed to the build generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
  pub name: String,
  pub generator_args: Vec<String>,
}

/// Immutable set of build configurations plus the two distinguished names.
#[derive(Debug, Clone)]
pub struct ConfigRegistry {
  configs: BTreeMap<String, BuildConfig>,
  aliases: BTreeMap<String, Vec<String>>,
  default_name: String,
  debug_name: String,
}

/// Tracks which source contributed a designation or entry, for error messages.
struct Designation {
  key: &'static str,
  value: Option<(String, String)>,
}

impl Designation {
  fn new(key: &'static str) -> Self {
    Self { key, value: None }
  }

  fn offer(&mut self, name: Option<&String>, origin: &str) -> Result<(), ConfigError> {
    let Some(name) = name else {
      return Ok(());
    };
    if let Some((_, first)) = &self.value {
      return Err(ConfigError::DuplicateDesignation {
        key: self.key,
        first: first.clone(),
        second: origin.to_string(),
      });
    }
    self.value = Some((name.clone(), origin.to_string()));
    Ok(())
  }

  fn resolve(self, configs: &BTreeMap<String, BuildConfig>) -> Result<String, ConfigError> {
    let (name, _) = self.value.ok_or(ConfigError::MissingDesignation { key: self.key })?;
    if !configs.contains_key(&name) {
      return Err(ConfigError::UnknownDesignation { key: self.key, name });
    }
    Ok(name)
  }
}

/// Insert `value` under `name`, rejecting a different value from another source.
///
/// Identical redefinitions are accepted so that sources can repeat a shared entry.
fn merge_entry(
  entries: &mut BTreeMap<String, (Vec<String>, String)>,
  name: &str,
  value: &[String],
  origin: &str,
) -> Result<(), (String, String)> {
  match entries.get(name) {
    Some((existing, first)) if existing.as_slice() != value => Err((first.clone(), origin.to_string())),
    Some(_) => Ok(()),
    None => {
      entries.insert(name.to_string(), (value.to_vec(), origin.to_string()));
      Ok(())
    }
  }
}

/// A config name doubles as a directory below `builds/`, so it must stay inside it.
fn is_valid_config_name(name: &str) -> bool {
  let path = Path::new(name);
  path.components().next().is_some() && path.components().all(|c| matches!(c, Component::Normal(_)))
}

impl ConfigRegistry {
  /// Merge `sources` (in order) into a registry.
  ///
  /// # Errors
  ///
  /// - a configuration or alias is defined differently by two sources
  /// - `default` or `debug` is designated zero times or more than once
  /// - a designation names a configuration no source defines
  pub fn load(sources: &[ConfigSource]) -> Result<Self, ConfigError> {
    let mut configs: BTreeMap<String, (Vec<String>, String)> = BTreeMap::new();
    let mut aliases: BTreeMap<String, (Vec<String>, String)> = BTreeMap::new();
    let mut default = Designation::new("default");
    let mut debug = Designation::new("debug");

    for source in sources {
      debug!(origin = %source.origin, configs = source.configs.len(), "loading config source");

      for (name, args) in &source.configs {
        if !is_valid_config_name(name) {
          return Err(ConfigError::InvalidConfigName {
            name: name.clone(),
            origin: source.origin.clone(),
          });
        }
        merge_entry(&mut configs, name, args, &source.origin).map_err(|(first, second)| {
          ConfigError::DuplicateConfig {
            name: name.clone(),
            first,
            second,
          }
        })?;
      }
      for (name, options) in &source.aliases {
        merge_entry(&mut aliases, name, options, &source.origin).map_err(|(first, second)| {
          ConfigError::DuplicateAlias {
            name: name.clone(),
            first,
            second,
          }
        })?;
      }

      default.offer(source.default.as_ref(), &source.origin)?;
      debug.offer(source.debug.as_ref(), &source.origin)?;
    }

    let configs: BTreeMap<String, BuildConfig> = configs
      .into_iter()
      .map(|(name, (generator_args, _))| {
        let config = BuildConfig {
          name: name.clone(),
          generator_args,
        };
        (name, config)
      })
      .collect();

    let default_name = default.resolve(&configs)?;
    let debug_name = debug.resolve(&configs)?;

    Ok(Self {
      configs,
      aliases: aliases.into_iter().map(|(name, (options, _))| (name, options)).collect(),
      default_name,
      debug_name,
    })
  }

  /// Load every `*build_configs.toml` in `root`, or the built-in source if there are none.
  pub fn discover(root: &Path) -> Result<Self, ConfigError> {
    let files = discover_source_files(root)?;

    let sources = if files.is_empty() {
      info!("no build config sources in {}, using built-in configs", root.display());
      vec![ConfigSource::builtin()?]
    } else {
      files.iter().map(|path| ConfigSource::read(path)).collect::<Result<Vec<_>, _>>()?
    };

    Self::load(&sources)
  }

  /// The configuration built when none is selected.
  pub fn default_name(&self) -> &str {
    &self.default_name
  }

  /// The configuration selected by `--debug`.
  pub fn debug_name(&self) -> &str {
    &self.debug_name
  }

  pub fn contains(&self, name: &str) -> bool {
    self.configs.contains_key(name)
  }

  /// Look up a configuration by exact name.
  pub fn get(&self, name: &str) -> Result<&BuildConfig, ConfigError> {
    self.configs.get(name).ok_or_else(|| ConfigError::UnknownConfig {
      name: name.to_string(),
      known: self.names().collect::<Vec<_>>().join(", "),
    })
  }

  /// Configuration names in sorted order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.configs.keys().map(String::as_str)
  }

  /// Configurations in name order.
  pub fn iter(&self) -> impl Iterator<Item = &BuildConfig> {
    self.configs.values()
  }

  pub fn len(&self) -> usize {
    self.configs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.configs.is_empty()
  }

  /// Search aliases contributed by the loaded sources.
  pub fn aliases(&self) -> &BTreeMap<String, Vec<String>> {
    &self.aliases
  }
}
