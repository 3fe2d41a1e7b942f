//! Declarative configuration sources.
//!
//! A source is a small TOML document contributing build configurations, search
//! aliases and, optionally, the default/debug designations. Any number of
//! sources are merged into one `ConfigRegistry`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::ConfigError;
use crate::consts::CONFIG_SOURCE_SUFFIX;

const BUILTIN_SOURCE: &str = include_str!("builtin_build_configs.toml");
const BUILTIN_ORIGIN: &str = "<builtin>";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSource {
  default: Option<String>,
  debug: Option<String>,
  #[serde(default)]
  configs: BTreeMap<String, Vec<String>>,
  #[serde(default)]
  aliases: BTreeMap<String, Vec<String>>,
}

/// One parsed configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSource {
  /// Where the source came from, used in error messages.
  pub origin: String,
  pub default: Option<String>,
  pub debug: Option<String>,
  pub configs: BTreeMap<String, Vec<String>>,
  pub aliases: BTreeMap<String, Vec<String>>,
}

impl ConfigSource {
  /// Parse a source from TOML text.
  pub fn parse(origin: impl Into<String>, text: &str) -> Result<Self, ConfigError> {
    let origin = origin.into();
    let raw: RawSource = toml::from_str(text).map_err(|source| ConfigError::Parse {
      origin: origin.clone(),
      source,
    })?;

    Ok(Self {
      origin,
      default: raw.default,
      debug: raw.debug,
      configs: raw.configs,
      aliases: raw.aliases,
    })
  }

  /// Read and parse a source file.
  pub fn read(path: &Path) -> Result<Self, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(path.display().to_string(), &text)
  }

  /// The source embedded in the crate.
  pub fn builtin() -> Result<Self, ConfigError> {
    Self::parse(BUILTIN_ORIGIN, BUILTIN_SOURCE)
  }
}

/// Find all `*build_configs.toml` files directly inside `root`, sorted by name.
pub fn discover_source_files(root: &Path) -> Result<Vec<PathBuf>, ConfigError> {
  let entries = fs::read_dir(root).map_err(|source| ConfigError::ReadDir {
    path: root.to_path_buf(),
    source,
  })?;

  let mut files: Vec<PathBuf> = entries
    .flatten()
    .map(|entry| entry.path())
    .filter(|path| path.is_file())
    .filter(|path| {
      path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(CONFIG_SOURCE_SUFFIX))
    })
    .collect();
  files.sort();

  debug!(root = %root.display(), count = files.len(), "discovered config sources");
  Ok(files)
}
