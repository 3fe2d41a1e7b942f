//! Search aliases: short names expanding to fixed search option lists.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AliasError {
  #[error("unknown alias '{0}'; run 'plandrive aliases' to list the known ones")]
  Unknown(String),

  #[error("alias '{0}' is already defined with different options")]
  Duplicate(String),
}

/// Immutable alias table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasRegistry {
  aliases: BTreeMap<String, Vec<String>>,
}

impl AliasRegistry {
  /// Aliases shipped with the driver.
  pub fn builtin() -> Self {
    let mut aliases = BTreeMap::new();
    // weighted A* with the goal count heuristic
    aliases.insert(
      "goal-count".to_string(),
      vec!["--search".to_string(), "wastar(gc())".to_string()],
    );
    Self { aliases }
  }

  /// Extend the table with aliases from configuration sources.
  ///
  /// Redefining an alias with the same options is accepted, anything else is an error.
  pub fn with_aliases(mut self, extra: &BTreeMap<String, Vec<String>>) -> Result<Self, AliasError> {
    for (name, options) in extra {
      match self.aliases.get(name) {
        Some(existing) if existing != options => return Err(AliasError::Duplicate(name.clone())),
        Some(_) => {}
        None => {
          self.aliases.insert(name.clone(), options.clone());
        }
      }
    }
    Ok(self)
  }

  /// Options for `name`.
  pub fn resolve(&self, name: &str) -> Result<&[String], AliasError> {
    self
      .aliases
      .get(name)
      .map(Vec::as_slice)
      .ok_or_else(|| AliasError::Unknown(name.to_string()))
  }

  /// Alias names in sorted order.
  pub fn list(&self) -> Vec<&str> {
    self.aliases.keys().map(String::as_str).collect()
  }

  /// Alias names with their options, in name order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.aliases.iter().map(|(name, options)| (name.as_str(), options.as_slice()))
  }
}
