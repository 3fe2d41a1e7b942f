use std::fs;

use plandrive_lib::config::ConfigRegistry;
use plandrive_lib::{AliasRegistry, BuildSelection, ConfigError};
use tempfile::TempDir;

#[test]
fn project_sources_merge_configs_and_aliases() {
  let temp = TempDir::new().unwrap();
  fs::write(
    temp.path().join("build_configs.toml"),
    r#"
      default = "release"
      debug = "debug"

      [configs]
      release = ["-DCMAKE_BUILD_TYPE=Release"]
      debug = ["-DCMAKE_BUILD_TYPE=Debug"]
    "#,
  )
  .unwrap();
  fs::write(
    temp.path().join("extra_build_configs.toml"),
    r#"
      [configs]
      profile = ["-DCMAKE_BUILD_TYPE=RelWithDebInfo"]

      [aliases]
      lama-first = ["--search", "lazy_greedy([ff()])"]
    "#,
  )
  .unwrap();

  let registry = ConfigRegistry::discover(temp.path()).unwrap();
  let aliases = AliasRegistry::builtin().with_aliases(registry.aliases()).unwrap();

  assert_eq!(registry.names().collect::<Vec<_>>(), vec!["debug", "profile", "release"]);
  assert_eq!(aliases.list(), vec!["goal-count", "lama-first"]);

  let selection = BuildSelection::parse(["--all", "VERBOSE=true"], &registry).unwrap();
  assert_eq!(selection.resolve(&registry).unwrap().len(), 3);
  assert_eq!(selection.passthrough, vec!["VERBOSE=true"]);
}

#[test]
fn two_sources_claiming_the_default_fail_to_load() {
  let temp = TempDir::new().unwrap();
  fs::write(
    temp.path().join("a_build_configs.toml"),
    "default = \"x\"\ndebug = \"x\"\n[configs]\nx = []\n",
  )
  .unwrap();
  fs::write(temp.path().join("b_build_configs.toml"), "default = \"x\"\n").unwrap();

  let err = ConfigRegistry::discover(temp.path()).unwrap_err();
  assert!(matches!(err, ConfigError::DuplicateDesignation { key: "default", .. }));
}

#[test]
fn malformed_source_names_the_file() {
  let temp = TempDir::new().unwrap();
  fs::write(temp.path().join("build_configs.toml"), "configs = [").unwrap();

  let err = ConfigRegistry::discover(temp.path()).unwrap_err();
  assert!(err.to_string().contains("build_configs.toml"), "{err}");
}
