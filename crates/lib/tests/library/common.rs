//! Shared helpers for library integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use plandrive_lib::platform::Platform;
use plandrive_lib::platform::os::Os;
use plandrive_lib::platform::paths::ProjectPaths;
use plandrive_lib::{AliasRegistry, ExecutableResolver};
use tempfile::TempDir;

/// Write an executable `/bin/sh` script at `path`.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
  use std::os::unix::fs::PermissionsExt;

  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
  fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// A project root with a fake `release32` build whose stages log their arguments.
pub struct FakeBuild {
  pub temp: TempDir,
}

impl FakeBuild {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn paths(&self) -> ProjectPaths {
    ProjectPaths::new(self.temp.path())
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.paths().bin_dir("release32")
  }

  pub fn log(&self, stage: &str) -> PathBuf {
    self.temp.path().join(format!("{}.log", stage))
  }

  /// Install a stage that records one argument per line, then exits with `code`.
  ///
  /// `translate.py` is run through `/bin/sh` standing in for the interpreter.
  #[cfg(unix)]
  pub fn install(&self, stage: &str, code: i32) {
    let rel = match stage {
      "translate" => Path::new("translate").join("translate.py"),
      other => PathBuf::from(other),
    };
    let log = self.log(stage);
    write_script(
      &self.bin_dir().join(rel),
      &format!(
        "for a in \"$@\"; do echo \"$a\" >> '{log}'; done\ntouch '{log}'\nexit {code}",
        log = log.display(),
        code = code
      ),
    );
  }

  /// Resolver whose relative builds are looked up below the fixture, not the cwd.
  pub fn resolver(&self) -> ExecutableResolver {
    ExecutableResolver::new(self.paths(), Platform::for_os(Os::Linux)).with_base_dir(self.temp.path().join("work"))
  }

  pub fn aliases(&self) -> AliasRegistry {
    AliasRegistry::builtin()
  }

  /// Arguments a stage was called with, or `None` if it never ran.
  pub fn calls(&self, stage: &str) -> Option<Vec<String>> {
    fs::read_to_string(self.log(stage))
      .ok()
      .map(|content| content.lines().map(str::to_string).collect())
  }
}
