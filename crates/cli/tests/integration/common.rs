//! Shared test helpers for CLI integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Two small configurations so batch builds stay readable.
pub const TWO_CONFIGS: &str = r#"
default = "release"
debug = "debug"

[configs]
release = ["-DCMAKE_BUILD_TYPE=Release"]
debug = ["-DCMAKE_BUILD_TYPE=Debug"]
"#;

/// Isolated project root with fake tools.
///
/// Fake tools are `/bin/sh` scripts that append one argument per line to a log
/// file next to them and exit with a fixed code.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Project root (isolated per test).
  pub fn root_path(&self) -> PathBuf {
    let p = self.temp.path().join("project");
    fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Directory holding fake cmake/make.
  pub fn tools_path(&self) -> PathBuf {
    let p = self.temp.path().join("tools");
    fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.root_path().join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }

  /// Install a fake tool at `path` that logs its arguments and runs `extra` before exiting.
  #[cfg(unix)]
  pub fn fake_tool(&self, path: &Path, extra: &str, code: i32) {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let log = log_path(path);
    let script = format!(
      "#!/bin/sh\ntouch '{log}'\nfor a in \"$@\"; do echo \"$a\" >> '{log}'; done\n{extra}\nexit {code}\n",
      log = log.display(),
      extra = extra,
      code = code
    );
    fs::write(path, script).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
  }

  /// Fake cmake/make in the tools directory.
  #[cfg(unix)]
  pub fn fake_build_tools(&self, cmake_code: i32, make_code: i32) {
    self.fake_tool(&self.tools_path().join("cmake"), "", cmake_code);
    self.fake_tool(&self.tools_path().join("make"), "", make_code);
  }

  /// Fake stage executables in `builds/<build>/bin`.
  ///
  /// Translate and preprocess create their output files in the working directory.
  #[cfg(unix)]
  pub fn fake_stages(&self, build: &str, translate_code: i32) {
    let bin = self.bin_path(build);
    self.fake_tool(&bin.join("translate").join("translate.py"), "touch output.sas", translate_code);
    self.fake_tool(&bin.join("preprocess"), "cat > /dev/null; touch output", 0);
    self.fake_tool(&bin.join("downward"), "cat > /dev/null", 0);
  }

  pub fn bin_path(&self, build: &str) -> PathBuf {
    self.root_path().join("builds").join(build).join("bin")
  }

  /// Arguments of every call to the tool at `path`, flattened; `None` if it never ran.
  pub fn calls(&self, path: &Path) -> Option<Vec<String>> {
    fs::read_to_string(log_path(path))
      .ok()
      .map(|content| content.lines().map(str::to_string).collect())
  }

  /// Get a pre-configured Command for the plandrive binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `PLANDRIVE_ROOT`: isolated project root
  /// - `PLANDRIVE_CMAKE` / `PLANDRIVE_MAKE`: fake build tools
  /// - `PLANDRIVE_PYTHON`: `/bin/sh`, so the fake translate script runs as a shell script
  ///
  /// The working directory is the project root.
  pub fn plandrive_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("plandrive");
    cmd.current_dir(self.root_path());
    cmd.env("PLANDRIVE_ROOT", self.root_path());
    cmd.env("PLANDRIVE_CMAKE", self.tools_path().join("cmake"));
    cmd.env("PLANDRIVE_MAKE", self.tools_path().join("make"));
    cmd.env("PLANDRIVE_PYTHON", "/bin/sh");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

fn log_path(tool: &Path) -> PathBuf {
  let mut name = tool.file_name().unwrap().to_os_string();
  name.push(".log");
  tool.with_file_name(name)
}
