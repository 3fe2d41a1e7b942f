//! Test utilities for plandrive-lib.
//!
//! Helpers for tests that need to run shell commands or stand in fake tools
//! (cmake, make, pipeline stages) that record how they were called.

use std::fs;
use std::path::Path;

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Write an executable `/bin/sh` script at `path`, creating parent directories.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
  use std::os::unix::fs::PermissionsExt;

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
  fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Write a script that appends its cwd and arguments to `log`, then exits with `code`.
///
/// The log gets one `cwd=<dir>` line followed by one `arg=<value>` line per argument.
#[cfg(unix)]
pub fn write_recording_script(path: &Path, log: &Path, code: i32) {
  let body = format!(
    "echo \"cwd=$(pwd)\" >> '{log}'\nfor a in \"$@\"; do echo \"arg=$a\" >> '{log}'; done\nexit {code}",
    log = log.display(),
    code = code
  );
  write_script(path, &body);
}

/// Parse a log written by `write_recording_script` into one argument list per call.
pub fn recorded_calls(log: &Path) -> Vec<Vec<String>> {
  let Ok(content) = fs::read_to_string(log) else {
    return Vec::new();
  };

  let mut calls: Vec<Vec<String>> = Vec::new();
  for line in content.lines() {
    if line.starts_with("cwd=") {
      calls.push(Vec::new());
    } else if let Some(arg) = line.strip_prefix("arg=") {
      if let Some(call) = calls.last_mut() {
        call.push(arg.to_string());
      }
    }
  }
  calls
}

/// Working directories recorded by `write_recording_script`, one per call.
pub fn recorded_cwds(log: &Path) -> Vec<String> {
  fs::read_to_string(log)
    .unwrap_or_default()
    .lines()
    .filter_map(|line| line.strip_prefix("cwd=").map(str::to_string))
    .collect()
}
