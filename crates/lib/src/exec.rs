//! Child process execution.
//!
//! Every external tool (build generator, native build tool, pipeline stages) is
//! spawned through `run_command`. Children inherit stdout/stderr and are awaited
//! before the caller continues, so tools never run concurrently.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExecError {
  #[error("failed to start {}: {source}", program.display())]
  Spawn { program: PathBuf, source: std::io::Error },

  #[error("failed to open input file {}: {source}", path.display())]
  OpenInput { path: PathBuf, source: std::io::Error },
}

/// A fully assembled command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
  pub program: PathBuf,
  pub args: Vec<String>,
  /// Working directory; the current one when `None`.
  pub cwd: Option<PathBuf>,
  /// File routed to the child's stdin; inherited when `None`.
  pub stdin: Option<PathBuf>,
}

impl CommandLine {
  pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
    Self {
      program: program.into(),
      args,
      cwd: None,
      stdin: None,
    }
  }

  pub fn current_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
    self.cwd = Some(cwd.into());
    self
  }

  pub fn stdin_file(mut self, path: Option<&Path>) -> Self {
    self.stdin = path.map(Path::to_path_buf);
    self
  }
}

/// Run `cmd` to completion and return its exit code.
///
/// A non-zero exit is not an error here; callers decide what it means.
pub async fn run_command(cmd: &CommandLine) -> Result<i32, ExecError> {
  let mut command = Command::new(&cmd.program);
  command.args(&cmd.args);

  if let Some(cwd) = &cmd.cwd {
    command.current_dir(cwd);
  }

  if let Some(path) = &cmd.stdin {
    let file = File::open(path).map_err(|source| ExecError::OpenInput {
      path: path.clone(),
      source,
    })?;
    command.stdin(Stdio::from(file));
  }

  flush_output(&mut std::io::stdout());

  debug!(program = %cmd.program.display(), cwd = ?cmd.cwd, "spawning process");

  let status = command.status().await.map_err(|source| ExecError::Spawn {
    program: cmd.program.clone(),
    source,
  })?;

  let code = exit_code(status);
  debug!(program = %cmd.program.display(), code, "process exited");
  Ok(code)
}

/// Flush our own buffered output so it lands ahead of the child's.
fn flush_output(out: &mut impl Write) {
  if let Err(err) = out.flush() {
    debug!(error = %err, "failed to flush stdout before spawning");
  }
}

/// Map an exit status to a process exit code.
///
/// Children killed by a signal report `128 + signal`, as shells do.
pub fn exit_code(status: ExitStatus) -> i32 {
  if let Some(code) = status.code() {
    return code;
  }

  #[cfg(unix)]
  {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = status.signal() {
      return 128 + signal;
    }
  }

  1
}
