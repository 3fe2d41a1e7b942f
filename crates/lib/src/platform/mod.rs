//! Platform capabilities.
//!
//! Every OS-dependent decision (build tool names, executable suffixes, build
//! layouts) is answered by the `Platform` value selected once at startup, so the
//! builder and resolver stay platform-agnostic and tests can inject any OS.

pub mod arch;
pub mod os;
pub mod paths;

use arch::Arch;
use os::Os;
use std::fmt;

/// Platform identifier combining architecture and OS (e.g., "aarch64-darwin")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub arch: Option<Arch>,
  pub os: Os,
}

impl Platform {
  /// Create a new platform identifier
  pub fn new(arch: Option<Arch>, os: Os) -> Self {
    Self { arch, os }
  }

  /// A platform for `os` with the current architecture.
  pub fn for_os(os: Os) -> Self {
    Self { arch: Arch::current(), os }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS is not supported. An unknown architecture is
  /// tolerated since nothing here is compiled for it.
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: Arch::current(),
      os: Os::current()?,
    })
  }

  /// Returns the platform triple string (e.g., "aarch64-darwin")
  pub fn triple(&self) -> String {
    match self.arch {
      Some(arch) => format!("{}-{}", arch, self.os),
      None => format!("unknown-{}", self.os),
    }
  }

  pub fn native_build_tool(&self) -> &'static str {
    self.os.native_build_tool()
  }

  pub fn generator_name(&self) -> &'static str {
    self.os.generator_name()
  }

  pub fn executable_suffix(&self) -> &'static str {
    self.os.executable_suffix()
  }

  pub fn has_multi_config_layout(&self) -> bool {
    self.os.has_multi_config_layout()
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}
