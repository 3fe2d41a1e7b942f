use std::fmt;

/// Operating system variants supported by plandrive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }

  /// The native build tool that consumes the generated build files.
  pub fn native_build_tool(&self) -> &'static str {
    match self {
      Self::Linux | Self::MacOs => "make",
      Self::Windows => "nmake",
    }
  }

  /// The CMake generator matching `native_build_tool`.
  pub fn generator_name(&self) -> &'static str {
    match self {
      Self::Linux | Self::MacOs => "Unix Makefiles",
      Self::Windows => "NMake Makefiles",
    }
  }

  /// Suffix appended to compiled executables.
  pub fn executable_suffix(&self) -> &'static str {
    match self {
      Self::Linux | Self::MacOs => "",
      Self::Windows => ".exe",
    }
  }

  /// Whether manual builds may land in an IDE-style `bin/<Config>` layout
  /// instead of the flat `builds/<name>/bin` layout.
  pub fn has_multi_config_layout(&self) -> bool {
    matches!(self, Self::Windows)
  }

  /// Default interpreter for script components.
  pub fn default_interpreter(&self) -> &'static str {
    match self {
      Self::Linux | Self::MacOs => "python3",
      Self::Windows => "python",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
