use std::fmt;

/// Host CPU architectures the planner builds on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  X86,
  X86_64,
  Aarch64,
}

impl Arch {
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86" => Some(Self::X86),
      "x86_64" => Some(Self::X86_64),
      "aarch64" => Some(Self::Aarch64),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86 => "x86",
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
    }
  }

  /// Native pointer width in bits.
  pub fn word_size(&self) -> u32 {
    match self {
      Self::X86 => 32,
      Self::X86_64 | Self::Aarch64 => 64,
    }
  }

  /// Whether `-m32` configurations can be compiled natively.
  ///
  /// 32-bit x86 code runs on x86_64 hosts; ARM hosts need a cross toolchain.
  pub fn runs_32_bit_builds(&self) -> bool {
    matches!(self, Self::X86 | Self::X86_64)
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
