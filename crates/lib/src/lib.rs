//! plandrive-lib: build configuration management and pipeline driving for the
//! Translate / Preprocess / Search planner toolchain.
//!
//! The crate does not plan anything itself. It provides:
//! - `ConfigRegistry` / `AliasRegistry`: named build configurations and search aliases
//! - `Builder`: runs the build generator and native build tool per configuration
//! - `ExecutableResolver`: finds stage executables inside a build
//! - `PipelineRunner`: runs the three stages in order with fail-fast semantics

pub mod alias;
pub mod build;
pub mod config;
pub mod consts;
pub mod exec;
pub mod pipeline;
pub mod platform;
pub mod resolve;
pub mod settings;
pub mod util;

pub use alias::{AliasError, AliasRegistry};
pub use build::{BuildError, BuildSelection, Builder};
pub use config::{BuildConfig, ConfigError, ConfigRegistry};
pub use pipeline::{PipelineError, PipelineOutcome, PipelineRequest, PipelineRunner};
pub use platform::Platform;
pub use resolve::{Component, ExecutableResolver, ResolveError};
pub use settings::Settings;
