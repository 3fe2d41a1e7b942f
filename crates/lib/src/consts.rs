/// Application name, used in messages and environment variable prefixes.
pub const APP_NAME: &str = "plandrive";

/// Directory below the project root that holds one build directory per configuration.
pub const BUILDS_DIR_NAME: &str = "builds";

/// Directory below the project root that holds the shared source tree.
pub const SRC_DIR_NAME: &str = "src";

/// Directory inside a named build that holds the compiled components.
pub const BIN_DIR_NAME: &str = "bin";

/// Suffix of declarative build configuration files discovered in the project root.
pub const CONFIG_SOURCE_SUFFIX: &str = "build_configs.toml";

/// Intermediate file written by Translate and read by Preprocess.
pub const TRANSLATE_OUTPUT: &str = "output.sas";

/// Intermediate file written by Preprocess and read by Search.
pub const PREPROCESS_OUTPUT: &str = "output";

/// Plan file written by Search when the caller does not name one.
pub const DEFAULT_PLAN_FILE: &str = "sas_plan";

pub const ENV_ROOT: &str = "PLANDRIVE_ROOT";
pub const ENV_CMAKE: &str = "PLANDRIVE_CMAKE";
pub const ENV_MAKE: &str = "PLANDRIVE_MAKE";
pub const ENV_PYTHON: &str = "PLANDRIVE_PYTHON";
