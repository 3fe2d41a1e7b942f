//! Running Translate → Preprocess → Search.
//!
//! Each stage is resolved in the requested build, given its options and stdin,
//! and run to completion before the next one starts. The first stage that exits
//! non-zero ends the run and its exit code becomes the pipeline's. Files written
//! by stages that already ran are left in place.

mod request;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::alias::{AliasError, AliasRegistry};
use crate::exec::{CommandLine, ExecError, run_command};
use crate::resolve::{Component, ExecutableResolver, ResolveError};
use crate::util::shell::callstring;

pub use request::{ComponentSelection, OptionGroups, PipelineRequest, SearchSpec, split_option_groups};

/// Extension of components that run through the interpreter.
const SCRIPT_EXTENSION: &str = "py";

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error(transparent)]
  Resolve(#[from] ResolveError),

  #[error(transparent)]
  Alias(#[from] AliasError),

  #[error(transparent)]
  Exec(#[from] ExecError),

  #[error("search needs --alias, --portfolio, or search options")]
  MissingSearchOptions,

  #[error("only one of --alias, --portfolio and --search-options may be given (got {0})")]
  ConflictingSearchOptions(String),

  #[error("invalid inputs: {0}")]
  InvalidInputs(String),

  #[error("translate and search cannot run without preprocess in between")]
  NonContiguousComponents,
}

/// Where a stage reads its standard input from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
  File(PathBuf),
  Inherit,
}

impl InputSource {
  fn from_option(path: Option<&PathBuf>) -> Self {
    match path {
      Some(path) => Self::File(path.clone()),
      None => Self::Inherit,
    }
  }

  fn as_path(&self) -> Option<&Path> {
    match self {
      Self::File(path) => Some(path),
      Self::Inherit => None,
    }
  }
}

/// A stage ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
  pub component: Component,
  pub executable: PathBuf,
  pub input: InputSource,
  pub options: Vec<String>,
}

/// Exit code of one finished stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOutcome {
  pub component: Component,
  pub exit_code: i32,
}

impl ExecutionOutcome {
  pub fn is_success(&self) -> bool {
    self.exit_code == 0
  }
}

/// Outcomes of the stages that ran, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutcome {
  pub stages: Vec<ExecutionOutcome>,
}

impl PipelineOutcome {
  /// The first failing stage, if any.
  pub fn failed_stage(&self) -> Option<&ExecutionOutcome> {
    self.stages.iter().find(|stage| !stage.is_success())
  }

  /// Exit code of the first failing stage, or 0.
  pub fn exit_code(&self) -> i32 {
    self.failed_stage().map_or(0, |stage| stage.exit_code)
  }

  pub fn is_success(&self) -> bool {
    self.failed_stage().is_none()
  }
}

/// Runs pipeline stages for one build.
#[derive(Debug)]
pub struct PipelineRunner<'a> {
  resolver: &'a ExecutableResolver,
  aliases: &'a AliasRegistry,
  interpreter: PathBuf,
}

impl<'a> PipelineRunner<'a> {
  pub fn new(resolver: &'a ExecutableResolver, aliases: &'a AliasRegistry, interpreter: impl Into<PathBuf>) -> Self {
    Self {
      resolver,
      aliases,
      interpreter: interpreter.into(),
    }
  }

  /// Run the selected stages in order, stopping at the first failure.
  ///
  /// Search options are validated before any stage starts, so a misconfigured
  /// search never leaves half a pipeline behind.
  pub async fn run(&self, request: &PipelineRequest) -> Result<PipelineOutcome, PipelineError> {
    if request.components.search {
      self.search_options(request)?;
    }

    let mut outcome = PipelineOutcome::default();
    for component in request.components.components() {
      let stage = match component {
        Component::Translate => self.run_translate(request).await?,
        Component::Preprocess => self.run_preprocess(request).await?,
        Component::Search => self.run_search(request).await?,
      };
      outcome.stages.push(stage);

      if !stage.is_success() {
        warn!(stage = %component, code = stage.exit_code, "stage failed, skipping remaining stages");
        break;
      }
    }

    Ok(outcome)
  }

  pub async fn run_translate(&self, request: &PipelineRequest) -> Result<ExecutionOutcome, PipelineError> {
    info!("Running translator ({}).", request.build);
    let stage = self.translate_stage(request)?;
    self.execute(&stage).await
  }

  pub async fn run_preprocess(&self, request: &PipelineRequest) -> Result<ExecutionOutcome, PipelineError> {
    info!("Running preprocessor ({}).", request.build);
    let stage = self.preprocess_stage(request)?;
    self.execute(&stage).await
  }

  pub async fn run_search(&self, request: &PipelineRequest) -> Result<ExecutionOutcome, PipelineError> {
    info!("Running search ({}).", request.build);
    let stage = self.search_stage(request)?;
    info!("search executable: {}", stage.executable.display());
    self.execute(&stage).await
  }

  pub fn translate_stage(&self, request: &PipelineRequest) -> Result<StageSpec, PipelineError> {
    let mut options = request.translate_inputs.clone();
    options.extend(request.translate_options.iter().cloned());

    Ok(StageSpec {
      component: Component::Translate,
      executable: self.resolver.resolve(&request.build, Component::Translate)?,
      input: InputSource::Inherit,
      options,
    })
  }

  pub fn preprocess_stage(&self, request: &PipelineRequest) -> Result<StageSpec, PipelineError> {
    Ok(StageSpec {
      component: Component::Preprocess,
      executable: self.resolver.resolve(&request.build, Component::Preprocess)?,
      input: InputSource::from_option(request.preprocess_input.as_ref()),
      options: request.preprocess_options.clone(),
    })
  }

  /// Search options are checked before the executable is looked up.
  pub fn search_stage(&self, request: &PipelineRequest) -> Result<StageSpec, PipelineError> {
    let mut options = self.search_options(request)?;
    if !options.iter().any(|option| option == "--help") {
      options.push("--plan-file".to_string());
      options.push(request.plan_file.to_string_lossy().into_owned());
    }

    Ok(StageSpec {
      component: Component::Search,
      executable: self.resolver.resolve(&request.build, Component::Search)?,
      input: InputSource::from_option(request.search_input.as_ref()),
      options,
    })
  }

  /// Search options from the alias, portfolio or explicit list, without the plan file.
  fn search_options(&self, request: &PipelineRequest) -> Result<Vec<String>, PipelineError> {
    let options = match &request.search {
      None => return Err(PipelineError::MissingSearchOptions),
      Some(SearchSpec::Alias(name)) => self.aliases.resolve(name)?.to_vec(),
      Some(SearchSpec::Portfolio(path)) => vec!["--portfolio".to_string(), path.to_string_lossy().into_owned()],
      Some(SearchSpec::Options(options)) => options.clone(),
    };

    if options.is_empty() {
      return Err(PipelineError::MissingSearchOptions);
    }
    Ok(options)
  }

  /// The command line for `stage`, running scripts through the interpreter.
  pub fn command_line(&self, stage: &StageSpec) -> CommandLine {
    let is_script = stage
      .executable
      .extension()
      .is_some_and(|ext| ext == SCRIPT_EXTENSION);

    let cmd = if is_script {
      let mut args = Vec::with_capacity(stage.options.len() + 1);
      args.push(stage.executable.to_string_lossy().into_owned());
      args.extend(stage.options.iter().cloned());
      CommandLine::new(&self.interpreter, args)
    } else {
      CommandLine::new(&stage.executable, stage.options.clone())
    };

    cmd.stdin_file(stage.input.as_path())
  }

  async fn execute(&self, stage: &StageSpec) -> Result<ExecutionOutcome, PipelineError> {
    let cmd = self.command_line(stage);
    info!("callstring: {}", callstring(&cmd.program, &cmd.args, cmd.stdin.as_deref()));

    let exit_code = run_command(&cmd).await?;
    Ok(ExecutionOutcome {
      component: stage.component,
      exit_code,
    })
  }
}
