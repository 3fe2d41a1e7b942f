//! Assembling one pipeline invocation from driver input.

use std::ffi::OsString;
use std::path::PathBuf;

use super::PipelineError;
use crate::consts::{PREPROCESS_OUTPUT, TRANSLATE_OUTPUT};
use crate::resolve::Component;

const TRANSLATE_OPTIONS: &str = "--translate-options";
const PREPROCESS_OPTIONS: &str = "--preprocess-options";
const SEARCH_OPTIONS: &str = "--search-options";

/// Stage-specific option groups split off the raw command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionGroups {
  pub translate: Vec<String>,
  pub preprocess: Vec<String>,
  pub search: Vec<String>,
}

impl OptionGroups {
  pub fn is_empty(&self) -> bool {
    self.translate.is_empty() && self.preprocess.is_empty() && self.search.is_empty()
  }
}

/// Split `argv` at the option group markers.
///
/// Everything before the first marker is returned as driver arguments, left as
/// `OsString` for the argument parser. Each marker starts a group that runs
/// until the next marker; a marker may appear more than once, in which case its
/// groups are concatenated. Stage options must be valid UTF-8.
pub fn split_option_groups<I, S>(argv: I) -> Result<(Vec<OsString>, OptionGroups), PipelineError>
where
  I: IntoIterator<Item = S>,
  S: Into<OsString>,
{
  enum Target {
    Driver,
    Translate,
    Preprocess,
    Search,
  }

  let mut driver = Vec::new();
  let mut groups = OptionGroups::default();
  let mut target = Target::Driver;

  for arg in argv {
    let arg = arg.into();
    match arg.to_str() {
      Some(TRANSLATE_OPTIONS) => target = Target::Translate,
      Some(PREPROCESS_OPTIONS) => target = Target::Preprocess,
      Some(SEARCH_OPTIONS) => target = Target::Search,
      _ => {
        let group = match target {
          Target::Driver => {
            driver.push(arg);
            continue;
          }
          Target::Translate => &mut groups.translate,
          Target::Preprocess => &mut groups.preprocess,
          Target::Search => &mut groups.search,
        };
        let option = arg.into_string().map_err(|arg| {
          PipelineError::InvalidInputs(format!("stage option {} is not valid UTF-8", arg.to_string_lossy()))
        })?;
        group.push(option);
      }
    }
  }

  Ok((driver, groups))
}

/// Where the search stage gets its options from. The variants are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchSpec {
  /// A named alias from the alias registry.
  Alias(String),
  /// A portfolio file handed to the search component.
  Portfolio(PathBuf),
  /// Options given explicitly on the command line.
  Options(Vec<String>),
}

impl SearchSpec {
  /// Combine the three possible sources, rejecting more than one.
  ///
  /// Returns `Ok(None)` when none is given; an empty explicit option list counts
  /// as not given.
  pub fn from_parts(
    alias: Option<String>,
    portfolio: Option<PathBuf>,
    options: Vec<String>,
  ) -> Result<Option<Self>, PipelineError> {
    let mut given = Vec::new();
    if alias.is_some() {
      given.push("--alias");
    }
    if portfolio.is_some() {
      given.push("--portfolio");
    }
    if !options.is_empty() {
      given.push(SEARCH_OPTIONS);
    }
    if given.len() > 1 {
      return Err(PipelineError::ConflictingSearchOptions(given.join(", ")));
    }

    Ok(match (alias, portfolio) {
      (Some(alias), _) => Some(Self::Alias(alias)),
      (_, Some(portfolio)) => Some(Self::Portfolio(portfolio)),
      _ if !options.is_empty() => Some(Self::Options(options)),
      _ => None,
    })
  }
}

/// Which stages to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentSelection {
  pub translate: bool,
  pub preprocess: bool,
  pub search: bool,
}

impl ComponentSelection {
  pub fn all() -> Self {
    Self {
      translate: true,
      preprocess: true,
      search: true,
    }
  }

  /// Selection from the `--translate`/`--preprocess`/`--search`/`--run-all` flags.
  /// No flag at all means every stage.
  pub fn from_flags(translate: bool, preprocess: bool, search: bool, run_all: bool) -> Self {
    if run_all || !(translate || preprocess || search) {
      return Self::all();
    }
    Self {
      translate,
      preprocess,
      search,
    }
  }

  pub fn contains(&self, component: Component) -> bool {
    match component {
      Component::Translate => self.translate,
      Component::Preprocess => self.preprocess,
      Component::Search => self.search,
    }
  }

  /// Selected components in pipeline order.
  pub fn components(&self) -> Vec<Component> {
    Component::ALL.into_iter().filter(|c| self.contains(*c)).collect()
  }

  /// Stages must form an unbroken run; translate + search without preprocess has no input for search.
  fn is_contiguous(&self) -> bool {
    !(self.translate && self.search && !self.preprocess)
  }
}

/// Everything needed to run the pipeline once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
  /// Build identifier: a binaries directory or a configuration name.
  pub build: String,
  pub components: ComponentSelection,
  pub translate_inputs: Vec<String>,
  pub translate_options: Vec<String>,
  /// File routed to Preprocess's stdin; inherited when `None`.
  pub preprocess_input: Option<PathBuf>,
  pub preprocess_options: Vec<String>,
  /// File routed to Search's stdin; inherited when `None`.
  pub search_input: Option<PathBuf>,
  pub search: Option<SearchSpec>,
  pub plan_file: PathBuf,
}

impl PipelineRequest {
  /// Route positional `inputs` to the first selected stage.
  ///
  /// Translate takes all inputs as arguments. A later first stage reads its
  /// single input file on stdin. Stages after the first read the previous
  /// stage's output file.
  pub fn new(
    build: impl Into<String>,
    components: ComponentSelection,
    inputs: Vec<String>,
    groups: OptionGroups,
    alias: Option<String>,
    portfolio: Option<PathBuf>,
    plan_file: impl Into<PathBuf>,
  ) -> Result<Self, PipelineError> {
    if !components.is_contiguous() {
      return Err(PipelineError::NonContiguousComponents);
    }

    let search = SearchSpec::from_parts(alias, portfolio, groups.search)?;

    let mut request = Self {
      build: build.into(),
      components,
      translate_inputs: Vec::new(),
      translate_options: groups.translate,
      preprocess_input: None,
      preprocess_options: groups.preprocess,
      search_input: None,
      search,
      plan_file: plan_file.into(),
    };

    if components.translate {
      if inputs.is_empty() {
        return Err(PipelineError::InvalidInputs(
          "translate needs at least one input file".to_string(),
        ));
      }
      request.translate_inputs = inputs;
      request.preprocess_input = Some(PathBuf::from(TRANSLATE_OUTPUT));
      request.search_input = Some(PathBuf::from(PREPROCESS_OUTPUT));
    } else {
      let first = components.components().first().copied();
      let [input] = <[String; 1]>::try_from(inputs).map_err(|inputs| {
        PipelineError::InvalidInputs(format!(
          "{} needs exactly one input file, got {}",
          first.map_or("the first stage", |c| c.as_str()),
          inputs.len()
        ))
      })?;
      if components.preprocess {
        request.preprocess_input = Some(PathBuf::from(input));
        request.search_input = Some(PathBuf::from(PREPROCESS_OUTPUT));
      } else {
        request.search_input = Some(PathBuf::from(input));
      }
    }

    Ok(request)
  }
}
