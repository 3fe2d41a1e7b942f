use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use plandrive_lib::consts::DEFAULT_PLAN_FILE;
use plandrive_lib::pipeline::split_option_groups;

mod cmd;
mod output;

use cmd::RunArgs;
use output::OutputFormat;

/// plandrive - build and run the translate/preprocess/search planner toolchain
#[derive(Parser)]
#[command(name = "plandrive")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Stage options go after the driver arguments:\n  \
  plandrive run problem.pddl --translate-options ... --preprocess-options ... --search-options ...")]
struct Cli {
  /// Log level, overridden by RUST_LOG
  #[arg(long, value_enum, default_value_t = LogLevel::Info)]
  log_level: LogLevel,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
  Error,
  Warn,
  Info,
  Debug,
  Trace,
}

impl LogLevel {
  fn as_str(self) -> &'static str {
    match self {
      LogLevel::Error => "error",
      LogLevel::Warn => "warn",
      LogLevel::Info => "info",
      LogLevel::Debug => "debug",
      LogLevel::Trace => "trace",
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Build one or more build configurations (see `plandrive build --help`)
  #[command(disable_help_flag = true)]
  Build {
    /// Configuration names, selectors and native build tool arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    args: Vec<String>,
  },

  /// Run the planner pipeline on the given input files
  Run {
    /// Build to use: a configuration name or a directory holding the binaries
    #[arg(long, conflicts_with = "debug")]
    build: Option<String>,

    /// Use the default debug build
    #[arg(long)]
    debug: bool,

    /// Run the translator
    #[arg(long)]
    translate: bool,

    /// Run the preprocessor
    #[arg(long)]
    preprocess: bool,

    /// Run the search
    #[arg(long)]
    search: bool,

    /// Run all stages (the default when no stage is selected)
    #[arg(long)]
    run_all: bool,

    /// Search alias to use instead of explicit search options
    #[arg(long)]
    alias: Option<String>,

    /// Portfolio file handed to the search
    #[arg(long)]
    portfolio: Option<PathBuf>,

    /// Where the search writes the plan
    #[arg(long, default_value = DEFAULT_PLAN_FILE)]
    plan_file: PathBuf,

    /// Input files for the first selected stage
    inputs: Vec<String>,
  },

  /// List search aliases
  Aliases {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// List build configurations
  Configs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// Display platform and project information
  Info,
}

fn main() -> Result<()> {
  let (argv, groups) = split_option_groups(std::env::args_os())?;
  let cli = Cli::parse_from(argv);

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if !groups.is_empty() && !matches!(cli.command, Commands::Run { .. }) {
    bail!("stage options are only accepted by 'plandrive run'");
  }

  match cli.command {
    Commands::Build { args } => cmd::cmd_build(&args),
    Commands::Run {
      build,
      debug,
      translate,
      preprocess,
      search,
      run_all,
      alias,
      portfolio,
      plan_file,
      inputs,
    } => {
      let code = cmd::cmd_run(RunArgs {
        build,
        debug,
        translate,
        preprocess,
        search,
        run_all,
        alias,
        portfolio,
        plan_file,
        inputs,
        groups,
      })?;
      if code != 0 {
        std::process::exit(code);
      }
      Ok(())
    }
    Commands::Aliases { output } => cmd::cmd_aliases(output),
    Commands::Configs { output } => cmd::cmd_configs(output),
    Commands::Info => cmd::cmd_info(),
  }
}
