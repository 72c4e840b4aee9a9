//! Coursectl - drive the course fault scenarios and inspect the error log

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use course_common::CourseConfig;

use coursectl::commands::{self, Selection};
use coursectl::errors::{EXIT_GENERAL_ERROR, EXIT_SUCCESS};
use coursectl::logging;
use coursectl::scenario::{PolicyArg, Scenario};

// Embedded by build.rs
const VERSION: &str = env!("COURSECTL_VERSION");
const BUILD_INFO: &str = env!("COURSECTL_BUILD_INFO");

#[derive(Parser)]
#[command(name = "coursectl")]
#[command(about = "CourseApp - fault scenarios and error log inspection", long_about = None)]
#[command(version = VERSION, long_version = BUILD_INFO)]
struct Cli {
    /// Config file (default: $COURSECTL_CONFIG or ./coursectl.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Error log path, overriding the config file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a fault scenario; faults are logged, then reported
    Run {
        #[arg(value_enum)]
        scenario: Scenario,

        /// How missing input is treated
        #[arg(long, value_enum, default_value_t = PolicyArg::Strict)]
        policy: PolicyArg,

        /// Replace the scenario's faulting input
        #[arg(long)]
        input: Option<String>,
    },

    /// List logged errors (first occurrence per site by default)
    Errors {
        /// List every entry
        #[arg(long, conflicts_with = "recent")]
        all: bool,

        /// List only the last N entries
        #[arg(long)]
        recent: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count logged errors by kind
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show source around each logged error site
    Context,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match dispatch(cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_GENERAL_ERROR as u8)
        }
    }
}

fn dispatch(cli: Cli) -> Result<i32> {
    let mut config =
        CourseConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = cli.log_file {
        config.logging.error_log = path;
    }
    let color = std::io::stdout().is_terminal();

    match cli.command {
        Commands::Run {
            scenario,
            policy,
            input,
        } => Ok(commands::run(
            &config,
            scenario,
            policy,
            input.as_deref(),
            color,
        )),
        Commands::Errors { all, recent, json } => {
            let selection = match (all, recent) {
                (true, _) => Selection::All,
                (false, Some(n)) => Selection::Recent(n),
                (false, None) => Selection::Unique,
            };
            let entries = commands::select_errors(&config, selection)?;
            println!("{}", commands::render_errors(&entries, json, color)?);
            Ok(EXIT_SUCCESS)
        }
        Commands::Summary { json } => {
            println!("{}", commands::render_summary(&config, json)?);
            Ok(EXIT_SUCCESS)
        }
        Commands::Context => {
            println!("{}", commands::render_context(&config, color)?);
            Ok(EXIT_SUCCESS)
        }
    }
}
