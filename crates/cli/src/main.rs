// staffmatch CLI - starvation-safe demand assignment from the command line

mod exit_codes;
mod logging;
mod preview;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "staffmatch")]
#[command(about = "Assign employees to demands without starving any demand")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Debug-level diagnostics on stderr (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign employees to the demands in a sheet and write the report
    #[command(after_help = "\
Examples:
  staffmatch run demands.xlsx
  staffmatch run demands.csv --output assignments.csv
  staffmatch run demands.xlsx --config staffmatch.toml --sheet Open
  staffmatch run demands.xlsx --json > run.json")]
    Run {
        /// Demand sheet (.xlsx, .xlsm, .xls, .xlsb, .ods, .csv, .tsv, .txt)
        input: PathBuf,

        /// TOML config file
        #[arg(long, short = 'c', env = "STAFFMATCH_CONFIG")]
        config: Option<PathBuf>,

        /// Report file (.xlsx, .csv or .json); defaults to the configured
        /// file name next to the input
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the whole run as JSON to stdout (no report file unless --output)
        #[arg(long)]
        json: bool,

        /// Rows to show in the stderr preview (0 disables)
        #[arg(long, default_value_t = 20)]
        preview: usize,

        /// Worksheet to read (overrides the config)
        #[arg(long)]
        sheet: Option<String>,

        /// Suppress the summary and preview
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Validate a config file without running
    #[command(after_help = "\
Examples:
  staffmatch validate staffmatch.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },

    /// Show the candidates parsed from one Associates field
    #[command(after_help = "\
Examples:
  staffmatch parse '1234 (85%), 5678 (60%)'
  staffmatch parse '1234 (85%), oops' --json")]
    Parse {
        /// Associates text, e.g. "1234 (85%), 5678 (60%)"
        text: String,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  staffmatch-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  staffmatch-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let quiet = matches!(cli.command, Commands::Run { quiet: true, .. });
    if let Err(e) = logging::init(logging::default_level(cli.verbose, quiet)) {
        eprintln!("error: {e}");
        return ExitCode::from(EXIT_USAGE);
    }

    let result = match cli.command {
        Commands::Run { input, config, output, json, preview, sheet, quiet } => {
            run::cmd_run(run::RunArgs { input, config, output, json, preview, sheet, quiet })
        }
        Commands::Validate { config } => run::cmd_validate(config),
        Commands::Parse { text, json } => run::cmd_parse(text, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
