//! `staffmatch run`, `validate` and `parse`.

use std::path::{Path, PathBuf};

use staffmatch_engine::AssignConfig;
use staffmatch_io::associates::parse_associates;
use staffmatch_io::{build_input, IoError};
use tracing::{debug, warn};

use crate::exit_codes::{assign_exit_code, EXIT_CONFIG, EXIT_ERROR, EXIT_INPUT, EXIT_OUTPUT, EXIT_USAGE};
use crate::preview;
use crate::CliError;

pub struct RunArgs {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub json: bool,
    pub preview: usize,
    pub sheet: Option<String>,
    pub quiet: bool,
}

fn run_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn input_err(err: IoError) -> CliError {
    let hint = match &err {
        IoError::MissingColumn { .. } => {
            Some("set [input] demand_column / associates_column in the config".to_string())
        }
        IoError::SheetNotFound { .. } => Some("pass --sheet with one of the listed names".to_string()),
        IoError::UnsupportedFormat(_) => {
            Some("supported inputs: .xlsx .xlsm .xls .xlsb .ods .csv .tsv .txt".to_string())
        }
        _ => None,
    };
    let code = match err {
        IoError::UnsupportedFormat(_) => EXIT_USAGE,
        _ => EXIT_INPUT,
    };
    CliError { code, message: err.to_string(), hint }
}

/// Read and validate a config file.
pub fn load_config(path: &Path) -> Result<AssignConfig, CliError> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| run_err(EXIT_CONFIG, format!("cannot read config {}: {e}", path.display())))?;
    let config = AssignConfig::from_toml(&config_str)
        .map_err(|e| run_err(EXIT_CONFIG, e.to_string()))?;
    config.validate().map_err(|e| run_err(EXIT_CONFIG, e.to_string()))?;
    Ok(config)
}

/// Where the report goes. `None` means stdout JSON only.
fn output_path(args: &RunArgs, config: &AssignConfig) -> Option<PathBuf> {
    match (&args.output, args.json) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => None,
        (None, false) => {
            let dir = args.input.parent().unwrap_or_else(|| Path::new("."));
            Some(dir.join(&config.output.file))
        }
    }
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AssignConfig::default(),
    };
    if let Some(sheet) = &args.sheet {
        config.input.sheet = Some(sheet.clone());
    }

    let raw_rows = staffmatch_io::read_demand_rows(&args.input, &config.input).map_err(input_err)?;
    debug!("read {} row(s) from {}", raw_rows.len(), args.input.display());

    let built = build_input(&raw_rows);
    if built.input.demands.is_empty() {
        warn!("{}: no demand rows found", args.input.display());
    }

    let run = staffmatch_engine::assign(&built.input, &config)
        .map_err(|e| run_err(assign_exit_code(&e), e.to_string()))?;

    if let Some(path) = output_path(&args, &config) {
        staffmatch_io::write_report(&path, &run, &config).map_err(|e| match e {
            IoError::UnsupportedFormat(_) => run_err(EXIT_USAGE, e.to_string())
                .with_hint("supported outputs: .xlsx .csv .json"),
            other => run_err(EXIT_OUTPUT, other.to_string()),
        })?;
        if !args.quiet {
            eprintln!("wrote {}", path.display());
        }
    }

    if args.json {
        let json_str = serde_json::to_string_pretty(&run)
            .map_err(|e| run_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    if !args.quiet {
        let s = &run.summary;
        eprintln!(
            "{} demand(s): {} unique fix, {} score unique, {} score reuse, {} unassigned",
            s.total_demands, s.unique_fix, s.score_unique, s.score_reuse, s.unassigned,
        );
        if s.starvation_fallbacks > 0 {
            eprintln!("starvation fallback: {} demand(s) given a reused employee", s.starvation_fallbacks);
        }
        if !built.warnings.is_empty() {
            eprintln!("{} input warning(s); rerun with --verbose for details", built.warnings.len());
        }
        eprint!("{}", preview::render(&run.rows, args.preview, &config.reuse_marker));
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    eprintln!(
        "valid: '{}' (weights {}/{}, starvation fallback {})",
        config.name,
        config.weights.match_percent,
        config.weights.scarcity,
        if config.starvation_fallback { "on" } else { "off" },
    );
    Ok(())
}

pub fn cmd_parse(text: String, json: bool) -> Result<(), CliError> {
    let tokens = parse_associates(&text);

    if json {
        let values: Vec<serde_json::Value> = tokens
            .iter()
            .map(|t| {
                serde_json::json!({
                    "token": t.token,
                    "employee": t.employee.map(|e| e.0),
                    "match_percent": t.match_percent,
                })
            })
            .collect();
        let json_str = serde_json::to_string_pretty(&values)
            .map_err(|e| run_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
        return Ok(());
    }

    for t in &tokens {
        match t.employee {
            Some(id) => println!("{id}\t{}", t.match_percent),
            None => println!("-\t{}\t(invalid employee id in '{}')", t.match_percent, t.token),
        }
    }
    if tokens.is_empty() {
        eprintln!("no candidates");
    }
    Ok(())
}
