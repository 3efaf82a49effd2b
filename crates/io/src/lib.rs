// File I/O: demand sheets in, assignment reports out

pub mod associates;
pub mod builder;
pub mod csv;
pub mod error;
pub mod json;
pub mod report;
pub mod xlsx;

use std::path::Path;

use staffmatch_engine::config::{AssignConfig, InputConfig};
use staffmatch_engine::AssignmentRun;

pub use builder::{build_input, BuildOutput, BuildWarning, RawDemandRow};
pub use error::IoError;

/// Input/output file kinds, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Excel,
    Csv,
    Json,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Excel),
            "csv" | "tsv" | "txt" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(IoError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read the demand rows of an uploaded sheet.
pub fn read_demand_rows(path: &Path, input: &InputConfig) -> Result<Vec<RawDemandRow>, IoError> {
    match FileKind::from_path(path)? {
        FileKind::Excel => xlsx::read_demand_rows(path, input),
        FileKind::Csv => csv::read_demand_rows(path, input),
        FileKind::Json => Err(IoError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Write the assignment report in the format the extension asks for.
pub fn write_report(path: &Path, run: &AssignmentRun, config: &AssignConfig) -> Result<(), IoError> {
    match FileKind::from_path(path)? {
        FileKind::Excel => xlsx::export(path, &run.rows, &config.output.sheet_name, &config.reuse_marker),
        FileKind::Csv => csv::export(path, &run.rows, &config.reuse_marker),
        FileKind::Json => json::export(path, run),
    }
}
