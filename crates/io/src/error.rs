use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum IoError {
    /// Input file could not be opened or decoded.
    Open { path: PathBuf, message: String },
    /// Workbook has no worksheets.
    NoSheets,
    /// Requested worksheet does not exist.
    SheetNotFound { sheet: String, available: Vec<String> },
    /// Header row lacks a required column.
    MissingColumn { column: String, available: Vec<String> },
    /// CSV read error.
    Csv(String),
    /// Output file could not be written.
    Write { path: PathBuf, message: String },
    /// Extension is not one we read or write.
    UnsupportedFormat(String),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, message } => write!(f, "cannot open {}: {message}", path.display()),
            Self::NoSheets => write!(f, "workbook contains no sheets"),
            Self::SheetNotFound { sheet, available } => {
                write!(f, "sheet '{sheet}' not found (available: {})", available.join(", "))
            }
            Self::MissingColumn { column, available } => {
                write!(f, "missing column '{column}' (found: {})", available.join(", "))
            }
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Write { path, message } => write!(f, "cannot write {}: {message}", path.display()),
            Self::UnsupportedFormat(path) => write!(f, "unsupported file format: {path}"),
        }
    }
}

impl std::error::Error for IoError {}

impl IoError {
    pub(crate) fn open(path: &Path, err: impl fmt::Display) -> Self {
        Self::Open { path: path.to_path_buf(), message: err.to_string() }
    }

    pub(crate) fn write(path: &Path, err: impl fmt::Display) -> Self {
        Self::Write { path: path.to_path_buf(), message: err.to_string() }
    }
}
