// JSON export of a whole run

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use staffmatch_engine::AssignmentRun;

use crate::error::IoError;

/// Write meta, summary and rows as pretty-printed JSON.
pub fn export(path: &Path, run: &AssignmentRun) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::write(path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, run).map_err(|e| IoError::write(path, e))?;
    writer.write_all(b"\n").map_err(|e| IoError::write(path, e))?;
    writer.flush().map_err(|e| IoError::write(path, e))?;

    Ok(())
}
