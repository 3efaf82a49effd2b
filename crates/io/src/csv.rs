// CSV/TSV demand import and result export

use std::io::Read;
use std::path::Path;

use staffmatch_engine::config::InputConfig;
use staffmatch_engine::AssignmentResult;

use crate::builder::RawDemandRow;
use crate::error::IoError;
use crate::report::{row_cells, COLUMNS};

/// Read demand rows from a delimited file. `.tsv` is always tab-separated;
/// anything else is sniffed.
pub fn read_demand_rows(path: &Path, input: &InputConfig) -> Result<Vec<RawDemandRow>, IoError> {
    let content = read_file_as_utf8(path)?;
    let is_tsv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
    let delimiter = if is_tsv { b'\t' } else { sniff_delimiter(&content) };
    rows_from_str(&content, delimiter, input)
}

fn rows_from_str(content: &str, delimiter: u8, input: &InputConfig) -> Result<Vec<RawDemandRow>, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IoError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    let demand_col = find_column(&headers, &input.demand_column)?;
    let associates_col = find_column(&headers, &input.associates_column)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| IoError::Csv(e.to_string()))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        rows.push(RawDemandRow::new(
            idx + 2,
            record.get(demand_col).unwrap_or(""),
            record.get(associates_col).unwrap_or(""),
        ));
    }
    Ok(rows)
}

pub(crate) fn find_column(headers: &[String], name: &str) -> Result<usize, IoError> {
    headers
        .iter()
        .position(|h| h == name)
        .or_else(|| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
        .ok_or_else(|| IoError::MissingColumn {
            column: name.to_string(),
            available: headers.to_vec(),
        })
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Header line must split
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (Windows-1252 fallback for Excel-exported CSVs)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let mut file = std::fs::File::open(path).map_err(|e| IoError::open(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| IoError::open(path, e))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Write assignment rows as comma-separated text with a header line.
pub fn export(path: &Path, rows: &[AssignmentResult], reuse_marker: &str) -> Result<(), IoError> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(|e| IoError::write(path, e))?;

    writer.write_record(COLUMNS).map_err(|e| IoError::write(path, e))?;
    for row in rows {
        let record: Vec<String> = row_cells(row, reuse_marker).iter().map(|c| c.display()).collect();
        writer.write_record(&record).map_err(|e| IoError::write(path, e))?;
    }

    writer.flush().map_err(|e| IoError::write(path, e))?;
    Ok(())
}
