// Excel import (xlsx, xlsm, xls, xlsb, ods) and xlsx result export

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use staffmatch_engine::config::InputConfig;
use staffmatch_engine::AssignmentResult;

use crate::builder::RawDemandRow;
use crate::csv::find_column;
use crate::error::IoError;
use crate::report::{format_number, row_cells, Cell, COLUMNS};

/// Read demand rows from a workbook. The header is the first row of the
/// chosen sheet (the configured one, else the first).
pub fn read_demand_rows(path: &Path, input: &InputConfig) -> Result<Vec<RawDemandRow>, IoError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IoError::open(path, e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet_name = match &input.sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| *s == name)
            .cloned()
            .ok_or_else(|| IoError::SheetNotFound {
                sheet: name.clone(),
                available: sheet_names.clone(),
            })?,
        None => sheet_names.first().cloned().ok_or(IoError::NoSheets)?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IoError::open(path, format!("failed to read sheet '{sheet_name}': {e}")))?;
    let first_row = range.start().map(|(r, _)| r as usize).unwrap_or(0);

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .map(|cells| cells.iter().map(|c| cell_text(c).trim().to_string()).collect())
        .unwrap_or_default();
    let demand_col = find_column(&headers, &input.demand_column)?;
    let associates_col = find_column(&headers, &input.associates_column)?;

    let mut rows = Vec::new();
    for (idx, cells) in rows_iter.enumerate() {
        let demand = cells.get(demand_col).map(cell_text).unwrap_or_default();
        let associates = cells.get(associates_col).map(cell_text).unwrap_or_default();
        if demand.trim().is_empty() && associates.trim().is_empty() {
            continue;
        }
        // header is sheet row first_row + 1, 1-based
        rows.push(RawDemandRow::new(first_row + idx + 2, demand, associates));
    }
    Ok(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => format_number(*n),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => format_number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Write assignment rows to a single-sheet workbook.
pub fn export(
    path: &Path,
    rows: &[AssignmentResult],
    sheet_name: &str,
    reuse_marker: &str,
) -> Result<(), IoError> {
    let mut workbook = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook
        .add_worksheet()
        .set_name(sheet_name)
        .map_err(|e| IoError::write(path, format!("failed to create sheet '{sheet_name}': {e}")))?;

    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header_format)
            .map_err(|e| IoError::write(path, e))?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let xl_row = (idx + 1) as u32;
        for (col, cell) in row_cells(row, reuse_marker).iter().enumerate() {
            let col = col as u16;
            let written = match cell {
                Cell::Text(s) => worksheet.write_string(xl_row, col, s.as_str()),
                Cell::Number(n) => worksheet.write_number(xl_row, col, *n),
                Cell::Empty => continue,
            };
            written.map_err(|e| IoError::write(path, e))?;
        }
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| IoError::write(path, e))?;
    worksheet
        .set_column_width(4, 40)
        .map_err(|e| IoError::write(path, e))?;

    workbook
        .save(path)
        .map_err(|e| IoError::write(path, format!("failed to save XLSX file: {e}")))?;
    Ok(())
}
