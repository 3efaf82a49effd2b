//! Plain-text preview of the first result rows.

use staffmatch_engine::AssignmentResult;
use staffmatch_io::report::{row_cells, COLUMNS};

/// Render up to `limit` rows as an aligned table. Returns an empty string
/// for `limit == 0` or no rows.
pub fn render(rows: &[AssignmentResult], limit: usize, reuse_marker: &str) -> String {
    if limit == 0 || rows.is_empty() {
        return String::new();
    }

    let body: Vec<Vec<String>> = rows
        .iter()
        .take(limit)
        .map(|row| row_cells(row, reuse_marker).iter().map(|c| c.display()).collect())
        .collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();
    for line in &body {
        for (w, cell) in widths.iter_mut().zip(line) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, COLUMNS.iter().map(|s| s.to_string()), &widths);
    push_line(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);
    for line in body {
        push_line(&mut out, line.into_iter(), &widths);
    }
    if rows.len() > limit {
        out.push_str(&format!("... {} more row(s)\n", rows.len() - limit));
    }
    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, w)| {
            let pad = w.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}
