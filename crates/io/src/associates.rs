// Associates field parsing: "1234 (85%), 5678 (60%)"

use staffmatch_engine::EmployeeId;

/// One comma-separated token of an Associates field.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociateToken {
    /// The trimmed token text.
    pub token: String,
    /// `None` when the text before `(` is not a positive integer.
    pub employee: Option<EmployeeId>,
    pub match_percent: f64,
}

/// Blank cells and spreadsheet "nan" markers carry no candidates.
pub fn is_empty_field(field: &str) -> bool {
    let trimmed = field.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

/// Split an Associates field into tokens. Empty tokens are dropped; a
/// malformed or missing percentage becomes `0.0`.
pub fn parse_associates(field: &str) -> Vec<AssociateToken> {
    if is_empty_field(field) {
        return Vec::new();
    }
    field
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(parse_token)
        .collect()
}

fn parse_token(token: &str) -> AssociateToken {
    let (id_text, pct_text) = match token.split_once('(') {
        Some((id, rest)) => (id, Some(rest)),
        None => (token, None),
    };
    AssociateToken {
        token: token.to_string(),
        employee: parse_employee(id_text),
        match_percent: pct_text.map(parse_percent).unwrap_or(0.0),
    }
}

fn parse_employee(text: &str) -> Option<EmployeeId> {
    match text.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(EmployeeId(id)),
    }
}

fn parse_percent(text: &str) -> f64 {
    text.replace("%)", "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
