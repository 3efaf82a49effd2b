// Tabular rendering of assignment rows, shared by the xlsx and CSV writers

use staffmatch_engine::{AssignedEmployee, AssignmentResult};

pub const COLUMNS: [&str; 6] = [
    "Demand",
    "Assigned_Employee",
    "Match_%",
    "Score",
    "All_Employees",
    "Method",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// Text form used by CSV and the preview table.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
            Cell::Empty => String::new(),
        }
    }
}

/// Cells for one row, in `COLUMNS` order. Reused employees render as text
/// with the marker; sole employees stay numeric.
pub fn row_cells(row: &AssignmentResult, reuse_marker: &str) -> [Cell; 6] {
    let employee = match row.employee {
        None => Cell::Empty,
        Some(AssignedEmployee::Sole(id)) => Cell::Number(id.0 as f64),
        Some(reused @ AssignedEmployee::Reused(_)) => Cell::Text(reused.render(reuse_marker)),
    };
    [
        Cell::Text(row.demand.to_string()),
        employee,
        row.match_percent.map_or(Cell::Empty, Cell::Number),
        row.score.map_or(Cell::Empty, Cell::Number),
        Cell::Text(row.all_employees.clone()),
        Cell::Text(row.method.label().to_string()),
    ]
}

/// Integral values without a decimal point, everything else as-is.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffmatch_engine::{DemandId, EmployeeId, Method};

    fn scored(employee: AssignedEmployee, score: f64) -> AssignmentResult {
        AssignmentResult {
            demand: DemandId::from("D4"),
            employee: Some(employee),
            match_percent: Some(50.0),
            score: Some(score),
            all_employees: "4 (50%)".into(),
            method: Method::ScoreReuse,
            fallback: false,
        }
    }

    #[test]
    fn reused_employee_renders_with_marker() {
        let cells = row_cells(&scored(AssignedEmployee::Reused(EmployeeId(4)), 35.3), "*");
        assert_eq!(cells[1], Cell::Text("4*".into()));
        assert_eq!(cells[2], Cell::Number(50.0));
        assert_eq!(cells[5], Cell::Text("Score Reuse".into()));
    }

    #[test]
    fn unassigned_row_has_empty_cells() {
        let cells = row_cells(&AssignmentResult::unassigned(DemandId::from("D5")), "*");
        assert_eq!(cells[0].display(), "D5");
        assert_eq!(cells[1], Cell::Empty);
        assert_eq!(cells[2], Cell::Empty);
        assert_eq!(cells[3], Cell::Empty);
        assert_eq!(cells[4].display(), "-");
        assert_eq!(cells[5].display(), "Unassigned");
    }

    #[test]
    fn sole_employee_stays_numeric() {
        let cells = row_cells(&scored(AssignedEmployee::Sole(EmployeeId(9)), 56.5), "*");
        assert_eq!(cells[1], Cell::Number(9.0));
        assert_eq!(cells[1].display(), "9");
        assert_eq!(cells[3], Cell::Number(56.5));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(1001.0), "1001");
        assert_eq!(format_number(60.5), "60.5");
        assert_eq!(format_number(0.0), "0");
    }
}
