use std::collections::{BTreeMap, HashSet};

use crate::model::{AssignmentResult, AssignmentSummary, Method};

/// Compute summary statistics from reconciled rows.
pub fn compute_summary(rows: &[AssignmentResult]) -> AssignmentSummary {
    let mut method_counts: BTreeMap<String, usize> =
        Method::ALL.iter().map(|m| (m.to_string(), 0)).collect();
    let mut summary = AssignmentSummary {
        total_demands: rows.len(),
        ..Default::default()
    };
    let mut employees = HashSet::new();

    for row in rows {
        *method_counts.entry(row.method.to_string()).or_insert(0) += 1;

        match row.method {
            Method::UniqueFix => summary.unique_fix += 1,
            Method::ScoreUnique => summary.score_unique += 1,
            Method::ScoreReuse => summary.score_reuse += 1,
            Method::Unassigned => summary.unassigned += 1,
        }
        if row.fallback {
            summary.starvation_fallbacks += 1;
        }
        if let Some(employee) = row.employee {
            employees.insert(employee.id());
        }
    }

    summary.distinct_employees_used = employees.len();
    summary.method_counts = method_counts;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssignedEmployee, DemandId, EmployeeId};

    fn row(demand: &str, employee: Option<AssignedEmployee>, method: Method) -> AssignmentResult {
        AssignmentResult {
            demand: DemandId::from(demand),
            employee,
            match_percent: None,
            score: None,
            all_employees: String::new(),
            method,
            fallback: false,
        }
    }

    #[test]
    fn summary_counts() {
        let mut fallback = row("D4", Some(AssignedEmployee::Reused(EmployeeId(1))), Method::ScoreReuse);
        fallback.fallback = true;
        let rows = vec![
            row("D1", Some(AssignedEmployee::Sole(EmployeeId(1))), Method::UniqueFix),
            row("D2", Some(AssignedEmployee::Sole(EmployeeId(2))), Method::ScoreUnique),
            row("D3", Some(AssignedEmployee::Reused(EmployeeId(2))), Method::ScoreReuse),
            fallback,
            row("D5", None, Method::Unassigned),
        ];
        let summary = compute_summary(&rows);
        assert_eq!(summary.total_demands, 5);
        assert_eq!(summary.unique_fix, 1);
        assert_eq!(summary.score_unique, 1);
        assert_eq!(summary.score_reuse, 2);
        assert_eq!(summary.unassigned, 1);
        assert_eq!(summary.starvation_fallbacks, 1);
        assert_eq!(summary.distinct_employees_used, 2);
        assert_eq!(summary.method_counts["score_reuse"], 2);
        assert_eq!(summary.method_counts["unassigned"], 1);
    }

    #[test]
    fn empty_rows_list_every_method() {
        let summary = compute_summary(&[]);
        assert_eq!(summary.total_demands, 0);
        assert_eq!(summary.method_counts.len(), 4);
        assert!(summary.method_counts.values().all(|&n| n == 0));
    }
}
