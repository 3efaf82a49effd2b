// Property-based tests for the assignment invariants.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::{BTreeSet, HashMap, HashSet};

use proptest::prelude::*;
use staffmatch_engine::{
    assign, AssignConfig, AssignInput, AssignedEmployee, CandidateRecord, DemandId, EmployeeId,
    Method,
};

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Match percentage: mostly whole numbers, sometimes the malformed-input 0.0.
fn arb_percent() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => (0u32..=100).prop_map(f64::from),
        1 => Just(0.0),
        1 => 0.0..100.0f64,
    ]
}

/// Raw rows: (demand index, candidate list). Demand indices repeat so the
/// same demand can appear on several rows; small employee pools force
/// contention.
fn arb_rows() -> impl Strategy<Value = Vec<(u8, Vec<(u64, f64)>)>> {
    prop::collection::vec(
        (0u8..12, prop::collection::vec((1u64..9, arb_percent()), 0..4)),
        1..16,
    )
}

fn build_input(rows: &[(u8, Vec<(u64, f64)>)]) -> AssignInput {
    let mut demands = Vec::new();
    let mut candidates = Vec::new();
    for (demand, list) in rows {
        let demand = DemandId::new(format!("D{demand}"));
        demands.push(demand.clone());
        for (employee, pct) in list {
            candidates.push(CandidateRecord {
                demand: demand.clone(),
                employee: EmployeeId(*employee),
                match_percent: *pct,
                raw_associates_text: String::new(),
            });
        }
    }
    AssignInput::new(demands, candidates)
}

fn first_seen(input: &AssignInput) -> Vec<DemandId> {
    let mut seen = HashSet::new();
    input.demands.iter().filter(|d| seen.insert((*d).clone())).cloned().collect()
}

fn candidate_sets(input: &AssignInput) -> HashMap<DemandId, BTreeSet<EmployeeId>> {
    let mut sets: HashMap<DemandId, BTreeSet<EmployeeId>> = HashMap::new();
    for record in &input.candidates {
        sets.entry(record.demand.clone()).or_default().insert(record.employee);
    }
    sets
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn one_row_per_demand_in_first_seen_order(rows in arb_rows()) {
        let input = build_input(&rows);
        let run = assign(&input, &AssignConfig::default()).unwrap();
        let ids: Vec<DemandId> = run.rows.iter().map(|r| r.demand.clone()).collect();
        prop_assert_eq!(ids, first_seen(&input));
    }

    #[test]
    fn first_claims_are_never_shared(rows in arb_rows(), fallback in any::<bool>()) {
        let input = build_input(&rows);
        let config = AssignConfig { starvation_fallback: fallback, ..AssignConfig::default() };
        let run = assign(&input, &config).unwrap();
        let mut claimed = HashSet::new();
        for row in &run.rows {
            if let Some(AssignedEmployee::Sole(id)) = row.employee {
                prop_assert!(claimed.insert(id), "employee {} claimed twice", id);
                prop_assert!(matches!(row.method, Method::UniqueFix | Method::ScoreUnique));
            }
        }
    }

    #[test]
    fn only_demands_without_candidates_go_unassigned(rows in arb_rows()) {
        let input = build_input(&rows);
        let sets = candidate_sets(&input);
        let run = assign(&input, &AssignConfig::default()).unwrap();
        for row in &run.rows {
            let has_candidates = sets.contains_key(&row.demand);
            prop_assert_eq!(row.method == Method::Unassigned, !has_candidates);
        }
    }

    #[test]
    fn assigned_employee_was_a_candidate(rows in arb_rows()) {
        let input = build_input(&rows);
        let sets = candidate_sets(&input);
        let run = assign(&input, &AssignConfig::default()).unwrap();
        for row in &run.rows {
            if let Some(employee) = row.employee {
                prop_assert!(sets[&row.demand].contains(&employee.id()));
            }
        }
    }

    #[test]
    fn exclusive_sole_candidate_is_unique_fix(rows in arb_rows()) {
        let input = build_input(&rows);
        let sets = candidate_sets(&input);
        let mut listings: HashMap<EmployeeId, usize> = HashMap::new();
        for set in sets.values() {
            for employee in set {
                *listings.entry(*employee).or_insert(0) += 1;
            }
        }
        let run = assign(&input, &AssignConfig::default()).unwrap();
        for row in &run.rows {
            let Some(set) = sets.get(&row.demand) else { continue };
            if set.len() == 1 {
                let only = *set.iter().next().unwrap();
                if listings[&only] == 1 {
                    prop_assert_eq!(row.method, Method::UniqueFix);
                    prop_assert_eq!(row.employee, Some(AssignedEmployee::Sole(only)));
                }
            }
        }
    }

    #[test]
    fn score_present_only_for_score_methods(rows in arb_rows()) {
        let input = build_input(&rows);
        let run = assign(&input, &AssignConfig::default()).unwrap();
        for row in &run.rows {
            let scored = matches!(row.method, Method::ScoreUnique | Method::ScoreReuse);
            prop_assert_eq!(row.score.is_some(), scored);
            prop_assert_eq!(
                row.employee.map(|e| e.is_reused()).unwrap_or(false),
                row.method == Method::ScoreReuse
            );
        }
    }

    #[test]
    fn reruns_are_identical(rows in arb_rows()) {
        let input = build_input(&rows);
        let first = assign(&input, &AssignConfig::default()).unwrap();
        let second = assign(&input, &AssignConfig::default()).unwrap();
        prop_assert_eq!(first.rows, second.rows);
    }
}
