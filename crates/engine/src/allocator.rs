use log::debug;

use crate::candidates::{CandidateTable, DemandUniverse};
use crate::ledger::AssignmentLedger;
use crate::model::{AssignedEmployee, AssignmentResult, Method};
use crate::scoring::{greedy_order, rank, ScoredRecord, Weights};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct AllocatorOutcome {
    pub score_unique: usize,
    pub score_reuse: usize,
}

/// Score every live record and rank it for greedy assignment.
pub fn score_live(table: &CandidateTable, weights: &Weights) -> Vec<ScoredRecord> {
    let demand_counts = table.live_demand_counts();
    let mut scored: Vec<ScoredRecord> = table
        .live_records()
        .map(|(idx, record)| {
            let count = demand_counts.get(&record.employee).copied().unwrap_or(1);
            ScoredRecord {
                record: idx,
                demand: table.demand_of(idx),
                score: weights.score(record.match_percent, count),
            }
        })
        .collect();
    rank(&mut scored);
    scored
}

/// Greedy allocation over whatever the resolver left behind.
///
/// First pass hands each unassigned demand the best-scoring employee nobody
/// has claimed yet. Second pass gives every demand still open its best
/// candidate regardless of claims, flagged as reused.
pub fn allocate(
    universe: &DemandUniverse,
    table: &CandidateTable,
    ledger: &mut AssignmentLedger,
    weights: &Weights,
) -> AllocatorOutcome {
    let mut outcome = AllocatorOutcome::default();
    if table.is_empty() {
        return outcome;
    }

    let scored = score_live(table, weights);

    for s in &scored {
        let record = table.record(s.record);
        if ledger.is_assigned(s.demand) || ledger.is_used(record.employee) {
            continue;
        }
        ledger.commit(
            s.demand,
            scored_result(universe, table, s, AssignedEmployee::Sole(record.employee), Method::ScoreUnique),
        );
        outcome.score_unique += 1;
    }

    for s in &scored {
        if ledger.is_assigned(s.demand) {
            continue;
        }
        let employee = table.record(s.record).employee;
        ledger.commit(
            s.demand,
            scored_result(universe, table, s, AssignedEmployee::Reused(employee), Method::ScoreReuse),
        );
        outcome.score_reuse += 1;
    }

    debug!(
        "allocator: {} record(s) scored, {} unique, {} reused",
        scored.len(),
        outcome.score_unique,
        outcome.score_reuse
    );
    outcome
}

/// Give each starved demand its best retired candidate as a reused
/// assignment. Scarcity uses the employee's demand count from before
/// resolution, since the live table no longer lists it.
pub fn assign_starved(
    universe: &DemandUniverse,
    table: &CandidateTable,
    ledger: &mut AssignmentLedger,
    weights: &Weights,
    starved: &[usize],
) -> usize {
    let mut assigned = 0;
    for &demand in starved {
        if ledger.is_assigned(demand) || !table.had_candidates(demand) {
            continue;
        }
        let best = table
            .retired_for(demand)
            .into_iter()
            .map(|idx| {
                let record = table.record(idx);
                ScoredRecord {
                    record: idx,
                    demand,
                    score: weights.score(
                        record.match_percent,
                        table.original_demand_count(record.employee),
                    ),
                }
            })
            .min_by(greedy_order);

        let Some(best) = best else {
            continue;
        };
        let employee = table.record(best.record).employee;
        let mut result =
            scored_result(universe, table, &best, AssignedEmployee::Reused(employee), Method::ScoreReuse);
        result.fallback = true;
        if ledger.commit(demand, result) {
            debug!("starvation fallback: demand {} reuses employee {}", universe.id(demand), employee);
            assigned += 1;
        }
    }
    assigned
}

fn scored_result(
    universe: &DemandUniverse,
    table: &CandidateTable,
    scored: &ScoredRecord,
    employee: AssignedEmployee,
    method: Method,
) -> AssignmentResult {
    let record = table.record(scored.record);
    AssignmentResult {
        demand: universe.id(scored.demand).clone(),
        employee: Some(employee),
        match_percent: Some(record.match_percent),
        score: Some(scored.score),
        all_employees: record.raw_associates_text.clone(),
        method,
        fallback: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CandidateRecord, DemandId, EmployeeId};
    use crate::resolver::resolve_unique;

    fn rec(demand: &str, employee: u64, pct: f64) -> CandidateRecord {
        CandidateRecord {
            demand: DemandId::from(demand),
            employee: EmployeeId(employee),
            match_percent: pct,
            raw_associates_text: String::new(),
        }
    }

    fn setup(ids: &[&str], records: &[CandidateRecord]) -> (DemandUniverse, CandidateTable, AssignmentLedger) {
        let demands: Vec<DemandId> = ids.iter().map(|s| DemandId::from(*s)).collect();
        let universe = DemandUniverse::from_demands(&demands);
        let table = CandidateTable::build(&universe, records).unwrap();
        let ledger = AssignmentLedger::new(universe.len());
        (universe, table, ledger)
    }

    #[test]
    fn two_demands_share_two_employees() {
        // D2 and D3 both list E2 (80%) and E3 (60%).
        let records = [rec("D2", 2, 80.0), rec("D2", 3, 60.0), rec("D3", 2, 80.0), rec("D3", 3, 60.0)];
        let (u, t, mut l) = setup(&["D2", "D3"], &records);
        let outcome = allocate(&u, &t, &mut l, &Weights::default());
        assert_eq!(outcome, AllocatorOutcome { score_unique: 2, score_reuse: 0 });

        let d2 = l.get(0).unwrap();
        assert_eq!(d2.employee, Some(AssignedEmployee::Sole(EmployeeId(2))));
        assert_eq!(d2.method, Method::ScoreUnique);
        assert!((d2.score.unwrap() - (0.7 * 80.0 + 0.3 * 0.5)).abs() < 1e-9);

        let d3 = l.get(1).unwrap();
        assert_eq!(d3.employee, Some(AssignedEmployee::Sole(EmployeeId(3))));
        assert_eq!(d3.method, Method::ScoreUnique);
    }

    #[test]
    fn more_demands_than_employees_reuse_best_candidate() {
        let records = [
            rec("D1", 1, 90.0),
            rec("D1", 2, 10.0),
            rec("D2", 1, 85.0),
            rec("D2", 2, 20.0),
            rec("D3", 1, 70.0),
            rec("D3", 2, 60.0),
        ];
        let (u, t, mut l) = setup(&["D1", "D2", "D3"], &records);
        let outcome = allocate(&u, &t, &mut l, &Weights::default());
        assert_eq!(outcome.score_unique, 2);
        assert_eq!(outcome.score_reuse, 1);

        // D1 takes E1 (highest score), D3 takes E2 (60% beats D2's 20%).
        assert_eq!(l.get(0).unwrap().employee, Some(AssignedEmployee::Sole(EmployeeId(1))));
        assert_eq!(l.get(2).unwrap().employee, Some(AssignedEmployee::Sole(EmployeeId(2))));
        let d2 = l.get(1).unwrap();
        assert_eq!(d2.employee, Some(AssignedEmployee::Reused(EmployeeId(1))));
        assert_eq!(d2.method, Method::ScoreReuse);
        assert_eq!(d2.match_percent, Some(85.0));
    }

    #[test]
    fn equal_scores_prefer_earlier_demand() {
        let records = [rec("B", 1, 50.0), rec("B", 2, 10.0), rec("A", 1, 50.0), rec("A", 2, 10.0)];
        let (u, t, mut l) = setup(&["B", "A"], &records);
        allocate(&u, &t, &mut l, &Weights::default());
        // "B" was seen first, so it wins E1 on the tie.
        assert_eq!(l.get(0).unwrap().employee, Some(AssignedEmployee::Sole(EmployeeId(1))));
        assert_eq!(l.get(1).unwrap().employee, Some(AssignedEmployee::Sole(EmployeeId(2))));
    }

    #[test]
    fn empty_table_is_a_no_op() {
        let (u, t, mut l) = setup(&["D1"], &[]);
        assert_eq!(allocate(&u, &t, &mut l, &Weights::default()), AllocatorOutcome::default());
        assert_eq!(l.assigned_count(), 0);
    }

    #[test]
    fn starved_demand_reuses_best_retired_candidate() {
        let records = [
            rec("D1", 1, 90.0),
            rec("D2", 2, 90.0),
            rec("D3", 1, 40.0),
            rec("D3", 2, 55.0),
        ];
        let (u, mut t, mut l) = setup(&["D1", "D2", "D3"], &records);
        let resolved = resolve_unique(&u, &mut t, &mut l);
        assert_eq!(resolved.starved, vec![2]);
        allocate(&u, &t, &mut l, &Weights::default());
        assert!(!l.is_assigned(2));

        let assigned = assign_starved(&u, &t, &mut l, &Weights::default(), &resolved.starved);
        assert_eq!(assigned, 1);
        let d3 = l.get(2).unwrap();
        assert_eq!(d3.employee, Some(AssignedEmployee::Reused(EmployeeId(2))));
        assert_eq!(d3.method, Method::ScoreReuse);
        assert!(d3.fallback);
        // E2 was listed on two demands originally.
        assert!((d3.score.unwrap() - (0.7 * 55.0 + 0.3 * 0.5)).abs() < 1e-9);
    }
}
