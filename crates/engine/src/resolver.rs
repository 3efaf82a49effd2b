use std::collections::BTreeSet;

use log::debug;

use crate::candidates::{CandidateTable, DemandUniverse};
use crate::ledger::AssignmentLedger;
use crate::model::{AssignedEmployee, AssignmentResult, EmployeeId, Method};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResolverOutcome {
    pub passes: usize,
    pub fixed: usize,
    /// Demands that lost a simultaneous claim on their only candidate.
    pub collisions: usize,
    /// Unassigned demands left with no live candidate, in first-seen order.
    pub starved: Vec<usize>,
}

/// Lock in every demand that has exactly one distinct candidate left,
/// retire the claimed employees, and repeat until nothing is forced.
///
/// Within a pass demands are committed in first-seen order. When two
/// demands are forced onto the same employee in one pass, the earlier one
/// gets it; the later one loses its only candidate and is reported as
/// starved.
pub fn resolve_unique(
    universe: &DemandUniverse,
    table: &mut CandidateTable,
    ledger: &mut AssignmentLedger,
) -> ResolverOutcome {
    let mut outcome = ResolverOutcome::default();
    let mut pending: BTreeSet<usize> = table.single_candidate_demands().into_iter().collect();
    let mut starved: BTreeSet<usize> = BTreeSet::new();

    while !pending.is_empty() {
        outcome.passes += 1;
        let mut claimed: Vec<EmployeeId> = Vec::new();

        for demand in std::mem::take(&mut pending) {
            if ledger.is_assigned(demand) {
                continue;
            }
            let Some(idx) = table.sole_candidate(demand) else {
                continue;
            };
            let record = table.record(idx);
            if ledger.is_used(record.employee) {
                debug!(
                    "unique collision: demand {} loses employee {} to an earlier demand",
                    universe.id(demand),
                    record.employee
                );
                outcome.collisions += 1;
                continue;
            }

            let employee = record.employee;
            ledger.commit(
                demand,
                AssignmentResult {
                    demand: universe.id(demand).clone(),
                    employee: Some(AssignedEmployee::Sole(employee)),
                    match_percent: Some(record.match_percent),
                    score: None,
                    all_employees: record.raw_associates_text.clone(),
                    method: Method::UniqueFix,
                    fallback: false,
                },
            );
            claimed.push(employee);
            outcome.fixed += 1;
        }

        for employee in &claimed {
            let removal = table.remove_employee(*employee);
            pending.extend(removal.unique);
            starved.extend(removal.starved);
        }

        debug!(
            "resolver pass {}: fixed {} demand(s), {} record(s) left",
            outcome.passes,
            claimed.len(),
            table.len()
        );
    }

    outcome.starved = starved
        .into_iter()
        .filter(|demand| !ledger.is_assigned(*demand))
        .collect();
    outcome
}
