use crate::candidates::DemandUniverse;
use crate::ledger::AssignmentLedger;
use crate::model::AssignmentResult;

/// One row per distinct demand, in first-seen order. Demands nothing was
/// committed for come out as `Unassigned` with `all_employees = "-"`.
pub fn reconcile(universe: &DemandUniverse, ledger: AssignmentLedger) -> Vec<AssignmentResult> {
    ledger
        .into_slots()
        .into_iter()
        .enumerate()
        .map(|(position, slot)| {
            slot.unwrap_or_else(|| AssignmentResult::unassigned(universe.id(position).clone()))
        })
        .collect()
}
