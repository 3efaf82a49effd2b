use std::collections::HashSet;

use crate::model::{AssignedEmployee, AssignmentResult, EmployeeId};

/// Assignments committed so far, keyed by demand position, plus the set of
/// employees holding a first claim.
///
/// A demand is committed at most once; later commits for the same demand
/// are ignored.
#[derive(Debug)]
pub struct AssignmentLedger {
    slots: Vec<Option<AssignmentResult>>,
    used: HashSet<EmployeeId>,
}

impl AssignmentLedger {
    pub fn new(demand_count: usize) -> Self {
        Self {
            slots: vec![None; demand_count],
            used: HashSet::new(),
        }
    }

    pub fn is_assigned(&self, demand: usize) -> bool {
        self.slots[demand].is_some()
    }

    pub fn is_used(&self, employee: EmployeeId) -> bool {
        self.used.contains(&employee)
    }

    /// Record an assignment. First claims (`Sole`) also mark the employee
    /// used. Returns false when the demand was already assigned.
    pub fn commit(&mut self, demand: usize, result: AssignmentResult) -> bool {
        if self.slots[demand].is_some() {
            return false;
        }
        if let Some(AssignedEmployee::Sole(employee)) = result.employee {
            self.used.insert(employee);
        }
        self.slots[demand] = Some(result);
        true
    }

    pub fn get(&self, demand: usize) -> Option<&AssignmentResult> {
        self.slots[demand].as_ref()
    }

    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    pub fn into_slots(self) -> Vec<Option<AssignmentResult>> {
        self.slots
    }
}
