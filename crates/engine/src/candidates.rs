use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::AssignError;
use crate::model::{CandidateRecord, DemandId, EmployeeId};

// ---------------------------------------------------------------------------
// Demand universe
// ---------------------------------------------------------------------------

/// Distinct demand ids in first-seen order. A demand's position here is its
/// identity inside the engine and its tie-break rank.
#[derive(Debug, Clone, Default)]
pub struct DemandUniverse {
    ids: Vec<DemandId>,
    positions: HashMap<DemandId, usize>,
}

impl DemandUniverse {
    pub fn from_demands(demands: &[DemandId]) -> Self {
        let mut universe = Self::default();
        for demand in demands {
            if !universe.positions.contains_key(demand) {
                universe.positions.insert(demand.clone(), universe.ids.len());
                universe.ids.push(demand.clone());
            }
        }
        universe
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn position(&self, demand: &DemandId) -> Option<usize> {
        self.positions.get(demand).copied()
    }

    pub fn id(&self, position: usize) -> &DemandId {
        &self.ids[position]
    }

    pub fn ids(&self) -> &[DemandId] {
        &self.ids
    }
}

// ---------------------------------------------------------------------------
// Candidate table
// ---------------------------------------------------------------------------

/// Demands whose distinct-candidate count changed after removing an employee.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Removal {
    /// Demands left with exactly one distinct candidate.
    pub unique: Vec<usize>,
    /// Demands left with no candidate at all.
    pub starved: Vec<usize>,
}

/// Working set of candidate records.
///
/// Records are never deleted, only retired: removing an employee flips its
/// records to retired and updates the per-demand index in place, so the
/// resolver touches only the demands that employee was listed on.
#[derive(Debug)]
pub struct CandidateTable {
    records: Vec<CandidateRecord>,
    demand_of: Vec<usize>,
    alive: Vec<bool>,
    live: usize,
    /// demand position -> employee -> live record indices (ascending).
    by_demand: Vec<BTreeMap<EmployeeId, Vec<usize>>>,
    /// employee -> every record index naming it.
    by_employee: HashMap<EmployeeId, Vec<usize>>,
    /// demand position -> retired record indices (ascending after sort).
    retired_by_demand: Vec<Vec<usize>>,
    /// employee -> distinct demands listing it before any removal.
    original_demand_counts: HashMap<EmployeeId, usize>,
    original_candidates: Vec<usize>,
}

impl CandidateTable {
    pub fn build(
        universe: &DemandUniverse,
        candidates: &[CandidateRecord],
    ) -> Result<Self, AssignError> {
        let demand_count = universe.len();
        let mut table = Self {
            records: Vec::with_capacity(candidates.len()),
            demand_of: Vec::with_capacity(candidates.len()),
            alive: Vec::with_capacity(candidates.len()),
            live: 0,
            by_demand: vec![BTreeMap::new(); demand_count],
            by_employee: HashMap::new(),
            retired_by_demand: vec![Vec::new(); demand_count],
            original_demand_counts: HashMap::new(),
            original_candidates: vec![0; demand_count],
        };

        let mut employee_demands: HashMap<EmployeeId, BTreeSet<usize>> = HashMap::new();

        for record in candidates {
            let position = universe.position(&record.demand).ok_or_else(|| {
                AssignError::UnknownDemand { demand: record.demand.clone() }
            })?;
            if !record.match_percent.is_finite() {
                return Err(AssignError::InvalidMatchPercent {
                    demand: record.demand.clone(),
                    employee: record.employee,
                    value: record.match_percent,
                });
            }

            let idx = table.records.len();
            table.records.push(record.clone());
            table.demand_of.push(position);
            table.alive.push(true);
            table.live += 1;
            table.by_demand[position].entry(record.employee).or_default().push(idx);
            table.by_employee.entry(record.employee).or_default().push(idx);
            employee_demands.entry(record.employee).or_default().insert(position);
        }

        for (position, employees) in table.by_demand.iter().enumerate() {
            table.original_candidates[position] = employees.len();
        }
        table.original_demand_counts = employee_demands
            .into_iter()
            .map(|(employee, demands)| (employee, demands.len()))
            .collect();

        Ok(table)
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn record(&self, idx: usize) -> &CandidateRecord {
        &self.records[idx]
    }

    pub fn demand_of(&self, idx: usize) -> usize {
        self.demand_of[idx]
    }

    /// Distinct employees still candidate for a demand.
    pub fn distinct_candidates(&self, demand: usize) -> usize {
        self.by_demand[demand].len()
    }

    /// Whether the demand had any candidate before resolution started.
    pub fn had_candidates(&self, demand: usize) -> bool {
        self.original_candidates[demand] > 0
    }

    /// Demands that currently have exactly one distinct candidate, in
    /// first-seen order. Full scan; used once to seed the resolver.
    pub fn single_candidate_demands(&self) -> Vec<usize> {
        self.by_demand
            .iter()
            .enumerate()
            .filter(|(_, employees)| employees.len() == 1)
            .map(|(position, _)| position)
            .collect()
    }

    /// The first live record of a demand's only remaining employee.
    pub fn sole_candidate(&self, demand: usize) -> Option<usize> {
        let employees = &self.by_demand[demand];
        if employees.len() != 1 {
            return None;
        }
        employees.values().next().and_then(|idxs| idxs.first().copied())
    }

    /// Retire every live record naming `employee`.
    pub fn remove_employee(&mut self, employee: EmployeeId) -> Removal {
        let Some(idxs) = self.by_employee.get(&employee) else {
            return Removal::default();
        };

        let mut touched = BTreeSet::new();
        for &idx in idxs {
            if !self.alive[idx] {
                continue;
            }
            self.alive[idx] = false;
            self.live -= 1;
            let demand = self.demand_of[idx];
            self.retired_by_demand[demand].push(idx);
            self.by_demand[demand].remove(&employee);
            touched.insert(demand);
        }

        let mut removal = Removal::default();
        for demand in touched {
            match self.by_demand[demand].len() {
                0 => removal.starved.push(demand),
                1 => removal.unique.push(demand),
                _ => {}
            }
        }
        removal
    }

    /// Live records in input order.
    pub fn live_records(&self) -> impl Iterator<Item = (usize, &CandidateRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.alive[*idx])
    }

    /// Distinct live demands per employee.
    pub fn live_demand_counts(&self) -> HashMap<EmployeeId, usize> {
        let mut counts: HashMap<EmployeeId, usize> = HashMap::new();
        for employees in &self.by_demand {
            for employee in employees.keys() {
                *counts.entry(*employee).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Distinct demands per employee as originally built.
    pub fn original_demand_count(&self, employee: EmployeeId) -> usize {
        self.original_demand_counts.get(&employee).copied().unwrap_or(1)
    }

    /// Records retired from a demand, in input order.
    pub fn retired_for(&self, demand: usize) -> Vec<usize> {
        let mut idxs = self.retired_by_demand[demand].clone();
        idxs.sort_unstable();
        idxs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(demand: &str, employee: u64, pct: f64) -> CandidateRecord {
        CandidateRecord {
            demand: DemandId::from(demand),
            employee: EmployeeId(employee),
            match_percent: pct,
            raw_associates_text: String::new(),
        }
    }

    fn universe(ids: &[&str]) -> DemandUniverse {
        let demands: Vec<DemandId> = ids.iter().map(|s| DemandId::from(*s)).collect();
        DemandUniverse::from_demands(&demands)
    }

    #[test]
    fn universe_collapses_duplicates_in_first_seen_order() {
        let u = universe(&["D2", "D1", "D2", "D3", "D1"]);
        assert_eq!(u.len(), 3);
        let ids: Vec<_> = u.ids().iter().map(|d| d.as_str()).collect();
        assert_eq!(ids, vec!["D2", "D1", "D3"]);
        assert_eq!(u.position(&DemandId::from("D3")), Some(2));
    }

    #[test]
    fn build_indexes_distinct_employees() {
        let u = universe(&["D1", "D2"]);
        let records = vec![rec("D1", 1, 90.0), rec("D1", 1, 80.0), rec("D2", 1, 50.0), rec("D2", 2, 40.0)];
        let table = CandidateTable::build(&u, &records).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.distinct_candidates(0), 1);
        assert_eq!(table.distinct_candidates(1), 2);
        assert_eq!(table.single_candidate_demands(), vec![0]);
        assert_eq!(table.sole_candidate(0), Some(0));
        assert_eq!(table.sole_candidate(1), None);
        assert_eq!(table.original_demand_count(EmployeeId(1)), 2);
    }

    #[test]
    fn build_rejects_unknown_demand() {
        let u = universe(&["D1"]);
        let err = CandidateTable::build(&u, &[rec("D9", 1, 10.0)]).unwrap_err();
        assert!(matches!(err, AssignError::UnknownDemand { .. }));
    }

    #[test]
    fn build_rejects_nan_percent() {
        let u = universe(&["D1"]);
        let err = CandidateTable::build(&u, &[rec("D1", 1, f64::NAN)]).unwrap_err();
        assert!(matches!(err, AssignError::InvalidMatchPercent { .. }));
    }

    #[test]
    fn remove_employee_reports_new_unique_and_starved() {
        let u = universe(&["D1", "D2", "D3"]);
        let records = vec![
            rec("D1", 1, 90.0),
            rec("D2", 1, 50.0),
            rec("D2", 2, 40.0),
            rec("D3", 1, 30.0),
            rec("D3", 2, 30.0),
            rec("D3", 3, 30.0),
        ];
        let mut table = CandidateTable::build(&u, &records).unwrap();
        let removal = table.remove_employee(EmployeeId(1));
        assert_eq!(removal.starved, vec![0]);
        assert_eq!(removal.unique, vec![1]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.distinct_candidates(2), 2);
        assert_eq!(table.retired_for(1), vec![1]);
        assert!(table.had_candidates(0));

        // Removing twice is a no-op.
        assert_eq!(table.remove_employee(EmployeeId(1)), Removal::default());
        assert_eq!(table.remove_employee(EmployeeId(77)), Removal::default());
    }

    #[test]
    fn live_demand_counts_track_removals() {
        let u = universe(&["D1", "D2"]);
        let records = vec![rec("D1", 5, 10.0), rec("D1", 6, 10.0), rec("D2", 6, 10.0)];
        let mut table = CandidateTable::build(&u, &records).unwrap();
        assert_eq!(table.live_demand_counts()[&EmployeeId(6)], 2);
        table.remove_employee(EmployeeId(5));
        let counts = table.live_demand_counts();
        assert!(!counts.contains_key(&EmployeeId(5)));
        assert_eq!(counts[&EmployeeId(6)], 2);
        let live: Vec<_> = table.live_records().map(|(idx, _)| idx).collect();
        assert_eq!(live, vec![1, 2]);
    }
}
