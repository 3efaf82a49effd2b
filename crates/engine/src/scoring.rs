use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::AssignError;

/// Composite score weights.
///
/// `score = match_percent * w_match + scarcity * (1 / demand_count)`: strong
/// percentages dominate, and among near-equal ones an employee wanted by
/// fewer demands ranks higher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    #[serde(default = "default_match_weight")]
    pub match_percent: f64,
    #[serde(default = "default_scarcity_weight")]
    pub scarcity: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            match_percent: default_match_weight(),
            scarcity: default_scarcity_weight(),
        }
    }
}

fn default_match_weight() -> f64 {
    0.7
}

fn default_scarcity_weight() -> f64 {
    0.3
}

impl Weights {
    pub fn validate(&self) -> Result<(), AssignError> {
        for (name, value) in [("match_percent", self.match_percent), ("scarcity", self.scarcity)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AssignError::ConfigValidation(format!(
                    "weights.{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.match_percent == 0.0 && self.scarcity == 0.0 {
            return Err(AssignError::ConfigValidation(
                "weights.match_percent and weights.scarcity cannot both be zero".into(),
            ));
        }
        Ok(())
    }

    /// Score one pairing. `demand_count` is the number of distinct demands
    /// still listing the employee; it is at least 1 for any live record.
    pub fn score(&self, match_percent: f64, demand_count: usize) -> f64 {
        let scarcity = 1.0 / demand_count.max(1) as f64;
        self.match_percent * match_percent + self.scarcity * scarcity
    }
}

/// A candidate record with its computed score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRecord {
    /// Index into the candidate table.
    pub record: usize,
    /// First-seen position of the record's demand.
    pub demand: usize,
    pub score: f64,
}

/// Greedy visiting order: score descending, then earlier demand, then
/// earlier input record.
pub fn greedy_order(a: &ScoredRecord, b: &ScoredRecord) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.demand.cmp(&b.demand))
        .then_with(|| a.record.cmp(&b.record))
}

pub fn rank(scored: &mut [ScoredRecord]) {
    scored.sort_by(greedy_order);
}
