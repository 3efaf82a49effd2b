use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Demand identifier as it appears in the input (request profile number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DemandId(String);

impl DemandId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DemandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DemandId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DemandId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Numeric associate identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One (demand, employee) pairing extracted from an Associates field.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub demand: DemandId,
    pub employee: EmployeeId,
    pub match_percent: f64,
    /// The full Associates text the pairing was parsed from.
    pub raw_associates_text: String,
}

/// Everything one engine run needs.
///
/// `demands` is the full demand universe in input order; ids may repeat and
/// collapse to one logical demand. Demands without candidates are expected.
#[derive(Debug, Clone, Default)]
pub struct AssignInput {
    pub demands: Vec<DemandId>,
    pub candidates: Vec<CandidateRecord>,
}

impl AssignInput {
    pub fn new(demands: Vec<DemandId>, candidates: Vec<CandidateRecord>) -> Self {
        Self { demands, candidates }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// How a demand ended up with its assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    UniqueFix,
    ScoreUnique,
    ScoreReuse,
    Unassigned,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::UniqueFix,
        Method::ScoreUnique,
        Method::ScoreReuse,
        Method::Unassigned,
    ];

    /// Label used in exported sheets.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UniqueFix => "Unique Fix",
            Self::ScoreUnique => "Score Unique",
            Self::ScoreReuse => "Score Reuse",
            Self::Unassigned => "Unassigned",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UniqueFix => write!(f, "unique_fix"),
            Self::ScoreUnique => write!(f, "score_unique"),
            Self::ScoreReuse => write!(f, "score_reuse"),
            Self::Unassigned => write!(f, "unassigned"),
        }
    }
}

/// The employee placed on a demand. `Reused` employees already hold a
/// first claim elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AssignedEmployee {
    Sole(EmployeeId),
    Reused(EmployeeId),
}

impl AssignedEmployee {
    pub fn id(&self) -> EmployeeId {
        match self {
            Self::Sole(id) | Self::Reused(id) => *id,
        }
    }

    pub fn is_reused(&self) -> bool {
        matches!(self, Self::Reused(_))
    }

    /// Render for export: reused ids carry the marker suffix (`1234*`).
    pub fn render(&self, reuse_marker: &str) -> String {
        match self {
            Self::Sole(id) => id.to_string(),
            Self::Reused(id) => format!("{id}{reuse_marker}"),
        }
    }
}

/// One output row. Exactly one per distinct demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentResult {
    pub demand: DemandId,
    pub employee: Option<AssignedEmployee>,
    pub match_percent: Option<f64>,
    pub score: Option<f64>,
    pub all_employees: String,
    pub method: Method,
    /// Set when the row came from the starvation fallback rather than the
    /// live candidate table.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl AssignmentResult {
    pub fn unassigned(demand: DemandId) -> Self {
        Self {
            demand,
            employee: None,
            match_percent: None,
            score: None,
            all_employees: "-".to_string(),
            method: Method::Unassigned,
            fallback: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary + Run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssignmentSummary {
    pub total_demands: usize,
    pub unique_fix: usize,
    pub score_unique: usize,
    pub score_reuse: usize,
    pub unassigned: usize,
    pub starvation_fallbacks: usize,
    pub distinct_employees_used: usize,
    pub method_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub candidate_records: usize,
    pub resolver_passes: usize,
    pub unique_collisions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentRun {
    pub meta: RunMeta,
    pub summary: AssignmentSummary,
    pub rows: Vec<AssignmentResult>,
}
