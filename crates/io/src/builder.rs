// Raw sheet rows -> engine input

use std::fmt;

use log::warn;
use staffmatch_engine::{AssignInput, CandidateRecord, DemandId};

use crate::associates::parse_associates;

/// One data row as read from the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDemandRow {
    /// 1-based row number in the source, header included.
    pub row: usize,
    pub demand: String,
    pub associates: String,
}

impl RawDemandRow {
    pub fn new(row: usize, demand: impl Into<String>, associates: impl Into<String>) -> Self {
        Self { row, demand: demand.into(), associates: associates.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    EmptyDemand { row: usize },
    InvalidEmployee { row: usize, demand: String, token: String },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDemand { row } => write!(f, "row {row}: empty demand id, row skipped"),
            Self::InvalidEmployee { row, demand, token } => {
                write!(f, "row {row}: demand {demand}: '{token}' has no valid employee id, skipped")
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub input: AssignInput,
    pub warnings: Vec<BuildWarning>,
}

/// Turn raw rows into the demand universe plus one `CandidateRecord` per
/// parsed token. Every row with a demand id joins the universe, even when
/// its Associates field is empty.
pub fn build_input(rows: &[RawDemandRow]) -> BuildOutput {
    let mut out = BuildOutput::default();

    for raw in rows {
        let demand_text = raw.demand.trim();
        if demand_text.is_empty() {
            let warning = BuildWarning::EmptyDemand { row: raw.row };
            warn!("{warning}");
            out.warnings.push(warning);
            continue;
        }
        let demand = DemandId::from(demand_text);
        out.input.demands.push(demand.clone());

        for token in parse_associates(&raw.associates) {
            let Some(employee) = token.employee else {
                let warning = BuildWarning::InvalidEmployee {
                    row: raw.row,
                    demand: demand_text.to_string(),
                    token: token.token,
                };
                warn!("{warning}");
                out.warnings.push(warning);
                continue;
            };
            out.input.candidates.push(CandidateRecord {
                demand: demand.clone(),
                employee,
                match_percent: token.match_percent,
                raw_associates_text: raw.associates.clone(),
            });
        }
    }

    out
}
