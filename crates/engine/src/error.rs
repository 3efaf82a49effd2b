use std::fmt;

use crate::model::{DemandId, EmployeeId};

#[derive(Debug)]
pub enum AssignError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad weights, empty marker, etc.).
    ConfigValidation(String),
    /// A candidate record refers to a demand outside the demand universe.
    UnknownDemand { demand: DemandId },
    /// A candidate record carries a NaN or infinite match percentage.
    InvalidMatchPercent { demand: DemandId, employee: EmployeeId, value: f64 },
}

impl fmt::Display for AssignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::UnknownDemand { demand } => {
                write!(f, "candidate refers to demand '{demand}' which is not in the demand list")
            }
            Self::InvalidMatchPercent { demand, employee, value } => {
                write!(f, "demand '{demand}', employee {employee}: match percentage {value} is not finite")
            }
        }
    }
}

impl std::error::Error for AssignError {}
