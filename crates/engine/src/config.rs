use serde::Deserialize;

use crate::error::AssignError;
use crate::scoring::Weights;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub weights: Weights,
    /// Give demands that lost every candidate during unique resolution a
    /// reused employee instead of leaving them unassigned.
    #[serde(default = "default_true")]
    pub starvation_fallback: bool,
    #[serde(default = "default_reuse_marker")]
    pub reuse_marker: String,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            weights: Weights::default(),
            starvation_fallback: true,
            reuse_marker: default_reuse_marker(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn default_name() -> String {
    "staffmatch".into()
}

fn default_true() -> bool {
    true
}

fn default_reuse_marker() -> String {
    "*".into()
}

// ---------------------------------------------------------------------------
// Input + Output
// ---------------------------------------------------------------------------

/// Where the demand list lives in the uploaded sheet.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    #[serde(default = "default_demand_column")]
    pub demand_column: String,
    #[serde(default = "default_associates_column")]
    pub associates_column: String,
    /// Worksheet to read; the first sheet when unset.
    #[serde(default)]
    pub sheet: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            demand_column: default_demand_column(),
            associates_column: default_associates_column(),
            sheet: None,
        }
    }
}

fn default_demand_column() -> String {
    "Request profile number".into()
}

fn default_associates_column() -> String {
    "Associates".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "default_output_file")]
    pub file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sheet_name: default_sheet_name(),
            file: default_output_file(),
        }
    }
}

fn default_sheet_name() -> String {
    "Assignments".into()
}

fn default_output_file() -> String {
    "Starvation_Safe_Assignments.xlsx".into()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

/// Excel's worksheet name limit.
const MAX_SHEET_NAME_LEN: usize = 31;

impl AssignConfig {
    pub fn from_toml(input: &str) -> Result<Self, AssignError> {
        let config: AssignConfig =
            toml::from_str(input).map_err(|e| AssignError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AssignError> {
        self.weights.validate()?;

        if self.reuse_marker.is_empty() {
            return Err(AssignError::ConfigValidation(
                "reuse_marker must not be empty".into(),
            ));
        }

        let input = &self.input;
        if input.demand_column.trim().is_empty() || input.associates_column.trim().is_empty() {
            return Err(AssignError::ConfigValidation(
                "input column names must not be empty".into(),
            ));
        }
        if input.demand_column == input.associates_column {
            return Err(AssignError::ConfigValidation(format!(
                "demand_column and associates_column both name '{}'",
                input.demand_column
            )));
        }

        let sheet_len = self.output.sheet_name.chars().count();
        if sheet_len == 0 || sheet_len > MAX_SHEET_NAME_LEN {
            return Err(AssignError::ConfigValidation(format!(
                "output sheet_name must be 1-{MAX_SHEET_NAME_LEN} characters, got {sheet_len}"
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
