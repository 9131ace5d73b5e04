//! Structured health report returned by the generation service.

use super::intake::{ClinicalInput, PatientInfo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Summary shown in place of a report the model failed to produce.
pub const PARSE_ERROR_SUMMARY: &str = "Error parsing AI response.";

/// Health report in the shape the system instruction asks the model for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub summary: String,
    #[serde(default)]
    pub possible_causes: Vec<String>,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub precautions: Vec<String>,
    #[serde(default)]
    pub safe_medications: Vec<String>,
    /// Keyed by `day1`..`day7`.
    #[serde(default)]
    pub diet_plan: BTreeMap<String, DayMeals>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "moderate", alias = "MODERATE", alias = "Medium", alias = "medium")]
    Moderate,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }

    /// CSS modifier used by the report page.
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::Low => "risk-low",
            RiskLevel::Moderate => "risk-moderate",
            RiskLevel::High => "risk-high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayMeals {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

/// Outcome of interpreting the raw model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    Parsed(HealthReport),
    Malformed { reason: String },
}

impl Interpretation {
    pub fn is_malformed(&self) -> bool {
        matches!(self, Interpretation::Malformed { .. })
    }
}

/// Stand-in report rendered when the model output could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub summary: String,
    pub error: bool,
}

impl Default for ErrorReport {
    fn default() -> Self {
        Self {
            summary: PARSE_ERROR_SUMMARY.to_string(),
            error: true,
        }
    }
}

/// The report as handed to rendering: either the real thing or the
/// `{ summary, error: true }` stand-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RenderedReport {
    Report(HealthReport),
    Error(ErrorReport),
}

impl From<Interpretation> for RenderedReport {
    fn from(interpretation: Interpretation) -> Self {
        match interpretation {
            Interpretation::Parsed(report) => RenderedReport::Report(report),
            Interpretation::Malformed { .. } => RenderedReport::Error(ErrorReport::default()),
        }
    }
}

/// Everything the report page is rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    pub patient: PatientInfo,
    pub input: ClinicalInput,
    pub report: RenderedReport,
}
