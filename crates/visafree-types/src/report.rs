use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for eligibility reports.
pub const SCHEMA_REPORT_V1: &str = "visafree.report.v1";

/// Outcome of one eligibility assessment.
///
/// `Undetermined` is reported whenever a policy or a country is missing; it is never a
/// leftover from an earlier combination of inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    NotEligible,
    Undetermined,
}

impl EligibilityStatus {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => EligibilityStatus::Eligible,
            Some(false) => EligibilityStatus::NotEligible,
            None => EligibilityStatus::Undetermined,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "eligible",
            EligibilityStatus::NotEligible => "not_eligible",
            EligibilityStatus::Undetermined => "undetermined",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// The slice of a policy that is worth echoing back in a report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicySummary {
    pub id: String,
    pub name: String,
    pub duration_hours: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Advisory {
    pub code: String,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EligibilityReport {
    /// Versioned schema identifier (`visafree.report.v1`).
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub evaluated_at: OffsetDateTime,
    pub profile: String,
    /// `selector` or `free_text`.
    pub input_mode: String,
    pub policy: Option<PolicySummary>,
    pub country: Option<String>,
    pub status: EligibilityStatus,
    #[serde(default)]
    pub advisories: Vec<Advisory>,
}

impl EligibilityReport {
    pub fn has_advisory(&self, code: &str) -> bool {
        self.advisories.iter().any(|a| a.code == code)
    }
}
