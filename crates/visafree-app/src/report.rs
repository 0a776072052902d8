//! Building, serializing, and parsing eligibility reports.

use anyhow::Context;
use time::OffsetDateTime;
use visafree_domain::{Assessment, SessionOptions};
use visafree_types::{
    ids, Advisory, EligibilityReport, EligibilityStatus, ToolMeta, SCHEMA_REPORT_V1,
};

fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "visafree".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

pub fn build_report(
    assessment: Assessment,
    options: &SessionOptions,
    evaluated_at: OffsetDateTime,
) -> EligibilityReport {
    EligibilityReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        evaluated_at,
        profile: options.profile.clone(),
        input_mode: options.input_mode.as_str().to_string(),
        policy: assessment.policy,
        country: assessment.country,
        status: assessment.status,
        advisories: assessment.advisories,
    }
}

/// Report emitted when the assessment could not run at all.
///
/// `options` is `None` when the failure happened before config resolution finished.
pub fn runtime_error_report(message: &str, options: Option<&SessionOptions>) -> EligibilityReport {
    let (profile, input_mode) = match options {
        Some(o) => (o.profile.clone(), o.input_mode.as_str().to_string()),
        None => ("unknown".to_string(), "unknown".to_string()),
    };
    EligibilityReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        evaluated_at: OffsetDateTime::now_utc(),
        profile,
        input_mode,
        policy: None,
        country: None,
        status: EligibilityStatus::Undetermined,
        advisories: vec![Advisory {
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            help: Some("see `visafree explain runtime_error`".to_string()),
        }],
    }
}

pub fn serialize_report(report: &EligibilityReport) -> anyhow::Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(report).context("serialize report")?;
    data.push(b'\n');
    Ok(data)
}

pub fn parse_report_json(text: &str) -> anyhow::Result<EligibilityReport> {
    let report: EligibilityReport = serde_json::from_str(text).context("parse report json")?;
    if report.schema != SCHEMA_REPORT_V1 {
        anyhow::bail!(
            "unsupported report schema: {} (expected {})",
            report.schema,
            SCHEMA_REPORT_V1
        );
    }
    Ok(report)
}
