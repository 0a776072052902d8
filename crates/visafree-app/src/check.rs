//! The `check` use case: assess one policy/country pair and produce a report.

use anyhow::Context;
use time::OffsetDateTime;
use visafree_domain::{assess, SelectionState};
use visafree_settings::ResolvedConfig;
use visafree_types::{EligibilityReport, EligibilityStatus};

use crate::report::build_report;

/// Input for the check use case.
///
/// Config is resolved by the caller (see [`crate::load_config`]) so a failed check can still
/// report the profile and input mode it ran under.
#[derive(Clone, Debug)]
pub struct CheckInput {
    pub resolved: ResolvedConfig,
    /// Policy to select; falls back to the configured default selection.
    pub policy: Option<String>,
    /// Country to declare, verbatim.
    pub country: Option<String>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: EligibilityReport,
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: replay the choices on a fresh session, assess.
pub fn run_check(input: CheckInput) -> anyhow::Result<CheckOutput> {
    let resolved = input.resolved;

    let report = {
        let mut state =
            SelectionState::new(&resolved.catalog, &resolved.options.default_selection)
                .context("apply default selection")?;

        if let Some(id) = input.policy.as_deref() {
            state.select_policy(id).context("select policy")?;
        }
        if let Some(country) = input.country.clone() {
            state.set_country(country);
        }
        state.check_eligibility();

        let assessment = assess(&state, resolved.options.input_mode);
        tracing::info!(
            policy = ?state.selected_policy_id().map(|id| id.as_str()),
            country = ?state.declared_country(),
            status = assessment.status.as_str(),
            "assessed eligibility"
        );
        if !assessment.advisories.is_empty() {
            tracing::debug!(advisories = assessment.advisories.len(), "advisories raised");
        }

        build_report(assessment, &resolved.options, OffsetDateTime::now_utc())
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map status to exit code: 0 = eligible/undetermined, 2 = not eligible.
pub fn status_exit_code(status: EligibilityStatus) -> i32 {
    match status {
        EligibilityStatus::Eligible => 0,
        EligibilityStatus::Undetermined => 0,
        EligibilityStatus::NotEligible => 2,
    }
}
