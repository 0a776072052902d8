use crate::eligibility::near_match;
use crate::options::InputMode;
use crate::session::SelectionState;
use visafree_types::{ids, Advisory, EligibilityStatus, PolicySummary};

/// Presentation-ready view of a selection state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assessment {
    pub policy: Option<PolicySummary>,
    pub country: Option<String>,
    pub status: EligibilityStatus,
    /// Sorted by code.
    pub advisories: Vec<Advisory>,
}

pub fn assess(state: &SelectionState<'_>, input_mode: InputMode) -> Assessment {
    let policy = state.selected_policy();
    let country = state.declared_country();
    let status = EligibilityStatus::from_flag(state.is_eligible());

    let mut advisories = Vec::new();

    if policy.is_none() {
        advisories.push(Advisory {
            code: ids::CODE_POLICY_NOT_SELECTED.to_string(),
            message: "no visa-free policy is selected".to_string(),
            help: Some("select a policy to evaluate eligibility".to_string()),
        });
    }
    if country.is_none() {
        advisories.push(Advisory {
            code: ids::CODE_COUNTRY_NOT_DECLARED.to_string(),
            message: "no country of citizenship is declared".to_string(),
            help: Some("declare a country to evaluate eligibility".to_string()),
        });
    }

    if let (Some(policy), Some(country)) = (policy, country)
        && status == EligibilityStatus::NotEligible
    {
        advisories.push(Advisory {
            code: ids::CODE_COUNTRY_NOT_LISTED.to_string(),
            message: format!(
                "{:?} is not eligible under {} ({}h)",
                country,
                policy.name(),
                policy.duration_hours()
            ),
            help: None,
        });

        if input_mode == InputMode::FreeText
            && let Some(entry) = near_match(policy, country)
        {
            advisories.push(Advisory {
                code: ids::CODE_NEAR_MATCH.to_string(),
                message: format!(
                    "{:?} differs from catalog entry {:?} only in case or spacing",
                    country, entry
                ),
                help: Some(format!("declare the country as {:?}", entry)),
            });
        }
    }

    if input_mode == InputMode::FreeText {
        advisories.push(Advisory {
            code: ids::CODE_FREE_TEXT_INPUT.to_string(),
            message: "country was entered as free text; matching is exact".to_string(),
            help: None,
        });
    }

    advisories.sort_by(|a, b| a.code.cmp(&b.code));

    Assessment {
        policy: policy.map(|p| p.summary()),
        country: country.map(str::to_string),
        status,
        advisories,
    }
}
