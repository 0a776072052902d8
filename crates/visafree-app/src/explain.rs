//! The `explain` use case: look up an advisory code or a policy id.

use visafree_domain::PolicyCatalog;
use visafree_types::explain::{self, Explanation};
use visafree_types::PolicySummary;

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// The identifier is an advisory code.
    Code(Explanation),
    /// The identifier is a policy id.
    Policy {
        summary: PolicySummary,
        countries: Vec<String>,
    },
    /// Unknown identifier; includes available codes and policy ids.
    NotFound {
        identifier: String,
        available_codes: &'static [&'static str],
        available_policy_ids: Vec<String>,
    },
}

/// Look up an explanation for an advisory code, then for a policy id.
pub fn run_explain(identifier: &str, catalog: &PolicyCatalog) -> ExplainOutput {
    if let Some(exp) = explain::lookup_explanation(identifier) {
        return ExplainOutput::Code(exp);
    }
    match catalog.get(identifier) {
        Some(policy) => ExplainOutput::Policy {
            summary: policy.summary(),
            countries: policy.eligible_countries().iter().cloned().collect(),
        },
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_codes: explain::all_codes(),
            available_policy_ids: catalog
                .list_policies()
                .iter()
                .map(|p| p.id().to_string())
                .collect(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    out.push_str("Before:\n");
    out.push_str("```text\n");
    out.push_str(exp.examples.before);
    out.push('\n');
    out.push_str("```\n\n");
    out.push_str("After:\n");
    out.push_str("```text\n");
    out.push_str(exp.examples.after);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format a policy's details for terminal display.
pub fn format_policy(summary: &PolicySummary, countries: &[String]) -> String {
    let mut out = String::new();

    let title = format!("{} (policy {})", summary.name, summary.id);
    out.push_str(&title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push_str("\n\n");
    out.push_str(&format!(
        "Permitted stay: {} hours ({} days)\n\n",
        summary.duration_hours,
        summary.duration_hours / 24
    ));
    out.push_str(&format!("Eligible countries ({}):\n", countries.len()));
    for c in countries {
        out.push_str(&format!("  - {}\n", c));
    }

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, codes: &[&'static str], policy_ids: &[String]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown advisory code or policy id: {}\n\n", identifier));
    out.push_str("Available codes:\n");
    for code in codes {
        out.push_str(&format!("  - {}\n", code));
    }
    out.push_str("\nAvailable policy ids:\n");
    for id in policy_ids {
        out.push_str(&format!("  - {}\n", id));
    }

    out
}
