//! Explain registry for advisory codes.
//!
//! Maps advisory codes to human-readable explanations with guidance on how to resolve them.

use crate::ids;

/// Explanation entry for an advisory code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the code.
    pub title: &'static str,
    /// What the advisory means.
    pub description: &'static str,
    /// How to resolve it.
    pub remediation: &'static str,
    /// Before/after command examples.
    pub examples: ExamplePair,
}

/// Before and after command examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Invocation that raises the advisory.
    pub before: &'static str,
    /// Invocation that does not.
    pub after: &'static str,
}

/// Look up an explanation by advisory code.
///
/// Returns `None` if the code is not recognized.
pub fn lookup_explanation(code: &str) -> Option<Explanation> {
    match code {
        ids::CODE_POLICY_NOT_SELECTED => Some(explain_policy_not_selected()),
        ids::CODE_COUNTRY_NOT_DECLARED => Some(explain_country_not_declared()),
        ids::CODE_COUNTRY_NOT_LISTED => Some(explain_country_not_listed()),
        ids::CODE_NEAR_MATCH => Some(explain_near_match()),
        ids::CODE_FREE_TEXT_INPUT => Some(explain_free_text_input()),
        ids::CODE_RUNTIME_ERROR => Some(explain_runtime_error()),
        _ => None,
    }
}

/// List all known advisory codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_POLICY_NOT_SELECTED,
        ids::CODE_COUNTRY_NOT_DECLARED,
        ids::CODE_COUNTRY_NOT_LISTED,
        ids::CODE_NEAR_MATCH,
        ids::CODE_FREE_TEXT_INPUT,
        ids::CODE_RUNTIME_ERROR,
    ]
}

fn explain_policy_not_selected() -> Explanation {
    Explanation {
        title: "No Policy Selected",
        description: "\
Eligibility is only defined for a policy and a country together. No policy was
selected, so the result is undetermined rather than eligible or not eligible.

This happens when the session starts with `default_policy = \"none\"` (the `lookup`
profile) and no policy is chosen afterwards.",
        remediation: "\
Choose a policy explicitly with `--policy <id>`, or set `default_policy = \"first\"`
in visafree.toml. `visafree policies` lists the available ids.",
        examples: ExamplePair {
            before: "visafree --default-policy none check --country Japan",
            after: "visafree check --policy 1 --country Japan",
        },
    }
}

fn explain_country_not_declared() -> Explanation {
    Explanation {
        title: "No Country Declared",
        description: "\
A policy is selected but no country of citizenship was declared, so eligibility
is undetermined.",
        remediation: "\
Declare a country with `--country <name>`. `visafree countries` lists the names
the catalog recognizes.",
        examples: ExamplePair {
            before: "visafree check --policy 1",
            after: "visafree check --policy 1 --country \"United States\"",
        },
    }
}

fn explain_country_not_listed() -> Explanation {
    Explanation {
        title: "Country Not Listed",
        description: "\
The declared country is not in the selected policy's eligible-country set.
Membership is an exact, case-sensitive comparison against catalog entries.
Countries the catalog has never heard of are simply not eligible.",
        remediation: "\
List every policy that admits the country with `visafree policies --country <name>`,
or browse one policy's list with `visafree countries --policy <id>`. If the name differs
from the catalog only in case or spacing, see `visafree explain near_match`.",
        examples: ExamplePair {
            before: "visafree check --policy 2 --country \"United States\"",
            after: "visafree check --policy 1 --country \"United States\"",
        },
    }
}

fn explain_near_match() -> Explanation {
    Explanation {
        title: "Near Match With Catalog Entry",
        description: "\
The declared country is not an exact match, but it matches a catalog entry once
surrounding whitespace and letter case are ignored. The input is still treated as
not eligible: visafree never normalizes country names on your behalf.

This is only reported for free-text input. A selector only offers exact catalog
names, so it cannot produce near matches.",
        remediation: "\
Use the exact catalog spelling reported in the advisory, or switch to selector
input (`input = \"selector\"`) so only catalog names can be entered.",
        examples: ExamplePair {
            before: "visafree --input free-text check --policy 1 --country \"united states\"",
            after: "visafree --input free-text check --policy 1 --country \"United States\"",
        },
    }
}

fn explain_free_text_input() -> Explanation {
    Explanation {
        title: "Free-Text Country Input",
        description: "\
The session accepts free-text country names. Eligibility uses exact string
membership, so free text can miss a catalog entry through casing, spacing, or
alternative names. This advisory marks every free-text assessment as carrying
that risk.",
        remediation: "\
Prefer selector input, which constrains entries to `visafree countries`. Keep
free text only where the input source is already normalized.",
        examples: ExamplePair {
            before: "input = \"free_text\"",
            after: "input = \"selector\"",
        },
    }
}

fn explain_runtime_error() -> Explanation {
    Explanation {
        title: "Runtime Error",
        description: "\
visafree could not complete the assessment: the configuration failed to parse or
resolve, a custom catalog was invalid, or the requested policy id does not exist.
The report carries an undetermined status.",
        remediation: "\
Read the advisory message for the underlying cause. Fix the configuration or the
policy id and rerun.",
        examples: ExamplePair {
            before: "visafree check --policy 99 --country Japan",
            after: "visafree check --policy 1 --country Japan",
        },
    }
}
