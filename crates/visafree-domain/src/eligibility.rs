use crate::model::Policy;

/// Exact, case-sensitive membership of `country` in the policy's eligible set.
///
/// Unknown countries and the empty string are simply not eligible.
pub fn is_eligible(policy: &Policy, country: &str) -> bool {
    policy.eligible_countries().contains(country)
}

/// The catalog entry `country` would have matched if case and whitespace were ignored.
///
/// Returns `None` when the country is already an exact match, or when nothing matches even
/// loosely. Never consulted by [`is_eligible`].
pub fn near_match<'p>(policy: &'p Policy, country: &str) -> Option<&'p str> {
    if is_eligible(policy, country) {
        return None;
    }
    let wanted = fold(country);
    if wanted.is_empty() {
        return None;
    }
    policy
        .eligible_countries()
        .iter()
        .find(|entry| fold(entry) == wanted)
        .map(String::as_str)
}

fn fold(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
