//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Exact-membership eligibility
//! - Selection state never reporting a stale result
//! - Order independence of the two user choices

use crate::eligibility::{is_eligible, near_match};
use crate::model::{Policy, PolicyCatalog};
use crate::options::DefaultSelection;
use crate::session::{Phase, SelectionState};
use crate::test_support::sample_catalog;
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Strategy for catalog-style country names ("Japan", "United Kingdom").
fn arb_country() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][a-z]{2,11}( [A-Z][a-z]{2,11})?").unwrap()
}

/// Strategy for arbitrary user input, including blanks and odd casing.
fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just(" ".to_string()),
        arb_country(),
        arb_country().prop_map(|c| c.to_lowercase()),
        arb_country().prop_map(|c| format!(" {c} ")),
        ".{0,24}",
    ]
}

fn arb_policy() -> impl Strategy<Value = Policy> {
    (
        "[1-9][0-9]{0,2}",
        1u32..2000,
        prop::collection::btree_set(arb_country(), 1..8),
    )
        .prop_map(|(id, hours, countries)| {
            Policy::new(id.clone(), format!("Policy {id}"), hours, countries)
                .expect("generated policy is valid")
        })
}

#[derive(Clone, Debug)]
enum Event {
    Select(String),
    Country(String),
    Check,
    ClearPolicy,
    ClearCountry,
    Reset,
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        prop_oneof![Just("1"), Just("2"), Just("99")].prop_map(|id| Event::Select(id.to_string())),
        prop_oneof![
            Just("United States".to_string()),
            Just("Japan".to_string()),
            Just("Malaysia".to_string()),
            Just("united states".to_string()),
            arb_input(),
        ]
        .prop_map(Event::Country),
        Just(Event::Check),
        Just(Event::ClearPolicy),
        Just(Event::ClearCountry),
        Just(Event::Reset),
    ]
}

fn apply(state: &mut SelectionState<'_>, event: &Event) {
    match event {
        Event::Select(id) => {
            let _ = state.select_policy(id);
        }
        Event::Country(c) => state.set_country(c.clone()),
        Event::Check => state.check_eligibility(),
        Event::ClearPolicy => state.clear_policy(),
        Event::ClearCountry => state.clear_country(),
        Event::Reset => state.reset(),
    }
}

// ============================================================================
// Property tests: Eligibility evaluator
// ============================================================================

proptest! {
    /// Eligibility is exactly set membership.
    #[test]
    fn eligibility_is_exact_membership(policy in arb_policy(), country in arb_input()) {
        prop_assert_eq!(
            is_eligible(&policy, &country),
            policy.eligible_countries().contains(&country)
        );
    }

    /// Every listed country is eligible; the empty string never is.
    #[test]
    fn listed_countries_are_eligible(policy in arb_policy()) {
        for country in policy.eligible_countries() {
            prop_assert!(is_eligible(&policy, country));
        }
        prop_assert!(!is_eligible(&policy, ""));
    }

    /// Countries outside the set are not eligible.
    #[test]
    fn unlisted_countries_are_not_eligible(policy in arb_policy(), country in arb_input()) {
        prop_assume!(!policy.eligible_countries().contains(&country));
        prop_assert!(!is_eligible(&policy, &country));
    }

    /// A near match never overrides the result and always points at a listed entry.
    #[test]
    fn near_match_is_advisory_only(policy in arb_policy(), country in arb_input()) {
        if let Some(entry) = near_match(&policy, &country) {
            prop_assert!(!is_eligible(&policy, &country));
            prop_assert!(policy.eligible_countries().contains(entry));
        }
    }

    /// Lowercasing a listed multi-letter name yields a near match, never eligibility.
    #[test]
    fn lowercase_listed_country_is_near_match(policy in arb_policy()) {
        for country in policy.eligible_countries() {
            let lower = country.to_lowercase();
            prop_assume!(!policy.eligible_countries().contains(&lower));
            prop_assert!(!is_eligible(&policy, &lower));
            prop_assert!(near_match(&policy, &lower).is_some());
        }
    }

    /// Reverse lookup agrees with the evaluator.
    #[test]
    fn policies_for_matches_evaluator(
        policies in prop::collection::vec(arb_policy(), 1..5),
        country in arb_input(),
    ) {
        let mut seen = BTreeSet::new();
        let unique: Vec<Policy> = policies
            .into_iter()
            .filter(|p| seen.insert(p.id().clone()))
            .collect();
        let catalog = PolicyCatalog::new(unique).expect("unique ids");

        let expected: Vec<&str> = catalog
            .list_policies()
            .iter()
            .filter(|p| is_eligible(p, &country))
            .map(|p| p.id().as_str())
            .collect();
        let actual: Vec<&str> = catalog
            .policies_for(&country)
            .iter()
            .map(|p| p.id().as_str())
            .collect();
        prop_assert_eq!(actual, expected);
    }
}

// ============================================================================
// Property tests: Selection state
// ============================================================================

proptest! {
    /// Repeated checks without input changes leave the result untouched.
    #[test]
    fn check_is_idempotent(
        events in prop::collection::vec(arb_event(), 0..12),
        repeats in 1usize..5,
    ) {
        let catalog = sample_catalog();
        let mut state = SelectionState::empty(&catalog);
        for event in &events {
            apply(&mut state, event);
        }
        let before = state.is_eligible();
        for _ in 0..repeats {
            state.check_eligibility();
            prop_assert_eq!(state.is_eligible(), before);
        }
    }

    /// Setting country then policy equals setting policy then country.
    #[test]
    fn choice_order_does_not_matter(
        id in prop_oneof![Just("1"), Just("2")],
        country in arb_input(),
    ) {
        let catalog = sample_catalog();

        let mut a = SelectionState::empty(&catalog);
        a.set_country(country.clone());
        a.select_policy(id).expect("known id");

        let mut b = SelectionState::empty(&catalog);
        b.select_policy(id).expect("known id");
        b.set_country(country.clone());

        prop_assert_eq!(a.is_eligible(), b.is_eligible());
        prop_assert_eq!(a.phase(), Phase::BothSelected);
    }

    /// The flag is defined exactly when both inputs are set, and always matches them.
    #[test]
    fn result_is_never_stale(
        default_first in any::<bool>(),
        events in prop::collection::vec(arb_event(), 0..24),
    ) {
        let catalog = sample_catalog();
        let default_selection = if default_first {
            DefaultSelection::First
        } else {
            DefaultSelection::None
        };
        let mut state = SelectionState::new(&catalog, &default_selection).expect("new");

        for event in &events {
            apply(&mut state, event);

            let expected = match (state.selected_policy(), state.declared_country()) {
                (Some(p), Some(c)) => Some(is_eligible(p, c)),
                _ => None,
            };
            prop_assert_eq!(state.is_eligible(), expected);
            prop_assert_eq!(
                state.is_eligible().is_some(),
                state.phase() == Phase::BothSelected
            );
        }
    }

    /// A lone country never produces a result.
    #[test]
    fn country_alone_is_unset(country in arb_input()) {
        let catalog = sample_catalog();
        let mut state = SelectionState::empty(&catalog);
        state.set_country(country);
        state.check_eligibility();
        prop_assert_eq!(state.is_eligible(), None);
    }
}
