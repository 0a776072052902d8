//! Selection state: the two user choices and the eligibility flag derived from them.

use crate::eligibility::is_eligible;
use crate::error::UnknownPolicy;
use crate::model::{Policy, PolicyCatalog, PolicyId};
use crate::options::DefaultSelection;

/// Which of the two inputs are currently set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Empty,
    PolicyOnly,
    CountryOnly,
    BothSelected,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Empty => "empty",
            Phase::PolicyOnly => "policy_only",
            Phase::CountryOnly => "country_only",
            Phase::BothSelected => "both_selected",
        }
    }
}

/// Per-session selection state.
///
/// `is_eligible` is recomputed on every mutation, so it is `Some` exactly when both a policy
/// and a country are set, and it always reflects the latest pair.
#[derive(Clone, Debug)]
pub struct SelectionState<'c> {
    catalog: &'c PolicyCatalog,
    initial: Option<&'c Policy>,
    policy: Option<&'c Policy>,
    country: Option<String>,
    eligible: Option<bool>,
}

impl<'c> SelectionState<'c> {
    /// Start a session. `DefaultSelection::Policy` fails if the id is not in the catalog.
    pub fn new(
        catalog: &'c PolicyCatalog,
        default_selection: &DefaultSelection,
    ) -> Result<Self, UnknownPolicy> {
        let initial = match default_selection {
            DefaultSelection::None => None,
            DefaultSelection::First => Some(catalog.first()),
            DefaultSelection::Policy(id) => Some(catalog.get(id.as_str()).ok_or_else(|| {
                UnknownPolicy {
                    id: id.to_string(),
                }
            })?),
        };

        Ok(Self {
            catalog,
            initial,
            policy: initial,
            country: None,
            eligible: None,
        })
    }

    /// A session with nothing selected.
    pub fn empty(catalog: &'c PolicyCatalog) -> Self {
        Self {
            catalog,
            initial: None,
            policy: None,
            country: None,
            eligible: None,
        }
    }

    /// Select a policy by id and recompute.
    ///
    /// An unknown id clears the selection, so eligibility becomes unset rather than
    /// reporting the previous policy's answer.
    pub fn select_policy(&mut self, id: &str) -> Result<&'c Policy, UnknownPolicy> {
        let catalog: &'c PolicyCatalog = self.catalog;
        let found = catalog.get(id);
        self.policy = found;
        self.recompute();
        found.ok_or_else(|| UnknownPolicy { id: id.to_string() })
    }

    /// Declare a country, taken verbatim, and recompute.
    pub fn set_country(&mut self, name: impl Into<String>) {
        self.country = Some(name.into());
        self.recompute();
    }

    /// Recompute from the current inputs. Leaves eligibility unset if either is missing.
    pub fn check_eligibility(&mut self) {
        self.recompute();
    }

    pub fn clear_policy(&mut self) {
        self.policy = None;
        self.recompute();
    }

    pub fn clear_country(&mut self) {
        self.country = None;
        self.recompute();
    }

    /// Back to the state the session was created with.
    pub fn reset(&mut self) {
        self.policy = self.initial;
        self.country = None;
        self.recompute();
    }

    pub fn is_eligible(&self) -> Option<bool> {
        self.eligible
    }

    pub fn phase(&self) -> Phase {
        match (self.policy.is_some(), self.country.is_some()) {
            (false, false) => Phase::Empty,
            (true, false) => Phase::PolicyOnly,
            (false, true) => Phase::CountryOnly,
            (true, true) => Phase::BothSelected,
        }
    }

    pub fn selected_policy(&self) -> Option<&'c Policy> {
        self.policy
    }

    pub fn selected_policy_id(&self) -> Option<&'c PolicyId> {
        self.policy.map(Policy::id)
    }

    pub fn declared_country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn catalog(&self) -> &'c PolicyCatalog {
        self.catalog
    }

    fn recompute(&mut self) {
        self.eligible = match (self.policy, self.country.as_deref()) {
            (Some(policy), Some(country)) => Some(is_eligible(policy, country)),
            _ => None,
        };
    }
}
