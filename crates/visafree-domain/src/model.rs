use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use visafree_types::PolicySummary;

/// Stable policy identifier (e.g. `"1"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(String);

impl PolicyId {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PolicyId {
    fn from(value: &str) -> Self {
        PolicyId::new(value)
    }
}

/// A visa-free policy: who may stay, and for how long.
///
/// Fields are private so that a `Policy` can only exist in a validated state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Policy {
    id: PolicyId,
    name: String,
    duration_hours: u32,
    eligible_countries: BTreeSet<String>,
}

impl Policy {
    pub fn new<I, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        duration_hours: u32,
        countries: I,
    ) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id: String = id.into();
        if id.trim().is_empty() {
            return Err(CatalogError::BlankPolicyId);
        }

        let name: String = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::BlankPolicyName { id });
        }
        if duration_hours == 0 {
            return Err(CatalogError::ZeroDuration { id });
        }

        let mut eligible_countries = BTreeSet::new();
        for country in countries {
            let country: String = country.into();
            if country.trim().is_empty() {
                return Err(CatalogError::BlankCountry { id });
            }
            if country.trim() != country {
                return Err(CatalogError::UntrimmedCountry { id, country });
            }
            if eligible_countries.contains(&country) {
                return Err(CatalogError::DuplicateCountry { id, country });
            }
            eligible_countries.insert(country);
        }
        if eligible_countries.is_empty() {
            return Err(CatalogError::NoEligibleCountries { id });
        }

        Ok(Self {
            id: PolicyId(id),
            name,
            duration_hours,
            eligible_countries,
        })
    }

    pub fn id(&self) -> &PolicyId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration_hours(&self) -> u32 {
        self.duration_hours
    }

    /// Whole days covered by the policy, rounded down.
    pub fn duration_days(&self) -> u32 {
        self.duration_hours / 24
    }

    pub fn eligible_countries(&self) -> &BTreeSet<String> {
        &self.eligible_countries
    }

    pub fn summary(&self) -> PolicySummary {
        PolicySummary {
            id: self.id.to_string(),
            name: self.name.clone(),
            duration_hours: self.duration_hours,
        }
    }
}

/// The immutable, ordered set of policies a session chooses from.
///
/// Built once at startup and shared by reference; there is no way to mutate it afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PolicyCatalog {
    policies: Vec<Policy>,
}

impl PolicyCatalog {
    pub fn new(policies: Vec<Policy>) -> Result<Self, CatalogError> {
        if policies.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for policy in &policies {
            if !seen.insert(policy.id.as_str()) {
                return Err(CatalogError::DuplicatePolicyId {
                    id: policy.id.to_string(),
                });
            }
        }

        Ok(Self { policies })
    }

    /// Append `extra` after the existing policies, keeping id uniqueness.
    pub fn merged_with(self, extra: Vec<Policy>) -> Result<Self, CatalogError> {
        let mut policies = self.policies;
        policies.extend(extra);
        PolicyCatalog::new(policies)
    }

    /// Policies in declaration order. Same slice on every call.
    pub fn list_policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn get(&self, id: &str) -> Option<&Policy> {
        self.policies.iter().find(|p| p.id.as_str() == id)
    }

    pub fn first(&self) -> &Policy {
        // Non-empty by construction.
        &self.policies[0]
    }

    /// Sorted union of every policy's eligible countries.
    pub fn known_countries(&self) -> Vec<&str> {
        let all: BTreeSet<&str> = self
            .policies
            .iter()
            .flat_map(|p| p.eligible_countries.iter().map(String::as_str))
            .collect();
        all.into_iter().collect()
    }

    /// Every policy under which `country` is eligible, in catalog order.
    pub fn policies_for(&self, country: &str) -> Vec<&Policy> {
        self.policies
            .iter()
            .filter(|p| crate::is_eligible(p, country))
            .collect()
    }
}
