//! The canonical policy table.
//!
//! This is the single source of policy data; there is no second, overlapping table elsewhere.
//! Entries are plain static data and are validated when turned into a [`PolicyCatalog`].

#![forbid(unsafe_code)]

use visafree_domain::{CatalogError, Policy, PolicyCatalog};

/// Static description of one builtin policy.
#[derive(Debug, Clone, Copy)]
pub struct PolicyEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub duration_hours: u32,
    pub countries: &'static [&'static str],
}

pub const POLICY_TRANSIT_240H: &str = "1";
pub const POLICY_UNILATERAL_30D: &str = "2";
pub const POLICY_ASEAN_GROUP_144H: &str = "3";

const TRANSIT_240H_COUNTRIES: &[&str] = &[
    "Albania",
    "Argentina",
    "Australia",
    "Austria",
    "Belarus",
    "Belgium",
    "Bosnia and Herzegovina",
    "Brazil",
    "Brunei",
    "Bulgaria",
    "Canada",
    "Chile",
    "Croatia",
    "Cyprus",
    "Czech Republic",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "Indonesia",
    "Ireland",
    "Italy",
    "Japan",
    "Latvia",
    "Lithuania",
    "Luxembourg",
    "Malta",
    "Mexico",
    "Monaco",
    "Montenegro",
    "Netherlands",
    "New Zealand",
    "North Macedonia",
    "Norway",
    "Poland",
    "Portugal",
    "Qatar",
    "Romania",
    "Russia",
    "Serbia",
    "Singapore",
    "Slovakia",
    "Slovenia",
    "South Korea",
    "Spain",
    "Sweden",
    "Switzerland",
    "Ukraine",
    "United Arab Emirates",
    "United Kingdom",
    "United States",
];

const UNILATERAL_30D_COUNTRIES: &[&str] = &[
    "Andorra",
    "Argentina",
    "Australia",
    "Austria",
    "Azerbaijan",
    "Bahrain",
    "Belgium",
    "Brazil",
    "Bulgaria",
    "Chile",
    "Croatia",
    "Cyprus",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "Ireland",
    "Italy",
    "Japan",
    "Kuwait",
    "Latvia",
    "Liechtenstein",
    "Luxembourg",
    "Malaysia",
    "Malta",
    "Monaco",
    "Montenegro",
    "Netherlands",
    "New Zealand",
    "North Macedonia",
    "Norway",
    "Oman",
    "Peru",
    "Poland",
    "Portugal",
    "Romania",
    "Saudi Arabia",
    "Slovakia",
    "Slovenia",
    "South Korea",
    "Spain",
    "Switzerland",
    "Uruguay",
];

const ASEAN_GROUP_144H_COUNTRIES: &[&str] = &[
    "Brunei",
    "Cambodia",
    "Indonesia",
    "Laos",
    "Malaysia",
    "Myanmar",
    "Philippines",
    "Singapore",
    "Thailand",
    "Vietnam",
];

/// Builtin policies in display order. The first entry is the default selection.
pub const BUILTIN_POLICIES: &[PolicyEntry] = &[
    PolicyEntry {
        id: POLICY_TRANSIT_240H,
        name: "240-Hour Transit Visa-Free",
        duration_hours: 240,
        countries: TRANSIT_240H_COUNTRIES,
    },
    PolicyEntry {
        id: POLICY_UNILATERAL_30D,
        name: "30-Day Unilateral Visa-Free Entry",
        duration_hours: 720,
        countries: UNILATERAL_30D_COUNTRIES,
    },
    PolicyEntry {
        id: POLICY_ASEAN_GROUP_144H,
        name: "144-Hour ASEAN Tour Group Visa-Free",
        duration_hours: 144,
        countries: ASEAN_GROUP_144H_COUNTRIES,
    },
];

impl PolicyEntry {
    pub fn to_policy(&self) -> Result<Policy, CatalogError> {
        Policy::new(
            self.id,
            self.name,
            self.duration_hours,
            self.countries.iter().copied(),
        )
    }
}

/// Validate and return the builtin policies.
pub fn builtin_policies() -> Result<Vec<Policy>, CatalogError> {
    BUILTIN_POLICIES.iter().map(PolicyEntry::to_policy).collect()
}

/// The builtin catalog.
pub fn builtin_catalog() -> Result<PolicyCatalog, CatalogError> {
    PolicyCatalog::new(builtin_policies()?)
}
