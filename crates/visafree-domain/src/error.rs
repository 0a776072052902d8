use thiserror::Error;

/// Rejected catalog data. Raised while constructing policies and catalogs, never while
/// evaluating eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one policy")]
    EmptyCatalog,

    #[error("policy id must not be blank")]
    BlankPolicyId,

    #[error("policy {id}: name must not be blank")]
    BlankPolicyName { id: String },

    #[error("policy {id}: duration_hours must be greater than zero")]
    ZeroDuration { id: String },

    #[error("policy {id}: eligible country list must not be empty")]
    NoEligibleCountries { id: String },

    #[error("policy {id}: country name must not be blank")]
    BlankCountry { id: String },

    #[error("policy {id}: country {country:?} has surrounding whitespace")]
    UntrimmedCountry { id: String, country: String },

    #[error("policy {id}: country {country:?} is listed more than once")]
    DuplicateCountry { id: String, country: String },

    #[error("policy id {id} is defined more than once")]
    DuplicatePolicyId { id: String },
}

/// A policy id that does not resolve in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown policy id: {id}")]
pub struct UnknownPolicy {
    pub id: String,
}
