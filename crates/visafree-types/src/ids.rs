//! Stable identifiers for advisory codes and schemas.
//!
//! Codes are short snake_case discriminators. They appear in reports and are accepted by
//! `visafree explain`.

// Codes: selection
pub const CODE_POLICY_NOT_SELECTED: &str = "policy_not_selected";
pub const CODE_COUNTRY_NOT_DECLARED: &str = "country_not_declared";

// Codes: eligibility
pub const CODE_COUNTRY_NOT_LISTED: &str = "country_not_listed";
pub const CODE_NEAR_MATCH: &str = "near_match";

// Codes: input
pub const CODE_FREE_TEXT_INPUT: &str = "free_text_input";

// Tool-level
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";

// Schemas
pub const SCHEMA_CONFIG_V1: &str = "visafree.config.v1";
