//! Pure eligibility evaluation (no IO).
//!
//! Input: a policy catalog constructed elsewhere, plus the user's policy and country choices.
//! Output: an eligibility flag that is never stale, and a presentation-ready assessment.

#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod options;
pub mod report;
pub mod session;

mod eligibility;

pub use eligibility::{is_eligible, near_match};
pub use error::{CatalogError, UnknownPolicy};
pub use model::{Policy, PolicyCatalog, PolicyId};
pub use options::{DefaultSelection, InputMode, SessionOptions};
pub use report::{assess, Assessment};
pub use session::{Phase, SelectionState};

#[cfg(test)]
mod properties;
#[cfg(test)]
mod test_support;
