//! Stable DTOs and IDs used across the visafree workspace.
//!
//! Contents:
//! - data types for the emitted eligibility report
//! - stable advisory codes
//! - explain registry for advisory guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod report;

pub use explain::{lookup_explanation, ExamplePair, Explanation};
pub use report::{
    Advisory, EligibilityReport, EligibilityStatus, PolicySummary, ToolMeta, SCHEMA_REPORT_V1,
};
