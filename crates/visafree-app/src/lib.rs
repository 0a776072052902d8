//! Use case orchestration for visafree.
//!
//! This crate provides the application layer: use cases that coordinate settings, the domain,
//! and report building. Eligibility decisions stay in the domain crate.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod catalog;
mod check;
mod config;
mod explain;
mod report;
mod session;

pub use catalog::{
    format_countries, format_policy_table, policies_json, run_countries, run_policies,
};
pub use check::{run_check, status_exit_code, CheckInput, CheckOutput};
pub use config::load_config;
pub use explain::{
    format_explanation, format_not_found, format_policy, run_explain, ExplainOutput,
};
pub use report::{build_report, parse_report_json, runtime_error_report, serialize_report};
pub use session::{format_step, parse_event, run_session, SessionEvent, SessionStep};
