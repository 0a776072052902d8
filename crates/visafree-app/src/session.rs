//! The `session` use case: replay UI events against one selection state.
//!
//! Script format is one event per line:
//!
//! ```text
//! # comment
//! policy 1
//! country United States
//! check
//! clear country
//! clear policy
//! reset
//! ```

use anyhow::Context;
use visafree_domain::{near_match, InputMode, Phase, SelectionState};
use visafree_settings::ResolvedConfig;
use visafree_types::EligibilityStatus;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SelectPolicy(String),
    SetCountry(String),
    Check,
    ClearPolicy,
    ClearCountry,
    Reset,
}

/// State after one event (or the initial state, when `event` is `None`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionStep {
    pub line: usize,
    pub event: Option<SessionEvent>,
    pub phase: Phase,
    pub policy: Option<String>,
    pub country: Option<String>,
    pub status: EligibilityStatus,
    pub note: Option<String>,
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_event(line: &str) -> anyhow::Result<Option<SessionEvent>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let body = line.trim_start();
    if body.is_empty() || body.starts_with('#') {
        return Ok(None);
    }

    let (verb, raw_rest) = match body.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, Some(rest)),
        None => (body, None),
    };

    // The country is taken verbatim after the single separator; exact matching depends on it.
    if verb == "country" {
        return match raw_rest {
            Some(name) if !name.trim().is_empty() => {
                Ok(Some(SessionEvent::SetCountry(name.to_string())))
            }
            _ => anyhow::bail!("`country` needs a country name"),
        };
    }

    let rest = raw_rest.map(str::trim).filter(|r| !r.is_empty());
    let event = match (verb, rest) {
        ("policy", Some(id)) => SessionEvent::SelectPolicy(id.to_string()),
        ("policy", None) => anyhow::bail!("`policy` needs a policy id"),
        ("check", None) => SessionEvent::Check,
        ("reset", None) => SessionEvent::Reset,
        (verb @ ("check" | "reset"), Some(_)) => anyhow::bail!("`{verb}` takes no arguments"),
        ("clear", Some(what)) => match what {
            "policy" => SessionEvent::ClearPolicy,
            "country" => SessionEvent::ClearCountry,
            other => anyhow::bail!("cannot clear {other:?} (expected policy or country)"),
        },
        ("clear", None) => anyhow::bail!("`clear` needs policy or country"),
        (other, _) => anyhow::bail!("unknown event: {other}"),
    };

    Ok(Some(event))
}

/// Replay `script` on a fresh session built from `resolved`.
///
/// Unknown policy ids do not abort the replay: the selection is cleared and the step carries a
/// note, which is how a UI would treat a stale link.
pub fn run_session(resolved: &ResolvedConfig, script: &str) -> anyhow::Result<Vec<SessionStep>> {
    let mut state = SelectionState::new(&resolved.catalog, &resolved.options.default_selection)
        .context("apply default selection")?;
    let input_mode = resolved.options.input_mode;

    let mut steps = vec![snapshot(&state, 0, None, None)];

    for (idx, raw) in script.lines().enumerate() {
        let line_no = idx + 1;
        let Some(event) = parse_event(raw).with_context(|| format!("line {line_no}"))? else {
            continue;
        };

        let mut note = None;
        match &event {
            SessionEvent::SelectPolicy(id) => match state.select_policy(id) {
                Ok(_) => note = near_match_note(&state, input_mode, line_no),
                Err(err) => {
                    tracing::warn!(line = line_no, "{err}");
                    note = Some(err.to_string());
                }
            },
            SessionEvent::SetCountry(name) => {
                state.set_country(name.clone());
                note = near_match_note(&state, input_mode, line_no);
            }
            SessionEvent::Check => state.check_eligibility(),
            SessionEvent::ClearPolicy => state.clear_policy(),
            SessionEvent::ClearCountry => state.clear_country(),
            SessionEvent::Reset => state.reset(),
        }

        let step = snapshot(&state, line_no, Some(event), note);
        tracing::debug!(
            line = line_no,
            phase = step.phase.as_str(),
            status = step.status.as_str(),
            "session event"
        );
        steps.push(step);
    }

    Ok(steps)
}

/// In free-text mode, name the catalog entry a declared country nearly matches.
fn near_match_note(
    state: &SelectionState<'_>,
    input_mode: InputMode,
    line_no: usize,
) -> Option<String> {
    if input_mode != InputMode::FreeText {
        return None;
    }
    let policy = state.selected_policy()?;
    let declared = state.declared_country()?;
    let entry = near_match(policy, declared)?;
    tracing::warn!(line = line_no, declared, catalog = entry, "near match");
    Some(format!("did you mean {entry:?}?"))
}

fn snapshot(
    state: &SelectionState<'_>,
    line: usize,
    event: Option<SessionEvent>,
    note: Option<String>,
) -> SessionStep {
    SessionStep {
        line,
        event,
        phase: state.phase(),
        policy: state.selected_policy_id().map(|id| id.to_string()),
        country: state.declared_country().map(str::to_string),
        status: EligibilityStatus::from_flag(state.is_eligible()),
        note,
    }
}

pub fn format_step(step: &SessionStep) -> String {
    let label = match &step.event {
        None => "start".to_string(),
        Some(SessionEvent::SelectPolicy(id)) => format!("policy {id}"),
        Some(SessionEvent::SetCountry(name)) => format!("country {name:?}"),
        Some(SessionEvent::Check) => "check".to_string(),
        Some(SessionEvent::ClearPolicy) => "clear policy".to_string(),
        Some(SessionEvent::ClearCountry) => "clear country".to_string(),
        Some(SessionEvent::Reset) => "reset".to_string(),
    };

    let mut out = format!(
        "{:>3} {:<24} {:<13} policy={} country={} status={}",
        step.line,
        label,
        step.phase.as_str(),
        step.policy.as_deref().unwrap_or("-"),
        step.country
            .as_deref()
            .map(|c| format!("{c:?}"))
            .unwrap_or_else(|| "-".to_string()),
        step.status.as_str()
    );
    if let Some(note) = &step.note {
        out.push_str(&format!(" ({note})"));
    }
    out
}
