use visafree_domain::{DefaultSelection, InputMode, SessionOptions};

/// Preset profiles are opinionated defaults.
///
/// Anything beyond these two belongs in `visafree.toml`.
pub fn preset(profile: &str) -> SessionOptions {
    match profile {
        "lookup" => lookup_profile(),
        // default
        _ => site_profile(),
    }
}

/// The travel site: first policy preselected, countries picked from a dropdown.
fn site_profile() -> SessionOptions {
    SessionOptions {
        profile: "site".to_string(),
        default_selection: DefaultSelection::First,
        input_mode: InputMode::Selector,
    }
}

/// Ad-hoc lookups: nothing preselected, countries typed in.
fn lookup_profile() -> SessionOptions {
    SessionOptions {
        profile: "lookup".to_string(),
        default_selection: DefaultSelection::None,
        input_mode: InputMode::FreeText,
    }
}
