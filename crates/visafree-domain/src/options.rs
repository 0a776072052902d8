use crate::model::PolicyId;

/// How the host collects the declared country.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Dropdown restricted to catalog names; exact matches are guaranteed.
    Selector,
    /// Free text; exact matching may miss entries, so assessments are flagged.
    FreeText,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Selector => "selector",
            InputMode::FreeText => "free_text",
        }
    }
}

/// Which policy, if any, a fresh session starts with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefaultSelection {
    None,
    First,
    Policy(PolicyId),
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub profile: String,
    pub default_selection: DefaultSelection,
    pub input_mode: InputMode,
}
