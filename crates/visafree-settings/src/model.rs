use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `visafree.toml` schema v1.
///
/// This is a *user-facing* config model: values stay as strings here and are validated during
/// resolution, so error messages can name the offending field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VisafreeConfigV1 {
    /// Optional schema string for tooling (`visafree.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `site` (default) or `lookup`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// `first`, `none`, or a policy id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_policy: Option<String>,

    /// How countries are entered: `selector` or `free_text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// `builtin` (default), `custom`, or `merged`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    /// Policy table entries, used by the `custom` and `merged` catalogs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<PolicyConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyConfig {
    pub id: String,
    pub name: String,
    pub duration_hours: u32,

    /// Exact country names, compared case-sensitively.
    #[serde(default)]
    pub countries: Vec<String>,
}
