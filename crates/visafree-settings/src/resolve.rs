use crate::{
    model::{PolicyConfig, VisafreeConfigV1},
    presets,
};
use anyhow::Context;
use visafree_domain::{DefaultSelection, InputMode, Policy, PolicyCatalog, SessionOptions};
use visafree_types::ids;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub default_policy: Option<String>,
    pub input: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    Custom,
    Merged,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub options: SessionOptions,
    pub catalog: PolicyCatalog,
    pub catalog_source: CatalogSource,
}

pub fn resolve_config(
    cfg: VisafreeConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != ids::SCHEMA_CONFIG_V1
    {
        anyhow::bail!(
            "unsupported config schema: {schema} (expected {})",
            ids::SCHEMA_CONFIG_V1
        );
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "site".to_string());

    let mut options = presets::preset(&profile);

    // Input mode
    if let Some(input) = overrides.input.clone().or(cfg.input.clone()) {
        options.input_mode = parse_input_mode(&input)?;
    }

    // Default selection
    if let Some(default_policy) = overrides
        .default_policy
        .clone()
        .or(cfg.default_policy.clone())
    {
        options.default_selection = parse_default_selection(&default_policy)?;
    }

    // Catalog
    let catalog_source = parse_catalog_source(cfg.catalog.as_deref().unwrap_or("builtin"))?;
    let configured = build_policies(&cfg.policies)?;

    let catalog = match catalog_source {
        CatalogSource::Builtin => {
            if !configured.is_empty() {
                anyhow::bail!(
                    "[[policies]] are ignored by the builtin catalog; set catalog = \"custom\" or \"merged\""
                );
            }
            visafree_catalog::builtin_catalog().context("builtin catalog")?
        }
        CatalogSource::Custom => PolicyCatalog::new(configured).context("custom catalog")?,
        CatalogSource::Merged => visafree_catalog::builtin_catalog()
            .context("builtin catalog")?
            .merged_with(configured)
            .context("merged catalog")?,
    };

    if let DefaultSelection::Policy(id) = &options.default_selection
        && catalog.get(id.as_str()).is_none()
    {
        anyhow::bail!("default_policy {id} is not in the catalog");
    }

    Ok(ResolvedConfig {
        options,
        catalog,
        catalog_source,
    })
}

fn build_policies(entries: &[PolicyConfig]) -> anyhow::Result<Vec<Policy>> {
    entries
        .iter()
        .map(|p| {
            Policy::new(
                p.id.clone(),
                p.name.clone(),
                p.duration_hours,
                p.countries.iter().cloned(),
            )
            .with_context(|| format!("invalid policy entry {:?}", p.id))
        })
        .collect()
}

fn parse_input_mode(v: &str) -> anyhow::Result<InputMode> {
    match v {
        "selector" | "dropdown" => Ok(InputMode::Selector),
        "free_text" | "free-text" => Ok(InputMode::FreeText),
        other => anyhow::bail!("unknown input: {other} (expected 'selector' or 'free_text')"),
    }
}

fn parse_default_selection(v: &str) -> anyhow::Result<DefaultSelection> {
    match v.trim() {
        "" => anyhow::bail!("default_policy must not be blank (expected first|none|<policy id>)"),
        "first" => Ok(DefaultSelection::First),
        "none" => Ok(DefaultSelection::None),
        id => Ok(DefaultSelection::Policy(id.into())),
    }
}

fn parse_catalog_source(v: &str) -> anyhow::Result<CatalogSource> {
    match v {
        "builtin" => Ok(CatalogSource::Builtin),
        "custom" => Ok(CatalogSource::Custom),
        "merged" => Ok(CatalogSource::Merged),
        other => anyhow::bail!("unknown catalog: {other} (expected builtin|custom|merged)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    fn resolve(text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
        resolve_config(parse_config_toml(text)?, overrides)
    }

    #[test]
    fn empty_config_uses_site_profile_and_builtin_catalog() {
        let resolved = resolve("", Overrides::default()).expect("resolve");
        assert_eq!(resolved.options.profile, "site");
        assert_eq!(resolved.options.default_selection, DefaultSelection::First);
        assert_eq!(resolved.options.input_mode, InputMode::Selector);
        assert_eq!(resolved.catalog_source, CatalogSource::Builtin);
        assert_eq!(resolved.catalog.first().id().as_str(), "1");
    }

    #[test]
    fn lookup_profile_disables_preselection() {
        let resolved = resolve("profile = \"lookup\"", Overrides::default()).expect("resolve");
        assert_eq!(resolved.options.default_selection, DefaultSelection::None);
        assert_eq!(resolved.options.input_mode, InputMode::FreeText);
    }

    #[test]
    fn unknown_profile_falls_back_to_site() {
        let resolved = resolve("profile = \"kiosk\"", Overrides::default()).expect("resolve");
        assert_eq!(resolved.options.profile, "site");
    }

    #[test]
    fn overrides_win_over_config() {
        let text = r#"
profile = "lookup"
input = "free_text"
default_policy = "none"
"#;
        let overrides = Overrides {
            profile: None,
            default_policy: Some("2".to_string()),
            input: Some("selector".to_string()),
        };
        let resolved = resolve(text, overrides).expect("resolve");
        assert_eq!(resolved.options.profile, "lookup");
        assert_eq!(resolved.options.input_mode, InputMode::Selector);
        assert_eq!(
            resolved.options.default_selection,
            DefaultSelection::Policy("2".into())
        );
    }

    #[test]
    fn custom_catalog_replaces_builtin() {
        let text = r#"
catalog = "custom"

[[policies]]
id = "a"
name = "72-Hour Test Policy"
duration_hours = 72
countries = ["Japan", "Chile"]
"#;
        let resolved = resolve(text, Overrides::default()).expect("resolve");
        assert_eq!(resolved.catalog_source, CatalogSource::Custom);
        assert_eq!(resolved.catalog.list_policies().len(), 1);
        assert_eq!(resolved.catalog.first().id().as_str(), "a");
    }

    #[test]
    fn merged_catalog_appends_and_rejects_collisions() {
        let text = r#"
catalog = "merged"

[[policies]]
id = "9"
name = "72-Hour Test Policy"
duration_hours = 72
countries = ["Chile"]
"#;
        let resolved = resolve(text, Overrides::default()).expect("resolve");
        let ids: Vec<&str> = resolved
            .catalog
            .list_policies()
            .iter()
            .map(|p| p.id().as_str())
            .collect();
        assert_eq!(ids.last(), Some(&"9"));

        let colliding = text.replace("id = \"9\"", "id = \"1\"");
        let err = resolve(&colliding, Overrides::default()).expect_err("collision");
        assert!(format!("{err:#}").contains("defined more than once"));
    }

    #[test]
    fn policies_require_non_builtin_catalog() {
        let text = r#"
[[policies]]
id = "9"
name = "72-Hour Test Policy"
duration_hours = 72
countries = ["Chile"]
"#;
        let err = resolve(text, Overrides::default()).expect_err("builtin with policies");
        assert!(err.to_string().contains("catalog = \"custom\""));
    }

    #[test]
    fn invalid_policy_entry_is_reported_with_id() {
        let text = r#"
catalog = "custom"

[[policies]]
id = "bad"
name = "Empty"
duration_hours = 24
countries = []
"#;
        let err = resolve(text, Overrides::default()).expect_err("empty countries");
        let msg = format!("{err:#}");
        assert!(msg.contains("invalid policy entry \"bad\""));
        assert!(msg.contains("must not be empty"));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let text = r#"
catalog = "custom"

[[policies]]
id = "z"
name = "Zero"
duration_hours = 0
countries = ["Japan"]
"#;
        let err = resolve(text, Overrides::default()).expect_err("zero duration");
        assert!(format!("{err:#}").contains("greater than zero"));
    }

    #[test]
    fn default_policy_must_exist_in_catalog() {
        let err = resolve("default_policy = \"99\"", Overrides::default()).expect_err("unknown");
        assert!(err.to_string().contains("default_policy 99"));
    }

    #[test]
    fn invalid_enum_values_are_rejected() {
        assert!(resolve("input = \"voice\"", Overrides::default()).is_err());
        assert!(resolve("catalog = \"remote\"", Overrides::default()).is_err());
        assert!(resolve("default_policy = \"  \"", Overrides::default()).is_err());
        assert!(resolve("schema = \"visafree.config.v9\"", Overrides::default()).is_err());
    }

    #[test]
    fn input_accepts_cli_spelling() {
        let overrides = Overrides {
            input: Some("free-text".to_string()),
            ..Overrides::default()
        };
        let resolved = resolve("", overrides).expect("resolve");
        assert_eq!(resolved.options.input_mode, InputMode::FreeText);
    }
}
