use anyhow::Context;
use visafree_settings::{Overrides, ResolvedConfig, VisafreeConfigV1};

/// Parse and resolve config text. An empty or whitespace-only text means "all defaults".
pub fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        VisafreeConfigV1::default()
    } else {
        visafree_settings::parse_config_toml(config_text).context("parse config")?
    };

    let resolved = visafree_settings::resolve_config(cfg, overrides).context("resolve config")?;

    tracing::debug!(
        profile = %resolved.options.profile,
        input = resolved.options.input_mode.as_str(),
        policies = resolved.catalog.list_policies().len(),
        "resolved config"
    );

    Ok(resolved)
}
