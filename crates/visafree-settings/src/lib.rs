//! Config parsing and profile/preset resolution.
//!
//! No IO here: configuration arrives as strings and leaves as domain types.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{PolicyConfig, VisafreeConfigV1};
pub use resolve::{CatalogSource, Overrides, ResolvedConfig};

/// Parse `visafree.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<VisafreeConfigV1> {
    let cfg: VisafreeConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective session options and catalog (profile + overrides + policies).
pub fn resolve_config(
    cfg: VisafreeConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
