use crate::config::Config;
use crate::validate::validate_config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Loads scan configuration from a `vigil.toml` file.
///
/// A missing file is not an error: the builtin registry and default budgets
/// cover the no-config case, so absence yields `Config::default()`. A file
/// that exists but does not parse, or that carries an out-of-range budget or
/// a malformed rule pattern, is fatal here so a bad registry never reaches a
/// scan.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scan config at {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Scan config at {:?} is not valid TOML", path))?;

    validate_config(&config).with_context(|| format!("Rejected scan config at {:?}", path))?;

    Ok(config)
}
