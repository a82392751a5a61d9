//! Project initialization.
//!
//! Writes a default `notepress.toml` so a vault can be wired up by editing
//! paths instead of remembering section names.

use crate::config::PublishConfig;
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Write the default configuration to `config_path`.
pub fn write_default_config(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        bail!(
            "Config file `{}` already exists. Remove it manually or init in a different path.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(&PublishConfig::default())?;
    fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}
