//! Configuration file lookup and initialization.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use console::style;
use tracing::debug;

use tix_core::TixConfig;

/// Per-user configuration file, used when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tix")
        .join("config.json")
}

/// Load the explicit config file, else the per-user one, else defaults.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<TixConfig> {
    if let Some(path) = explicit {
        return TixConfig::from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()));
    }

    let user_path = default_config_path();
    if user_path.is_file() {
        debug!("Using config file {}", user_path.display());
        return TixConfig::from_file(&user_path)
            .with_context(|| format!("Failed to load config file {}", user_path.display()));
    }

    Ok(TixConfig::default())
}

/// Write the default configuration to `output_path`.
pub fn init(output_path: &Path, force: bool) -> anyhow::Result<()> {
    if output_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    TixConfig::default().save(output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}
