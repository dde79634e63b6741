use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use mapsize_core::config::AnalyzerConfig;

use crate::commands::load_config;

/// Write a default config file (YAML or JSON, by extension).
pub fn init_config_command(path: &str, force: bool) -> Result<()> {
    let path = Path::new(path);
    if path.exists() && !force {
        bail!("Config already exists at {} (use --force to overwrite)", path.display());
    }

    let body = AnalyzerConfig::default()
        .to_string_for(path)
        .with_context(|| format!("Failed to render config for {}", path.display()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, body).with_context(|| format!("Failed to write config {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Print the effective config as JSON.
pub fn show_config_command(config: Option<&str>) -> Result<()> {
    let config = load_config(config)?;
    let serialized =
        serde_json::to_string_pretty(&config).context("Failed to serialize config to JSON")?;
    println!("{}", serialized);
    Ok(())
}
