use std::path::Path;

use anyhow::{anyhow, Context, Result};
use mapsize_core::config::{AnalyzerConfig, DEFAULT_CONFIG_FILE};
use mapsize_core::{AnalysisReport, MapFormat};
use tracing::{debug, info};

use crate::read_map_file;

/// Parse a `--format` value.
pub fn validate_map_format(format: &str) -> Result<MapFormat> {
    format.parse::<MapFormat>().map_err(|err| anyhow!(err))
}

/// Load the config named by `--config`, else `mapsize.yaml` in the working directory
/// if present, else defaults.
pub fn load_config(config: Option<&str>) -> Result<AnalyzerConfig> {
    let (path, explicit) = match config {
        Some(path) => (Path::new(path), true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    if !explicit && !path.is_file() {
        debug!("no config file, using defaults");
        return Ok(AnalyzerConfig::default());
    }
    let loaded = AnalyzerConfig::from_path(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(loaded)
}

/// Effective analysis settings after merging flags over config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub format: MapFormat,
    pub ignore_debug_sections: bool,
    pub top: Option<usize>,
}

impl AnalysisSettings {
    /// Command-line values win; `--ignore-debug` can only switch filtering on.
    pub fn resolve(
        config: &AnalyzerConfig,
        format: Option<&str>,
        ignore_debug: bool,
        top: Option<usize>,
    ) -> Result<Self> {
        let format = match format {
            Some(tag) => validate_map_format(tag)?,
            None => config.format,
        };
        Ok(Self {
            format,
            ignore_debug_sections: ignore_debug || config.ignore_debug_sections,
            top: top.or(config.top),
        })
    }
}

/// Read and parse one map file.
pub fn analyze_file(path: &Path, settings: &AnalysisSettings) -> Result<AnalysisReport> {
    let text = read_map_file(path)?;
    info!(
        path = %path.display(),
        chars = text.len(),
        format = %settings.format,
        ignore_debug = settings.ignore_debug_sections,
        "analyzing map file"
    );
    let report = mapsize_core::parse(&text, settings.format, settings.ignore_debug_sections)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;
    info!(modules = report.modules.len(), sections = report.all_sections.len(), "analysis done");
    Ok(report)
}
