//! Analyzer configuration file (`mapsize.yaml` or any `.yaml`/`.yml`/`.json` file).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::MapFormat;

/// Config file picked up from the working directory when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "mapsize.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config extension for {0} (expected .yaml, .yml or .json)")]
    UnsupportedExtension(PathBuf),
}

/// Export destinations; any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputTargets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<PathBuf>,
}

impl OutputTargets {
    pub fn is_empty(&self) -> bool {
        self.csv.is_none() && self.text.is_none() && self.json.is_none()
    }

    /// Fill every target missing here from `fallback`.
    pub fn or(self, fallback: &OutputTargets) -> OutputTargets {
        OutputTargets {
            csv: self.csv.or_else(|| fallback.csv.clone()),
            text: self.text.or_else(|| fallback.text.clone()),
            json: self.json.or_else(|| fallback.json.clone()),
        }
    }
}

/// Defaults applied to every analysis; command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub format: MapFormat,
    pub ignore_debug_sections: bool,
    /// Limit console tables and text reports to the largest N modules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,
    pub outputs: OutputTargets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSyntax {
    Yaml,
    Json,
}

fn syntax_for(path: &Path) -> Result<ConfigSyntax, ConfigError> {
    match path.extension().and_then(|e| e.to_str()).unwrap_or_default() {
        "yaml" | "yml" => Ok(ConfigSyntax::Yaml),
        "json" => Ok(ConfigSyntax::Json),
        _ => Err(ConfigError::UnsupportedExtension(path.to_path_buf())),
    }
}

impl AnalyzerConfig {
    /// Load a config file, choosing YAML or JSON by extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let syntax = syntax_for(path)?;
        let body = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        match syntax {
            ConfigSyntax::Yaml => Self::from_yaml_str(&body),
            ConfigSyntax::Json => Self::from_json_str(&body),
        }
    }

    pub fn from_yaml_str(body: &str) -> Result<Self, ConfigError> {
        // An empty YAML document means "all defaults".
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(body)?)
    }

    pub fn from_json_str(body: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Serialize in the syntax matching `path`'s extension.
    pub fn to_string_for(&self, path: &Path) -> Result<String, ConfigError> {
        match syntax_for(path)? {
            ConfigSyntax::Yaml => Ok(serde_yaml::to_string(self)?),
            ConfigSyntax::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
