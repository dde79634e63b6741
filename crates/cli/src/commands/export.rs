use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use mapsize_core::config::OutputTargets;
use mapsize_core::report::{to_csv, to_text};
use mapsize_core::AnalysisReport;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::commands::{analyze_file, load_config, AnalysisSettings};
use crate::{canonicalize_or_current, sha256_file, write_with_fallback};

/// Where an exported report came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: String,
    pub sha256: String,
}

/// JSON export document: provenance plus the full report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub tool: String,
    pub version: String,
    /// RFC 3339, UTC.
    pub generated_at: String,
    pub source: SourceInfo,
    pub ignore_debug_sections: bool,
    pub report: AnalysisReport,
}

/// Analyze a map file and write the requested report files.
///
/// Targets given on the command line win over `outputs` from the config.
pub fn export_command(
    file: &str,
    format: Option<&str>,
    ignore_debug: bool,
    top: Option<usize>,
    targets: OutputTargets,
    config: Option<&str>,
) -> Result<()> {
    let config = load_config(config)?;
    let targets = targets.or(&config.outputs);
    if targets.is_empty() {
        bail!("No output requested; pass --csv, --text or --json (or set outputs in the config)");
    }

    let settings = AnalysisSettings::resolve(&config, format, ignore_debug, top)?;
    let path = Path::new(file);
    let report = analyze_file(path, &settings)?;
    let source = SourceInfo {
        path: canonicalize_or_current(file)?.display().to_string(),
        sha256: sha256_file(path)?,
    };
    let generated_at = Utc::now().to_rfc3339();

    let mut written: Vec<PathBuf> = Vec::new();

    if let Some(csv_path) = &targets.csv {
        written.push(write_with_fallback(csv_path, &to_csv(&report))?);
    }

    if let Some(text_path) = &targets.text {
        let mut body = String::new();
        body.push_str(&format!("Source: {}\n", source.path));
        body.push_str(&format!("SHA-256: {}\n", source.sha256));
        body.push_str(&format!("Generated: {}\n\n", generated_at));
        body.push_str(&to_text(&report, settings.top));
        written.push(write_with_fallback(text_path, &body)?);
    }

    if let Some(json_path) = &targets.json {
        let envelope = ExportEnvelope {
            tool: "mapsize".to_string(),
            version: mapsize_core::version().to_string(),
            generated_at: generated_at.clone(),
            source: source.clone(),
            ignore_debug_sections: settings.ignore_debug_sections,
            report,
        };
        let body = serde_json::to_string_pretty(&envelope)
            .context("Failed to serialize export to JSON")?;
        written.push(write_with_fallback(json_path, &body)?);
    }

    for out in &written {
        info!(path = %out.display(), "report written");
        println!("Wrote {}", out.display());
    }
    Ok(())
}
