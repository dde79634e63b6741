use std::path::Path;

use anyhow::{Context, Result};
use mapsize_core::report::{format_bytes, modules_table, regions_text, to_json};
use mapsize_core::{AnalysisReport, MapFormat};

use crate::commands::{analyze_file, load_config, AnalysisSettings};

/// Analyze a map file and print the per-module breakdown.
pub fn analyze_command(
    file: &str,
    format: Option<&str>,
    ignore_debug: bool,
    top: Option<usize>,
    json: bool,
    config: Option<&str>,
) -> Result<()> {
    let config = load_config(config)?;
    let settings = AnalysisSettings::resolve(&config, format, ignore_debug, top)?;
    let path = Path::new(file);
    let report = analyze_file(path, &settings)?;

    if json {
        println!("{}", to_json(&report).context("Failed to serialize report to JSON")?);
        return Ok(());
    }

    print_summary(path, &report, &settings);

    if report.format == MapFormat::Gcc && !report.memory_regions.is_empty() {
        println!();
        println!("Memory Configuration:");
        print!("{}", regions_text(&report.memory_regions));
    }

    println!();
    if report.is_empty() {
        println!("No section records found.");
        return Ok(());
    }
    match settings.top {
        Some(n) if n < report.modules.len() => {
            println!("Top {} of {} modules:", n, report.modules.len())
        }
        _ => println!("Modules:"),
    }
    print!("{}", modules_table(&report, settings.top));

    Ok(())
}

fn print_summary(path: &Path, report: &AnalysisReport, settings: &AnalysisSettings) {
    let total = report.total_bytes();
    println!("mapsize v{}", mapsize_core::version());
    println!("File: {} ({})", path.display(), report.format);
    if settings.ignore_debug_sections {
        println!("Debug sections: ignored");
    }
    println!("Modules: {}", report.modules.len());
    println!("Total size: {} ({} bytes)", format_bytes(total), total);
    println!("Section types: {}", report.all_sections.len());
    println!(
        "Scanned {} lines, matched {} records, kept {}",
        report.stats.lines_scanned, report.stats.records_matched, report.stats.records_kept
    );
    if report.stats.malformed > 0 {
        println!("Skipped {} records with malformed sizes", report.stats.malformed);
    }
}
