//! Serializers that turn an [`AnalysisReport`] into CSV, plain text, JSON, and the
//! console tables used by the CLI.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::model::{AnalysisReport, MemoryRegion};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Width of module labels in [`modules_table`].
pub const MODULE_LABEL_WIDTH: usize = 40;

/// Render a byte count with a binary unit, e.g. `1.5 KB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rendered = format!("{value:.2}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{rendered} {}", UNITS[unit])
}

/// Cut `text` to `max` characters, marking the cut with `...`.
pub fn truncate_label(text: &str, max: usize) -> Cow<'_, str> {
    if text.chars().count() <= max {
        return Cow::Borrowed(text);
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push_str("...");
    Cow::Owned(cut)
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\r' | '\n')) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn push_csv_row<'a>(out: &mut String, cells: impl IntoIterator<Item = Cow<'a, str>>) {
    let row: Vec<Cow<'a, str>> = cells.into_iter().collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// One row per module: `module,total_bytes,<section...>`, sections ascending, missing
/// sections written as `0`.
pub fn to_csv(report: &AnalysisReport) -> String {
    let mut out = String::new();

    let header = ["module", "total_bytes"]
        .into_iter()
        .chain(report.all_sections.iter().map(String::as_str))
        .map(csv_field);
    push_csv_row(&mut out, header);

    for entry in &report.modules {
        let mut cells = vec![csv_field(&entry.module), Cow::Owned(entry.total.to_string())];
        cells.extend(
            report.all_sections.iter().map(|s| Cow::Owned(entry.section_size(s).to_string())),
        );
        push_csv_row(&mut out, cells);
    }
    out
}

/// Plain-text report: summary counts followed by one block per module.
///
/// With `top`, only the first `top` modules get a block; the summary still covers all.
pub fn to_text(report: &AnalysisReport, top: Option<usize>) -> String {
    let mut out = String::new();
    let total = report.total_bytes();

    let _ = writeln!(out, "Memory Analysis Report");
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out);
    let _ = writeln!(out, "Format: {}", report.format);
    let _ = writeln!(out, "Modules: {}", report.modules.len());
    let _ = writeln!(out, "Total size: {} ({} bytes)", format_bytes(total), total);
    let _ = writeln!(out, "Section types: {}", report.all_sections.len());

    let shown = match top {
        Some(n) => report.top(n),
        None => &report.modules[..],
    };
    if shown.len() < report.modules.len() {
        let _ = writeln!(out, "Showing top {} of {} modules", shown.len(), report.modules.len());
    }
    let _ = writeln!(out);

    for (index, entry) in shown.iter().enumerate() {
        let _ = writeln!(out, "{}. Module: {}", index + 1, entry.module);
        let _ = writeln!(out, "   Total: {} ({} bytes)", format_bytes(entry.total), entry.total);
        for (section, size) in &entry.sections {
            let _ = writeln!(out, "     {}: {} ({} bytes)", section, format_bytes(*size), size);
        }
        let _ = writeln!(out);
    }
    out
}

pub fn to_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Ranked module table: rank, module, bytes, KiB, share of the total.
pub fn modules_table(report: &AnalysisReport, top: Option<usize>) -> String {
    let mut out = String::new();
    let shown = match top {
        Some(n) => report.top(n),
        None => &report.modules[..],
    };

    let _ = writeln!(
        out,
        "{:>4}  {:<width$}  {:>12}  {:>10}  {:>7}",
        "#",
        "Module",
        "Bytes",
        "KiB",
        "Share",
        width = MODULE_LABEL_WIDTH + 3
    );
    for (index, entry) in shown.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<width$}  {:>12}  {:>10.2}  {:>6.2}%",
            index + 1,
            truncate_label(&entry.module, MODULE_LABEL_WIDTH),
            entry.total,
            entry.total as f64 / 1024.0,
            report.share_percent(entry),
            width = MODULE_LABEL_WIDTH + 3
        );
    }
    out
}

/// Memory configuration table: name, origin, length, KiB, attributes.
pub fn regions_text(regions: &[MemoryRegion]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16}  {:<18}  {:<18}  {:>10}  {}",
        "Name", "Origin", "Length", "KiB", "Attributes"
    );
    for region in regions {
        let attributes = if region.attributes.is_empty() {
            "-".to_string()
        } else {
            format!("{} ({})", region.attributes, region.attribute_description())
        };
        let _ = writeln!(
            out,
            "{:<16}  {:<18}  {:<18}  {:>10.2}  {}",
            region.name,
            region.origin_hex(),
            region.length_hex(),
            region.length as f64 / 1024.0,
            attributes
        );
    }
    out
}
