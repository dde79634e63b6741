//! Core data model for map-file analysis.
//!
//! Everything here is created fresh by a single `parse` call and handed to the caller;
//! nothing is cached between runs.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Toolchain flavour of a map file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapFormat {
    /// GNU ld (`-Wl,-Map=...`) output.
    #[default]
    Gcc,
    /// Green Hills `elxr` output.
    Ghs,
}

impl MapFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapFormat::Gcc => "gcc",
            MapFormat::Ghs => "ghs",
        }
    }

    /// All known tags, for help text and error messages.
    pub fn names() -> &'static [&'static str] {
        &["gcc", "ghs"]
    }
}

impl fmt::Display for MapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a format tag is neither `gcc` nor `ghs`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown map format '{0}'. Allowed: {}", MapFormat::names().join(", "))]
pub struct UnknownFormat(pub String);

impl FromStr for MapFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gcc" => Ok(MapFormat::Gcc),
            "ghs" => Ok(MapFormat::Ghs),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Memory region declared in the `Memory Configuration` block of a GCC map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRegion {
    pub name: String,
    pub origin: u64,
    pub length: u64,
    /// Access code as written by the linker (`r`, `rw`, `xrw`, ...). May be empty.
    pub attributes: String,
}

impl MemoryRegion {
    pub fn new(
        name: impl Into<String>,
        origin: u64,
        length: u64,
        attributes: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), origin, length, attributes: attributes.into() }
    }

    pub fn origin_hex(&self) -> String {
        format!("{:#010x}", self.origin)
    }

    pub fn length_hex(&self) -> String {
        format!("{:#010x}", self.length)
    }

    /// Human-readable meaning of the attribute code.
    pub fn attribute_description(&self) -> String {
        match self.attributes.as_str() {
            "r" => "Read-only".to_string(),
            "rw" => "Read-Write".to_string(),
            "x" => "Executable".to_string(),
            "rx" => "Read-Execute".to_string(),
            "rwx" => "Read-Write-Execute".to_string(),
            other => other.to_string(),
        }
    }
}

/// One section allocation pulled from a map file, before module normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRecord {
    pub section: String,
    pub size: u64,
    pub owner_raw: String,
}

impl SectionRecord {
    pub fn new(section: impl Into<String>, size: u64, owner_raw: impl Into<String>) -> Self {
        Self { section: section.into(), size, owner_raw: owner_raw.into() }
    }
}

/// Bytes attributed to a single module, broken down by section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub module: String,
    pub total: u64,
    pub sections: BTreeMap<String, u64>,
}

impl ModuleEntry {
    pub fn new(module: impl Into<String>) -> Self {
        Self { module: module.into(), total: 0, sections: BTreeMap::new() }
    }

    /// Add `size` bytes to `section`, keeping `total` equal to the section sum.
    pub fn add(&mut self, section: &str, size: u64) {
        let slot = self.sections.entry(section.to_string()).or_insert(0);
        *slot = slot.saturating_add(size);
        self.total = self.total.saturating_add(size);
    }

    pub fn section_size(&self, section: &str) -> u64 {
        self.sections.get(section).copied().unwrap_or(0)
    }
}

/// Scan counters gathered while parsing. Per-line problems are only reported here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Lines inside the scanned window.
    pub lines_scanned: usize,
    /// Lines the section tokenizer recognised.
    pub records_matched: usize,
    /// Records that made it into the aggregation.
    pub records_kept: usize,
    pub debug_skipped: usize,
    pub zero_size_skipped: usize,
    /// Records whose size token could not be decoded.
    pub malformed: usize,
}

/// Result of analysing one map file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub format: MapFormat,
    /// Sorted by `total` descending; equal totals keep first-seen order.
    pub modules: Vec<ModuleEntry>,
    pub all_sections: BTreeSet<String>,
    pub memory_regions: Vec<MemoryRegion>,
    pub stats: ParseStats,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Sum of every module total.
    pub fn total_bytes(&self) -> u64 {
        self.modules.iter().fold(0u64, |acc, m| acc.saturating_add(m.total))
    }

    /// Percentage of all attributed bytes that belong to `entry`.
    pub fn share_percent(&self, entry: &ModuleEntry) -> f64 {
        let total = self.total_bytes();
        if total == 0 {
            return 0.0;
        }
        entry.total as f64 * 100.0 / total as f64
    }

    pub fn top(&self, n: usize) -> &[ModuleEntry] {
        &self.modules[..n.min(self.modules.len())]
    }
}
