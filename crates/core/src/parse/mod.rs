//! Map-file parsing: format dispatch, the shared line-scanning pipeline, and the
//! per-toolchain grammars.
//!
//! Each grammar decides which slice of the file holds the section table and how one
//! line of that table is tokenized. The pipeline in [`parse_with`] is the same for every
//! grammar: tokenize, apply the debug-section policy, decode the size, apply the
//! zero-size policy, aggregate.

use std::ops::Range;

use thiserror::Error;
use tracing::{debug, trace};

use crate::analysis::Aggregator;
use crate::model::{AnalysisReport, MapFormat, MemoryRegion, ParseStats, SectionRecord};

pub mod gcc;
pub mod ghs;
pub mod regions;

pub use gcc::GccGrammar;
pub use ghs::GhsGrammar;

/// Prefix shared by every DWARF section name.
pub const DEBUG_SECTION_PREFIX: &str = ".debug";

/// Error type for map parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A section marker the grammar cannot work without is absent. Fatal.
    #[error("'{anchor}' section not found; input does not look like a {format} map file")]
    MissingAnchor { format: MapFormat, anchor: &'static str },

    /// A size token matched the grammar but does not decode to a u64.
    ///
    /// The pipeline skips the offending record and counts it in [`ParseStats::malformed`].
    #[error("Malformed hexadecimal number '{token}'")]
    MalformedNumber { token: String },
}

/// Convenience result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Outcome of tokenizing one line of a section table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Matched {
        section: &'a str,
        /// Hex digits of the size column, without any `0x` prefix.
        size_hex: &'a str,
        owner: &'a str,
    },
    NoMatch,
}

/// A toolchain-specific map grammar.
pub trait MapGrammar: Send + Sync {
    fn format(&self) -> MapFormat;

    /// Range of `lines` holding section allocation records.
    fn section_window(&self, lines: &[&str]) -> ParseResult<Range<usize>>;

    fn tokenize<'l>(&self, line: &'l str) -> Token<'l>;

    /// Whether size-0 records are discarded before aggregation.
    fn drops_zero_size(&self) -> bool;

    /// Declared memory regions, for formats that carry them.
    fn memory_regions(&self, _lines: &[&str]) -> Vec<MemoryRegion> {
        Vec::new()
    }
}

/// Grammar implementing `format`.
pub fn grammar_for(format: MapFormat) -> &'static dyn MapGrammar {
    match format {
        MapFormat::Gcc => &GccGrammar,
        MapFormat::Ghs => &GhsGrammar,
    }
}

/// Parse `text` as a map file of the given format.
///
/// GCC input never fails; a file with no recognisable records yields an empty report.
/// GHS input fails with [`ParseError::MissingAnchor`] when it has no `Module Summary`.
pub fn parse(
    text: &str,
    format: MapFormat,
    ignore_debug_sections: bool,
) -> ParseResult<AnalysisReport> {
    parse_with(grammar_for(format), text, ignore_debug_sections)
}

/// Run the scanning pipeline with an explicit grammar.
pub fn parse_with(
    grammar: &dyn MapGrammar,
    text: &str,
    ignore_debug_sections: bool,
) -> ParseResult<AnalysisReport> {
    let lines: Vec<&str> = text.lines().collect();
    let window = grammar.section_window(&lines)?;
    let memory_regions = grammar.memory_regions(&lines);
    debug!(
        format = %grammar.format(),
        start = window.start,
        end = window.end,
        total_lines = lines.len(),
        "scanning section table"
    );

    let mut stats = ParseStats::default();
    let mut aggregator = Aggregator::new();

    for line in &lines[window] {
        stats.lines_scanned += 1;
        let Token::Matched { section, size_hex, owner } = grammar.tokenize(line) else {
            continue;
        };
        stats.records_matched += 1;

        if ignore_debug_sections && is_debug_section(section) {
            stats.debug_skipped += 1;
            continue;
        }

        let size = match decode_hex(size_hex) {
            Ok(size) => size,
            Err(err) => {
                trace!(%err, line = *line, "skipping record");
                stats.malformed += 1;
                continue;
            }
        };

        if size == 0 && grammar.drops_zero_size() {
            stats.zero_size_skipped += 1;
            continue;
        }

        stats.records_kept += 1;
        aggregator.push(&SectionRecord::new(section, size, owner));
    }

    debug!(
        matched = stats.records_matched,
        kept = stats.records_kept,
        sections = aggregator.section_count(),
        modules = aggregator.module_count(),
        regions = memory_regions.len(),
        "scan finished"
    );

    Ok(aggregator.finish(grammar.format(), memory_regions, stats))
}

pub fn is_debug_section(section: &str) -> bool {
    section.starts_with(DEBUG_SECTION_PREFIX)
}

/// Decode hex digits (an optional `0x`/`0X` prefix is accepted).
pub fn decode_hex(token: &str) -> ParseResult<u64> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u64::from_str_radix(digits, 16)
        .map_err(|_| ParseError::MalformedNumber { token: token.to_string() })
}
