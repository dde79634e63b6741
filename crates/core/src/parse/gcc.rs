//! GNU ld map grammar.
//!
//! Allocation records in the `Linker script and memory map` part look like
//!
//! ```text
//!  .text          0x08000188      0x200 /build/obj/main.o
//!  *fill*         0x08000598        0x8
//! ```
//!
//! The owner column is optional; a record without one is attributed to `unknown`.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{regions, MapGrammar, ParseResult, Token};
use crate::analysis::normalize::UNKNOWN_MODULE;
use crate::model::{MapFormat, MemoryRegion};

pub const MEMORY_CONFIGURATION: &str = "Memory Configuration";
pub const LINKER_SCRIPT_AND_MEMORY_MAP: &str = "Linker script and memory map";

static SECTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([.\w*+-]+)\s+0x[0-9A-Fa-f]+\s+0x([0-9A-Fa-f]+)(?:\s+(.*?))?\s*$").unwrap()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct GccGrammar;

impl MapGrammar for GccGrammar {
    fn format(&self) -> MapFormat {
        MapFormat::Gcc
    }

    /// From the `Linker script and memory map` line to the end, or the whole file when
    /// that line is missing.
    fn section_window(&self, lines: &[&str]) -> ParseResult<Range<usize>> {
        let start = lines
            .iter()
            .position(|l| l.trim() == LINKER_SCRIPT_AND_MEMORY_MAP)
            .unwrap_or(0);
        Ok(start..lines.len())
    }

    fn tokenize<'l>(&self, line: &'l str) -> Token<'l> {
        let Some(caps) = SECTION_LINE.captures(line) else {
            return Token::NoMatch;
        };
        let (Some(section), Some(size)) = (caps.get(1), caps.get(2)) else {
            return Token::NoMatch;
        };
        let owner = caps
            .get(3)
            .map(|m| m.as_str().trim())
            .filter(|owner| !owner.is_empty())
            .unwrap_or(UNKNOWN_MODULE);
        Token::Matched { section: section.as_str(), size_hex: size.as_str(), owner }
    }

    fn drops_zero_size(&self) -> bool {
        true
    }

    fn memory_regions(&self, lines: &[&str]) -> Vec<MemoryRegion> {
        regions::parse_memory_configuration(lines)
    }
}
