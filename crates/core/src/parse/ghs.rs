//! Green Hills (`elxr`) map grammar.
//!
//! Only the `Module Summary` part of the map is scanned:
//!
//! ```text
//! Module Summary
//!
//!   Origin+Size    Section          Module
//! 00000400+000800  .text  -> .flash_text  main.o
//! 00001000+000200  .text            drivers/uart.o
//! ```
//!
//! The optional `-> <region>` clause is recognised and dropped.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{MapGrammar, ParseError, ParseResult, Token};
use crate::model::MapFormat;

pub const MODULE_SUMMARY: &str = "Module Summary";
pub const GLOBAL_SYMBOLS: &str = "Global Symbols";
pub const LOAD_MAP: &str = "Load Map";

static RECORD_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[0-9A-Fa-f]+\+([0-9A-Fa-f]+)\s+(\S+)(?:\s+->\s+\S+)?\s+(.+)$").unwrap()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct GhsGrammar;

impl MapGrammar for GhsGrammar {
    fn format(&self) -> MapFormat {
        MapFormat::Ghs
    }

    fn section_window(&self, lines: &[&str]) -> ParseResult<Range<usize>> {
        summary_window(lines)
    }

    fn tokenize<'l>(&self, line: &'l str) -> Token<'l> {
        let Some(caps) = RECORD_LINE.captures(line) else {
            return Token::NoMatch;
        };
        let (Some(size), Some(section), Some(owner)) = (caps.get(1), caps.get(2), caps.get(3))
        else {
            return Token::NoMatch;
        };
        let owner = owner.as_str().trim();
        // A bare `-> region` tail means the owner column itself is missing.
        if owner.is_empty() || owner.starts_with("->") {
            return Token::NoMatch;
        }
        Token::Matched { section: section.as_str(), size_hex: size.as_str(), owner }
    }

    /// Zero-size GHS records are kept; only the GCC grammar filters them.
    fn drops_zero_size(&self) -> bool {
        false
    }
}

/// Line range of the Module Summary: from its header up to (not including) the first
/// later line that mentions `Global Symbols` or starts with `Load Map`, or to the end.
pub fn summary_window(lines: &[&str]) -> ParseResult<Range<usize>> {
    let start = lines.iter().position(|l| l.contains(MODULE_SUMMARY)).ok_or(
        ParseError::MissingAnchor { format: MapFormat::Ghs, anchor: MODULE_SUMMARY },
    )?;
    let end = lines[start + 1..]
        .iter()
        .position(|l| l.contains(GLOBAL_SYMBOLS) || l.starts_with(LOAD_MAP))
        .map(|offset| start + 1 + offset)
        .unwrap_or(lines.len());
    Ok(start..end)
}

/// The Module Summary lines of a GHS map, header included.
pub fn module_summary(text: &str) -> ParseResult<Vec<&str>> {
    let lines: Vec<&str> = text.lines().collect();
    let window = summary_window(&lines)?;
    Ok(lines[window].to_vec())
}
