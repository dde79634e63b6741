//! Parser for the `Memory Configuration` block of GNU ld map files.
//!
//! ```text
//! Memory Configuration
//!
//! Name             Origin             Length             Attributes
//! FLASH            0x0000000008000000 0x0000000000040000 xr
//! RAM              0x0000000020000000 0x0000000000010000 xrw
//! *default*        0x0000000000000000 0xffffffffffffffff
//!
//! Linker script and memory map
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use super::gcc::{LINKER_SCRIPT_AND_MEMORY_MAP, MEMORY_CONFIGURATION};
use crate::model::MemoryRegion;

static REGION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+)\s+0x([0-9A-Fa-f]+)\s+0x([0-9A-Fa-f]+)(?:\s+(\w*))?$").unwrap()
});

/// Collect every region declared between `Memory Configuration` and
/// `Linker script and memory map`.
///
/// Blank lines and the column header are skipped. Without the closing marker the block
/// runs to the end of the input.
pub fn parse_memory_configuration(lines: &[&str]) -> Vec<MemoryRegion> {
    let Some(start) = lines.iter().position(|l| l.trim() == MEMORY_CONFIGURATION) else {
        return Vec::new();
    };

    let mut regions = Vec::new();
    for line in &lines[start + 1..] {
        let line = line.trim();
        if line == LINKER_SCRIPT_AND_MEMORY_MAP {
            break;
        }
        if line.is_empty() || is_column_header(line) {
            continue;
        }
        if let Some(region) = parse_region_line(line) {
            regions.push(region);
        }
    }
    regions
}

/// Parse one `<name> 0x<origin> 0x<length> [<attributes>]` line.
///
/// Returns `None` for anything else, including values that overflow a u64.
pub fn parse_region_line(line: &str) -> Option<MemoryRegion> {
    let caps = REGION_LINE.captures(line.trim())?;
    let origin = u64::from_str_radix(&caps[2], 16).ok()?;
    let length = u64::from_str_radix(&caps[3], 16).ok()?;
    let attributes = caps.get(4).map(|m| m.as_str()).unwrap_or_default();
    Some(MemoryRegion::new(&caps[1], origin, length, attributes))
}

fn is_column_header(line: &str) -> bool {
    line.contains("Name") && line.contains("Origin") && line.contains("Length")
}
