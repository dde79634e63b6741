use std::path::Path;

use anyhow::{Context, Result};
use mapsize_core::parse::ghs::module_summary;

use crate::{read_map_file, write_with_fallback};

/// Copy the `Module Summary` block of a GHS map, header included, to `out`.
pub fn extract_summary_command(file: &str, out: &str) -> Result<()> {
    let path = Path::new(file);
    let text = read_map_file(path)?;
    let lines = module_summary(&text)
        .with_context(|| format!("Failed to extract Module Summary from {}", path.display()))?;

    let mut body = lines.join("\n");
    body.push('\n');
    let written = write_with_fallback(Path::new(out), &body)?;
    println!("Wrote {} Module Summary lines to {}", lines.len(), written.display());
    Ok(())
}
