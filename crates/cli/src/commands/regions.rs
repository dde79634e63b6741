use std::path::Path;

use anyhow::{Context, Result};
use mapsize_core::report::regions_text;

use crate::read_map_file;

/// Print the `Memory Configuration` table of a GCC map.
pub fn regions_command(file: &str, json: bool) -> Result<()> {
    let path = Path::new(file);
    let text = read_map_file(path)?;
    let lines: Vec<&str> = text.lines().collect();
    let regions = mapsize_core::parse::regions::parse_memory_configuration(&lines);

    if json {
        let serialized = serde_json::to_string_pretty(&regions)
            .context("Failed to serialize memory regions to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    if regions.is_empty() {
        println!("No Memory Configuration found in {}", path.display());
        return Ok(());
    }

    println!("Memory regions ({}):", regions.len());
    print!("{}", regions_text(&regions));
    Ok(())
}
