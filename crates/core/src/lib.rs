//! mapsize-core
//!
//! Core library for measuring how much memory each module of a firmware image takes,
//! based on the linker map file.
//!
//! This crate holds the map grammars (GNU ld and Green Hills), module-name
//! normalization, per-module aggregation, report serializers and the analyzer config
//! model. It does no file IO on map files: callers hand it the whole text and get an
//! [`AnalysisReport`] back.
//!
//! ```
//! use mapsize_core::{parse, MapFormat};
//!
//! let map = "Linker script and memory map\n .text 0x08000000 0x100 /obj/main.o\n";
//! let report = parse(map, MapFormat::Gcc, false).unwrap();
//! assert_eq!(report.modules[0].module, "main.o");
//! assert_eq!(report.modules[0].total, 256);
//! ```

pub mod analysis;
pub mod config;
pub mod model;
pub mod parse;
pub mod report;

pub use model::{
    AnalysisReport, MapFormat, MemoryRegion, ModuleEntry, ParseStats, SectionRecord,
    UnknownFormat,
};
pub use parse::{parse, ParseError};

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
