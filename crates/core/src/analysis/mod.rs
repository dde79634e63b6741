//! Aggregation of section records into per-module totals.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::model::{
    AnalysisReport, MapFormat, MemoryRegion, ModuleEntry, ParseStats, SectionRecord,
};

pub mod normalize;

pub use normalize::{normalize_module, UNKNOWN_MODULE};

/// Folds section records into `module -> section -> bytes`.
///
/// Modules are kept in first-seen order so that the final sort can break ties
/// deterministically.
#[derive(Debug, Default)]
pub struct Aggregator {
    modules: IndexMap<String, ModuleEntry>,
    sections: BTreeSet<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute one record to its normalized module.
    pub fn push(&mut self, record: &SectionRecord) {
        let module = normalize_module(&record.owner_raw);
        let entry =
            self.modules.entry(module).or_insert_with_key(|name| ModuleEntry::new(name.clone()));
        entry.add(&record.section, record.size);
        if !self.sections.contains(&record.section) {
            self.sections.insert(record.section.clone());
        }
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Build the report, modules sorted by total descending.
    pub fn finish(
        self,
        format: MapFormat,
        memory_regions: Vec<MemoryRegion>,
        stats: ParseStats,
    ) -> AnalysisReport {
        let mut modules: Vec<ModuleEntry> = self.modules.into_values().collect();
        // Stable: equal totals keep first-seen order.
        modules.sort_by(|a, b| b.total.cmp(&a.total));
        AnalysisReport { format, modules, all_sections: self.sections, memory_regions, stats }
    }
}
