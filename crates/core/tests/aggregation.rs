use std::collections::BTreeSet;

use mapsize_core::analysis::{normalize_module, Aggregator, UNKNOWN_MODULE};
use mapsize_core::{AnalysisReport, MapFormat, ParseStats, SectionRecord};

fn aggregate(records: Vec<SectionRecord>, format: MapFormat) -> AnalysisReport {
    let mut aggregator = Aggregator::new();
    for record in &records {
        aggregator.push(record);
    }
    aggregator.finish(format, Vec::new(), ParseStats::default())
}

#[test]
fn archive_members_keep_their_full_path() {
    assert_eq!(normalize_module("/usr/lib/libfoo.a(bar.o)"), "/usr/lib/libfoo.a(bar.o)");
    assert_eq!(
        normalize_module(r"c:\gcc\lib\libgcc.a(_aeabi_uldivmod.o)"),
        r"c:\gcc\lib\libgcc.a(_aeabi_uldivmod.o)"
    );
}

#[test]
fn plain_paths_collapse_to_file_name() {
    assert_eq!(normalize_module("/src/obj/main.o"), "main.o");
    assert_eq!(normalize_module(r"C:\work\fw\obj\board.o"), "board.o");
    assert_eq!(normalize_module("obj/mixed\\path.o"), "path.o");
}

#[test]
fn bare_and_empty_owners() {
    assert_eq!(normalize_module("main.o"), "main.o");
    assert_eq!(normalize_module("libstartup.a(crt0.o)"), "libstartup.a(crt0.o)");
    assert_eq!(normalize_module(""), UNKNOWN_MODULE);
    assert_eq!(normalize_module("   "), "unknown");
    assert_eq!(normalize_module("  /src/main.o  "), "main.o");
}

#[test]
fn aggregator_accumulates_sizes_per_section() {
    let mut aggregator = Aggregator::new();
    aggregator.push(&SectionRecord::new(".text", 0x100, "/a/main.o"));
    aggregator.push(&SectionRecord::new(".text", 0x20, "/b/main.o"));
    aggregator.push(&SectionRecord::new(".data", 0x8, "main.o"));
    assert_eq!(aggregator.module_count(), 1);
    assert_eq!(aggregator.section_count(), 2);

    let report = aggregator.finish(MapFormat::Gcc, Vec::new(), ParseStats::default());
    let main = &report.modules[0];
    assert_eq!(main.section_size(".text"), 0x120);
    assert_eq!(main.section_size(".data"), 0x8);
    assert_eq!(main.total, 0x128);
}

#[test]
fn totals_always_equal_section_sums() {
    let records = vec![
        SectionRecord::new(".text", 10, "a.o"),
        SectionRecord::new(".bss", 7, "b.o"),
        SectionRecord::new(".text", 3, "b.o"),
        SectionRecord::new(".rodata", 5, "a.o"),
        SectionRecord::new(".text", 1, "c.o"),
    ];
    let report = aggregate(records, MapFormat::Gcc);
    for entry in &report.modules {
        assert_eq!(entry.total, entry.sections.values().sum::<u64>(), "module {}", entry.module);
    }
    assert_eq!(report.total_bytes(), 26);
}

#[test]
fn all_sections_is_union_of_module_keys() {
    let records = vec![
        SectionRecord::new(".text", 1, "a.o"),
        SectionRecord::new(".data", 1, "b.o"),
        SectionRecord::new(".bss", 1, "c.o"),
        SectionRecord::new(".text", 1, "c.o"),
    ];
    let report = aggregate(records, MapFormat::Ghs);
    let union: BTreeSet<String> =
        report.modules.iter().flat_map(|m| m.sections.keys().cloned()).collect();
    assert_eq!(report.all_sections, union);
}

#[test]
fn sort_is_descending_and_stable_for_ties() {
    let records = vec![
        SectionRecord::new(".text", 5, "first.o"),
        SectionRecord::new(".text", 9, "big.o"),
        SectionRecord::new(".text", 5, "second.o"),
        SectionRecord::new(".text", 5, "third.o"),
        SectionRecord::new(".text", 1, "small.o"),
    ];
    let report = aggregate(records, MapFormat::Gcc);
    let names: Vec<&str> = report.modules.iter().map(|m| m.module.as_str()).collect();
    assert_eq!(names, vec!["big.o", "first.o", "second.o", "third.o", "small.o"]);
    for pair in report.modules.windows(2) {
        assert!(pair[0].total >= pair[1].total);
    }
}

#[test]
fn share_percent_and_top() {
    let records = vec![
        SectionRecord::new(".text", 75, "a.o"),
        SectionRecord::new(".text", 25, "b.o"),
    ];
    let report = aggregate(records, MapFormat::Gcc);
    assert!((report.share_percent(&report.modules[0]) - 75.0).abs() < f64::EPSILON);
    assert_eq!(report.top(1).len(), 1);
    assert_eq!(report.top(10).len(), 2);

    let empty = aggregate(Vec::new(), MapFormat::Gcc);
    assert!(empty.is_empty());
    assert_eq!(empty.total_bytes(), 0);
}
