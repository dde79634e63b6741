use mapsize_core::parse::ghs::{module_summary, summary_window, GhsGrammar};
use mapsize_core::parse::{MapGrammar, Token};
use mapsize_core::{parse, MapFormat, ParseError};

const FIRMWARE_MAP: &str = include_str!("fixtures/ghs_firmware.map");

#[test]
fn module_summary_is_aggregated() {
    let report = parse(FIRMWARE_MAP, MapFormat::Ghs, false).expect("ghs parse");

    let order: Vec<(&str, u64)> =
        report.modules.iter().map(|m| (m.module.as_str(), m.total)).collect();
    assert_eq!(order, vec![("main.o", 2400), ("libstartup.a(crt0.o)", 1024), ("uart.o", 700)]);

    let sections: Vec<&str> = report.all_sections.iter().map(String::as_str).collect();
    assert_eq!(sections, vec![".bss", ".data", ".debug_info", ".debug_line", ".text"]);
    assert!(report.memory_regions.is_empty());
    assert_eq!(report.format, MapFormat::Ghs);
}

#[test]
fn zero_size_ghs_records_are_kept() {
    let report = parse(FIRMWARE_MAP, MapFormat::Ghs, false).unwrap();
    let main = report.modules.iter().find(|m| m.module == "main.o").unwrap();
    assert_eq!(main.sections.get(".bss"), Some(&0));
    assert_eq!(report.stats.zero_size_skipped, 0);
    assert_eq!(report.stats.records_kept, 8);
}

#[test]
fn debug_sections_can_be_ignored() {
    let report = parse(FIRMWARE_MAP, MapFormat::Ghs, true).unwrap();
    let order: Vec<(&str, u64)> =
        report.modules.iter().map(|m| (m.module.as_str(), m.total)).collect();
    assert_eq!(order, vec![("main.o", 2112), ("libstartup.a(crt0.o)", 1024), ("uart.o", 640)]);
    assert_eq!(report.stats.debug_skipped, 2);
    assert!(report.all_sections.iter().all(|s| !s.starts_with(".debug")));
}

#[test]
fn window_stops_before_global_symbols() {
    let report = parse(FIRMWARE_MAP, MapFormat::Ghs, false).unwrap();
    // `main` and `uart_init` rows after `Global Symbols` are outside the window.
    assert_eq!(report.stats.lines_scanned, 12);
    assert_eq!(report.stats.records_matched, 8);
}

#[test]
fn missing_module_summary_is_fatal() {
    let text = "Load Map\n00000400+000800  .text  main.o\n";
    let err = parse(text, MapFormat::Ghs, false).unwrap_err();
    assert_eq!(err, ParseError::MissingAnchor { format: MapFormat::Ghs, anchor: "Module Summary" });
    assert!(err.to_string().contains("Module Summary"));
    assert!(err.to_string().contains("ghs"));
}

#[test]
fn window_runs_to_end_without_terminator() {
    let text = "Module Summary\n00000400+000010 .text a.o\n00000410+000020 .text b.o\n";
    let report = parse(text, MapFormat::Ghs, false).unwrap();
    assert_eq!(report.modules.len(), 2);
    assert_eq!(report.modules[0].module, "b.o");
    assert_eq!(report.total_bytes(), 0x30);
}

#[test]
fn load_map_terminates_window() {
    let lines = vec![
        "Load Map Mon Jan 01",
        "Module Summary",
        "00000400+000010 .text a.o",
        "Load Map Tue Jan 02",
        "00000400+000010 .text late.o",
    ];
    assert_eq!(summary_window(&lines).unwrap(), 1..3);
}

#[test]
fn module_summary_extracts_window_lines() {
    let lines = module_summary(FIRMWARE_MAP).unwrap();
    assert_eq!(lines.first().copied(), Some("Module Summary"));
    assert_eq!(lines.len(), 12);
    assert!(lines.iter().all(|l| !l.contains("Global Symbols")));

    assert!(module_summary("nothing here").is_err());
}

#[test]
fn tokenizer_handles_region_clause_and_missing_owner() {
    let grammar = GhsGrammar;
    assert_eq!(
        grammar.tokenize("00000400+000800  .text  -> .flash_text  main.o"),
        Token::Matched { section: ".text", size_hex: "000800", owner: "main.o" }
    );
    assert_eq!(
        grammar.tokenize("  00001000+000200  .text            drivers/uart.o  "),
        Token::Matched { section: ".text", size_hex: "000200", owner: "drivers/uart.o" }
    );
    assert_eq!(grammar.tokenize("00000400+000800  .text  -> .flash_text"), Token::NoMatch);
    assert_eq!(grammar.tokenize("00000400+000800  .text"), Token::NoMatch);
    assert_eq!(grammar.tokenize("  Origin+Size    Section          Module"), Token::NoMatch);
    assert!(!grammar.drops_zero_size());
}
