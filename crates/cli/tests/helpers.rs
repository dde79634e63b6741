use std::fs;
use std::path::Path;

use mapsize::{
    canonicalize_or_current, fallback_path, read_map_file, sha256_file, write_with_fallback,
};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let original = std::env::current_dir().expect("cwd");
    let tmp = tempdir().expect("tempdir");
    std::env::set_current_dir(tmp.path()).expect("chdir tmp");

    let result = canonicalize_or_current(".").expect("canonicalize").canonicalize().expect("canon");
    let expected = tmp.path().canonicalize().expect("canon tmp");
    assert_eq!(result, expected);

    std::env::set_current_dir(original).expect("restore cwd");
}

#[test]
fn canonicalize_or_current_keeps_missing_paths_absolute() {
    let result = canonicalize_or_current("definitely/not/here.map").expect("canonicalize");
    assert!(result.is_absolute());
    assert!(result.ends_with("definitely/not/here.map"));
}

#[test]
fn fallback_path_inserts_new_suffix_before_extension() {
    assert_eq!(fallback_path(Path::new("out/report.csv")), Path::new("out/report_new.csv"));
    assert_eq!(fallback_path(Path::new("summary.txt")), Path::new("summary_new.txt"));
    assert_eq!(fallback_path(Path::new("out/report")), Path::new("out/report_new"));
}

#[test]
fn sha256_file_matches_known_digest() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("abc.txt");
    fs::write(&path, "abc").expect("write");

    let digest = sha256_file(&path).expect("hash");
    assert_eq!(digest, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[test]
fn sha256_file_reports_missing_file() {
    let err = sha256_file(Path::new("/nonexistent/file.map")).unwrap_err();
    assert!(err.to_string().contains("Failed to open file for hashing"));
}

#[test]
fn read_map_file_replaces_invalid_utf8() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("latin1.map");
    let mut bytes = b" .text  0x00000000  0x10 caf".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b".o\n");
    fs::write(&path, bytes).expect("write");

    let text = read_map_file(&path).expect("read");
    assert!(text.contains("caf\u{FFFD}.o"));
}

#[test]
fn read_map_file_reports_missing_file() {
    let err = read_map_file(Path::new("/nonexistent/firmware.map")).unwrap_err();
    assert!(err.to_string().contains("Failed to read map file"));
}

#[test]
fn write_with_fallback_creates_parent_dirs() {
    let tmp = tempdir().expect("tempdir");
    let target = tmp.path().join("reports/nested/out.csv");

    let written = write_with_fallback(&target, "module,total_bytes\n").expect("write");
    assert_eq!(written, target);
    assert_eq!(fs::read_to_string(&target).expect("read back"), "module,total_bytes\n");
}

#[test]
fn write_with_fallback_overwrites_existing_file() {
    let tmp = tempdir().expect("tempdir");
    let target = tmp.path().join("out.txt");
    fs::write(&target, "old").expect("seed");

    write_with_fallback(&target, "new").expect("write");
    assert_eq!(fs::read_to_string(&target).expect("read back"), "new");
    assert!(!fallback_path(&target).exists());
}

/// True when the current user can still open `path` for writing, e.g. when running as
/// root, which ignores permission bits.
fn still_writable(path: &Path) -> bool {
    fs::OpenOptions::new().write(true).open(path).is_ok()
}

#[test]
fn write_with_fallback_writes_sibling_when_target_is_read_only() {
    let tmp = tempdir().expect("tempdir");
    let target = tmp.path().join("report.csv");
    fs::write(&target, "locked").expect("seed");
    let mut perms = fs::metadata(&target).expect("metadata").permissions();
    perms.set_readonly(true);
    fs::set_permissions(&target, perms).expect("set read-only");

    if still_writable(&target) {
        eprintln!("skipping: read-only bit is not enforced for this user");
        return;
    }

    let written = write_with_fallback(&target, "module,total_bytes\n").expect("fallback write");
    assert_eq!(written, tmp.path().join("report_new.csv"));
    assert_eq!(fs::read_to_string(&written).expect("read fallback"), "module,total_bytes\n");
    assert_eq!(fs::read_to_string(&target).expect("read target"), "locked");
}
