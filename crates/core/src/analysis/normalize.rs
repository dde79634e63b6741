/// Module id used when a record carries no owner.
pub const UNKNOWN_MODULE: &str = "unknown";

/// Map a raw owner string to the module id shown in reports.
///
/// Plain paths collapse to their file name (`/src/obj/main.o` -> `main.o`, Windows
/// separators included). Archive members such as `/usr/lib/libfoo.a(bar.o)` are kept
/// whole so that same-named objects from different archives stay apart.
pub fn normalize_module(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return UNKNOWN_MODULE.to_string();
    }

    let has_separator = raw.contains(is_path_separator);
    let is_archive_member = raw.contains('(') && raw.contains(')');
    if !has_separator || is_archive_member {
        return raw.to_string();
    }

    match raw.rsplit(is_path_separator).next() {
        Some(base) if !base.is_empty() => base.to_string(),
        _ => raw.to_string(),
    }
}

fn is_path_separator(c: char) -> bool {
    c == '/' || c == '\\'
}
