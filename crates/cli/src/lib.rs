use std::env;
use std::fs;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

pub mod commands;
pub mod logging;

/// Canonicalize a path if possible, falling back to the given string
/// relative to the current working directory.
pub fn canonicalize_or_current(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    if path == Path::new(".") {
        Ok(env::current_dir().context("Failed to get current directory")?)
    } else {
        // Try to canonicalize; if it fails (e.g., path does not yet exist),
        // join it with the current dir to get an absolute path.
        match path.canonicalize() {
            Ok(p) => Ok(p),
            Err(_) => {
                let cwd = env::current_dir().context("Failed to get current directory")?;
                Ok(cwd.join(path))
            }
        }
    }
}

/// Read a map file in full. Invalid UTF-8 is replaced rather than rejected, since map
/// files routinely embed paths in the build machine's local encoding.
pub fn read_map_file(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read map file {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Compute the SHA-256 hash of a file and return it as a hex string.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open file for hashing: {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("Failed to read file for hashing: {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let digest = hasher.finalize();
    Ok(format!("{:x}", digest))
}

/// Sibling path used when the requested output cannot be written:
/// `report.csv` becomes `report_new.csv`.
pub fn fallback_path(path: &Path) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let file_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_new.{ext}"),
        None => format!("{stem}_new"),
    };
    path.with_file_name(file_name)
}

/// Write `contents` to `path`, creating parent directories.
///
/// If the target is not writable (typically a report still open in a spreadsheet), the
/// contents go to [`fallback_path`] instead. Returns the path actually written.
pub fn write_with_fallback(path: &Path, contents: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output dir {}", parent.display()))?;
    }

    match fs::write(path, contents) {
        Ok(()) => Ok(path.to_path_buf()),
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            let alt = fallback_path(path);
            fs::write(&alt, contents)
                .with_context(|| format!("Failed to write fallback output {}", alt.display()))?;
            tracing::warn!(
                requested = %path.display(),
                written = %alt.display(),
                "output not writable, wrote fallback instead"
            );
            Ok(alt)
        }
        Err(err) => Err(err).with_context(|| format!("Failed to write {}", path.display())),
    }
}
