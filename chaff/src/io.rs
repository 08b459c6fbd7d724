use std::fs;
use std::path::{Path, PathBuf};

/// Reads a file with best-effort decoding. Malformed byte sequences become
/// U+FFFD. Returns `None` for missing or unreadable paths; the batch
/// skips those rather than failing.
pub fn read_to_string_lossy(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "skipping unreadable input");
            None
        }
    }
}

/// Maps an input path to its output path: same base name, inside
/// `output_dir`.
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    output_dir.join(input.file_name().unwrap_or(input.as_os_str()))
}

pub fn ensure_output_dir(output_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(output_dir)
}
