//! Filename sanitization

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SecurityError};

static SAFE_FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("valid regex"));

/// Accept only letters, digits, `_`, `-` and `.`
///
/// `.` and `..` are rejected even though they match the character set.
pub fn sanitize_filename(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(SecurityError::unsafe_filename(name, "must not be empty"));
    }
    if !SAFE_FILENAME_RE.is_match(name) {
        return Err(SecurityError::unsafe_filename(
            name,
            "only [A-Za-z0-9_.-] allowed",
        ));
    }
    if name == "." || name == ".." {
        return Err(SecurityError::unsafe_filename(name, "directory reference"));
    }
    Ok(name)
}

/// `base_dir/<sensor_name>.txt`, with the name sanitized first
pub fn safe_log_path(base_dir: impl AsRef<Path>, sensor_name: &str) -> Result<PathBuf> {
    let name = sanitize_filename(sensor_name)?;
    Ok(base_dir.as_ref().join(format!("{name}.txt")))
}
