//! `.env`-style file parsing for the build command environment.
//!
//! One `KEY=VALUE` entry per line. Blank lines and `#` comments are
//! skipped, surrounding single or double quotes on values are stripped.
//! Entries are handed to the build command's child process, not applied to
//! wick's own environment.

use crate::error::{CliError, Result};
use std::path::Path;

/// Load and parse an env file.
///
/// # Errors
///
/// Fails with `FileNotFound` when the file cannot be read.
pub fn load(path: &Path) -> Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| CliError::FileNotFound(path.to_path_buf()))?;
    Ok(parse(&content))
}

fn parse(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }

            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }

            Some((key.to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
    stripped.unwrap_or(value)
}
