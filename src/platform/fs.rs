// SimHist - platform/fs.rs
//
// Thin filesystem helpers for reading logs and maintaining the output
// collection file. Every handle is scoped to a single call.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Delete `path` if it exists.
///
/// Returns `true` when a file was removed, `false` when there was nothing
/// to remove.
pub fn reset_file(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Append `line` plus a newline to `path`, creating the file if needed.
pub fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

/// Read every line of `path`, without line terminators.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    Ok(read_file_lossy(path)?
        .lines()
        .map(str::to_string)
        .collect())
}
