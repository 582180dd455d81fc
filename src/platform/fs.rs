// TimeScan - platform/fs.rs
//
// Scoped file reading. Each call opens, fully reads and closes one file, so
// at most one log handle is open at any time.

use std::io;
use std::path::Path;

/// Read the full content of a log file as UTF-8.
///
/// Invalid UTF-8 is an `InvalidData` error, not a lossy conversion: an
/// undecodable log aborts the scan like a missing one.
pub fn read_file(path: &Path) -> io::Result<String> {
    let content = std::fs::read_to_string(path)?;
    tracing::trace!(path = %path.display(), bytes = content.len(), "Read log file");
    Ok(content)
}
