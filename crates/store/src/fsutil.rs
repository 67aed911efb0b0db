//! Small filesystem helpers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Replace a file's contents atomically: write to a temporary sibling, then
/// rename over the destination. Readers never observe a half-written file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);
    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)
}
