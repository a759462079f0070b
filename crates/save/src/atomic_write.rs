//! Atomic file write using the write-rename pattern.
//!
//! Data goes to `{path}.tmp`, is flushed with `sync_all()`, then renamed over
//! the final path, so a crash mid-write never leaves a half-written
//! configuration file behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Atomically writes `data` to `path`, creating parent directories as needed.
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
