use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Why reading or writing a configuration file failed.
#[derive(Debug)]
pub enum SaveError {
    /// The file could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// The payload did not decode or decompress.
    Decode(String),
    /// Written by a build with a newer file or header format.
    VersionMismatch { expected_max: u32, found: u32 },
    /// Bad magic, truncated header, size or checksum mismatch.
    Corrupted(String),
    /// The world lacks a resource the codec needs.
    MissingResource(&'static str),
}

impl SaveError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        SaveError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io { path, source } => {
                write!(f, "cannot access {}: {source}", path.display())
            }
            SaveError::Decode(msg) => write!(f, "undecodable configuration: {msg}"),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "configuration format v{found} is newer than supported v{expected_max}"
            ),
            SaveError::Corrupted(msg) => write!(f, "corrupted configuration file: {msg}"),
            SaveError::MissingResource(name) => write!(f, "resource {name} is not initialised"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<bitcode::Error> for SaveError {
    fn from(e: bitcode::Error) -> Self {
        SaveError::Decode(e.to_string())
    }
}
