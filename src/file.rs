//! Reading documents from disk and saving them back atomically.
//!
//! The engine itself never touches the filesystem; the editing session calls
//! into this module on open and save.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("not a regular file: {}", .0.display())]
    NotRegularFile(PathBuf),

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read the whole file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<u8>, FileError> {
    let path = path.as_ref();
    let read_err = |source| FileError::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(read_err)?;
    if !metadata.is_file() {
        return Err(FileError::NotRegularFile(path.to_path_buf()));
    }

    fs::read(path).map_err(read_err)
}

/// Write `bytes` to a temp file next to `path`, then rename it over `path`.
///
/// Readers of `path` see either the old content or the new, never a partial
/// write.
pub fn save_atomic(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), FileError> {
    let path = path.as_ref();
    let write_err = |source| FileError::Write {
        path: path.to_path_buf(),
        source,
    };

    if path.exists() && !path.is_file() {
        tracing::warn!(path = %path.display(), "refusing to save over non-regular file");
        return Err(FileError::NotRegularFile(path.to_path_buf()));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
    temp.write_all(bytes).map_err(write_err)?;
    temp.flush().map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}
