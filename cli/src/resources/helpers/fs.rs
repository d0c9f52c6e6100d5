//! File-system resource helpers.
use std::path::Path;

use crate::error::OutputError;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns [`OutputError::Write`] if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Read the raw bytes of `path`, or `None` if it does not exist.
///
/// # Errors
///
/// Returns [`OutputError::Read`] if the file exists but cannot be read.
pub fn read_bytes_optional(path: &Path) -> Result<Option<Vec<u8>>, OutputError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(OutputError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read `path` as UTF-8 (lossy), or `None` if it does not exist.
///
/// # Errors
///
/// Returns [`OutputError::Read`] if the file exists but cannot be read.
pub fn read_optional(path: &Path) -> Result<Option<String>, OutputError> {
    Ok(read_bytes_optional(path)?.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}

/// Write `content` to `path`, creating parent directories first.
///
/// # Errors
///
/// Returns [`OutputError::Write`] if the directory or file cannot be written.
pub fn write_file(path: &Path, content: &str) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    std::fs::write(path, content).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}
