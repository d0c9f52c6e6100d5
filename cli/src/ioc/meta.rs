//! Project metadata and content digest of the `.ioc` export.
use std::path::Path;

use super::ConfigMap;
use crate::error::InputError;

/// Placeholder rendered for any metadata or trigger key missing from the export.
pub const PLACEHOLDER: &str = "TBD";

/// Identity of the configuration export a snapshot was generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IocMeta {
    /// `MxCube.Version`.
    pub cube_version: String,
    /// `ProjectManager.ProjectName`.
    pub project_name: String,
    /// `Mcu.Name`.
    pub mcu_name: String,
    /// `ProjectManager.DeviceId`.
    pub device_id: String,
    /// Lowercase hex SHA-256 of the raw file bytes.
    pub sha256: String,
}

impl IocMeta {
    /// Build metadata from parsed keys and a precomputed digest.
    #[must_use]
    pub fn from_map(map: &ConfigMap, sha256: String) -> Self {
        let get = |key: &str| lookup_or_placeholder(map, key);
        Self {
            cube_version: get("MxCube.Version"),
            project_name: get("ProjectManager.ProjectName"),
            mcu_name: get("Mcu.Name"),
            device_id: get("ProjectManager.DeviceId"),
            sha256,
        }
    }
}

/// Everything the design-note updater needs to describe where a snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// File name of the export (no directory), e.g. `uspf_421243_064.ioc`.
    pub ioc_name: String,
    /// Metadata of that export.
    pub meta: IocMeta,
}

/// Value of `key`, or [`PLACEHOLDER`] when absent.
#[must_use]
pub fn lookup_or_placeholder(map: &ConfigMap, key: &str) -> String {
    map.get(key)
        .cloned()
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Compute the lowercase hex SHA-256 digest of the file at `path`.
///
/// # Errors
///
/// Returns [`InputError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Path) -> Result<String, InputError> {
    let bytes = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(sha256_hex(&bytes))
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    use std::fmt::Write as _;

    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    let mut hex = String::with_capacity(64);
    for b in &result {
        // write! to a String is infallible; unwrap_or(()) makes that explicit.
        write!(hex, "{b:02x}").unwrap_or(());
    }
    hex
}
