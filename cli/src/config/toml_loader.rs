//! TOML settings file parsing.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::SettingsError;

/// Load a TOML file into `T`.
///
/// A missing file deserializes from empty TOML, so `T` must tolerate every
/// field being absent (typically via `#[serde(default)]`).
///
/// # Errors
///
/// Returns [`SettingsError::Invalid`] if the file cannot be read or parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, SettingsError> {
    let invalid = |message: String| SettingsError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    if !path.exists() {
        return toml::from_str("").map_err(|e| invalid(e.to_string()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    toml::from_str(&content).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let sample: Sample = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(sample.name, "");
        assert_eq!(sample.count, 0);
    }

    #[test]
    fn reads_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.toml");
        std::fs::write(&path, "name = \"x\"\ncount = 3\n").unwrap();
        let sample: Sample = load_config(&path).unwrap();
        assert_eq!(sample.name, "x");
        assert_eq!(sample.count, 3);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "count = \"not a number\"\n").unwrap();
        let err = load_config::<Sample>(&path).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
