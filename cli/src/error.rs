//! Domain-specific error types for the snapshot generator.
//!
//! Internal modules return typed errors (e.g., [`InputError`]) while command
//! handlers at the CLI boundary convert them to [`anyhow::Error`] via the
//! standard `?` operator. The binary downcasts back to [`InputError`] to pick
//! the dedicated exit code for an unresolvable input file.
//!
//! # Error hierarchy
//!
//! ```text
//! HsiError
//! ├── Input(InputError)      : the .ioc export cannot be located or read
//! ├── Settings(SettingsError): the optional TOML settings file is invalid
//! └── Output(OutputError)    : a generated document cannot be written
//! ```
//!
//! Drift found by `--check` is not an error: it is a designed outcome
//! reported through [`crate::commands::Outcome`].

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the snapshot generator.
#[derive(Error, Debug)]
pub enum HsiError {
    /// The configuration export could not be located or read.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// The settings file could not be parsed.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// A generated document could not be written.
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Errors that arise while resolving or reading the `.ioc` export.
///
/// Every variant is fatal and maps to exit code 2.
#[derive(Error, Debug)]
pub enum InputError {
    /// No file in the search directory matched the discovery pattern.
    #[error("no .ioc found (expected {pattern} in {dir})")]
    NoMatch {
        /// Discovery pattern, e.g. `uspf_*.ioc`.
        pattern: String,
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// An explicitly given input path does not exist.
    #[error(".ioc not found: {0}")]
    NotFound(PathBuf),

    /// The input exists but could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from the optional settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file is not valid TOML or has the wrong shape.
    #[error("Invalid settings in {path}: {message}")]
    Invalid {
        /// Path to the settings file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// Errors that arise while reading or writing generated output.
#[derive(Error, Debug)]
pub enum OutputError {
    /// A previously generated document exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the existing document.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A document or design note could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Exit code for a failed run: 2 when the input could not be resolved, 1 otherwise.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let input = matches!(err.downcast_ref::<HsiError>(), Some(HsiError::Input(_)))
        || err.downcast_ref::<InputError>().is_some();
    if input { 2 } else { 1 }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn input_error_no_match_display() {
        let e = InputError::NoMatch {
            pattern: "uspf_*.ioc".to_string(),
            dir: PathBuf::from("."),
        };
        assert_eq!(e.to_string(), "no .ioc found (expected uspf_*.ioc in .)");
    }

    #[test]
    fn input_error_not_found_display() {
        let e = InputError::NotFound(PathBuf::from("board.ioc"));
        assert_eq!(e.to_string(), ".ioc not found: board.ioc");
    }

    #[test]
    fn input_error_io_has_source() {
        use std::error::Error as StdError;
        let e = InputError::Io {
            path: PathBuf::from("board.ioc"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("board.ioc"));
    }

    #[test]
    fn settings_error_display() {
        let e = SettingsError::Invalid {
            path: PathBuf::from("hsi-docs.toml"),
            message: "expected a table".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid settings in hsi-docs.toml: expected a table"
        );
    }

    #[test]
    fn output_error_display() {
        let e = OutputError::Write {
            path: PathBuf::from("docs/hsi/HSI_IO_MAP.md"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert!(e.to_string().contains("docs/hsi/HSI_IO_MAP.md"));
    }

    #[test]
    fn hsi_error_from_input_error() {
        let e: HsiError = InputError::NotFound(PathBuf::from("x.ioc")).into();
        assert!(e.to_string().contains("Input error"));
    }

    #[test]
    fn hsi_error_survives_anyhow_round_trip() {
        let e: anyhow::Error = HsiError::from(InputError::NotFound(PathBuf::from("x.ioc"))).into();
        assert!(matches!(
            e.downcast_ref::<HsiError>(),
            Some(HsiError::Input(_))
        ));
    }

    #[test]
    fn input_errors_exit_with_two() {
        let e: anyhow::Error = HsiError::from(InputError::NotFound(PathBuf::from("x.ioc"))).into();
        assert_eq!(exit_code(&e), 2);
        let bare: anyhow::Error = InputError::NotFound(PathBuf::from("x.ioc")).into();
        assert_eq!(exit_code(&bare), 2);
    }

    #[test]
    fn other_errors_exit_with_one() {
        let e: anyhow::Error = HsiError::from(SettingsError::Invalid {
            path: PathBuf::from("hsi-docs.toml"),
            message: "bad".to_string(),
        })
        .into();
        assert_eq!(exit_code(&e), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<HsiError>();
        assert_send_sync::<InputError>();
        assert_send_sync::<SettingsError>();
        assert_send_sync::<OutputError>();
    }
}
