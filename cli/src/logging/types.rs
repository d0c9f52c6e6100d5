//! Core logging types: per-document entries, status, and the [`Log`] trait.
use std::fmt;

/// Per-document result for summary reporting.
#[derive(Debug, Clone)]
pub struct DocEntry {
    /// Document file name or design-note path.
    pub name: String,
    /// What happened to it.
    pub status: DocStatus,
    /// Optional detail (e.g. skip reason).
    pub message: Option<String>,
}

/// Outcome for one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocStatus {
    /// Created or rewritten.
    Written,
    /// Already identical to the generated content.
    Unchanged,
    /// Not on disk (check mode).
    Missing,
    /// On disk but different (check mode).
    Differs,
    /// Deliberately left alone.
    Skipped,
}

impl DocStatus {
    /// Whether this status means the tree is out of date.
    #[must_use]
    pub const fn is_drift(self) -> bool {
        matches!(self, Self::Missing | Self::Differs)
    }
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Written => "written",
            Self::Unchanged => "unchanged",
            Self::Missing => "missing",
            Self::Differs => "differs",
            Self::Skipped => "skipped",
        })
    }
}

/// Abstraction over logging backends so commands can be driven by a test
/// recorder as easily as by the console [`Logger`](super::logger::Logger).
pub trait Log {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a per-document result for the summary.
    fn record(&self, name: &str, status: DocStatus, message: Option<&str>);
}
