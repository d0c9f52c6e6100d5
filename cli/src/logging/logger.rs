//! Console logger facade with a per-document run summary.
use std::sync::Mutex;

use super::subscriber::STAGE_TARGET;
use super::types::{DocEntry, DocStatus, Log};

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// `record` is **not** included because its signature differs from the
/// `fn(&self, &str)` pattern shared by the display methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger backed by [`tracing`] that also collects one
/// [`DocEntry`] per output file for the closing summary.
#[derive(Debug, Default)]
pub struct Logger {
    entries: Mutex<Vec<DocEntry>>,
}

impl Logger {
    /// Create a new logger with an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a clone of all recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<DocEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record a per-document result for the summary.
    pub fn record(&self, name: &str, status: DocStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(DocEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the recorded entries with `status`.
    #[must_use]
    pub fn count(&self, status: DocStatus) -> usize {
        self.entries
            .lock()
            .map_or(0, |guard| guard.iter().filter(|e| e.status == status).count())
    }

    /// Count entries that indicate drift.
    #[must_use]
    pub fn drift_count(&self) -> usize {
        self.entries
            .lock()
            .map_or(0, |guard| guard.iter().filter(|e| e.status.is_drift()).count())
    }

    /// Print the summary of all recorded entries.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");

        for entry in &entries {
            let (icon, color) = match entry.status {
                DocStatus::Written => ("✓", "\x1b[32m"),
                DocStatus::Unchanged => ("·", "\x1b[2m"),
                DocStatus::Skipped => ("○", "\x1b[33m"),
                DocStatus::Missing | DocStatus::Differs => ("✗", "\x1b[31m"),
            };

            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!(
                "{color}{icon} {} {}{suffix}\x1b[0m",
                entry.name, entry.status
            ));
        }

        let written = self.count(DocStatus::Written);
        let unchanged = self.count(DocStatus::Unchanged);
        let skipped = self.count(DocStatus::Skipped);
        let drift = self.drift_count();
        self.info(&format!(
            "{} files: \x1b[32m{written} written\x1b[0m, \x1b[2m{unchanged} unchanged\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \x1b[31m{drift} out of date\x1b[0m",
            entries.len()
        ));
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);

    fn record(&self, name: &str, status: DocStatus, message: Option<&str>) {
        self.record(name, status, message);
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn logger_new_is_empty() {
        let log = Logger::new();
        assert!(log.entries().is_empty());
        assert_eq!(log.drift_count(), 0);
    }

    #[test]
    fn record_with_message() {
        let log = Logger::new();
        log.record("DN-015.md", DocStatus::Skipped, Some("design note not found"));
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "DN-015.md");
        assert_eq!(entries[0].message.as_deref(), Some("design note not found"));
    }

    #[test]
    fn counts_by_status() {
        let log = Logger::new();
        log.record("a", DocStatus::Written, None);
        log.record("b", DocStatus::Unchanged, None);
        log.record("c", DocStatus::Differs, None);
        log.record("d", DocStatus::Missing, None);
        assert_eq!(log.count(DocStatus::Written), 1);
        assert_eq!(log.count(DocStatus::Differs), 1);
        assert_eq!(log.drift_count(), 2);
    }

    #[test]
    fn log_trait_delegates_to_logger() {
        let log = Logger::new();
        let dyn_log: &dyn Log = &log;
        dyn_log.info("hello");
        dyn_log.record("x", DocStatus::Written, None);
        assert_eq!(log.count(DocStatus::Written), 1);
    }

    #[test]
    fn print_summary_without_subscriber_is_harmless() {
        let log = Logger::new();
        log.record("a", DocStatus::Written, None);
        log.print_summary();
    }
}
