//! `--check` mode: report drift without writing anything.
use anyhow::Result;

use super::{Outcome, Snapshot};
use crate::logging::{DocStatus, Log};
use crate::resources::{Applicable as _, Resource as _, ResourceState};

/// Compare every rendered document with the file on disk without writing.
///
/// All mismatches are reported before returning. The design note is never
/// touched in this mode.
///
/// # Errors
///
/// Returns an error if an existing document cannot be read.
pub fn run(snapshot: &Snapshot, log: &dyn Log) -> Result<Outcome> {
    log.stage("Checking documents");

    let mut stale = Vec::new();
    for (doc, resource) in &snapshot.documents {
        let status = match resource.current_state()? {
            ResourceState::Correct => DocStatus::Unchanged,
            ResourceState::Missing => DocStatus::Missing,
            ResourceState::Incorrect { .. } => DocStatus::Differs,
        };
        log.record(doc.file_name(), status, None);
        if status.is_drift() {
            stale.push((resource.description(), status));
        }
    }

    if let Some(dn) = &snapshot.design_note {
        log.debug(&format!("check mode: design note not updated: {}", dn.description()));
    }

    if stale.is_empty() {
        log.info("all documents up to date");
        return Ok(Outcome::Clean);
    }

    log.error("HSI docs are out of date:");
    for (path, status) in &stale {
        log.error(&format!("  - {path} ({status})"));
    }
    log.error("Run hsi-docs without --check to regenerate the documents.");
    Ok(Outcome::Drift)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::Logger;
    use crate::render::Document;
    use crate::resources::document::DocumentResource;
    use std::path::Path;

    fn snapshot(dir: &Path) -> Snapshot {
        Snapshot {
            documents: Document::ALL
                .iter()
                .map(|d| {
                    let path = dir.join(d.file_name());
                    (*d, DocumentResource::new(path, format!("{}\n", d.file_name())))
                })
                .collect(),
            design_note: None,
        }
    }

    #[test]
    fn empty_tree_reports_all_missing() {
        let dir = tempfile::tempdir().unwrap();
        let log = Logger::new();
        assert_eq!(run(&snapshot(dir.path()), &log).unwrap(), Outcome::Drift);
        assert_eq!(log.count(DocStatus::Missing), 4);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn one_changed_file_reported_as_differs() {
        let dir = tempfile::tempdir().unwrap();
        let snap = snapshot(dir.path());
        for (_, res) in &snap.documents {
            std::fs::write(&res.path, &res.content).unwrap();
        }
        std::fs::write(dir.path().join("HSI_DMA_MAP.md"), "edited\n").unwrap();

        let log = Logger::new();
        assert_eq!(run(&snap, &log).unwrap(), Outcome::Drift);
        let entries = log.entries();
        let differs: Vec<&str> = entries
            .iter()
            .filter(|e| e.status == DocStatus::Differs)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(differs, ["HSI_DMA_MAP.md"]);
        assert_eq!(log.count(DocStatus::Unchanged), 3);
    }

    #[test]
    fn up_to_date_tree_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let snap = snapshot(dir.path());
        for (_, res) in &snap.documents {
            std::fs::write(&res.path, &res.content).unwrap();
        }
        let log = Logger::new();
        assert_eq!(run(&snap, &log).unwrap(), Outcome::Clean);
        assert_eq!(log.drift_count(), 0);
    }
}
