//! Default mode: write changed documents and patch the design note.
use anyhow::Result;

use super::{Outcome, Snapshot};
use crate::logging::{DocStatus, Log};
use crate::resources::{Applicable as _, ResourceChange};

/// Write every document that changed, then patch the design note.
///
/// # Errors
///
/// Returns an error if a document or the design note cannot be written.
pub fn run(snapshot: &Snapshot, log: &dyn Log) -> Result<Outcome> {
    log.stage("Writing documents");
    for (doc, resource) in &snapshot.documents {
        let change = resource.apply()?;
        log.debug(&format!("{}: {change:?}", resource.description()));
        record_change(log, doc.file_name(), &change);
    }

    if let Some(dn) = &snapshot.design_note {
        log.stage("Updating design note");
        let name = dn.description();
        let change = dn.apply()?;
        if let ResourceChange::Skipped { reason } = &change {
            log.warn(&format!("{reason}, skipping: {name}"));
        }
        record_change(log, &name, &change);
    }

    Ok(Outcome::Clean)
}

fn record_change(log: &dyn Log, name: &str, change: &ResourceChange) {
    match change {
        ResourceChange::Applied => log.record(name, DocStatus::Written, None),
        ResourceChange::AlreadyCorrect => log.record(name, DocStatus::Unchanged, None),
        ResourceChange::Skipped { reason } => {
            log.record(name, DocStatus::Skipped, Some(reason.as_str()));
        }
    }
}
