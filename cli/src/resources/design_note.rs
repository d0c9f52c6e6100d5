//! Best-effort patcher for the pin-mux design note.
//!
//! The note is hand-written prose. Only four things are touched, each located
//! by a plain text anchor: the first `Date:` stamp, the derived-artifacts
//! list, the `Reproducibility:` bullet block, and a trailing maintenance
//! hint. Applying the patch to its own output changes nothing.
use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;

use super::helpers::fs::{read_optional, write_file};
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::ioc::Provenance;
use crate::render::Document;

const DATE_ANCHOR: &str = "Date:";
const DECISION_HEADING: &str = "## 3)";
const DECISION_TITLE: &str = "Decision";
const INTERFACES_HEADING: &str = "## 5)";
const INTERFACES_TITLE: &str = "Interfaces / Data / Timing impact";
const REPRO_ANCHOR: &str = "Reproducibility:\n";
const MAX_REPRO_BULLETS: usize = 10;
const COMMAND_MARKER: &str = "hsi-docs --ioc";

/// Everything the patch writes into the note.
#[derive(Debug, Clone)]
pub struct DesignNotePatch {
    /// Export the snapshot was generated from.
    pub provenance: Provenance,
    /// Output directory as it should appear in the note (forward slashes).
    pub out_dir: String,
    /// Date stamped into the note.
    pub date: NaiveDate,
}

impl DesignNotePatch {
    /// Apply the patch to `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use hsi_docs::ioc::{IocMeta, Provenance};
    /// use hsi_docs::resources::design_note::DesignNotePatch;
    ///
    /// let patch = DesignNotePatch {
    ///     provenance: Provenance {
    ///         ioc_name: "board.ioc".into(),
    ///         meta: IocMeta {
    ///             cube_version: "6.12.0".into(),
    ///             project_name: "board".into(),
    ///             mcu_name: "STM32G474VETx".into(),
    ///             device_id: "STM32G474VETx".into(),
    ///             sha256: "ab".into(),
    ///         },
    ///     },
    ///     out_dir: "docs/hsi".into(),
    ///     date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
    /// };
    /// let once = patch.apply_to("# DN\nDate: 2020-01-01\n");
    /// assert!(once.contains("Date: 2024-05-17"));
    /// assert_eq!(patch.apply_to(&once), once);
    /// ```
    #[must_use]
    pub fn apply_to(&self, text: &str) -> String {
        let mut text = self.stamp_date(text);
        self.ensure_artifacts(&mut text);
        self.ensure_reproducibility(&mut text);
        self.ensure_maintenance(&mut text);
        text
    }

    fn stamp_date(&self, text: &str) -> String {
        let Some(range) = find_date_stamp(text) else {
            return text.to_string();
        };
        let (head, tail) = text.split_at(range.start);
        let tail = tail.get(range.len()..).unwrap_or_default();
        format!("{head}{}{tail}", self.date.format("%Y-%m-%d"))
    }

    fn ensure_artifacts(&self, text: &mut String) {
        let io_map = format!("{}/{}", self.out_dir, Document::IoMap.file_name());
        if text.contains(&io_map) {
            return;
        }
        let mut block = String::from("\n- Derived artifacts (required snapshot documents):\n");
        for doc in Document::ALL {
            block.push_str(&format!("  - `{}/{}`\n", self.out_dir, doc.file_name()));
        }
        match heading_end(text, DECISION_HEADING, DECISION_TITLE) {
            Some(pos) => text.insert_str(pos, &block),
            None => {
                text.push('\n');
                text.push_str(&block);
            }
        }
    }

    fn reproducibility_block(&self) -> String {
        let meta = &self.provenance.meta;
        format!(
            "- CubeMX: {}\n- IOC file: `{}`\n- IOC SHA256: `{}`\n- MCU: {} ({})\n",
            meta.cube_version,
            self.provenance.ioc_name,
            meta.sha256,
            meta.mcu_name,
            meta.device_id
        )
    }

    fn ensure_reproducibility(&self, text: &mut String) {
        let block = self.reproducibility_block();
        if text.contains(REPRO_ANCHOR.trim_end()) {
            *text = replace_bullet_blocks(text, &block);
            return;
        }
        match heading_end(text, INTERFACES_HEADING, INTERFACES_TITLE) {
            Some(pos) => text.insert_str(pos, &format!("\n{REPRO_ANCHOR}{block}\n")),
            None => text.push_str(&format!("\n\n{REPRO_ANCHOR}{block}")),
        }
    }

    fn ensure_maintenance(&self, text: &mut String) {
        if text.contains(COMMAND_MARKER) {
            return;
        }
        text.push_str(&format!(
            "\n\nMaintenance:\n\
             - Updating the `.ioc` requires regenerating the snapshot documents:\n  \
             - `{COMMAND_MARKER} {}`\n\
             - Freshness check (CI): `{COMMAND_MARKER} <file.ioc> --check`\n",
            self.provenance.ioc_name
        ));
    }
}

/// Byte range of the first `Date:<ws>YYYY-MM-DD` date value.
fn find_date_stamp(text: &str) -> Option<std::ops::Range<usize>> {
    text.match_indices(DATE_ANCHOR).find_map(|(at, _)| {
        let after = at + DATE_ANCHOR.len();
        let rest = text.get(after..)?;
        let start = after + (rest.len() - rest.trim_start().len());
        let candidate = text.get(start..start + 10)?;
        is_iso_date(candidate).then_some(start..start + 10)
    })
}

fn is_iso_date(s: &str) -> bool {
    s.len() == 10
        && s.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        })
}

/// Position just past the newline ending the first `<heading><ws><title>...` line.
fn heading_end(text: &str, heading: &str, title: &str) -> Option<usize> {
    text.match_indices(heading).find_map(|(at, _)| {
        let after = at + heading.len();
        let rest = text.get(after..)?;
        let title_at = after + (rest.len() - rest.trim_start().len());
        if !text.get(title_at..)?.starts_with(title) {
            return None;
        }
        let newline = text.get(title_at..)?.find('\n')?;
        Some(title_at + newline + 1)
    })
}

/// Replace every `Reproducibility:` bullet block (1 to 10 `- ` lines) with `block`.
fn replace_bullet_blocks(text: &str, block: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find(REPRO_ANCHOR) {
        let (head, body) = rest.split_at(at + REPRO_ANCHOR.len());
        out.push_str(head);
        let consumed = bullet_prefix_len(body);
        if consumed > 0 {
            out.push_str(block);
        }
        rest = body.get(consumed..).unwrap_or_default();
    }
    out.push_str(rest);
    out
}

/// Length of the run of complete `- ` lines at the start of `body`, capped.
fn bullet_prefix_len(body: &str) -> usize {
    let mut len = 0;
    for line in body.split_inclusive('\n').take(MAX_REPRO_BULLETS) {
        if !line.starts_with("- ") || !line.ends_with('\n') {
            break;
        }
        len += line.len();
    }
    len
}

/// The design note as an output resource.
#[derive(Debug, Clone)]
pub struct DesignNoteResource {
    /// Path of the note.
    pub path: PathBuf,
    /// Patch to apply.
    pub patch: DesignNotePatch,
}

impl DesignNoteResource {
    /// Create a new design-note resource.
    #[must_use]
    pub const fn new(path: PathBuf, patch: DesignNotePatch) -> Self {
        Self { path, patch }
    }
}

impl Applicable for DesignNoteResource {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        let Some(current) = read_optional(&self.path)? else {
            return Ok(ResourceChange::Skipped {
                reason: "design note not found".to_string(),
            });
        };
        let patched = self.patch.apply_to(&current);
        if patched == current {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        write_file(&self.path, &patched)?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for DesignNoteResource {
    fn current_state(&self) -> Result<ResourceState> {
        Ok(match read_optional(&self.path)? {
            None => ResourceState::Missing,
            Some(current) if self.patch.apply_to(&current) == current => ResourceState::Correct,
            Some(current) => ResourceState::Incorrect { current },
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::ioc::IocMeta;

    fn patch() -> DesignNotePatch {
        DesignNotePatch {
            provenance: Provenance {
                ioc_name: "uspf_board.ioc".to_string(),
                meta: IocMeta {
                    cube_version: "6.12.0".to_string(),
                    project_name: "uspf".to_string(),
                    mcu_name: "STM32G474VETx".to_string(),
                    device_id: "STM32G474VETx".to_string(),
                    sha256: "f".repeat(64),
                },
            },
            out_dir: "docs/hsi".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        }
    }

    const NOTE: &str = "\
# DN-015 HSI pinmux map
Date: 2023-01-02

## 3) Decision: CubeMX is the source of truth
Text.

## 5) Interfaces / Data / Timing impact
More text.
";

    #[test]
    fn first_date_replaced_only() {
        let out = patch().apply_to("Date: 2020-01-01\nDate: 2021-02-02\n");
        assert!(out.starts_with("Date: 2024-05-17\nDate: 2021-02-02\n"));
    }

    #[test]
    fn date_without_value_is_skipped() {
        let out = patch().apply_to("Date: TBD\nUpdated Date:\t2020-01-01\n");
        assert!(out.starts_with("Date: TBD\nUpdated Date:\t2024-05-17\n"));
    }

    #[test]
    fn artifacts_inserted_after_decision_heading() {
        let out = patch().apply_to(NOTE);
        let expected = "## 3) Decision: CubeMX is the source of truth\n\
                        \n- Derived artifacts (required snapshot documents):\n  \
                        - `docs/hsi/HSI_IO_MAP.md`\n  \
                        - `docs/hsi/HSI_DMA_MAP.md`\n  \
                        - `docs/hsi/HSI_TRIGGER_MAP.md`\n  \
                        - `docs/hsi/HSI_SAFETY_PINS.md`\n\
                        Text.\n";
        assert!(out.contains(expected), "{out}");
    }

    #[test]
    fn reproducibility_inserted_into_interfaces_section() {
        let out = patch().apply_to(NOTE);
        let expected = "## 5) Interfaces / Data / Timing impact\n\
                        \nReproducibility:\n\
                        - CubeMX: 6.12.0\n\
                        - IOC file: `uspf_board.ioc`\n";
        assert!(out.contains(expected), "{out}");
        assert_eq!(out.matches("Reproducibility:").count(), 1);
    }

    #[test]
    fn existing_reproducibility_block_replaced() {
        let note = "Reproducibility:\n- CubeMX: 6.0.0\n- IOC file: `old.ioc`\n\nAfter.\n";
        let out = patch().apply_to(note);
        assert!(out.starts_with(
            "Reproducibility:\n- CubeMX: 6.12.0\n- IOC file: `uspf_board.ioc`\n"
        ));
        assert!(out.contains("(STM32G474VETx)\n\nAfter.\n"));
        assert!(!out.contains("old.ioc"));
    }

    #[test]
    fn appends_when_no_anchors() {
        let out = patch().apply_to("# Note\n");
        assert!(out.contains("\n\n- Derived artifacts"));
        assert!(out.contains("\n\nReproducibility:\n- CubeMX: 6.12.0\n"));
        assert!(out.contains("Maintenance:\n"));
        assert!(out.contains("`hsi-docs --ioc uspf_board.ioc`"));
        assert!(out.ends_with("`hsi-docs --ioc <file.ioc> --check`\n"));
    }

    #[test]
    fn patch_is_idempotent() {
        for note in [NOTE, "# Note\n", "", "Reproducibility:\n- a\n"] {
            let once = patch().apply_to(note);
            assert_eq!(patch().apply_to(&once), once, "note: {note:?}");
        }
    }

    #[test]
    fn existing_artifact_reference_respected() {
        let note = "See `docs/hsi/HSI_IO_MAP.md`.\n";
        let out = patch().apply_to(note);
        assert!(!out.contains("Derived artifacts"));
    }

    #[test]
    fn missing_note_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let dn = DesignNoteResource::new(dir.path().join("DN.md"), patch());
        assert_eq!(dn.current_state().unwrap(), ResourceState::Missing);
        assert!(matches!(dn.apply().unwrap(), ResourceChange::Skipped { .. }));
        assert!(!dir.path().join("DN.md").exists());
    }

    #[test]
    fn apply_writes_then_settles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DN.md");
        std::fs::write(&path, NOTE).unwrap();
        let dn = DesignNoteResource::new(path.clone(), patch());
        assert!(dn.needs_change().unwrap());
        assert_eq!(dn.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(dn.apply().unwrap(), ResourceChange::AlreadyCorrect);
        assert_eq!(dn.current_state().unwrap(), ResourceState::Correct);
    }
}
