//! Manual-notes region: user text carried verbatim across regenerations.
//!
//! The content between the markers is never parsed. It is cut out of the
//! previous version of a document and pasted into the new one.

/// Opening marker line of the manual-notes region.
pub const MANUAL_START: &str = "<!-- MANUAL_NOTES:START -->";
/// Closing marker line of the manual-notes region.
pub const MANUAL_END: &str = "<!-- MANUAL_NOTES:END -->";

/// Extract the manual notes from a previously generated document.
///
/// Returns the text strictly between the first start marker and the first end
/// marker after it, with surrounding blank lines removed. Returns an empty
/// string when either marker is missing.
///
/// # Examples
///
/// ```
/// use hsi_docs::render::notes::{extract, region};
///
/// let doc = format!("# Title\n{}\n", region("keep me"));
/// assert_eq!(extract(&doc), "keep me");
/// assert_eq!(extract("# no markers"), "");
/// ```
#[must_use]
pub fn extract(existing: &str) -> String {
    existing
        .split_once(MANUAL_START)
        .and_then(|(_, after)| after.split_once(MANUAL_END))
        .map(|(body, _)| trim_blank_lines(body).to_string())
        .unwrap_or_default()
}

/// Render the manual-notes region around `notes` (no trailing newline).
#[must_use]
pub fn region(notes: &str) -> String {
    format!("{MANUAL_START}\n{}\n{MANUAL_END}", trim_blank_lines(notes))
}

fn trim_blank_lines(s: &str) -> &str {
    s.trim_matches(|c| c == '\n' || c == '\r')
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn empty_region_has_blank_body() {
        assert_eq!(region(""), format!("{MANUAL_START}\n\n{MANUAL_END}"));
        assert_eq!(extract(&region("")), "");
    }

    #[test]
    fn round_trip_preserves_text() {
        let notes = "- Bench: PA5 scope probe\n\n  indented line\n| a | b |";
        let doc = format!("before\n{}\nafter\n", region(notes));
        assert_eq!(extract(&doc), notes);
        assert_eq!(region(&extract(&doc)), region(notes));
    }

    #[test]
    fn inner_whitespace_kept_outer_newlines_trimmed() {
        let doc = format!("{MANUAL_START}\n\n\n  spaced  \n\n{MANUAL_END}");
        assert_eq!(extract(&doc), "  spaced  ");
    }

    #[test]
    fn crlf_blank_lines_trimmed() {
        let doc = format!("{MANUAL_START}\r\nnote\r\n{MANUAL_END}\r\n");
        assert_eq!(extract(&doc), "note");
    }

    #[test]
    fn missing_end_marker_yields_empty() {
        assert_eq!(extract(&format!("{MANUAL_START}\nnote\n")), "");
    }

    #[test]
    fn end_before_start_yields_empty() {
        assert_eq!(extract(&format!("{MANUAL_END}\nnote\n{MANUAL_START}\n")), "");
    }

    #[test]
    fn first_region_wins() {
        let doc = format!("{}\n{}", region("one"), region("two"));
        assert_eq!(extract(&doc), "one");
    }
}
