//! Markdown table formatting.

/// Render `rows` under `headers` as a markdown table.
///
/// Cells are emitted verbatim (no escaping). A row shorter than `headers`
/// gets empty trailing cells; extra cells are dropped. The result has no
/// trailing newline.
///
/// # Examples
///
/// ```
/// use hsi_docs::render::table::markdown_table;
///
/// let table = markdown_table(&["Pin", "Signal"], &[vec!["PA5".to_string(), "SPI1_SCK".to_string()]]);
/// assert_eq!(table, "| Pin | Signal |\n|---|---|\n| PA5 | SPI1_SCK |");
/// ```
#[must_use]
pub fn markdown_table<R: AsRef<[String]>>(headers: &[&str], rows: &[R]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("| {} |", headers.join(" | ")));
    lines.push(format!("|{}|", vec!["---"; headers.len()].join("|")));

    for row in rows {
        let row = row.as_ref();
        let cells: Vec<&str> = (0..headers.len())
            .map(|i| row.get(i).map_or("", String::as_str))
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    lines.join("\n")
}
