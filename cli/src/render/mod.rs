//! Snapshot document rendering.
//!
//! Each document is a pure function of the parsed export, the optional
//! advisory MSP modes, the safety settings, the header date, and the manual
//! notes carried over from the previous version. Nothing else feeds in, so
//! identical inputs always give identical bytes.
pub mod dma_map;
pub mod io_map;
pub mod notes;
pub mod safety_pins;
pub mod table;
pub mod trigger_map;

use chrono::NaiveDate;

use crate::config::SafetySettings;
use crate::ioc::Ioc;
use crate::msp::MspModes;

/// Label of the header line carrying the generation date.
pub const DATE_LABEL: &str = "Date";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The four generated snapshot documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Document {
    /// Full pin table.
    IoMap,
    /// DMAMUX routing with MSP cross-check.
    DmaMap,
    /// Timer/ADC/SPI trigger chains.
    TriggerMap,
    /// Safety-critical signals.
    SafetyPins,
}

impl Document {
    /// Every document, in output order.
    pub const ALL: [Self; 4] = [Self::IoMap, Self::DmaMap, Self::TriggerMap, Self::SafetyPins];

    /// Fixed file name inside the output directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::IoMap => "HSI_IO_MAP.md",
            Self::DmaMap => "HSI_DMA_MAP.md",
            Self::TriggerMap => "HSI_TRIGGER_MAP.md",
            Self::SafetyPins => "HSI_SAFETY_PINS.md",
        }
    }

    /// Render the full text of this document.
    #[must_use]
    pub fn render(self, ctx: &RenderContext<'_>, manual_notes: &str) -> String {
        match self {
            Self::IoMap => io_map::render(ctx, manual_notes),
            Self::DmaMap => dma_map::render(ctx, manual_notes),
            Self::TriggerMap => trigger_map::render(ctx, manual_notes),
            Self::SafetyPins => safety_pins::render(ctx, manual_notes),
        }
    }
}

/// Inputs shared by every document.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Parsed export and extracted tables.
    pub ioc: &'a Ioc,
    /// Advisory DMA modes from the MSP source, if one was given.
    pub msp: Option<&'a MspModes>,
    /// Safety lookups and fallbacks.
    pub safety: &'a SafetySettings,
    /// Date printed in every header.
    pub date: NaiveDate,
}

impl<'a> RenderContext<'a> {
    /// Same inputs, different header date.
    #[must_use]
    pub const fn with_date(self, date: NaiveDate) -> Self {
        Self { date, ..self }
    }

    fn ioc_name(&self) -> String {
        self.ioc.file_name()
    }
}

/// Build the common header: title, `key: value` lines joined by markdown hard
/// breaks, and a horizontal rule.
fn header(title: &str, ctx: &RenderContext<'_>, source: &str, extra: &[(&str, String)]) -> String {
    let mut fields = vec![
        ("Status".to_string(), "snapshot".to_string()),
        (DATE_LABEL.to_string(), ctx.date.format(DATE_FORMAT).to_string()),
        ("Source".to_string(), source.to_string()),
        (
            "IOC SHA256".to_string(),
            format!("`{}`", ctx.ioc.meta.sha256),
        ),
    ];
    fields.extend(extra.iter().map(|(k, v)| ((*k).to_string(), v.clone())));

    let lines: Vec<String> = fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
    format!("# {title}\n\n{}\n\n---\n", lines.join("  \n"))
}

/// Closing manual-notes section shared by every document.
fn manual_notes_section(notes: &str) -> String {
    format!("## Manual notes\n{}\n", notes::region(notes))
}

/// Read the header date back out of a previously generated document.
///
/// # Examples
///
/// ```
/// use hsi_docs::render::header_date;
///
/// let date = header_date("# T\n\nStatus: snapshot  \nDate: 2024-05-17  \n");
/// assert_eq!(date.map(|d| d.to_string()).as_deref(), Some("2024-05-17"));
/// ```
#[must_use]
pub fn header_date(text: &str) -> Option<NaiveDate> {
    let prefix = format!("{DATE_LABEL}: ");
    text.lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .and_then(|rest| rest.get(..10))
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
}

/// Strip `prefix` from `value` if present.
fn strip(value: &str, prefix: &str) -> String {
    value.strip_prefix(prefix).unwrap_or(value).to_string()
}
