//! `HSI_DMA_MAP.md`: DMAMUX request routing, cross-checked against the MSP source.
use super::table::markdown_table;
use super::{RenderContext, header, manual_notes_section, strip};
use crate::ioc::DmaRecord;
use crate::msp::MspModes;

const HEADERS: [&str; 9] = [
    "Request",
    "DMA",
    "Dir",
    "Align(P/M)",
    "Inc(P/M)",
    "Mode(IOC)",
    "Mode(MSP)",
    "Prio",
    "Notes",
];

const DMA_PREFIX: &str = "DMA_";
const PRIORITY_PREFIX: &str = "DMA_PRIORITY_";

/// Result of comparing one request's mode against the MSP source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeCheck {
    /// The MSP source sets the same mode.
    Confirmed,
    /// The MSP source sets a different mode.
    Divergent(String),
    /// No MSP source, or it does not mention this request.
    Unchecked,
}

impl ModeCheck {
    /// Compare `record` against the advisory modes.
    #[must_use]
    pub fn of(record: &DmaRecord, msp: Option<&MspModes>) -> Self {
        match msp.and_then(|m| m.get(&record.request)) {
            Some(mode) if mode.is_empty() => Self::Unchecked,
            Some(mode) if *mode == record.mode => Self::Confirmed,
            Some(mode) => Self::Divergent(mode.clone()),
            None => Self::Unchecked,
        }
    }

    /// Mode shown in the `Mode(MSP)` column, before prefix stripping.
    fn shown_mode<'a>(&'a self, record: &'a DmaRecord) -> &'a str {
        match self {
            Self::Divergent(mode) => mode,
            Self::Confirmed | Self::Unchecked => &record.mode,
        }
    }

    /// Text for the `Notes` column.
    #[must_use]
    pub const fn note(&self) -> &'static str {
        match self {
            Self::Confirmed => "MSP confirms IOC (Mode)",
            Self::Divergent(_) => "IOC vs MSP divergence (Mode)",
            Self::Unchecked => "",
        }
    }
}

fn row(record: &DmaRecord, msp: Option<&MspModes>) -> [String; 9] {
    let check = ModeCheck::of(record, msp);
    [
        record.request.clone(),
        record.instance.clone(),
        strip(&record.direction, DMA_PREFIX),
        format!(
            "{}/{}",
            strip(&record.periph_align, DMA_PREFIX),
            strip(&record.mem_align, DMA_PREFIX)
        ),
        format!(
            "{}/{}",
            strip(&record.periph_inc, DMA_PREFIX),
            strip(&record.mem_inc, DMA_PREFIX)
        ),
        strip(&record.mode, DMA_PREFIX),
        strip(check.shown_mode(record), DMA_PREFIX),
        strip(&record.priority, PRIORITY_PREFIX),
        check.note().to_string(),
    ]
}

/// Render the DMA map document.
#[must_use]
pub fn render(ctx: &RenderContext<'_>, manual_notes: &str) -> String {
    let source = format!(
        "`{}` (CubeMX {}) + `stm32g4xx_hal_msp.c` (if given)",
        ctx.ioc_name(),
        ctx.ioc.meta.cube_version
    );
    let head = header("HSI_DMA_MAP: DMA/DMAMUX snapshot", ctx, &source, &[]);
    let rows: Vec<[String; 9]> = ctx.ioc.dma.iter().map(|r| row(r, ctx.msp)).collect();

    format!(
        "{head}
## Purpose
- Record the DMAMUX request to DMA channel routing and its key parameters.
- Differences between the `.ioc` and the MSP source show up in the `Mode(MSP)` and `Notes` columns.

## DMA map

{table}

{notes}",
        table = markdown_table(&HEADERS, &rows),
        notes = manual_notes_section(manual_notes),
    )
}
