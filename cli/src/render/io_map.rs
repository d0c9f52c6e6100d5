//! `HSI_IO_MAP.md`: full pin mux table.
use super::table::markdown_table;
use super::{RenderContext, header, manual_notes_section};

const HEADERS: [&str; 6] = ["Pin", "Signal", "Mode", "GPIO_Label", "GPIO_Speed", "Locked"];

/// Render the IO map document.
#[must_use]
pub fn render(ctx: &RenderContext<'_>, manual_notes: &str) -> String {
    let meta = &ctx.ioc.meta;
    let source = format!(
        "`{}` (CubeMX {}), `Core/Src/stm32g4xx_hal_msp.c` (if edited by hand)",
        ctx.ioc_name(),
        meta.cube_version
    );
    let head = header(
        "HSI_IO_MAP: pin mux snapshot (CubeMX)",
        ctx,
        &source,
        &[
            ("MCU", format!("{} ({})", meta.mcu_name, meta.device_id)),
            ("Project (CubeMX)", format!("`{}`", meta.project_name)),
        ],
    );

    let rows: Vec<[String; 6]> = ctx
        .ioc
        .pins
        .iter()
        .map(|p| {
            [
                p.pin.clone(),
                p.signal.clone(),
                p.mode.clone(),
                p.label.clone(),
                p.speed.clone(),
                p.locked.clone(),
            ]
        })
        .collect();

    format!(
        "{head}
## Purpose
- Record the current pin mux (Pin, Signal, Mode, Label) as a reviewable snapshot.
- Intended for review and audit, bench bring-up, and catching regressions when CubeMX code is regenerated.

## Pin mux snapshot

{table}

---

## Notes
- Pins missing from the table are unconfigured (reset state) as far as CubeMX is concerned.
- The `Locked` column mirrors the `.ioc` lock that guards a pin against accidental edits in the CubeMX GUI.

{notes}",
        table = markdown_table(&HEADERS, &rows),
        notes = manual_notes_section(manual_notes),
    )
}
