//! `HSI_SAFETY_PINS.md`: safety-critical IO.
//!
//! Each configured signal is looked up in the pin table. When the export does
//! not carry it, the configured pin is printed with an `(expected)` marker so
//! the gap stays visible in review.
use super::table::markdown_table;
use super::{RenderContext, header, manual_notes_section};
use crate::config::{SafetySettings, SafetySignal};
use crate::ioc::PinRecord;
use crate::ioc::pins::{find_by_label, find_by_signal};

/// How a safety signal is matched against the pin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Signal,
    Label,
}

/// Resolved pin for `signal`, or `<expected> (expected)`.
fn resolve(pins: &[PinRecord], signal: &SafetySignal, lookup: Lookup) -> String {
    let found = match lookup {
        Lookup::Signal => find_by_signal(pins, &signal.name),
        Lookup::Label => find_by_label(pins, &signal.name),
    };
    found.map_or_else(|| format!("{} (expected)", signal.expected), ToString::to_string)
}

fn break_input_lines(pins: &[PinRecord], safety: &SafetySettings) -> String {
    safety
        .break_inputs
        .iter()
        .map(|s| {
            let title = s.title.as_deref().unwrap_or(&s.name);
            format!(
                "- {title}: `{}` on `{}`",
                resolve(pins, s, Lookup::Signal),
                s.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn labelled_lines(pins: &[PinRecord], signals: &[SafetySignal]) -> String {
    signals
        .iter()
        .map(|s| {
            let pin = resolve(pins, s, Lookup::Label);
            match &s.role {
                Some(role) => format!("- `{pin}` on `{}` ({role})", s.name),
                None => format!("- `{pin}` on `{}`", s.name),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Actuator rows found in the export, or the configured fallback table.
fn actuator_rows(pins: &[PinRecord], safety: &SafetySettings) -> Vec<[String; 3]> {
    let found: Vec<[String; 3]> = safety
        .actuator_signals
        .iter()
        .filter_map(|sig| {
            find_by_signal(pins, sig).map(|pin| {
                [
                    pin.to_string(),
                    sig.clone(),
                    safety.actuator_note.clone(),
                ]
            })
        })
        .collect();

    if !found.is_empty() {
        return found;
    }
    safety
        .actuator_fallback
        .iter()
        .map(|r| [r.pin.clone(), r.signal.clone(), r.notes.clone()])
        .collect()
}

/// Render the safety pins document.
#[must_use]
pub fn render(ctx: &RenderContext<'_>, manual_notes: &str) -> String {
    let pins = ctx.ioc.pins.as_slice();
    let safety = ctx.safety;
    let source = format!(
        "`{}` (CubeMX {}) + project safety context (TIM1 BKIN/BKIN2, gate drivers)",
        ctx.ioc_name(),
        ctx.ioc.meta.cube_version
    );
    let head = header("HSI_SAFETY_PINS: safety-critical IO snapshot", ctx, &source, &[]);

    format!(
        "{head}
## Purpose
- Safety-critical signals that must not change through CubeMX without a dedicated design note or ADR.
- Check points for bench work and the test plan.

## 1) Hardware emergency shutdown inputs (TIM1)
{breaks}

Requirement: the emergency shutdown lines must work independently of the fast/slow loop logic.

## 2) Gate driver signals (SKYPER)
{faults}

## 3) External watchdog / supervisor
{watchdog}

## 4) PWM/actuator outputs (TIM1)
{table}

{notes}",
        breaks = break_input_lines(pins, safety),
        faults = labelled_lines(pins, &safety.driver_faults),
        watchdog = labelled_lines(pins, &safety.watchdog),
        table = markdown_table(&["Pin", "Signal", "Notes"], &actuator_rows(pins, safety)),
        notes = manual_notes_section(manual_notes),
    )
}
