//! `HSI_TRIGGER_MAP.md`: ADC acquisition trigger chains.
//!
//! Mostly fixed prose describing the board's AD7380/AD7606 wiring, with the
//! timer parameters that CubeMX owns substituted in from the export.
use super::{RenderContext, header, manual_notes_section};
use crate::ioc::meta::lookup_or_placeholder;

/// TIM1 master output trigger (TRGO source).
pub const TIM1_TRGO: &str = "TIM1.TIM_MasterOutputTrigger";
/// TIM3 period.
pub const TIM3_PERIOD: &str = "TIM3.PeriodNoDither";
/// TIM3 channel 2 pulse.
pub const TIM3_PULSE_CH2: &str = "TIM3.PulseNoDither_2";
/// TIM3 channel 2 polarity.
pub const TIM3_POLARITY_CH2: &str = "TIM3.OCPolarity_2";

/// Render the trigger map document.
#[must_use]
pub fn render(ctx: &RenderContext<'_>, manual_notes: &str) -> String {
    let map = &ctx.ioc.map;
    let source = format!(
        "`{}` (CubeMX {}) + project design notes",
        ctx.ioc_name(),
        ctx.ioc.meta.cube_version
    );
    let head = header(
        "HSI_TRIGGER_MAP: ADC/SPI/timer trigger chains",
        ctx,
        &source,
        &[],
    );

    format!(
        "{head}
## 1) Fast chain: AD7380 (SPI1+SPI2, timer-driven CS)
**Intent:**
- TIM1 emits TRGO on update: `{trgo}`.
- TIM3 runs as a reset slave (ITRx from TIM1 TRGO) and drives PWM on CH2 as the AD7380 **CS**.
- SPI1 (master) and SPI2 (slave) receive the two data lanes via DMA.

**Pins (from the `.ioc`):**
- AD7380_CS: `PE3` (label `AD7380_CS`, signal `S_TIM3_CH2`)
- SPI1: `PA5` SCK, `PA6` MISO, `PG4` MOSI
- SPI2: `PB12` NSS, `PB13` SCK, `PB14` MISO, `PB15` MOSI

**TIM3 parameters from the `.ioc` (CH2):**
- PeriodNoDither: `{period}`
- PulseNoDither_2: `{pulse}`
- OCPolarity_2: `{polarity}`

**Watch out:**
- The ITRx to TIM1 TRGO mapping must be confirmed in code or in the `.ioc` (CubeMX/RM) so the chain does not break during refactoring.

---

## 2) AD7606 #1 (SPI3)
- Trigger: software GPIO `AD7606_CONVST`.
- Busy: GPIO `AD7606_BUSY1`.
- SPI3: PC10/PC11/PC12 (SCK/MISO/MOSI).

## 3) AD7606 #2 (SPI4)
- Trigger: software GPIO `AD7606_CONVST` (shared).
- Busy: GPIO `AD7606_BUSY2`.
- SPI4: PE2/PE5/PE6 (SCK/MISO/MOSI).

{notes}",
        trgo = lookup_or_placeholder(map, TIM1_TRGO),
        period = lookup_or_placeholder(map, TIM3_PERIOD),
        pulse = lookup_or_placeholder(map, TIM3_PULSE_CH2),
        polarity = lookup_or_placeholder(map, TIM3_POLARITY_CH2),
        notes = manual_notes_section(manual_notes),
    )
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::SafetySettings;
    use crate::render::test_helpers::*;

    #[test]
    fn substitutes_present_keys_and_placeholders() {
        let ioc = sample_ioc();
        let safety = SafetySettings::default();
        let text = render(&context(&ioc, None, &safety), "");
        assert!(text.contains("TRGO on update: `TIM_TRGO_UPDATE`."));
        assert!(text.contains("- PeriodNoDither: `169`\n"));
        assert!(text.contains("- PulseNoDither_2: `TBD`\n"));
        assert!(text.contains("- OCPolarity_2: `TBD`\n"));
    }

    #[test]
    fn all_placeholders_on_empty_export() {
        let ioc = sample_ioc_from("");
        let safety = SafetySettings::default();
        let text = render(&context(&ioc, None, &safety), "");
        assert_eq!(text.matches("`TBD`").count(), 4);
        assert!(text.contains("Source: `uspf_test.ioc` (CubeMX TBD)"));
    }
}
