//! Optional project settings (`hsi-docs.toml`).
//!
//! Every field has a built-in default matching the board this tool was
//! written for, so the file only needs to list what differs. The defaults
//! encode assumptions about one hardware project; another board should
//! override them here rather than in code.
pub mod toml_loader;

use serde::Deserialize;
use std::path::Path;

use crate::error::SettingsError;

/// Default input discovery pattern, relative to the working directory.
pub const DEFAULT_IOC_PATTERN: &str = "uspf_*.ioc";

/// All settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// File pattern (one `*` wildcard) used when `--ioc` is not given.
    pub ioc_pattern: String,
    /// Safety-pins document lookups and fallbacks.
    pub safety: SafetySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ioc_pattern: DEFAULT_IOC_PATTERN.to_string(),
            safety: SafetySettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`; a missing file yields [`Settings::default`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        toml_loader::load_config(path)
    }
}

/// A safety-relevant signal looked up in the pin table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SafetySignal {
    /// Signal name or GPIO label to search for, depending on the section.
    pub name: String,
    /// Pin rendered as `<expected> (expected)` when nothing matches.
    pub expected: String,
    /// Short heading shown before the pin (defaults to `name`).
    #[serde(default)]
    pub title: Option<String>,
    /// Direction or role annotation, e.g. `GPIO_Input`.
    #[serde(default)]
    pub role: Option<String>,
}

impl SafetySignal {
    fn new(name: &str, expected: &str) -> Self {
        Self {
            name: name.to_string(),
            expected: expected.to_string(),
            title: None,
            role: None,
        }
    }

    fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }
}

/// One row of the actuator-output table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActuatorRow {
    /// Pin identifier.
    pub pin: String,
    /// Timer output signal.
    pub signal: String,
    /// Free-text notes column.
    pub notes: String,
}

impl ActuatorRow {
    fn expected(pin: &str, signal: &str) -> Self {
        Self {
            pin: pin.to_string(),
            signal: signal.to_string(),
            notes: "expected".to_string(),
        }
    }
}

/// Lookups and defaults for the safety-pins document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SafetySettings {
    /// Hardware break inputs, looked up by signal.
    pub break_inputs: Vec<SafetySignal>,
    /// Gate-driver fault lines, looked up by GPIO label.
    pub driver_faults: Vec<SafetySignal>,
    /// External watchdog / supervisor lines, looked up by GPIO label.
    pub watchdog: Vec<SafetySignal>,
    /// Timer output signals listed in the actuator table, in order.
    pub actuator_signals: Vec<String>,
    /// Notes column for actuator rows found in the export.
    pub actuator_note: String,
    /// Table rendered verbatim when none of `actuator_signals` is found.
    pub actuator_fallback: Vec<ActuatorRow>,
}

impl Default for SafetySettings {
    fn default() -> Self {
        Self {
            break_inputs: vec![
                SafetySignal::new("TIM1_BKIN", "PB10").titled("BKIN"),
                SafetySignal::new("TIM1_BKIN2", "PC3").titled("BKIN2"),
            ],
            driver_faults: vec![
                SafetySignal::new("SKYPER_ERROUT1", "PA9").with_role("GPIO_Input"),
                SafetySignal::new("SKYPER_ERROUT2", "PA8").with_role("GPIO_Input"),
                SafetySignal::new("SKYPER_ERR_IN", "PC9")
                    .with_role("GPIO_Output; verify direction against the schematic"),
            ],
            watchdog: vec![SafetySignal::new("EXTWDG_OUT", "PC2").with_role("GPIO_Output")],
            actuator_signals: [
                "TIM1_CH1", "TIM1_CH2", "TIM1_CH3", "TIM1_CH4", "TIM1_CH1N", "TIM1_CH2N",
                "TIM1_CH3N",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            actuator_note: "TIM1 PWM output (check polarity/complementary & driver mapping)"
                .to_string(),
            actuator_fallback: vec![
                ActuatorRow::expected("PC0", "TIM1_CH1"),
                ActuatorRow::expected("PC1", "TIM1_CH2"),
                ActuatorRow::expected("PC13", "TIM1_CH1N"),
                ActuatorRow::expected("PB0", "TIM1_CH2N"),
            ],
        }
    }
}
