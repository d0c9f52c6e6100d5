//! Pin table extraction from `<pin>.<Attr>` keys.
use super::ConfigMap;

const SIGNAL_SUFFIX: &str = ".Signal";

/// One configured pin.
///
/// Only pins with a `<pin>.Signal` key exist; every other attribute is empty
/// when its key is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRecord {
    /// Pin identifier (e.g. `PA5`, `PE3-OSC_IN`).
    pub pin: String,
    /// Assigned signal (e.g. `SPI1_SCK`).
    pub signal: String,
    /// `<pin>.Mode`.
    pub mode: String,
    /// `<pin>.GPIO_Label`.
    pub label: String,
    /// `<pin>.GPIO_Speed`.
    pub speed: String,
    /// `<pin>.Locked`.
    pub locked: String,
}

/// Canonical sort key for a pin identifier.
///
/// Identifiers starting with `P<port><digits>` order by port letter, then pin
/// number, then the full identifier. Anything else sorts after all of them by
/// its literal text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PinKey<'a> {
    /// `P<port><number>...` identifiers.
    Port {
        /// Port letter, `A`..=`Z`.
        port: char,
        /// Numeric pin index within the port.
        number: u64,
        /// Full identifier as the final tie-breaker.
        id: &'a str,
    },
    /// Identifiers that do not follow the port naming scheme.
    Other(&'a str),
}

/// Compute the [`PinKey`] for `pin`.
///
/// # Examples
///
/// ```
/// use hsi_docs::ioc::pins::{pin_sort_key, PinKey};
///
/// assert_eq!(
///     pin_sort_key("PE3-OSC_IN"),
///     PinKey::Port { port: 'E', number: 3, id: "PE3-OSC_IN" },
/// );
/// assert_eq!(pin_sort_key("XYZ"), PinKey::Other("XYZ"));
/// ```
#[must_use]
pub fn pin_sort_key(pin: &str) -> PinKey<'_> {
    let parsed = pin.strip_prefix('P').and_then(|rest| {
        let mut chars = rest.chars();
        let port = chars.next().filter(char::is_ascii_uppercase)?;
        let tail = chars.as_str();
        let digits_end = tail
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(tail.len());
        let number = tail.get(..digits_end)?.parse::<u64>().ok()?;
        Some((port, number))
    });

    match parsed {
        Some((port, number)) => PinKey::Port {
            port,
            number,
            id: pin,
        },
        None => PinKey::Other(pin),
    }
}

/// Sort pin identifiers into canonical order in place.
pub fn sort_pins(pins: &mut [String]) {
    pins.sort_by(|a, b| pin_sort_key(a).cmp(&pin_sort_key(b)));
}

/// Extract every pin with an assigned signal, in canonical order.
///
/// # Examples
///
/// ```
/// use hsi_docs::ioc::parser::parse_ioc_from_str;
/// use hsi_docs::ioc::pins::extract_pins;
///
/// let map = parse_ioc_from_str("PB12.Signal=SPI2_NSS\nPA5.Signal=SPI1_SCK\nPA5.Locked=true\n");
/// let pins = extract_pins(&map);
/// assert_eq!(pins[0].pin, "PA5");
/// assert_eq!(pins[0].locked, "true");
/// assert_eq!(pins[1].pin, "PB12");
/// ```
#[must_use]
pub fn extract_pins(map: &ConfigMap) -> Vec<PinRecord> {
    let mut pins: Vec<String> = map
        .keys()
        .filter_map(|k| k.strip_suffix(SIGNAL_SUFFIX))
        .filter(|base| base.starts_with('P'))
        .map(str::to_string)
        .collect();
    sort_pins(&mut pins);

    let attr = |pin: &str, suffix: &str| map.get(&format!("{pin}.{suffix}")).cloned().unwrap_or_default();

    pins.into_iter()
        .map(|pin| PinRecord {
            signal: attr(&pin, "Signal"),
            mode: attr(&pin, "Mode"),
            label: attr(&pin, "GPIO_Label"),
            speed: attr(&pin, "GPIO_Speed"),
            locked: attr(&pin, "Locked"),
            pin,
        })
        .collect()
}

/// First pin (in canonical order) carrying `signal`.
#[must_use]
pub fn find_by_signal<'a>(pins: &'a [PinRecord], signal: &str) -> Option<&'a str> {
    pins.iter()
        .find(|p| p.signal == signal)
        .map(|p| p.pin.as_str())
}

/// First pin (in canonical order) whose GPIO label is `label`.
#[must_use]
pub fn find_by_label<'a>(pins: &'a [PinRecord], label: &str) -> Option<&'a str> {
    pins.iter()
        .find(|p| p.label == label)
        .map(|p| p.pin.as_str())
}
