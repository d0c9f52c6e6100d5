//! DMA request extraction from `Dma.<REQUEST>.<INDEX>.<FIELD>` keys.
use std::collections::BTreeMap;

use super::ConfigMap;

const DMA_NAMESPACE: &str = "Dma.";

/// One DMAMUX request routed to a DMA channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DmaRecord {
    /// Request name (e.g. `USART1_RX`).
    pub request: String,
    /// Index of this request's configuration block.
    pub index: u64,
    /// `Instance` (e.g. `DMA1_Channel1`).
    pub instance: String,
    /// `Direction`.
    pub direction: String,
    /// `PeriphDataAlignment`.
    pub periph_align: String,
    /// `MemDataAlignment`.
    pub mem_align: String,
    /// `Mode`.
    pub mode: String,
    /// `Priority`.
    pub priority: String,
    /// `MemInc`.
    pub mem_inc: String,
    /// `PeriphInc`.
    pub periph_inc: String,
}

impl DmaRecord {
    fn set_field(&mut self, field: &str, value: &str) {
        let slot = match field {
            "Instance" => &mut self.instance,
            "Direction" => &mut self.direction,
            "PeriphDataAlignment" => &mut self.periph_align,
            "MemDataAlignment" => &mut self.mem_align,
            "Mode" => &mut self.mode,
            "Priority" => &mut self.priority,
            "MemInc" => &mut self.mem_inc,
            "PeriphInc" => &mut self.periph_inc,
            _ => return,
        };
        value.clone_into(slot);
    }
}

/// Split a key into `(request, index, field)` if it names a DMA setting.
///
/// # Examples
///
/// ```
/// use hsi_docs::ioc::dma::parse_dma_key;
///
/// assert_eq!(parse_dma_key("Dma.USART1_RX.0.Mode"), Some(("USART1_RX", 0, "Mode")));
/// assert_eq!(parse_dma_key("Dma.Request0"), None);
/// ```
#[must_use]
pub fn parse_dma_key(key: &str) -> Option<(&str, u64, &str)> {
    let rest = key.strip_prefix(DMA_NAMESPACE)?;
    let (request, rest) = rest.split_once('.')?;
    let (index, field) = rest.split_once('.')?;

    let request_ok = !request.is_empty()
        && request
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
    let index_ok = !index.is_empty() && index.chars().all(|c| c.is_ascii_digit());
    if !request_ok || !index_ok || field.is_empty() {
        return None;
    }

    Some((request, index.parse().ok()?, field))
}

/// Group DMA settings into one record per `(request, index)`, sorted by that pair.
///
/// # Examples
///
/// ```
/// use hsi_docs::ioc::dma::extract_dma;
/// use hsi_docs::ioc::parser::parse_ioc_from_str;
///
/// let map = parse_ioc_from_str("Dma.USART1_RX.0.Instance=DMA1_Channel1\nDma.SPI1_RX.0.Instance=DMA1_Channel2\n");
/// let rows = extract_dma(&map);
/// assert_eq!(rows[0].request, "SPI1_RX");
/// assert_eq!(rows[1].request, "USART1_RX");
/// ```
#[must_use]
pub fn extract_dma(map: &ConfigMap) -> Vec<DmaRecord> {
    let mut entries: BTreeMap<(&str, u64), DmaRecord> = BTreeMap::new();

    for (key, value) in map {
        let Some((request, index, field)) = parse_dma_key(key) else {
            continue;
        };
        entries
            .entry((request, index))
            .or_insert_with(|| DmaRecord {
                request: request.to_string(),
                index,
                ..DmaRecord::default()
            })
            .set_field(field, value);
    }

    entries.into_values().collect()
}
