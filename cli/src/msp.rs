//! Advisory DMA modes scraped from a hand-written HAL MSP source.
//!
//! This is a heuristic cross-check only. The modes found here annotate the
//! DMA snapshot and never replace what the `.ioc` export says.
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context as _, Result};

/// Request name (e.g. `USART1_RX`) to advisory mode (e.g. `DMA_CIRCULAR`).
pub type MspModes = BTreeMap<String, String>;

const HANDLE_PREFIX: &str = "hdma_";
const MODE_FIELD: &str = ".Init.Mode";
const MODE_PREFIX: &str = "DMA_";

/// Load advisory modes from `path`, or `None` when no file is given or it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load(path: Option<&Path>) -> Result<Option<MspModes>> {
    let Some(path) = path else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(Some(parse_msp_dma_modes(&String::from_utf8_lossy(&bytes))))
}

/// Collect every `hdma_<ident>.Init.Mode = DMA_<TOKEN>;` assignment.
///
/// `<ident>` is `[a-z0-9_]+` and becomes the request name upper-cased;
/// whitespace is allowed around `=` and before `;`. A later assignment to the
/// same handle wins.
///
/// # Examples
///
/// ```
/// use hsi_docs::msp::parse_msp_dma_modes;
///
/// let modes = parse_msp_dma_modes("    hdma_usart1_rx.Init.Mode = DMA_CIRCULAR;\n");
/// assert_eq!(modes.get("USART1_RX").map(String::as_str), Some("DMA_CIRCULAR"));
/// ```
#[must_use]
pub fn parse_msp_dma_modes(text: &str) -> MspModes {
    let mut modes = MspModes::new();
    let mut cursor = 0;

    while let Some(found) = text.get(cursor..).and_then(|rest| rest.find(HANDLE_PREFIX)) {
        let start = cursor + found;
        match match_assignment(text.get(start..).unwrap_or_default()) {
            Some((ident, mode, consumed)) => {
                modes.insert(ident.to_uppercase(), mode.to_string());
                cursor = start + consumed;
            }
            None => cursor = start + HANDLE_PREFIX.len(),
        }
    }

    modes
}

/// Match one assignment at the start of `s`, returning `(ident, mode, bytes consumed)`.
fn match_assignment(s: &str) -> Option<(&str, &str, usize)> {
    let after_prefix = s.strip_prefix(HANDLE_PREFIX)?;
    let ident_len = leading_len(after_prefix, |c| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    });
    if ident_len == 0 {
        return None;
    }
    let (ident, rest) = after_prefix.split_at(ident_len);

    let rest = rest.strip_prefix(MODE_FIELD)?.trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    if !rest.starts_with(MODE_PREFIX) {
        return None;
    }
    let token_len = leading_len(rest.get(MODE_PREFIX.len()..)?, |c| {
        c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'
    });
    if token_len == 0 {
        return None;
    }
    let (mode, rest) = rest.split_at(MODE_PREFIX.len() + token_len);
    let rest = rest.trim_start().strip_prefix(';')?;

    Some((ident, mode, s.len() - rest.len()))
}

fn leading_len(s: &str, accept: impl Fn(char) -> bool) -> usize {
    s.find(|c: char| !accept(c)).unwrap_or(s.len())
}
