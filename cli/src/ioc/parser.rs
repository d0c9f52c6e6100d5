//! Flat `key=value` parsing of CubeMX `.ioc` exports.
use std::path::Path;

use super::ConfigMap;
use crate::error::InputError;

/// Parse an `.ioc` file into a [`ConfigMap`].
///
/// The file is decoded as UTF-8; invalid sequences are replaced rather than
/// rejected so that a stray byte in a vendor comment cannot block generation.
///
/// # Errors
///
/// Returns [`InputError::NotFound`] if the file does not exist and
/// [`InputError::Io`] if it cannot be read.
pub fn parse_ioc(path: &Path) -> Result<ConfigMap, InputError> {
    let content = read_lossy(path)?;
    Ok(parse_ioc_from_str(&content))
}

/// Parse `.ioc` content from a string.
///
/// Contract: empty lines, lines starting with `#`, and lines without `=` are
/// skipped without error. Everything else is split on the first `=`; the key
/// is trimmed and the value is kept exactly as written. A repeated key keeps
/// its last value.
///
/// # Examples
///
/// ```
/// use hsi_docs::ioc::parser::parse_ioc_from_str;
///
/// let map = parse_ioc_from_str("#MicroXplorer Configuration settings\nMcu.Name=STM32G474VETx\nPA5.Signal=SPI1_SCK\n");
/// assert_eq!(map.get("Mcu.Name").map(String::as_str), Some("STM32G474VETx"));
/// assert_eq!(map.len(), 2);
/// ```
#[must_use]
pub fn parse_ioc_from_str(content: &str) -> ConfigMap {
    let mut map = ConfigMap::new();

    for line in content.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        map.insert(key.trim().to_string(), value.to_string());
    }

    map
}

fn read_lossy(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_pairs() {
        let map = parse_ioc_from_str("Mcu.Family=STM32G4\nMcu.Name=STM32G474VETx\n");
        assert_eq!(map.len(), 2);
        assert_eq!(map["Mcu.Family"], "STM32G4");
        assert_eq!(map["Mcu.Name"], "STM32G474VETx");
    }

    #[test]
    fn comments_and_empty_lines_ignored() {
        let map = parse_ioc_from_str("#MicroXplorer Configuration settings - do not modify\n\nA=1\n\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map["A"], "1");
    }

    #[test]
    fn lines_without_separator_skipped() {
        let map = parse_ioc_from_str("garbage line\nA=1\n[section]\n");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn splits_on_first_separator_only() {
        let map = parse_ioc_from_str("ProjectManager.FunctionsList=1-SystemClock_Config-RCC-false\nK=a=b\n");
        assert_eq!(map["K"], "a=b");
    }

    #[test]
    fn value_whitespace_preserved() {
        let map = parse_ioc_from_str("PA5.GPIO_Label= padded \n");
        assert_eq!(map["PA5.GPIO_Label"], " padded ");
    }

    #[test]
    fn key_whitespace_trimmed() {
        let map = parse_ioc_from_str("  Mcu.Name =STM32G474VETx\n");
        assert_eq!(map["Mcu.Name"], "STM32G474VETx");
    }

    #[test]
    fn crlf_line_endings_removed() {
        let map = parse_ioc_from_str("A=1\r\nB=2\r\n");
        assert_eq!(map["A"], "1");
        assert_eq!(map["B"], "2");
    }

    #[test]
    fn last_duplicate_wins() {
        let map = parse_ioc_from_str("A=1\nA=2\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map["A"], "2");
    }

    #[test]
    fn empty_value_kept() {
        let map = parse_ioc_from_str("PA5.Locked=\n");
        assert_eq!(map["PA5.Locked"], "");
    }

    #[test]
    fn empty_input_returns_empty_map() {
        assert!(parse_ioc_from_str("").is_empty());
    }

    #[test]
    fn parse_ioc_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_ioc(&dir.path().join("absent.ioc")).unwrap_err();
        assert!(matches!(err, InputError::NotFound(_)));
    }

    #[test]
    fn parse_ioc_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.ioc");
        std::fs::write(&path, b"A=caf\xff\nB=2\n").unwrap();
        let map = parse_ioc(&path).unwrap();
        assert_eq!(map["A"], "caf\u{fffd}");
        assert_eq!(map["B"], "2");
    }
}
