//! CubeMX `.ioc` export: parsing and structured extraction.
//!
//! The export is a flat `key=value` namespace. Records are recovered from it
//! by naming convention only:
//!
//! - [`pins`]: `<PIN>.Signal` / `<PIN>.<Attr>`
//! - [`dma`]: `Dma.<REQUEST>.<INDEX>.<FIELD>`
//! - [`meta`]: fixed literal keys plus a SHA-256 of the raw bytes
pub mod dma;
pub mod meta;
pub mod parser;
pub mod pins;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::InputError;

pub use dma::DmaRecord;
pub use meta::{IocMeta, Provenance};
pub use pins::PinRecord;

/// Parsed `.ioc` keys. Ordered so every consumer sees the same iteration order.
pub type ConfigMap = BTreeMap<String, String>;

/// A fully parsed export with its extracted tables.
#[derive(Debug, Clone)]
pub struct Ioc {
    /// Path the export was read from.
    pub path: PathBuf,
    /// All parsed keys.
    pub map: ConfigMap,
    /// Project metadata and digest.
    pub meta: IocMeta,
    /// Pins in canonical order.
    pub pins: Vec<PinRecord>,
    /// DMA requests sorted by `(request, index)`.
    pub dma: Vec<DmaRecord>,
}

impl Ioc {
    /// Read, parse and extract the export at `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the file is missing or unreadable.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let map = parser::parse_ioc(path)?;
        let sha256 = meta::compute_sha256(path)?;
        Ok(Self::from_map(path, map, sha256))
    }

    /// Build from already parsed keys.
    #[must_use]
    pub fn from_map(path: &Path, map: ConfigMap, sha256: String) -> Self {
        let meta = IocMeta::from_map(&map, sha256);
        let pins = pins::extract_pins(&map);
        let dma = dma::extract_dma(&map);
        Self {
            path: path.to_path_buf(),
            map,
            meta,
            pins,
            dma,
        }
    }

    /// File name of the export without its directory.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        )
    }

    /// The record handed to the design-note updater.
    #[must_use]
    pub fn provenance(&self) -> Provenance {
        Provenance {
            ioc_name: self.file_name(),
            meta: self.meta.clone(),
        }
    }
}
