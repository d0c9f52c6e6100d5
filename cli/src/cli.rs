//! Command-line interface definition.
use chrono::NaiveDate;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Default output directory for the snapshot documents.
pub const DEFAULT_OUT_DIR: &str = "docs/hsi";
/// Default design note patched after generation.
pub const DEFAULT_DESIGN_NOTE: &str = "docs/design-notes/DN-015_HSI_Pinmux_Map.md";
/// Default optional settings file.
pub const DEFAULT_SETTINGS: &str = "hsi-docs.toml";

/// Generate (or check) HSI snapshot documents from a CubeMX `.ioc` export.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "hsi-docs",
    about = "Generate HSI pin mux / DMA / trigger / safety snapshot docs from a CubeMX .ioc",
    version
)]
pub struct Cli {
    /// Path to the .ioc file (default: first match of the settings' ioc_pattern)
    #[arg(long, value_name = "FILE")]
    pub ioc: Option<PathBuf>,

    /// Output directory for the generated documents
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    /// Optional HAL MSP source used to cross-check DMA modes
    #[arg(long, value_name = "FILE")]
    pub msp: Option<PathBuf>,

    /// Design note to patch with reproducibility metadata
    #[arg(long, value_name = "FILE", default_value = DEFAULT_DESIGN_NOTE)]
    pub dn: PathBuf,

    /// Do not touch the design note
    #[arg(long, conflicts_with = "dn")]
    pub no_dn: bool,

    /// Only check that the committed documents are up to date (nothing is written)
    #[arg(long)]
    pub check: bool,

    /// Header date instead of today (YYYY-MM-DD)
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Optional settings file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_SETTINGS)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The design note to patch, unless `--no-dn` was given.
    #[must_use]
    pub fn design_note(&self) -> Option<&Path> {
        (!self.no_dn).then_some(self.dn.as_path())
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}
