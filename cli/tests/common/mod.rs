// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed project tree and a fluent builder so
// each integration test can set up an isolated `.ioc` export, MSP source,
// design note and settings file without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use clap::Parser as _;
use hsi_docs::cli::Cli;
use hsi_docs::commands::{self, Outcome};
use hsi_docs::logging::Logger;

/// Header date pinned by [`IntegrationTestContext::run`].
pub const FIXED_DATE: &str = "2024-05-17";

/// File name of the export written by [`TestContextBuilder::new`].
pub const IOC_NAME: &str = "uspf_board.ioc";

/// A trimmed-down CubeMX export exercising every extractor.
pub const SAMPLE_IOC: &str = "\
#MicroXplorer Configuration settings - do not modify
MxCube.Version=6.12.0
Mcu.Name=STM32G474VETx
ProjectManager.DeviceId=STM32G474VETx
ProjectManager.ProjectName=uspf
PA5.Signal=SPI1_SCK
PA5.Mode=Full_Duplex_Master
PA5.Locked=true
PA6.Signal=SPI1_MISO
PB12.Signal=SPI2_NSS
PE3-OSC_IN.Signal=RCC_OSC_IN
PE3.Signal=S_TIM3_CH2
PE3.GPIO_Label=AD7380_CS
PB10.Signal=TIM1_BKIN
PC0.Signal=TIM1_CH1
Dma.USART1_RX.0.Instance=DMA1_Channel1
Dma.USART1_RX.0.Direction=DMA_PERIPH_TO_MEMORY
Dma.USART1_RX.0.Mode=DMA_CIRCULAR
Dma.USART1_RX.0.Priority=DMA_PRIORITY_LOW
Dma.SPI1_RX.0.Instance=DMA1_Channel2
Dma.SPI1_RX.0.Mode=DMA_NORMAL
Dma.SPI1_RX.0.Priority=DMA_PRIORITY_VERY_HIGH
TIM1.TIM_MasterOutputTrigger=TIM_TRGO_UPDATE
TIM3.PeriodNoDither=169
TIM3.PulseNoDither_2=42
TIM3.OCPolarity_2=TIM_OCPOLARITY_LOW
";

/// An isolated project tree backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory acting as the working directory.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Path to the project root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path of a generated document inside the default output directory.
    pub fn doc_path(&self, name: &str) -> PathBuf {
        self.root.path().join("docs").join("hsi").join(name)
    }

    /// Read a generated document.
    pub fn read_doc(&self, name: &str) -> String {
        std::fs::read_to_string(self.doc_path(name)).expect("read generated document")
    }

    /// Overwrite a generated document.
    pub fn write_doc(&self, name: &str, content: &str) {
        std::fs::write(self.doc_path(name), content).expect("write document");
    }

    /// Path of the default design note.
    pub fn design_note_path(&self) -> PathBuf {
        self.root
            .path()
            .join("docs")
            .join("design-notes")
            .join("DN-015_HSI_Pinmux_Map.md")
    }

    /// Parse `args` as if given on the command line.
    pub fn cli(&self, args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("hsi-docs").chain(args.iter().copied()))
    }

    /// Run with `args` plus a pinned `--date`, returning the outcome and logger.
    pub fn run(&self, args: &[&str]) -> (anyhow::Result<Outcome>, Logger) {
        let mut all = vec!["--date", FIXED_DATE];
        all.extend_from_slice(args);
        self.run_unpinned(&all)
    }

    /// Run with exactly `args` (no pinned date).
    pub fn run_unpinned(&self, args: &[&str]) -> (anyhow::Result<Outcome>, Logger) {
        let log = Logger::new();
        let result = commands::run_in(&self.cli(args), self.root.path(), &log);
        (result, log)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a project containing [`SAMPLE_IOC`] as [`IOC_NAME`].
    pub fn new() -> Self {
        Self::empty().with_file(IOC_NAME, SAMPLE_IOC)
    }

    /// Begin building an empty project.
    pub fn empty() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        Self {
            ctx: IntegrationTestContext { root },
        }
    }

    /// Write `content` to `relative` under the root, creating parents.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.ctx.root.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write fixture file");
        self
    }

    /// Write the default design note.
    pub fn with_design_note(self, content: &str) -> Self {
        self.with_file("docs/design-notes/DN-015_HSI_Pinmux_Map.md", content)
    }

    /// Write `hsi-docs.toml`.
    pub fn with_settings(self, content: &str) -> Self {
        self.with_file("hsi-docs.toml", content)
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
