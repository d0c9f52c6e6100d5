//! HSI snapshot documents from STM32CubeMX `.ioc` exports.
//!
//! Turns the flat `key=value` project export into four deterministic
//! markdown documents (pin mux, DMA routing, trigger chains, safety pins)
//! and checks committed copies for drift.
//!
//! The public API is organised into layers:
//!
//! - **[`ioc`]**: parse the export and extract pins, DMA requests and metadata
//! - **[`msp`]**: advisory DMA modes from a hand-written HAL MSP source
//! - **[`render`]**: pure document rendering with manual-notes carry-over
//! - **[`resources`]**: idempotent `check + apply` outputs (documents, design note)
//! - **[`commands`]**: orchestration of `generate` and `--check`
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ioc;
pub mod logging;
pub mod msp;
pub mod render;
pub mod resources;
