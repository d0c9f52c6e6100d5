//! Logging infrastructure for structured console output.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::{LOG_ENV, STAGE_TARGET, init_subscriber};
pub use types::{DocEntry, DocStatus, Log};
