//! Shared utilities for the e-cash wallet core.

pub mod logging;

pub use logging::{init_logging, init_tracing, LogFormat, ParseLogFormatError};
