//! Logging
//!
//! The sink every compile call reports through. Callers pass it explicitly.

pub mod logger;

pub use logger::{LogLevel, Logger, NullLogger, RecordingLogger};
