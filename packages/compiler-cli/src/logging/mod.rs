//! Logging
//!
//! Console sink for the compiler's `Logger` trait.

pub mod console_logger;

pub use console_logger::ConsoleLogger;
