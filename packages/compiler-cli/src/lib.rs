#![deny(clippy::all)]

/**
 * Template Compiler CLI
 *
 * Loads a component context and compiles template files against it
 */
pub use template_compiler as compiler;

pub mod config;
pub mod logging;
pub mod perform_compile;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
