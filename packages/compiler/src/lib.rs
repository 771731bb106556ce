#![deny(clippy::all)]

/**
 * Template Expression Compiler
 *
 * Extracts the Java expressions of a component template, resolves them
 * against the component and the template's imports, and rewrites the
 * template to call the generated expression methods.
 */

pub mod chars;
pub mod config;
pub mod error;
pub mod logging;
pub mod parse_util;
pub mod types;
pub mod util;

// Parser modules
pub mod expression_parser;
pub mod ml_parser;
pub mod template_parser;

// Re-exports
pub use config::CompilerConfig;
pub use error::{CompilerError, Result};
pub use logging::{LogLevel, Logger, NullLogger};
pub use parse_util::TemplateDiagnostic;
pub use template_parser::{
    compile_template, BindingKind, CompilationResult, ComponentInfo, LocalComponent,
    LocalComponentProp, TemplateExpression, TemplateParser, TemplateParserContext,
};
pub use types::TypeRef;
