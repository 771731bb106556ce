//! Compiler errors
//!
//! Only unrecoverable problems become a `CompilerError`. Everything else is
//! reported as a `TemplateDiagnostic` and compilation continues.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompilerError {
    /// The expression text is not valid host-language syntax
    #[error("Couldn't parse expression, make sure it is valid Java: {message}\n\nIn expression: {expression}")]
    ExpressionSyntax { message: String, expression: String },

    /// A `v-for` value that matches none of the supported loop forms
    #[error("Invalid v-for definition \"{definition}\": {reason}")]
    InvalidLoopDefinition { definition: String, reason: String },

    /// A type name that cannot be parsed
    #[error("Invalid type \"{type_name}\": {message}")]
    InvalidType { type_name: String, message: String },

    #[error("Couldn't read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A context or configuration file that doesn't describe what it should
    #[error("Invalid configuration in {path}: {message}")]
    Config { path: String, message: String },
}

impl CompilerError {
    pub fn syntax(message: impl Into<String>, expression: impl Into<String>) -> Self {
        CompilerError::ExpressionSyntax {
            message: message.into(),
            expression: expression.into(),
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        CompilerError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(path: impl Into<String>, message: impl ToString) -> Self {
        CompilerError::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn invalid_loop(definition: impl Into<String>, reason: impl Into<String>) -> Self {
        CompilerError::InvalidLoopDefinition {
            definition: definition.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompilerError>;
