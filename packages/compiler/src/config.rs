//! Compiler configuration
//!
//! Passed explicitly to every compile call so that independent template
//! compiles never share mutable state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CompilerError, Result};

/// Classes reachable without an explicit import
pub const DEFAULT_IMPLICIT_IMPORTS: &[&str] = &[
    "java.lang.Boolean",
    "java.lang.Byte",
    "java.lang.Character",
    "java.lang.Double",
    "java.lang.Float",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Math",
    "java.lang.Object",
    "java.lang.Short",
    "java.lang.String",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// Name of the pseudo-element carrying template imports
    pub import_element: String,
    /// Identifier of the event object inside event bindings
    pub event_parameter: String,
    /// Leave trivial bindings (known variable, no-arg method) as pass-through text
    pub optimize_simple_bindings: bool,
    /// Prefix of the generated expression ids (`exp0`, `exp1`, ...)
    pub expression_prefix: String,
    /// Fully-qualified classes registered as imports for every template
    pub implicit_imports: Vec<String>,
    /// Log malformed markup at warn level instead of reporting it as a diagnostic
    pub lenient_markup: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            import_element: "vue-gwt:import".to_string(),
            event_parameter: "$event".to_string(),
            optimize_simple_bindings: true,
            expression_prefix: "exp".to_string(),
            implicit_imports: DEFAULT_IMPLICIT_IMPORTS.iter().map(|s| s.to_string()).collect(),
            lenient_markup: true,
        }
    }
}

impl CompilerConfig {
    /// Read a camelCase JSON file, missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| CompilerError::io(&display, e))?;
        serde_json::from_str(&content).map_err(|e| CompilerError::config(display, e))
    }
}
