//! Context descriptor
//!
//! JSON description of the component a set of templates belongs to:
//!
//! ```json
//! {
//!   "component": {
//!     "qualifiedName": "com.example.TodoList",
//!     "properties": { "todos": "java.util.List<com.example.Todo>" },
//!     "methods": ["addTodo"]
//!   },
//!   "imports": ["com.example.Todo"],
//!   "staticImports": ["com.example.Format.upper"],
//!   "localComponents": [
//!     { "tagName": "todo-item", "props": [{ "propName": "todo", "type": "Todo", "required": true }] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use template_compiler::template_parser::{ComponentInfo, LocalComponent, TemplateParserContext};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextDescriptor {
    pub component: ComponentInfo,
    pub imports: Vec<String>,
    pub static_imports: Vec<String>,
    pub local_components: Vec<LocalComponent>,
}

impl ContextDescriptor {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read context descriptor {}", path.display()))?;
        let descriptor: ContextDescriptor = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse context descriptor {}", path.display()))?;
        Ok(descriptor)
    }

    /// Fresh context for one template compile
    pub fn to_context(&self) -> TemplateParserContext {
        let mut context = TemplateParserContext::new(self.component.clone());
        for import in &self.imports {
            context.add_import(import);
        }
        for member in &self.static_imports {
            context.add_static_import(member);
        }
        for component in &self.local_components {
            context.add_local_component(component.clone());
        }
        context
    }
}
