/**
 * Template Parser Module
 *
 * Compiles the expressions of a template and rewrites it to call them
 */
pub mod binding_parser;
pub mod context;
pub mod expression_processor;
pub mod local_components;
pub mod loop_definition;
pub mod output_document;
pub mod result;
#[allow(clippy::module_inception)]
pub mod template_parser;

pub use context::{ComponentInfo, TemplateParserContext, VariableInfo, VariableOrigin};
pub use local_components::{LocalComponent, LocalComponentProp};
pub use result::{
    BindingKind, CompilationResult, ExpressionParameter, PassthroughBinding, TemplateExpression,
};
pub use template_parser::{compile_template, TemplateParser};
