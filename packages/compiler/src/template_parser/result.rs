//! Compilation result
//!
//! The rewritten template, the accepted expressions in encounter order and
//! every diagnostic reported while compiling it.

use serde::Serialize;
use smallvec::SmallVec;

use super::context::VariableInfo;
use crate::parse_util::TemplateDiagnostic;
use crate::types::TypeRef;

/// Kind of binding site an expression was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingKind {
    Interpolation,
    Event,
    Conditional,
    AttributeBinding,
    LoopIterable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

impl From<&VariableInfo> for ExpressionParameter {
    fn from(variable: &VariableInfo) -> Self {
        ExpressionParameter {
            name: variable.name.clone(),
            type_ref: variable.type_ref.clone(),
        }
    }
}

/// Captured parameters, unique by name, in first-seen order
pub type ExpressionParameters = SmallVec<[ExpressionParameter; 4]>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExpression {
    pub id: String,
    pub text: String,
    pub return_type: TypeRef,
    /// Supplies a typed prop of a child component
    pub is_prop_bound: bool,
    pub kind: BindingKind,
    pub parameters: ExpressionParameters,
}

impl TemplateExpression {
    /// Call placed in the template in place of the expression
    pub fn to_template_string(&self) -> String {
        let names: Vec<&str> = self.parameters.iter().map(|p| p.name.as_str()).collect();
        format!("{}({})", self.id, names.join(", "))
    }
}

/// A binding left untouched because it names a known variable or no-arg method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassthroughBinding {
    pub text: String,
    pub kind: BindingKind,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationResult {
    #[serde(rename = "template")]
    pub processed_template: String,
    pub expressions: Vec<TemplateExpression>,
    pub passthrough_bindings: Vec<PassthroughBinding>,
    pub diagnostics: Vec<TemplateDiagnostic>,
}

impl CompilationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an accepted expression, giving it the next id
    pub fn add_expression(
        &mut self,
        prefix: &str,
        text: String,
        return_type: TypeRef,
        is_prop_bound: bool,
        kind: BindingKind,
        parameters: &[VariableInfo],
    ) -> &TemplateExpression {
        let mut unique = ExpressionParameters::new();
        for variable in parameters {
            if !unique.iter().any(|p| p.name == variable.name) {
                unique.push(ExpressionParameter::from(variable));
            }
        }

        let id = format!("{}{}", prefix, self.expressions.len());
        self.expressions.push(TemplateExpression {
            id,
            text,
            return_type,
            is_prop_bound,
            kind,
            parameters: unique,
        });
        &self.expressions[self.expressions.len() - 1]
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
