//! Expression processing
//!
//! Passes run over a parsed template expression, in this order: qualify
//! type references, qualify static calls, check method names, collect
//! parameters (rewriting class references), then take the expression's
//! type from a leading cast.

use super::context::{TemplateParserContext, VariableInfo, VariableOrigin};
use crate::expression_parser::ast::Expr;
use crate::types::TypeRef;

/// Outcome of the passes over one expression
#[derive(Debug, Clone)]
pub struct ProcessedExpression {
    pub expression: Expr,
    /// Captured variables in first-seen order, duplicates included
    pub parameters: Vec<VariableInfo>,
    /// Type of the leading cast, removed from `expression`
    pub cast_type: Option<TypeRef>,
    pub errors: Vec<String>,
}

pub struct ExpressionProcessor<'a> {
    context: &'a TemplateParserContext,
    event_parameter: &'a str,
    parameters: Vec<VariableInfo>,
    errors: Vec<String>,
}

impl<'a> ExpressionProcessor<'a> {
    pub fn new(context: &'a TemplateParserContext, event_parameter: &'a str) -> Self {
        ExpressionProcessor {
            context,
            event_parameter,
            parameters: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn process(mut self, mut expression: Expr, extract_cast: bool) -> ProcessedExpression {
        self.resolve_types_using_imports(&mut expression);
        self.resolve_static_methods_using_imports(&mut expression);
        self.check_method_names(&expression);
        self.find_expression_parameters(&mut expression, false);

        let (expression, cast_type) = if extract_cast {
            type_from_cast(expression)
        } else {
            (expression, None)
        };

        ProcessedExpression {
            expression,
            parameters: self.parameters,
            cast_type,
            errors: self.errors,
        }
    }

    fn resolve_types_using_imports(&self, expression: &mut Expr) {
        let context = self.context;
        expression.walk_mut(&mut |node| {
            if let Some(type_ref) = node.type_ref_mut() {
                *type_ref = context.qualify_type(type_ref);
            }
        });
    }

    fn resolve_static_methods_using_imports(&self, expression: &mut Expr) {
        let context = self.context;
        expression.walk_mut(&mut |node| {
            if let Expr::MethodCall {
                scope: None, name, ..
            } = node
            {
                if context.has_static_method(name) {
                    *name = context.fully_qualified_name_for_method_name(name);
                }
            }
        });
    }

    fn check_method_names(&mut self, expression: &Expr) {
        if let Expr::MethodCall {
            scope: None, name, ..
        } = expression
        {
            if !self.context.has_method(name) && !self.context.has_static_method(name) {
                self.errors.push(format!(
                    "Couldn't find the method \"{}\". Make sure it is not private.",
                    name
                ));
            }
        }
        expression.for_each_child(&mut |child| self.check_method_names(child));
    }

    fn find_expression_parameters(&mut self, expression: &mut Expr, parent_is_cast: bool) {
        match expression {
            Expr::Name { name, .. } if name.as_str() == self.event_parameter => {
                // Only valid directly under a cast, which gives its type
                if !parent_is_cast {
                    self.errors.push(format!(
                        "\"{0}\" should always be casted to it's intended type. Example: @click=\"doSomething((NativeEvent) {0})\".",
                        self.event_parameter
                    ));
                }
                return;
            }
            Expr::Cast {
                type_ref,
                expression: inner,
                ..
            } => {
                if let Expr::Name { name, .. } = inner.as_ref() {
                    if name == self.event_parameter {
                        self.parameters.push(VariableInfo::new(
                            name.clone(),
                            type_ref.clone(),
                            VariableOrigin::EventParameter,
                        ));
                    }
                }
                self.find_expression_parameters(inner, true);
                return;
            }
            Expr::Name { name, .. } => {
                self.process_name_expression(name);
                return;
            }
            _ => {}
        }

        expression.for_each_child_mut(&mut |child| self.find_expression_parameters(child, false));
    }

    fn process_name_expression(&mut self, name: &mut String) {
        if self.context.has_import(name) {
            // Class reference, qualify it
            *name = self.context.fully_qualified_name_for_class_name(name);
            return;
        }

        match self.context.find_variable(name) {
            Some(variable) if variable.is_captured() => self.parameters.push(variable),
            Some(_) => {}
            None => self.errors.push(format!(
                "Couldn't find variable/method \"{}\". Make sure you didn't forget the @JsProperty/@JsMethod annotation.",
                name
            )),
        }
    }
}

/// Take the type of the expression from a leading cast:
///
/// ```text
/// (int) 12            -> 12 of type int
/// (int) 15 + 5        -> 15 + 5 of type int
/// (float) (12 + 3)    -> (12 + 3) of type float
/// ((int) 12) + 3      -> unchanged
/// ```
pub fn type_from_cast(expression: Expr) -> (Expr, Option<TypeRef>) {
    match expression {
        Expr::Cast {
            type_ref,
            expression,
            ..
        } => (*expression, Some(type_ref)),
        mut binary @ Expr::Binary { .. } => {
            let cast_type = strip_leftmost_cast(&mut binary);
            (binary, cast_type)
        }
        other => (other, None),
    }
}

fn strip_leftmost_cast(expression: &mut Expr) -> Option<TypeRef> {
    let Expr::Binary { left, .. } = expression else {
        return None;
    };
    if matches!(**left, Expr::Binary { .. }) {
        return strip_leftmost_cast(left);
    }
    if !matches!(**left, Expr::Cast { .. }) {
        return None;
    }
    let placeholder = Expr::This {
        span: Default::default(),
    };
    match std::mem::replace(&mut **left, placeholder) {
        Expr::Cast {
            type_ref,
            expression,
            ..
        } => {
            **left = *expression;
            Some(type_ref)
        }
        other => {
            **left = other;
            None
        }
    }
}
