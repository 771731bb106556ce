//! `v-for` definitions
//!
//! Accepted forms, `of` being accepted in place of `in`:
//!
//! ```text
//! Todo todo in todos
//! (Todo todo, int index) in todos
//! (String value, String key) in object
//! (String value, String key, int index) in object
//! int i in 10
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use super::context::{TemplateParserContext, VariableInfo, VariableOrigin};
use crate::chars;
use crate::error::{CompilerError, Result};
use crate::types::{TypeRef, STRING_TYPE};

static LOOP_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(.+?)\s+(?:in|of)\s+(.*?)\s*$").unwrap());

static INTEGER_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct LoopDefinition {
    /// Loop variables as they appear in the output, types stripped
    pub variable_definition: String,
    pub in_expression: String,
    pub in_expression_type: TypeRef,
    /// Value, then key and index when present, types qualified
    pub variables: Vec<VariableInfo>,
}

impl LoopDefinition {
    pub fn parse(definition: &str, context: &TemplateParserContext) -> Result<Self> {
        let invalid = |reason: &str| CompilerError::invalid_loop(definition, reason);

        let captures = LOOP_REGEXP
            .captures(definition)
            .ok_or_else(|| invalid("expected \"Type item in items\""))?;
        let declaration = captures[1].trim();
        let in_expression = captures[2].trim().to_string();
        if in_expression.is_empty() {
            return Err(invalid("the iterable expression is empty"));
        }

        let parts: Vec<&str> = match declaration
            .strip_prefix('(')
            .and_then(|d| d.strip_suffix(')'))
        {
            Some(inner) => split_top_level_commas(inner),
            None => vec![declaration],
        };

        let mut variables = Vec::with_capacity(parts.len());
        let (value_type, value_name) = split_declaration(parts[0], None)
            .map_err(|reason| invalid(&reason))?;
        variables.push((value_type, value_name));

        match parts.len() {
            1 => {}
            2 => {
                // Untyped second variable is the index, `String key` declares a key
                let index_or_key = split_declaration(parts[1], Some(TypeRef::int()))
                    .map_err(|reason| invalid(&reason))?;
                variables.push(index_or_key);
            }
            3 => {
                let key = split_declaration(parts[1], Some(TypeRef::named(STRING_TYPE)))
                    .map_err(|reason| invalid(&reason))?;
                let index = split_declaration(parts[2], Some(TypeRef::int()))
                    .map_err(|reason| invalid(&reason))?;
                variables.push(key);
                variables.push(index);
            }
            _ => return Err(invalid("at most three loop variables can be declared")),
        }

        let names: Vec<&str> = variables.iter().map(|(_, name)| name.as_str()).collect();
        let variable_definition = if names.len() == 1 {
            names[0].to_string()
        } else {
            format!("({})", names.join(", "))
        };

        let in_expression_type = if INTEGER_REGEXP.is_match(&in_expression) {
            TypeRef::int()
        } else {
            TypeRef::Dynamic
        };

        let variables = variables
            .into_iter()
            .map(|(type_ref, name)| {
                VariableInfo::new(name, context.qualify_type(&type_ref), VariableOrigin::LoopLocal)
            })
            .collect();

        Ok(LoopDefinition {
            variable_definition,
            in_expression,
            in_expression_type,
            variables,
        })
    }

    /// Text replacing the `v-for` value once the iterable has been processed
    pub fn to_template_text(&self, processed_in_expression: &str) -> String {
        format!("{} in {}", self.variable_definition, processed_in_expression)
    }
}

/// Split `Type name` (or just `name` when a default type is given)
fn split_declaration(
    declaration: &str,
    default_type: Option<TypeRef>,
) -> std::result::Result<(TypeRef, String), String> {
    let declaration = declaration.trim();
    let (type_text, name) = match declaration.rfind(chars::is_whitespace) {
        Some(index) => (declaration[..index].trim(), declaration[index..].trim()),
        None => ("", declaration),
    };

    if !is_identifier(name) {
        return Err(format!("\"{}\" is not a valid variable name", name));
    }

    let type_ref = if type_text.is_empty() {
        default_type.ok_or_else(|| format!("the variable \"{}\" must declare its type", name))?
    } else {
        type_text
            .parse::<TypeRef>()
            .map_err(|e| e.to_string())?
    };
    Ok((type_ref, name.to_string()))
}

fn is_identifier(name: &str) -> bool {
    let mut chars_iter = name.chars();
    chars_iter.next().map_or(false, chars::is_identifier_start)
        && chars_iter.all(chars::is_identifier_part)
}

/// Split on commas that are not nested inside type arguments
fn split_top_level_commas(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in input.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&input[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}
