//! Binding Parser
//!
//! Classifies template attributes and picks the type an attribute's
//! expression must produce.

use once_cell::sync::Lazy;
use regex::Regex;

use super::local_components::LocalComponentProp;
use super::result::BindingKind;
use crate::types::TypeRef;

static DIRECTIVE_ATTR_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(v-|:|@).*").unwrap());

const EVENT_PREFIX: &str = "@";
const EVENT_LONG_PREFIX: &str = "v-on:";
const BIND_PREFIX: &str = ":";
const BIND_LONG_PREFIX: &str = "v-bind:";
const LOOP_ATTR: &str = "v-for";
const MODEL_ATTR: &str = "v-model";
const CONDITIONAL_ATTRS: &[&str] = &["v-if", "v-else-if", "v-show"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// `v-for`
    Loop,
    /// `v-model`, expanded into a binding and an event before compilation
    Model,
    /// `@event` / `v-on:event`
    Event,
    /// `:prop` / `v-bind:prop`
    PropertyBinding,
    /// `v-if`, `v-else-if`, `v-show`
    Conditional,
    /// Any other `v-` attribute, its value may be empty (`v-else`)
    Directive,
    Plain,
}

impl AttributeKind {
    pub fn binding_kind(&self) -> BindingKind {
        match self {
            AttributeKind::Event => BindingKind::Event,
            AttributeKind::Conditional => BindingKind::Conditional,
            AttributeKind::Loop => BindingKind::LoopIterable,
            _ => BindingKind::AttributeBinding,
        }
    }

    /// Whether an empty value is reported
    pub fn requires_expression(&self) -> bool {
        !matches!(self, AttributeKind::Directive | AttributeKind::Plain | AttributeKind::Model)
    }
}

/// Attribute names are matched case-insensitively
pub fn classify_attribute(name: &str) -> AttributeKind {
    let lower = name.to_lowercase();
    if lower == LOOP_ATTR {
        return AttributeKind::Loop;
    }
    if lower == MODEL_ATTR || lower.starts_with("v-model.") || lower.starts_with("v-model:") {
        return AttributeKind::Model;
    }
    if lower.starts_with(EVENT_PREFIX) || lower.starts_with(EVENT_LONG_PREFIX) {
        return AttributeKind::Event;
    }
    if lower.starts_with(BIND_PREFIX) || lower.starts_with(BIND_LONG_PREFIX) {
        return AttributeKind::PropertyBinding;
    }
    if CONDITIONAL_ATTRS.contains(&lower.as_str()) {
        return AttributeKind::Conditional;
    }
    if DIRECTIVE_ATTR_REGEXP.is_match(&lower) {
        return AttributeKind::Directive;
    }
    AttributeKind::Plain
}

/// Events expect nothing, conditionals a boolean, props their declared
/// type, everything else is untyped until a leading cast says otherwise
pub fn expected_type_for_attribute(kind: AttributeKind, prop: Option<&LocalComponentProp>) -> TypeRef {
    match kind {
        AttributeKind::Event => TypeRef::Void,
        AttributeKind::Conditional => TypeRef::boolean(),
        _ => prop.map_or(TypeRef::Dynamic, |p| p.type_ref.clone()),
    }
}
