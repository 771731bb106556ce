//! Child components usable as tags in a template

use serde::{Deserialize, Serialize};

use crate::types::TypeRef;
use crate::util::prop_name_to_attribute_name;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalComponentProp {
    pub prop_name: String,
    /// Defaults to the kebab-case form of `prop_name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_name: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub required: bool,
}

impl LocalComponentProp {
    pub fn new(prop_name: impl Into<String>, type_ref: TypeRef, required: bool) -> Self {
        LocalComponentProp {
            prop_name: prop_name.into(),
            attribute_name: None,
            type_ref,
            required,
        }
    }

    pub fn attribute_name(&self) -> String {
        self.attribute_name
            .clone()
            .unwrap_or_else(|| prop_name_to_attribute_name(&self.prop_name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalComponent {
    pub tag_name: String,
    #[serde(default)]
    pub props: Vec<LocalComponentProp>,
    #[serde(default = "default_accepts_children")]
    pub accepts_children: bool,
}

fn default_accepts_children() -> bool {
    true
}

impl LocalComponent {
    pub fn new(tag_name: impl Into<String>) -> Self {
        LocalComponent {
            tag_name: tag_name.into(),
            props: Vec::new(),
            accepts_children: true,
        }
    }

    pub fn with_prop(mut self, prop: LocalComponentProp) -> Self {
        self.props.push(prop);
        self
    }

    /// Prop receiving the value of `attribute_name`, binding prefix ignored
    pub fn prop_for_attribute(&self, attribute_name: &str) -> Option<&LocalComponentProp> {
        let lower = attribute_name.to_lowercase();
        let name = lower
            .strip_prefix("v-bind:")
            .or_else(|| lower.strip_prefix(':'))
            .unwrap_or(&lower);
        self.props
            .iter()
            .find(|prop| prop.attribute_name().to_lowercase() == name)
    }

    pub fn required_props(&self) -> impl Iterator<Item = &LocalComponentProp> {
        self.props.iter().filter(|prop| prop.required)
    }
}
