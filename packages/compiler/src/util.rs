//! Utility Functions
//!
//! Name conversions shared by the context model and the template walker

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for camelCase to dash-case conversion
static CAMEL_CASE_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

/// Convert camelCase to dash-case (`myProp` -> `my-prop`)
pub fn camel_case_to_dash_case(input: &str) -> String {
    CAMEL_CASE_REGEXP
        .replace_all(input, "$1-$2")
        .to_lowercase()
}

/// Name of the attribute carrying a prop on a child component tag
pub fn prop_name_to_attribute_name(prop_name: &str) -> String {
    camel_case_to_dash_case(prop_name)
}

/// Last segment of a dotted name (`a.b.Todo` -> `Todo`)
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map(|(_, name)| name)
        .unwrap_or(qualified_name)
}
