//! Template Parser Context
//!
//! Symbol table of one template compilation: the scope stack of loop
//! variables, the owning component's members, imports, static imports and
//! the child components usable in the template.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::local_components::LocalComponent;
use crate::types::TypeRef;
use crate::util::{camel_case_to_dash_case, simple_name};

/// Where a variable visible in a template comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariableOrigin {
    Property,
    Method,
    LoopLocal,
    EventParameter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub origin: VariableOrigin,
}

impl VariableInfo {
    pub fn new(name: impl Into<String>, type_ref: TypeRef, origin: VariableOrigin) -> Self {
        VariableInfo {
            name: name.into(),
            type_ref,
            origin,
        }
    }

    /// Loop and event variables are not component members, so generated
    /// code must receive them as parameters
    pub fn is_captured(&self) -> bool {
        matches!(
            self.origin,
            VariableOrigin::LoopLocal | VariableOrigin::EventParameter
        )
    }
}

/// One level of the scope stack
#[derive(Debug, Clone, Default)]
pub struct Scope {
    variables: IndexMap<String, VariableInfo>,
}

impl Scope {
    pub fn add_variable(&mut self, variable: VariableInfo) {
        self.variables.insert(variable.name.clone(), variable);
    }

    pub fn get(&self, name: &str) -> Option<&VariableInfo> {
        self.variables.get(name)
    }
}

/// Members of the component owning the template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentInfo {
    pub qualified_name: String,
    pub properties: IndexMap<String, TypeRef>,
    pub methods: IndexSet<String>,
    /// Inherited members
    pub parent: Option<Box<ComponentInfo>>,
}

impl ComponentInfo {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        ComponentInfo {
            qualified_name: qualified_name.into(),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.properties.insert(name.into(), type_ref);
        self
    }

    pub fn with_method(mut self, name: impl Into<String>) -> Self {
        self.methods.insert(name.into());
        self
    }

    pub fn with_parent(mut self, parent: ComponentInfo) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn find_property(&self, name: &str) -> Option<&TypeRef> {
        self.properties
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.find_property(name)))
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains(name) || self.parent.as_ref().map_or(false, |p| p.has_method(name))
    }
}

#[derive(Debug, Clone)]
pub struct TemplateParserContext {
    component: ComponentInfo,
    scopes: Vec<Scope>,
    /// Simple class name -> fully qualified name
    imports: IndexMap<String, String>,
    /// Member name -> `a.b.Owner.member`
    static_imports: IndexMap<String, String>,
    /// Lower-cased tag name -> component
    local_components: IndexMap<String, LocalComponent>,
}

impl TemplateParserContext {
    pub fn new(component: ComponentInfo) -> Self {
        TemplateParserContext {
            component,
            scopes: vec![Scope::default()],
            imports: IndexMap::new(),
            static_imports: IndexMap::new(),
            local_components: IndexMap::new(),
        }
    }

    pub fn component(&self) -> &ComponentInfo {
        &self.component
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// The root scope is never popped
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn add_import(&mut self, qualified_name: &str) {
        let qualified_name = qualified_name.trim();
        self.imports
            .insert(simple_name(qualified_name).to_string(), qualified_name.to_string());
    }

    /// Register an import unless the simple name is already taken
    pub fn add_implicit_import(&mut self, qualified_name: &str) {
        let qualified_name = qualified_name.trim();
        self.imports
            .entry(simple_name(qualified_name).to_string())
            .or_insert_with(|| qualified_name.to_string());
    }

    pub fn add_static_import(&mut self, qualified_member: &str) {
        let qualified_member = qualified_member.trim();
        self.static_imports.insert(
            simple_name(qualified_member).to_string(),
            qualified_member.to_string(),
        );
    }

    /// Simple or fully qualified name of an imported class
    pub fn has_import(&self, name: &str) -> bool {
        self.imports.contains_key(name) || self.imports.values().any(|q| q == name)
    }

    pub fn imports(&self) -> impl Iterator<Item = (&String, &String)> {
        self.imports.iter()
    }

    pub fn fully_qualified_name_for_class_name(&self, name: &str) -> String {
        if let Some(qualified) = self.imports.get(name) {
            return qualified.clone();
        }
        // Nested class of an import (`Todo.Status`)
        if let Some((head, tail)) = name.split_once('.') {
            if let Some(qualified) = self.imports.get(head) {
                return format!("{}.{}", qualified, tail);
            }
        }
        name.to_string()
    }

    /// Qualify every class name of `type_ref` through the imports
    pub fn qualify_type(&self, type_ref: &TypeRef) -> TypeRef {
        let mut qualified = type_ref.clone();
        qualified.map_names(&|name| self.fully_qualified_name_for_class_name(name));
        qualified
    }

    /// Simple or fully qualified name of a statically imported member
    pub fn has_static_method(&self, name: &str) -> bool {
        self.static_imports.contains_key(name) || self.static_imports.values().any(|q| q == name)
    }

    pub fn fully_qualified_name_for_method_name(&self, name: &str) -> String {
        self.static_imports
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.component.has_method(name)
    }

    /// Register a loop variable in the innermost scope
    pub fn add_local_variable(&mut self, type_ref: TypeRef, name: &str) -> VariableInfo {
        let variable = VariableInfo::new(name, type_ref, VariableOrigin::LoopLocal);
        if let Some(scope) = self.scopes.last_mut() {
            scope.add_variable(variable.clone());
        }
        variable
    }

    /// Innermost scope first, then the component's own and inherited members
    pub fn find_variable(&self, name: &str) -> Option<VariableInfo> {
        for scope in self.scopes.iter().rev() {
            if let Some(variable) = scope.get(name) {
                return Some(variable.clone());
            }
        }
        if let Some(type_ref) = self.component.find_property(name) {
            return Some(VariableInfo::new(name, type_ref.clone(), VariableOrigin::Property));
        }
        if self.component.has_method(name) {
            return Some(VariableInfo::new(name, TypeRef::Dynamic, VariableOrigin::Method));
        }
        None
    }

    /// Components are reachable by tag name case-insensitively, camelCase
    /// names also by their kebab-case form
    pub fn add_local_component(&mut self, component: LocalComponent) {
        let kebab = camel_case_to_dash_case(&component.tag_name);
        let lower = component.tag_name.to_lowercase();
        if kebab != lower {
            self.local_components.insert(kebab, component.clone());
        }
        self.local_components.insert(lower, component);
    }

    pub fn get_local_component(&self, tag_name: &str) -> Option<&LocalComponent> {
        self.local_components.get(&tag_name.to_lowercase())
    }
}
