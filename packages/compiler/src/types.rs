//! Type references
//!
//! The expected or resolved type of a template expression, as text the
//! downstream generator can emit verbatim.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CompilerError;
use crate::expression_parser::Parser;

pub const STRING_TYPE: &str = "java.lang.String";

pub const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// No result expected (event handlers)
    Void,
    /// Untyped placeholder, printed as `Any`
    Dynamic,
    Named(NamedType),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedType {
    /// Dotted name, fully qualified once resolved against the imports
    pub name: String,
    pub type_args: Vec<TypeRef>,
    pub array_dims: usize,
}

impl NamedType {
    pub fn new(name: impl Into<String>) -> Self {
        NamedType {
            name: name.into(),
            type_args: Vec::new(),
            array_dims: 0,
        }
    }
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(NamedType::new(name))
    }

    pub fn boolean() -> Self {
        TypeRef::named("boolean")
    }

    pub fn int() -> Self {
        TypeRef::named("int")
    }

    pub fn string() -> Self {
        TypeRef::named(STRING_TYPE)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Void)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, TypeRef::Named(t) if t.name == STRING_TYPE && t.array_dims == 0)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Named(t) if t.array_dims == 0 && PRIMITIVE_TYPES.contains(&t.name.as_str()))
    }

    /// Rewrite every class name in this type, type arguments included
    pub fn map_names(&mut self, resolve: &dyn Fn(&str) -> String) {
        if let TypeRef::Named(named) = self {
            if !PRIMITIVE_TYPES.contains(&named.name.as_str()) {
                named.name = resolve(&named.name);
            }
            for arg in &mut named.type_args {
                arg.map_names(resolve);
            }
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Void => write!(f, "void"),
            TypeRef::Dynamic => write!(f, "Any"),
            TypeRef::Named(named) => {
                write!(f, "{}", named.name)?;
                if !named.type_args.is_empty() {
                    let args: Vec<String> = named.type_args.iter().map(|a| a.to_string()).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
                for _ in 0..named.array_dims {
                    write!(f, "[]")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for TypeRef {
    type Err = CompilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "void" => Ok(TypeRef::Void),
            "Any" => Ok(TypeRef::Dynamic),
            other => Parser::new().parse_type(other),
        }
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
