//! ML Parser AST
//!
//! Element/attribute/text tree of a template. Every node keeps the byte span
//! it was read from so the template walker can rewrite the source in place.

use crate::parse_util::AbsoluteSourceSpan;

/// Node type union
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

impl Node {
    pub fn source_span(&self) -> AbsoluteSourceSpan {
        match self {
            Node::Element(e) => e.source_span,
            Node::Text(t) => t.source_span,
            Node::Comment(c) => c.source_span,
        }
    }
}

/// Text node
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
    pub source_span: AbsoluteSourceSpan,
}

impl Text {
    pub fn new(value: String, source_span: AbsoluteSourceSpan) -> Self {
        Text { value, source_span }
    }
}

/// Comment node
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub value: String,
    pub source_span: AbsoluteSourceSpan,
}

/// Attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Name as written in the source
    pub name: String,
    /// Value with character references decoded, empty when there is none
    pub value: String,
    pub source_span: AbsoluteSourceSpan,
    /// Span of the raw value, quotes excluded
    pub value_span: Option<AbsoluteSourceSpan>,
    /// Delimiter of the value, `None` for unquoted values
    pub quote: Option<char>,
}

impl Attribute {
    pub fn new(name: String, value: String, source_span: AbsoluteSourceSpan) -> Self {
        Attribute {
            name,
            value,
            source_span,
            value_span: None,
            quote: None,
        }
    }
}

/// Element node
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    /// From `<` of the start tag to `>` of the end tag (or start tag when there is none)
    pub source_span: AbsoluteSourceSpan,
    pub start_source_span: AbsoluteSourceSpan,
    pub end_source_span: Option<AbsoluteSourceSpan>,
}

impl Element {
    pub fn new(name: String, attrs: Vec<Attribute>, start_source_span: AbsoluteSourceSpan) -> Self {
        Element {
            name,
            attrs,
            children: Vec::new(),
            source_span: start_source_span,
            start_source_span,
            end_source_span: None,
        }
    }

    /// Case-insensitive attribute lookup
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Text nodes that belong to this element and not to a nested child
    pub fn text_children(&self) -> impl Iterator<Item = &Text> {
        self.children.iter().filter_map(|node| match node {
            Node::Text(t) => Some(t),
            _ => None,
        })
    }
}

/// Call `f` on every element of the tree, parents first
pub fn visit_all_elements<'a>(nodes: &'a [Node], f: &mut dyn FnMut(&'a Element)) {
    for node in nodes {
        if let Node::Element(element) = node {
            f(element);
            visit_all_elements(&element.children, f);
        }
    }
}
