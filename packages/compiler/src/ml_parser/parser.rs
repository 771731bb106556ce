//! ML Parser
//!
//! Lenient template scanner building the element tree in a single pass.
//! Malformed markup never fails the parse: problems are collected as
//! `TreeError`s and the closest reasonable tree is returned.

use super::ast::{Attribute, Comment, Element, Node, Text};
use super::entities::decode_entities;
use super::tags::{get_content_type, is_void_element, TagContentType};
use crate::chars;
use crate::parse_util::AbsoluteSourceSpan;

/// Tree error
#[derive(Debug, Clone, PartialEq)]
pub struct TreeError {
    pub element_name: Option<String>,
    pub span: AbsoluteSourceSpan,
    pub msg: String,
}

impl TreeError {
    pub fn create(element_name: Option<String>, span: AbsoluteSourceSpan, msg: String) -> Self {
        TreeError {
            element_name,
            span,
            msg,
        }
    }
}

/// Parse tree result
#[derive(Debug, Clone)]
pub struct ParseTreeResult {
    pub root_nodes: Vec<Node>,
    pub errors: Vec<TreeError>,
}

impl ParseTreeResult {
    pub fn new(root_nodes: Vec<Node>, errors: Vec<TreeError>) -> Self {
        ParseTreeResult { root_nodes, errors }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    pub fn parse(&self, source: &str) -> ParseTreeResult {
        let mut builder = TreeBuilder::new(source);
        builder.build();
        ParseTreeResult::new(builder.root_nodes, builder.errors)
    }
}

struct TreeBuilder<'a> {
    input: &'a str,
    index: usize,
    stack: Vec<Element>,
    root_nodes: Vec<Node>,
    errors: Vec<TreeError>,
}

impl<'a> TreeBuilder<'a> {
    fn new(input: &'a str) -> Self {
        TreeBuilder {
            input,
            index: 0,
            stack: Vec::new(),
            root_nodes: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.index..]
    }

    fn peek(&self) -> char {
        self.rest().chars().next().unwrap_or(chars::EOF)
    }

    fn peek_at(&self, n: usize) -> char {
        self.rest().chars().nth(n).unwrap_or(chars::EOF)
    }

    fn at_end(&self) -> bool {
        self.index >= self.input.len()
    }

    fn advance(&mut self) {
        self.index += self.peek().len_utf8();
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() && chars::is_whitespace(self.peek()) {
            self.advance();
        }
    }

    fn error(&mut self, element_name: Option<String>, start: usize, msg: String) {
        let span = AbsoluteSourceSpan::new(start, self.index.max(start));
        self.errors.push(TreeError::create(element_name, span, msg));
    }

    fn build(&mut self) {
        while !self.at_end() {
            if self.rest().starts_with("<!--") {
                self.consume_comment();
            } else if self.rest().starts_with("</") && chars::is_ascii_letter(self.peek_at(2)) {
                self.consume_end_tag();
            } else if self.peek() == chars::LT
                && (self.peek_at(1) == chars::BANG || self.peek_at(1) == chars::QUESTION)
            {
                self.consume_declaration();
            } else if self.peek() == chars::LT && chars::is_ascii_letter(self.peek_at(1)) {
                self.consume_start_tag();
            } else {
                self.consume_text();
            }
        }

        // Unclosed elements end with the input
        while let Some(mut element) = self.stack.pop() {
            element.source_span.end = self.input.len();
            self.add_to_parent(Node::Element(element));
        }
    }

    fn add_to_parent(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root_nodes.push(node),
        }
    }

    fn consume_comment(&mut self) {
        let start = self.index;
        let body_start = start + 4;
        let (body_end, end) = match self.input[body_start..].find("-->") {
            Some(offset) => (body_start + offset, body_start + offset + 3),
            None => {
                self.index = self.input.len();
                self.error(None, start, "Unterminated comment".to_string());
                (self.input.len(), self.input.len())
            }
        };
        self.index = end;
        self.add_to_parent(Node::Comment(Comment {
            value: self.input[body_start..body_end].to_string(),
            source_span: AbsoluteSourceSpan::new(start, end),
        }));
    }

    /// `<!DOCTYPE ...>` and `<? ... ?>` are passed over untouched
    fn consume_declaration(&mut self) {
        match self.rest().find('>') {
            Some(offset) => self.index += offset + 1,
            None => self.index = self.input.len(),
        }
    }

    fn consume_text(&mut self) {
        let start = self.index;
        while !self.at_end() {
            if self.rest().starts_with("{{") {
                // A marker may hold `<` (`{{ a < b }}`), jump over it as a whole
                if let Some(offset) = self.rest()[2..].find("}}") {
                    self.index += offset + 4;
                    continue;
                }
            }
            // Always take at least one character so a stray `<` can't stall the scan
            if self.index > start && self.peek() == chars::LT {
                let next = self.peek_at(1);
                if chars::is_ascii_letter(next)
                    || next == chars::SLASH
                    || next == chars::BANG
                    || next == chars::QUESTION
                {
                    break;
                }
            }
            self.advance();
        }
        self.add_text(start, self.index);
    }

    fn add_text(&mut self, start: usize, end: usize) {
        if start == end {
            return;
        }
        let value = &self.input[start..end];
        // Merge with a preceding text node
        let siblings = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.root_nodes,
        };
        if let Some(Node::Text(previous)) = siblings.last_mut() {
            if previous.source_span.end == start {
                previous.value.push_str(value);
                previous.source_span.end = end;
                return;
            }
        }
        siblings.push(Node::Text(Text::new(
            value.to_string(),
            AbsoluteSourceSpan::new(start, end),
        )));
    }

    fn consume_tag_name(&mut self) -> String {
        let start = self.index;
        while !self.at_end() && chars::is_name_char(self.peek()) {
            self.advance();
        }
        self.input[start..self.index].to_string()
    }

    fn consume_start_tag(&mut self) {
        let start = self.index;
        self.advance(); // <
        let name = self.consume_tag_name();
        let mut attrs = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            if self.at_end() {
                self.error(Some(name.clone()), start, format!("Unterminated start tag <{}>", name));
                break;
            }
            match self.peek() {
                chars::GT => {
                    self.advance();
                    break;
                }
                chars::SLASH if self.peek_at(1) == chars::GT => {
                    self.advance();
                    self.advance();
                    self_closing = true;
                    break;
                }
                _ => match self.consume_attribute() {
                    Some(attr) => attrs.push(attr),
                    // Stray character such as a lone `/` or `=`
                    None => self.advance(),
                },
            }
        }

        let mut element = Element::new(name, attrs, AbsoluteSourceSpan::new(start, self.index));
        if self_closing || is_void_element(&element.name) {
            self.add_to_parent(Node::Element(element));
            return;
        }

        match get_content_type(&element.name) {
            TagContentType::ParsableData => self.stack.push(element),
            content_type => {
                let body_start = self.index;
                let closing = format!("</{}", element.name.to_ascii_lowercase());
                let body_end = self.rest().to_ascii_lowercase().find(&closing).map(|o| body_start + o);
                let body_end = body_end.unwrap_or(self.input.len());
                if content_type == TagContentType::EscapableRawText && body_start < body_end {
                    element.children.push(Node::Text(Text::new(
                        self.input[body_start..body_end].to_string(),
                        AbsoluteSourceSpan::new(body_start, body_end),
                    )));
                }
                self.index = body_end;
                if !self.at_end() {
                    let end_start = self.index;
                    self.consume_through_gt();
                    element.end_source_span = Some(AbsoluteSourceSpan::new(end_start, self.index));
                }
                element.source_span.end = self.index;
                self.add_to_parent(Node::Element(element));
            }
        }
    }

    fn consume_attribute(&mut self) -> Option<Attribute> {
        let start = self.index;
        while !self.at_end() && !chars::is_attribute_name_end(self.peek()) {
            self.advance();
        }
        if self.index == start {
            return None;
        }
        let name = self.input[start..self.index].to_string();

        let name_end = self.index;
        self.skip_whitespace();
        if self.peek() != chars::EQ {
            // Valueless attribute, don't swallow the whitespace we skipped
            self.index = name_end;
            return Some(Attribute::new(name, String::new(), AbsoluteSourceSpan::new(start, name_end)));
        }
        self.advance(); // =
        self.skip_whitespace();

        let quote = self.peek();
        let (value_start, value_end, quote) = if chars::is_quote(quote) {
            self.advance();
            let value_start = self.index;
            match self.rest().find(quote) {
                Some(offset) => {
                    self.index += offset;
                    let value_end = self.index;
                    self.advance();
                    (value_start, value_end, Some(quote))
                }
                None => {
                    self.index = self.input.len();
                    self.error(None, start, format!("Unterminated value of attribute \"{}\"", name));
                    (value_start, self.input.len(), Some(quote))
                }
            }
        } else {
            let value_start = self.index;
            while !self.at_end() && !chars::is_whitespace(self.peek()) && self.peek() != chars::GT {
                self.advance();
            }
            (value_start, self.index, None)
        };

        let mut attr = Attribute::new(
            name,
            decode_entities(&self.input[value_start..value_end]),
            AbsoluteSourceSpan::new(start, self.index),
        );
        attr.value_span = Some(AbsoluteSourceSpan::new(value_start, value_end));
        attr.quote = quote;
        Some(attr)
    }

    fn consume_through_gt(&mut self) {
        match self.rest().find('>') {
            Some(offset) => self.index += offset + 1,
            None => self.index = self.input.len(),
        }
    }

    fn consume_end_tag(&mut self) {
        let start = self.index;
        self.advance();
        self.advance(); // </
        let name = self.consume_tag_name();
        self.consume_through_gt();
        let end_span = AbsoluteSourceSpan::new(start, self.index);

        let position = self
            .stack
            .iter()
            .rposition(|e| e.name.eq_ignore_ascii_case(&name));
        let Some(position) = position else {
            self.error(
                Some(name.clone()),
                start,
                format!("Unexpected closing tag \"{}\"", name),
            );
            return;
        };

        // Elements left open inside the closed one end where it ends
        while self.stack.len() > position + 1 {
            if let Some(mut inner) = self.stack.pop() {
                inner.source_span.end = start;
                self.add_to_parent(Node::Element(inner));
            }
        }
        if let Some(mut element) = self.stack.pop() {
            element.end_source_span = Some(end_span);
            element.source_span.end = self.index;
            self.add_to_parent(Node::Element(element));
        }
    }
}
