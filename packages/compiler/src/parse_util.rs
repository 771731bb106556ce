//! Parse Utilities
//!
//! Source files, locations and spans used to point diagnostics back into the
//! template text.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::chars;

/// Absolute byte range inside the template source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AbsoluteSourceSpan {
    pub start: usize,
    pub end: usize,
}

impl AbsoluteSourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        AbsoluteSourceSpan { start, end }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseSourceFile {
    pub content: Arc<str>,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: impl Into<Arc<str>>, url: impl Into<String>) -> Self {
        ParseSourceFile {
            content: content.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseLocation {
    pub file: ParseSourceFile,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(file: ParseSourceFile, offset: usize, line: usize, col: usize) -> Self {
        ParseLocation { file, offset, line, col }
    }

    /// Build a location from a byte offset, computing the 0-based line and column
    pub fn from_offset(file: ParseSourceFile, offset: usize) -> Self {
        let offset = offset.min(file.content.len());
        let mut line = 0;
        let mut col = 0;
        for ch in file.content[..offset].chars() {
            if ch == chars::NEWLINE {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        ParseLocation::new(file, offset, line, col)
    }

    /// Return the source around the location
    /// Up to `max_chars` or `max_lines` on each side of the location
    pub fn get_context(&self, max_chars: usize, max_lines: usize) -> Option<(String, String)> {
        let content = &self.file.content;
        if content.is_empty() {
            return None;
        }

        let before: Vec<char> = content[..self.offset].chars().rev().collect();
        let mut taken = 0;
        let mut lines = 0;
        for ch in &before {
            if taken >= max_chars {
                break;
            }
            if *ch == chars::NEWLINE {
                lines += 1;
                if lines >= max_lines {
                    break;
                }
            }
            taken += 1;
        }
        let before: String = before[..taken].iter().rev().collect();

        let mut after = String::new();
        lines = 0;
        for ch in content[self.offset..].chars().take(max_chars) {
            if ch == chars::NEWLINE {
                lines += 1;
                if lines >= max_lines {
                    break;
                }
            }
            after.push(ch);
        }

        Some((before, after))
    }
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.file.url, self.line, self.col)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
    pub details: Option<String>,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end, details: None }
    }

    pub fn from_absolute(file: &ParseSourceFile, span: AbsoluteSourceSpan) -> Self {
        ParseSourceSpan::new(
            ParseLocation::from_offset(file.clone(), span.start),
            ParseLocation::from_offset(file.clone(), span.end),
        )
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }

    pub fn text(&self) -> &str {
        &self.start.file.content[self.start.offset..self.end.offset]
    }
}

impl Serialize for ParseSourceSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct SpanRepr<'a> {
            url: &'a str,
            start: usize,
            end: usize,
            line: usize,
            col: usize,
        }

        SpanRepr {
            url: &self.start.file.url,
            start: self.start.offset,
            end: self.end.offset,
            line: self.start.line,
            col: self.start.col,
        }
        .serialize(serializer)
    }
}

/// Diagnostics only come in one severity; there is no warning tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
}

/// A non-fatal problem found while compiling a template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateDiagnostic {
    pub level: DiagnosticLevel,
    pub msg: String,
    /// The offending expression or attribute text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<ParseSourceSpan>,
}

impl TemplateDiagnostic {
    pub fn error(msg: impl Into<String>) -> Self {
        TemplateDiagnostic {
            level: DiagnosticLevel::Error,
            msg: msg.into(),
            context: None,
            span: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_span(mut self, span: ParseSourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    pub fn contextual_message(&self) -> String {
        let mut message = self.msg.clone();
        if let Some(context) = &self.context {
            message.push_str(&format!("\n\nIn expression: {}", context));
        }
        if let Some((before, after)) = self.span.as_ref().and_then(|s| s.start.get_context(100, 3)) {
            message.push_str(&format!(" (\"{}[ERROR ->]{}\")", before, after));
        }
        message
    }
}

impl fmt::Display for TemplateDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.contextual_message())?;
        if let Some(span) = &self.span {
            write!(f, ": {}", span.start)?;
            if let Some(details) = &span.details {
                write!(f, ", {}", details)?;
            }
        }
        Ok(())
    }
}
