//! Output document
//!
//! Records replacements of source segments and renders the rewritten
//! template. Text outside replaced segments is copied byte for byte.

use crate::parse_util::AbsoluteSourceSpan;

#[derive(Debug, Clone)]
pub struct OutputDocument<'a> {
    source: &'a str,
    replacements: Vec<(AbsoluteSourceSpan, String)>,
}

impl<'a> OutputDocument<'a> {
    pub fn new(source: &'a str) -> Self {
        OutputDocument {
            source,
            replacements: Vec::new(),
        }
    }

    pub fn replace(&mut self, span: AbsoluteSourceSpan, text: impl Into<String>) {
        self.replacements.push((span, text.into()));
    }

    pub fn remove(&mut self, span: AbsoluteSourceSpan) {
        self.replace(span, String::new());
    }

    /// Segments overlapping an earlier, enclosing replacement are dropped
    pub fn render(&self) -> String {
        let mut replacements: Vec<&(AbsoluteSourceSpan, String)> = self.replacements.iter().collect();
        // Stable sort keeps registration order between equal spans
        replacements.sort_by(|(a, _), (b, _)| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut output = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for (span, text) in replacements {
            if span.start < cursor || span.end > self.source.len() {
                continue;
            }
            output.push_str(&self.source[cursor..span.start]);
            output.push_str(text);
            cursor = span.end;
        }
        output.push_str(&self.source[cursor..]);
        output
    }
}
