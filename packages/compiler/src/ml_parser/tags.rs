//! ML Parser Tags
//!
//! Content model of the HTML elements the scanner treats specially

/// Tag content types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagContentType {
    /// Body is opaque (`script`, `style`)
    RawText,
    /// Body is text without child elements (`textarea`, `title`)
    EscapableRawText,
    ParsableData,
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

pub fn get_content_type(name: &str) -> TagContentType {
    match name.to_ascii_lowercase().as_str() {
        "script" | "style" => TagContentType::RawText,
        "textarea" | "title" => TagContentType::EscapableRawText,
        _ => TagContentType::ParsableData,
    }
}
