//! Syntax highlighting to HTML.

mod highlighter;
mod language;

pub use highlighter::HtmlHighlighter;
pub use language::{detect_language, Language};

/// Turns one line of source into safe HTML.
///
/// Implementations never fail: anything they cannot highlight comes back
/// HTML-escaped.
pub trait SyntaxHighlighter: Send + Sync {
    fn highlight(&self, content: &str, language: &str) -> String;
}

/// Highlighter that only escapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl SyntaxHighlighter for PlainHighlighter {
    fn highlight(&self, content: &str, _language: &str) -> String {
        escape_html(content)
    }
}

/// Escape text for HTML content and quoted attributes.
///
/// Quotes are escaped too: paths and comment authors end up in `title` and
/// `data-*` attributes.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}
