//! Syntax highlighter using syntect's class-based HTML output.

use super::{escape_html, Language, SyntaxHighlighter};
use log::debug;
use std::collections::HashMap;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Highlights single lines into `<span class="...">` markup.
///
/// The syntax set is loaded once and never mutated, so equal inputs always
/// produce equal output.
pub struct HtmlHighlighter {
    syntax_set: SyntaxSet,
    /// Index into `syntax_set.syntaxes()` per language with a grammar.
    syntaxes: HashMap<Language, usize>,
}

impl std::fmt::Debug for HtmlHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlHighlighter")
            .field("languages", &self.syntaxes.len())
            .finish()
    }
}

impl Default for HtmlHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlHighlighter {
    /// Create a highlighter with the bundled grammars.
    pub fn new() -> Self {
        Self::with_syntax_set(SyntaxSet::load_defaults_newlines())
    }

    /// Create a highlighter over a custom syntax set.
    pub fn with_syntax_set(syntax_set: SyntaxSet) -> Self {
        let mut syntaxes = HashMap::new();
        for lang in Language::ALL {
            let Some(token) = lang.syntax_token() else {
                continue;
            };
            let found = syntax_set
                .find_syntax_by_token(token)
                .and_then(|syntax| {
                    syntax_set
                        .syntaxes()
                        .iter()
                        .position(|s| s.name == syntax.name)
                });
            match found {
                Some(idx) => {
                    syntaxes.insert(lang, idx);
                }
                None => debug!("No grammar for {} (token {})", lang, token),
            }
        }

        Self {
            syntax_set,
            syntaxes,
        }
    }

    /// Whether `language` resolves to a loaded grammar.
    pub fn supports(&self, language: &str) -> bool {
        self.syntax_for(language).is_some()
    }

    fn syntax_for(&self, language: &str) -> Option<&SyntaxReference> {
        let lang = Language::from_tag(language)?;
        let idx = *self.syntaxes.get(&lang)?;
        self.syntax_set.syntaxes().get(idx)
    }

    fn highlight_with_syntax(
        &self,
        syntax: &SyntaxReference,
        content: &str,
    ) -> Result<String, syntect::Error> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, ClassStyle::Spaced);
        let line = format!("{}\n", content.trim_end_matches(['\n', '\r']));
        generator.parse_html_for_line_which_includes_newline(&line)?;
        let html = generator.finalize();
        Ok(html.trim_end_matches('\n').to_string())
    }
}

impl SyntaxHighlighter for HtmlHighlighter {
    fn highlight(&self, content: &str, language: &str) -> String {
        let Some(syntax) = self.syntax_for(language) else {
            return escape_html(content);
        };

        match self.highlight_with_syntax(syntax, content) {
            Ok(html) => html,
            Err(e) => {
                debug!("Highlighting as {} failed, falling back: {}", language, e);
                escape_html(content)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_highlight_typescript_emits_markup() {
        let highlighter = HtmlHighlighter::new();
        let html = highlighter.highlight("const answer: number = 42;", "typescript");
        assert!(html.contains("<span class=\""), "no markup in {html}");
        assert!(html.contains("42"));
    }

    #[test]
    fn test_unknown_language_is_escaped() {
        let highlighter = HtmlHighlighter::new();
        assert_eq!(highlighter.highlight("1 < 2", "unknown_lang"), "1 &lt; 2");
        assert_eq!(
            highlighter.highlight("<script>alert(1)</script>", "plaintext"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_highlighted_output_is_escaped() {
        let highlighter = HtmlHighlighter::new();
        let html = highlighter.highlight("if (a < b && c > d) {}", "javascript");
        assert!(!html.contains("a < b"));
        assert!(html.contains("&lt;"));
        assert!(!html.contains('\n'));
    }

    #[test]
    fn test_deterministic() {
        let highlighter = HtmlHighlighter::new();
        let first = highlighter.highlight("fn main() { let x = 1; }", "rust");
        let second = highlighter.highlight("fn main() { let x = 1; }", "rust");
        assert_eq!(first, second);
    }

    #[test]
    fn test_supported_languages() {
        let highlighter = HtmlHighlighter::new();
        assert!(highlighter.supports("rust"));
        assert!(highlighter.supports("typescript"));
        assert!(highlighter.supports("PYTHON"));
        assert!(!highlighter.supports("plaintext"));
        assert!(!highlighter.supports("cobol"));
    }
}
