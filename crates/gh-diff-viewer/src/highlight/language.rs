//! File extension to language tag mapping.

use std::fmt;
use std::path::Path;

/// Languages the viewer knows how to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    C,
    Cpp,
    Go,
    Ruby,
    Rust,
    Php,
    Bash,
    Css,
    Html,
    Xml,
    Json,
    Markdown,
    Yaml,
    Scala,
    PlainText,
}

impl Language {
    pub const ALL: [Language; 19] = [
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Java,
        Language::C,
        Language::Cpp,
        Language::Go,
        Language::Ruby,
        Language::Rust,
        Language::Php,
        Language::Bash,
        Language::Css,
        Language::Html,
        Language::Xml,
        Language::Json,
        Language::Markdown,
        Language::Yaml,
        Language::Scala,
        Language::PlainText,
    ];

    /// Canonical tag, as passed to the highlighter.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Ruby => "ruby",
            Language::Rust => "rust",
            Language::Php => "php",
            Language::Bash => "bash",
            Language::Css => "css",
            Language::Html => "html",
            Language::Xml => "xml",
            Language::Json => "json",
            Language::Markdown => "markdown",
            Language::Yaml => "yaml",
            Language::Scala => "scala",
            Language::PlainText => "plaintext",
        }
    }

    /// Parse a canonical tag (case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.tag().eq_ignore_ascii_case(tag))
    }

    /// Map a file extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "py" => Language::Python,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => Language::Cpp,
            "go" => Language::Go,
            "rb" => Language::Ruby,
            "rs" => Language::Rust,
            "php" => Language::Php,
            "sh" | "bash" => Language::Bash,
            "css" => Language::Css,
            "html" | "htm" => Language::Html,
            "xml" => Language::Xml,
            "json" => Language::Json,
            "md" | "markdown" => Language::Markdown,
            "yaml" | "yml" => Language::Yaml,
            "scala" => Language::Scala,
            _ => Language::PlainText,
        }
    }

    /// Token used to look the grammar up in the syntax set.
    ///
    /// The bundled grammars have no TypeScript; JavaScript is close enough.
    pub(crate) fn syntax_token(&self) -> Option<&'static str> {
        match self {
            Language::JavaScript | Language::TypeScript => Some("js"),
            Language::Python => Some("py"),
            Language::Java => Some("java"),
            Language::C => Some("c"),
            Language::Cpp => Some("cpp"),
            Language::Go => Some("go"),
            Language::Ruby => Some("rb"),
            Language::Rust => Some("rs"),
            Language::Php => Some("php"),
            Language::Bash => Some("sh"),
            Language::Css => Some("css"),
            Language::Html => Some("html"),
            Language::Xml => Some("xml"),
            Language::Json => Some("json"),
            Language::Markdown => Some("md"),
            Language::Yaml => Some("yaml"),
            Language::Scala => Some("scala"),
            Language::PlainText => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Detect the language of a file from its extension.
///
/// No extension or an unknown one yields [`Language::PlainText`].
pub fn detect_language(path: &str) -> Language {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(Language::from_extension)
        .unwrap_or(Language::PlainText)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("App.tsx"), Language::TypeScript);
        assert_eq!(detect_language("src/lib.rs"), Language::Rust);
        assert_eq!(detect_language("web/index.HTM"), Language::Html);
        assert_eq!(detect_language("include/util.hh"), Language::Cpp);
        assert_eq!(detect_language(".github/ci.yml"), Language::Yaml);
        assert_eq!(detect_language("scripts/run.bash"), Language::Bash);
    }

    #[test]
    fn test_unknown_is_plaintext() {
        assert_eq!(detect_language("LICENSE"), Language::PlainText);
        assert_eq!(detect_language("x.unknownext"), Language::PlainText);
        assert_eq!(detect_language(""), Language::PlainText);
        assert_eq!(detect_language("LICENSE").tag(), "plaintext");
    }

    #[test]
    fn test_tag_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_tag(lang.tag()), Some(lang));
        }
        assert_eq!(Language::from_tag("TypeScript"), Some(Language::TypeScript));
        assert_eq!(Language::from_tag("unknown_lang"), None);
    }
}
