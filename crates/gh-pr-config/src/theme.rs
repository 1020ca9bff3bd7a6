//! Theme tokens for the diff viewer.
//!
//! A plain struct of named colors, spacing and typography values. The viewer
//! receives it explicitly and emits the tokens as CSS custom properties.

use serde::{Deserialize, Serialize};

/// Named theme tokens. Colors are CSS color strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeTokens {
    pub addition_background: String,
    pub addition_gutter: String,
    pub deletion_background: String,
    pub deletion_gutter: String,
    pub context_background: String,
    pub hunk_header_background: String,
    pub hunk_header_foreground: String,
    pub line_number_foreground: String,
    pub expander_background: String,
    pub comment_background: String,
    pub comment_border: String,
    pub file_header_background: String,
    pub font_family: String,
    pub font_size_px: u16,
    pub line_height: f32,
    pub gutter_width_ch: u16,
    pub cell_padding_px: u16,
}

impl Default for ThemeTokens {
    fn default() -> Self {
        Self {
            addition_background: "#e6ffec".to_string(),
            addition_gutter: "#ccffd8".to_string(),
            deletion_background: "#ffebe9".to_string(),
            deletion_gutter: "#ffd7d5".to_string(),
            context_background: "transparent".to_string(),
            hunk_header_background: "#ddf4ff".to_string(),
            hunk_header_foreground: "#57606a".to_string(),
            line_number_foreground: "#8c959f".to_string(),
            expander_background: "#f6f8fa".to_string(),
            comment_background: "#ffffff".to_string(),
            comment_border: "#d0d7de".to_string(),
            file_header_background: "#f6f8fa".to_string(),
            font_family: "ui-monospace, SFMono-Regular, Menlo, monospace".to_string(),
            font_size_px: 12,
            line_height: 1.5,
            gutter_width_ch: 5,
            cell_padding_px: 8,
        }
    }
}

impl ThemeTokens {
    /// A dark variant with the same spacing and typography.
    pub fn dark() -> Self {
        Self {
            addition_background: "#1e3c1e".to_string(),
            addition_gutter: "#2a522a".to_string(),
            deletion_background: "#3c1e1e".to_string(),
            deletion_gutter: "#522a2a".to_string(),
            context_background: "transparent".to_string(),
            hunk_header_background: "#28283c".to_string(),
            hunk_header_foreground: "#8be9fd".to_string(),
            line_number_foreground: "#6e7681".to_string(),
            expander_background: "#282828".to_string(),
            comment_background: "#161b22".to_string(),
            comment_border: "#30363d".to_string(),
            file_header_background: "#161b22".to_string(),
            ..Self::default()
        }
    }

    /// Render the tokens as a `:root { ... }` block of CSS custom properties.
    pub fn css_variables(&self) -> String {
        let vars = [
            ("addition-bg", self.addition_background.clone()),
            ("addition-gutter", self.addition_gutter.clone()),
            ("deletion-bg", self.deletion_background.clone()),
            ("deletion-gutter", self.deletion_gutter.clone()),
            ("context-bg", self.context_background.clone()),
            ("hunk-header-bg", self.hunk_header_background.clone()),
            ("hunk-header-fg", self.hunk_header_foreground.clone()),
            ("line-number-fg", self.line_number_foreground.clone()),
            ("expander-bg", self.expander_background.clone()),
            ("comment-bg", self.comment_background.clone()),
            ("comment-border", self.comment_border.clone()),
            ("file-header-bg", self.file_header_background.clone()),
            ("font-family", self.font_family.clone()),
            ("font-size", format!("{}px", self.font_size_px)),
            ("line-height", self.line_height.to_string()),
            ("gutter-width", format!("{}ch", self.gutter_width_ch)),
            ("cell-padding", format!("{}px", self.cell_padding_px)),
        ];

        let mut css = String::from(":root {\n");
        for (name, value) in vars {
            css.push_str(&format!("  --diff-{}: {};\n", name, value));
        }
        css.push('}');
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_variables_contains_tokens() {
        let css = ThemeTokens::default().css_variables();
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--diff-addition-bg: #e6ffec;"));
        assert!(css.contains("--diff-font-size: 12px;"));
        assert!(css.contains("--diff-gutter-width: 5ch;"));
    }

    #[test]
    fn test_dark_keeps_typography() {
        let dark = ThemeTokens::dark();
        let light = ThemeTokens::default();
        assert_ne!(dark.addition_background, light.addition_background);
        assert_eq!(dark.font_family, light.font_family);
        assert_eq!(dark.font_size_px, light.font_size_px);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let tokens: ThemeTokens = toml::from_str(r##"addition_background = "#00ff00""##).unwrap();
        assert_eq!(tokens.addition_background, "#00ff00");
        assert_eq!(tokens.deletion_background, ThemeTokens::default().deletion_background);
    }
}
