use super::{DisplayMode, HunkRows, LineParser, LinePair};
use crate::highlight::SyntaxHighlighter;
use crate::model::Hunk;

/// One row per line, in order. Blank lines are dropped.
///
/// No header row is produced; renderers draw the hunk header themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnifiedLineParser;

impl LineParser for UnifiedLineParser {
    fn mode(&self) -> DisplayMode {
        DisplayMode::Unified
    }

    fn parse(
        &self,
        hunk: &Hunk,
        language: &str,
        highlighter: &dyn SyntaxHighlighter,
    ) -> HunkRows {
        let rows = hunk
            .lines
            .iter()
            .filter(|line| !line.is_blank())
            .map(|line| LinePair {
                html: highlighter.highlight(&line.content, language),
                line: line.clone(),
            })
            .collect();
        HunkRows::Unified(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::PlainHighlighter;
    use crate::model::DiffLine;
    use pretty_assertions::assert_eq;

    fn rows(hunk: &Hunk) -> Vec<LinePair> {
        match UnifiedLineParser.parse(hunk, "plaintext", &PlainHighlighter) {
            HunkRows::Unified(rows) => rows,
            HunkRows::Split(_) => panic!("unified parser produced split rows"),
        }
    }

    #[test]
    fn test_preserves_length_and_order() {
        let mut hunk = Hunk::new(1, 3, 1, 3);
        hunk.lines = vec![
            DiffLine::context("a", 1, 1),
            DiffLine::deletion("b", 2),
            DiffLine::addition("c", 2),
            DiffLine::context("d", 3, 3),
        ];

        let rows = rows(&hunk);
        let contents: Vec<&str> = rows.iter().map(|r| r.line.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "c", "d"]);
        assert_eq!(rows[1].line, hunk.lines[1]);
    }

    #[test]
    fn test_drops_blank_lines_only() {
        let mut hunk = Hunk::new(1, 4, 1, 4);
        hunk.lines = vec![
            DiffLine::context("x", 1, 1),
            DiffLine::context("", 2, 2),
            DiffLine::addition("   ", 3),
            DiffLine::context("y", 3, 4),
        ];

        let rows = rows(&hunk);
        let kept: Vec<&DiffLine> = hunk.lines.iter().filter(|l| !l.is_blank()).collect();
        assert_eq!(rows.len(), kept.len());
        for (row, line) in rows.iter().zip(kept) {
            assert_eq!(&row.line, line);
        }
    }

    #[test]
    fn test_html_is_highlighter_output() {
        let mut hunk = Hunk::new(1, 1, 1, 1);
        hunk.lines = vec![DiffLine::context("a < b", 1, 1)];
        assert_eq!(rows(&hunk)[0].html, "a &lt; b");
    }
}
