use super::{DisplayMode, HunkRows, LineParser, SplitCell, SplitLinePair};
use crate::highlight::{escape_html, SyntaxHighlighter};
use crate::model::{DiffLine, Hunk, LineKind};

/// Side-by-side rows.
///
/// A header row opens every hunk. Context lines are mirrored on both sides.
/// A deletion opens a left-only row; an addition fills the right slot of the
/// row directly before it if that row is an unmatched deletion, otherwise it
/// opens a right-only row. Blank lines are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitLineParser;

impl LineParser for SplitLineParser {
    fn mode(&self) -> DisplayMode {
        DisplayMode::Split
    }

    fn parse(
        &self,
        hunk: &Hunk,
        language: &str,
        highlighter: &dyn SyntaxHighlighter,
    ) -> HunkRows {
        let header = SplitCell {
            line: DiffLine::hunk_header(hunk.header.clone()),
            html: escape_html(&hunk.header),
        };
        let mut rows = vec![SplitLinePair {
            left: Some(header.clone()),
            right: Some(header),
        }];

        for line in hunk.lines.iter().filter(|line| !line.is_blank()) {
            let cell = SplitCell {
                html: highlighter.highlight(&line.content, language),
                line: line.clone(),
            };

            match line.kind {
                LineKind::Deletion => rows.push(SplitLinePair {
                    left: Some(cell),
                    right: None,
                }),
                LineKind::Addition => match rows.last_mut() {
                    Some(last) if last.left.is_some() && last.right.is_none() => {
                        last.right = Some(cell);
                    }
                    _ => rows.push(SplitLinePair {
                        left: None,
                        right: Some(cell),
                    }),
                },
                LineKind::Context | LineKind::HunkHeader | LineKind::Empty => {
                    rows.push(SplitLinePair {
                        left: Some(cell.clone()),
                        right: Some(cell),
                    })
                }
            }
        }

        HunkRows::Split(rows)
    }
}
