//! Row building: turns a hunk's lines into renderable rows.
//!
//! Two strategies implement [`LineParser`]: [`UnifiedLineParser`] emits one
//! row per line, [`SplitLineParser`] pairs deletions with additions for a
//! side-by-side view. [`line_parser_for`] picks one by display mode name.

mod cache;
mod split;
mod unified;

pub use cache::{fingerprint, RowCache, DEFAULT_ROW_CACHE_SIZE};
pub use split::SplitLineParser;
pub use unified::UnifiedLineParser;

use crate::highlight::SyntaxHighlighter;
use crate::model::{CommentPosition, DiffLine, DiffSide, Hunk, LineKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How hunks are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Unified,
    #[default]
    Split,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Unified => "unified",
            DisplayMode::Split => "split",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A display mode name no strategy is registered for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown display mode: {0:?}")]
pub struct UnknownDisplayMode(pub String);

impl FromStr for DisplayMode {
    type Err = UnknownDisplayMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unified" => Ok(DisplayMode::Unified),
            "split" | "side-by-side" => Ok(DisplayMode::Split),
            _ => Err(UnknownDisplayMode(s.to_string())),
        }
    }
}

/// A unified row: one diff line and its highlighted HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePair {
    pub line: DiffLine,
    pub html: String,
}

/// One side of a split row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitCell {
    pub line: DiffLine,
    pub html: String,
}

/// A side-by-side row. At least one side is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLinePair {
    pub left: Option<SplitCell>,
    pub right: Option<SplitCell>,
}

impl SplitLinePair {
    /// Whether this is the synthetic hunk header row.
    pub fn is_header(&self) -> bool {
        self.left
            .as_ref()
            .is_some_and(|cell| cell.line.kind == LineKind::HunkHeader)
    }
}

/// Rows for one hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HunkRows {
    Unified(Vec<LinePair>),
    Split(Vec<SplitLinePair>),
}

impl HunkRows {
    pub fn len(&self) -> usize {
        match self {
            HunkRows::Unified(rows) => rows.len(),
            HunkRows::Split(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> DisplayMode {
        match self {
            HunkRows::Unified(_) => DisplayMode::Unified,
            HunkRows::Split(_) => DisplayMode::Split,
        }
    }
}

/// Strategy that lays out a hunk for one display mode.
pub trait LineParser: Send + Sync {
    fn mode(&self) -> DisplayMode;

    /// Build the rows for `hunk`, highlighting each line as `language`.
    fn parse(&self, hunk: &Hunk, language: &str, highlighter: &dyn SyntaxHighlighter)
        -> HunkRows;
}

/// Strategy for a display mode value.
pub fn line_parser(mode: DisplayMode) -> Box<dyn LineParser> {
    match mode {
        DisplayMode::Unified => Box::new(UnifiedLineParser),
        DisplayMode::Split => Box::new(SplitLineParser),
    }
}

/// Strategy for a display mode name.
///
/// Accepts `unified`, `split` and `side-by-side` in any case. Anything else
/// is an error; there is no fallback mode.
pub fn line_parser_for(mode: &str) -> Result<Box<dyn LineParser>, UnknownDisplayMode> {
    mode.parse::<DisplayMode>().map(line_parser)
}

/// Where a comment on `line` would be anchored.
///
/// `cell_side` is the column the line is rendered in for split rows; `None`
/// for unified rows, where deletions go left and everything else right. A line
/// is commentable when it has a number on that side and came from the diff.
pub fn comment_anchor(line: &DiffLine, cell_side: Option<DiffSide>) -> Option<CommentPosition> {
    if line.is_expanded {
        return None;
    }
    let side = match (cell_side, line.kind) {
        (_, LineKind::HunkHeader | LineKind::Empty) => return None,
        (Some(side), _) => side,
        (None, LineKind::Deletion) => DiffSide::Left,
        (None, _) => DiffSide::Right,
    };
    let number = match side {
        DiffSide::Left => line.old_line,
        DiffSide::Right => line.new_line,
    }?;
    Some(CommentPosition::new(side, number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_factory_modes() {
        assert_eq!(line_parser_for("unified").unwrap().mode(), DisplayMode::Unified);
        assert_eq!(line_parser_for("Split").unwrap().mode(), DisplayMode::Split);
        assert_eq!(
            line_parser_for("side-by-side").unwrap().mode(),
            DisplayMode::Split
        );
    }

    #[test]
    fn test_factory_rejects_unknown_mode() {
        match line_parser_for("inline") {
            Err(err) => assert_eq!(err, UnknownDisplayMode("inline".to_string())),
            Ok(parser) => panic!("expected an error, got {:?}", parser.mode()),
        }
        assert!(line_parser_for("").is_err());
    }

    #[test]
    fn test_comment_anchor_sides() {
        let del = DiffLine::deletion("x", 4);
        let add = DiffLine::addition("y", 6);
        let ctx = DiffLine::context("z", 7, 9);

        assert_eq!(
            comment_anchor(&del, None),
            Some(CommentPosition::new(DiffSide::Left, 4))
        );
        assert_eq!(
            comment_anchor(&add, None),
            Some(CommentPosition::new(DiffSide::Right, 6))
        );
        assert_eq!(
            comment_anchor(&ctx, Some(DiffSide::Left)),
            Some(CommentPosition::new(DiffSide::Left, 7))
        );
        // an addition has no old-side number
        assert_eq!(comment_anchor(&add, Some(DiffSide::Left)), None);
        assert_eq!(comment_anchor(&DiffLine::expanded("e", 1, 1), None), None);
        assert_eq!(comment_anchor(&DiffLine::hunk_header("@@"), None), None);
    }
}
