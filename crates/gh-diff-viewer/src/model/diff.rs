//! Diff data structures representing a pull request's changes.

use serde::{Deserialize, Serialize};

/// A complete diff for a pull request.
#[derive(Debug, Clone, Default)]
pub struct PullRequestDiff {
    /// Base commit SHA (the target branch).
    pub base_sha: String,
    /// Head commit SHA (the PR branch).
    pub head_sha: String,
    /// All files changed in this PR.
    pub files: Vec<FileDiff>,
    /// Total additions across all files.
    pub total_additions: usize,
    /// Total deletions across all files.
    pub total_deletions: usize,
}

impl PullRequestDiff {
    /// Create a new pull request diff.
    pub fn new(base_sha: impl Into<String>, head_sha: impl Into<String>) -> Self {
        Self {
            base_sha: base_sha.into(),
            head_sha: head_sha.into(),
            ..Self::default()
        }
    }

    /// Recalculate totals from files.
    pub fn recalculate_totals(&mut self) {
        self.total_additions = self.files.iter().map(|f| f.additions).sum();
        self.total_deletions = self.files.iter().map(|f| f.deletions).sum();
    }

    /// Index of the file with the given path.
    pub fn file_index(&self, path: &str) -> Option<usize> {
        self.files.iter().position(|f| f.path == path)
    }
}

/// A single file's diff.
#[derive(Debug, Clone)]
pub struct FileDiff {
    /// Current file path (after rename if applicable).
    pub path: String,
    /// Previous file path (if renamed).
    pub old_path: Option<String>,
    /// File status.
    pub status: FileStatus,
    /// Change hunks.
    pub hunks: Vec<Hunk>,
    /// Number of added lines.
    pub additions: usize,
    /// Number of deleted lines.
    pub deletions: usize,
    /// Set once a trailing expansion came back short: nothing follows the last hunk.
    pub end_of_file_reached: bool,
}

impl FileDiff {
    /// Create a new file diff.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            old_path: None,
            status: FileStatus::Modified,
            hunks: Vec::new(),
            additions: 0,
            deletions: 0,
            end_of_file_reached: false,
        }
    }

    /// Display name for the file (handles renames).
    pub fn display_name(&self) -> String {
        match &self.old_path {
            Some(old) if old != &self.path => format!("{} → {}", old, self.path),
            _ => self.path.clone(),
        }
    }

    /// Recalculate line statistics from hunks.
    pub fn recalculate_stats(&mut self) {
        let lines = || self.hunks.iter().flat_map(|h| &h.lines);
        self.additions = lines().filter(|l| l.kind == LineKind::Addition).count();
        self.deletions = lines().filter(|l| l.kind == LineKind::Deletion).count();
    }

    /// Whether context lines can be loaded for this file.
    ///
    /// Deleted files have no head revision to read from.
    pub fn is_expandable(&self) -> bool {
        self.status != FileStatus::Deleted && !self.hunks.is_empty()
    }
}

/// File status in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
}

impl FileStatus {
    /// Get a single-character representation.
    pub fn as_char(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
            FileStatus::Copied => 'C',
        }
    }

    /// CSS class suffix for this status.
    pub fn css_class(&self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Deleted => "deleted",
            FileStatus::Renamed => "renamed",
            FileStatus::Copied => "copied",
        }
    }
}

/// A contiguous region of changes (hunk).
///
/// A side with a zero count follows git's convention: its start is the line
/// *before* the hunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hunk {
    /// Header line (e.g., "@@ -10,5 +10,7 @@ fn example()").
    pub header: String,
    /// Function context after the second `@@`, if any.
    pub section: String,
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in old version.
    pub old_count: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in new version.
    pub new_count: u32,
    /// Lines in this hunk.
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Create a new hunk with the given header info.
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self::with_context(old_start, old_count, new_start, new_count, "")
    }

    /// Create a hunk with a function context in header.
    pub fn with_context(
        old_start: u32,
        old_count: u32,
        new_start: u32,
        new_count: u32,
        context: &str,
    ) -> Self {
        let mut hunk = Self {
            header: String::new(),
            section: context.to_string(),
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        };
        hunk.refresh_header();
        hunk
    }

    /// Rebuild `header` from the current ranges.
    pub fn refresh_header(&mut self) {
        self.header = if self.section.is_empty() {
            format!(
                "@@ -{},{} +{},{} @@",
                self.old_start, self.old_count, self.new_start, self.new_count
            )
        } else {
            format!(
                "@@ -{},{} +{},{} @@ {}",
                self.old_start, self.old_count, self.new_start, self.new_count, self.section
            )
        };
    }

    /// First old-side line at or after the hunk start.
    pub fn old_first(&self) -> u32 {
        if self.old_count == 0 {
            self.old_start + 1
        } else {
            self.old_start
        }
    }

    /// First new-side line at or after the hunk start.
    pub fn new_first(&self) -> u32 {
        if self.new_count == 0 {
            self.new_start + 1
        } else {
            self.new_start
        }
    }

    /// First old-side line after the hunk.
    pub fn old_end(&self) -> u32 {
        self.old_first() + self.old_count
    }

    /// First new-side line after the hunk.
    pub fn new_end(&self) -> u32 {
        self.new_first() + self.new_count
    }

    /// Offset that maps a new-side number before this hunk to the old side.
    pub fn leading_offset(&self) -> i64 {
        i64::from(self.old_first()) - i64::from(self.new_first())
    }

    /// Offset that maps a new-side number after this hunk to the old side.
    pub fn trailing_offset(&self) -> i64 {
        i64::from(self.old_end()) - i64::from(self.new_end())
    }

    /// Prepend unchanged lines that sit directly above the hunk.
    pub fn prepend_context(&mut self, mut lines: Vec<DiffLine>) {
        let n = lines.len() as u32;
        if n == 0 {
            return;
        }
        let new_first = self.new_first() - n;
        let old_first = self.old_first() - n;
        self.new_start = new_first;
        self.old_start = old_first;
        self.new_count += n;
        self.old_count += n;
        lines.append(&mut self.lines);
        self.lines = lines;
        self.refresh_header();
    }

    /// Append unchanged lines that sit directly below the hunk.
    pub fn append_context(&mut self, lines: Vec<DiffLine>) {
        let n = lines.len() as u32;
        if n == 0 {
            return;
        }
        self.new_start = self.new_first();
        self.old_start = self.old_first();
        self.new_count += n;
        self.old_count += n;
        self.lines.extend(lines);
        self.refresh_header();
    }

    /// Absorb the hunk that directly follows this one.
    pub fn merge(&mut self, next: Hunk) {
        let new_first = self.new_first();
        let old_first = self.old_first();
        self.new_count = next.new_end() - new_first;
        self.old_count = next.old_end() - old_first;
        self.new_start = if self.new_count == 0 { new_first - 1 } else { new_first };
        self.old_start = if self.old_count == 0 { old_first - 1 } else { old_first };
        self.lines.extend(next.lines);
        self.refresh_header();
    }
}

/// A single line in the diff.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiffLine {
    /// Line type.
    pub kind: LineKind,
    /// Line content (without leading +/-/ ).
    pub content: String,
    /// Line number in old file (for Context and Deletion).
    pub old_line: Option<u32>,
    /// Line number in new file (for Context and Addition).
    pub new_line: Option<u32>,
    /// Whether this line was expanded (not from original diff).
    pub is_expanded: bool,
}

impl DiffLine {
    /// Create a new context line.
    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
            is_expanded: false,
        }
    }

    /// Create a new addition line.
    pub fn addition(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Addition,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
            is_expanded: false,
        }
    }

    /// Create a new deletion line.
    pub fn deletion(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Deletion,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
            is_expanded: false,
        }
    }

    /// Create a hunk header line.
    pub fn hunk_header(header: impl Into<String>) -> Self {
        Self {
            kind: LineKind::HunkHeader,
            content: header.into(),
            old_line: None,
            new_line: None,
            is_expanded: false,
        }
    }

    /// Create a context line loaded through gap expansion.
    pub fn expanded(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            is_expanded: true,
            ..Self::context(content, old_line, new_line)
        }
    }

    /// Get the line number to display (prefers new_line, falls back to old_line).
    pub fn display_line_number(&self) -> Option<u32> {
        self.new_line.or(self.old_line)
    }

    /// Whether the content is blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Unchanged line (for context).
    Context,
    /// Added line (+).
    Addition,
    /// Removed line (-).
    Deletion,
    /// @@ header line.
    HunkHeader,
    /// Marker without file content (e.g. "\ No newline at end of file").
    Empty,
}

impl LineKind {
    /// Get the prefix character for this line type.
    pub fn prefix(&self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Addition => '+',
            LineKind::Deletion => '-',
            LineKind::HunkHeader => '@',
            LineKind::Empty => ' ',
        }
    }

    /// CSS class suffix for this line type.
    pub fn css_class(&self) -> &'static str {
        match self {
            LineKind::Context => "context",
            LineKind::Addition => "addition",
            LineKind::Deletion => "deletion",
            LineKind::HunkHeader => "hunk",
            LineKind::Empty => "empty",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_diff_display_name() {
        let mut file = FileDiff::new("src/new.rs");
        assert_eq!(file.display_name(), "src/new.rs");

        file.old_path = Some("src/old.rs".to_string());
        assert_eq!(file.display_name(), "src/old.rs → src/new.rs");

        file.old_path = Some("src/new.rs".to_string());
        assert_eq!(file.display_name(), "src/new.rs");
    }

    #[test]
    fn test_hunk_header_format() {
        let hunk = Hunk::new(10, 5, 10, 7);
        assert_eq!(hunk.header, "@@ -10,5 +10,7 @@");

        let hunk = Hunk::with_context(10, 5, 10, 7, "fn example()");
        assert_eq!(hunk.header, "@@ -10,5 +10,7 @@ fn example()");
    }

    #[test]
    fn test_hunk_bounds_with_empty_side() {
        // pure addition after old line 4
        let hunk = Hunk::new(4, 0, 5, 2);
        assert_eq!(hunk.old_first(), 5);
        assert_eq!(hunk.old_end(), 5);
        assert_eq!(hunk.new_first(), 5);
        assert_eq!(hunk.new_end(), 7);
        assert_eq!(hunk.trailing_offset(), -2);
    }

    #[test]
    fn test_prepend_and_append_context() {
        let mut hunk = Hunk::with_context(10, 2, 12, 3, "fn f()");
        hunk.prepend_context(vec![
            DiffLine::expanded("a", 8, 10),
            DiffLine::expanded("b", 9, 11),
        ]);
        assert_eq!(hunk.header, "@@ -8,4 +10,5 @@ fn f()");
        assert_eq!(hunk.lines.len(), 2);

        hunk.append_context(vec![DiffLine::expanded("c", 12, 15)]);
        assert_eq!(hunk.header, "@@ -8,5 +10,6 @@ fn f()");
    }

    #[test]
    fn test_merge_adjacent_hunks() {
        let mut first = Hunk::new(1, 3, 1, 4);
        let second = Hunk::new(4, 2, 5, 1);
        first.merge(second);
        assert_eq!(
            (first.old_start, first.old_count, first.new_start, first.new_count),
            (1, 5, 1, 5)
        );
    }

    #[test]
    fn test_diff_line_kinds() {
        let ctx = DiffLine::context("unchanged", 5, 5);
        assert_eq!(ctx.kind, LineKind::Context);
        assert_eq!(ctx.old_line, Some(5));
        assert_eq!(ctx.new_line, Some(5));

        let add = DiffLine::addition("new line", 10);
        assert_eq!(add.kind, LineKind::Addition);
        assert_eq!(add.old_line, None);

        let del = DiffLine::deletion("removed line", 8);
        assert_eq!(del.kind, LineKind::Deletion);
        assert_eq!(del.new_line, None);

        assert!(DiffLine::expanded("x", 1, 1).is_expanded);
        assert!(DiffLine::context("   ", 1, 1).is_blank());
    }
}
