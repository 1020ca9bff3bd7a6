//! Parse unified diff format (as returned by GitHub API).

use crate::model::{DiffLine, FileDiff, FileStatus, Hunk, LineKind, PullRequestDiff};
use log::debug;
use thiserror::Error;
use unidiff::{Hunk as UnidiffHunk, Line as UnidiffLine, PatchSet, PatchedFile};

const DEV_NULL: &str = "/dev/null";

/// Errors that can occur during diff parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to parse diff: {0}")]
    ParseFailed(String),
}

/// Parse a unified diff string into a structured `PullRequestDiff`.
///
/// # Example
/// ```ignore
/// let diff = parse_unified_diff(diff_text, "abc123", "def456")?;
/// println!("Changed files: {}", diff.files.len());
/// ```
pub fn parse_unified_diff(
    diff_text: &str,
    base_sha: impl Into<String>,
    head_sha: impl Into<String>,
) -> Result<PullRequestDiff, ParseError> {
    let mut patch_set = PatchSet::new();
    patch_set
        .parse(diff_text)
        .map_err(|e| ParseError::ParseFailed(e.to_string()))?;

    let mut diff = PullRequestDiff::new(base_sha, head_sha);
    diff.files = patch_set.files().iter().map(parse_patched_file).collect();
    diff.recalculate_totals();

    debug!(
        "Parsed diff: {} files, +{} -{}",
        diff.files.len(),
        diff.total_additions,
        diff.total_deletions
    );
    Ok(diff)
}

fn parse_patched_file(file: &PatchedFile) -> FileDiff {
    let source = clean_path(&file.source_file);
    let target = clean_path(&file.target_file);
    let status = determine_status(&source, &target);

    let path = if status == FileStatus::Deleted {
        source.clone()
    } else {
        target.clone()
    };

    let mut file_diff = FileDiff::new(path);
    file_diff.status = status;
    if status == FileStatus::Renamed {
        file_diff.old_path = Some(source);
    }

    file_diff.hunks = file.hunks().iter().map(parse_hunk).collect();
    file_diff.recalculate_stats();
    file_diff
}

fn parse_hunk(hunk: &UnidiffHunk) -> Hunk {
    let mut parsed = Hunk::with_context(
        hunk.source_start as u32,
        hunk.source_length as u32,
        hunk.target_start as u32,
        hunk.target_length as u32,
        hunk.section_header.trim(),
    );
    parsed.lines = hunk.lines().iter().map(parse_line).collect();
    parsed
}

fn parse_line(line: &UnidiffLine) -> DiffLine {
    let kind = match line.line_type.as_str() {
        "+" => LineKind::Addition,
        "-" => LineKind::Deletion,
        "\\" => LineKind::Empty,
        _ => LineKind::Context,
    };

    if kind == LineKind::Empty {
        // "\ No newline at end of file" carries no file content
        return DiffLine {
            kind,
            content: String::new(),
            old_line: None,
            new_line: None,
            is_expanded: false,
        };
    }

    DiffLine {
        kind,
        content: line.value.trim_end_matches(['\n', '\r']).to_string(),
        old_line: line.source_line_no.map(|n| n as u32),
        new_line: line.target_line_no.map(|n| n as u32),
        is_expanded: false,
    }
}

fn determine_status(source: &str, target: &str) -> FileStatus {
    if source == DEV_NULL || source.is_empty() {
        FileStatus::Added
    } else if target == DEV_NULL || target.is_empty() {
        FileStatus::Deleted
    } else if source != target {
        FileStatus::Renamed
    } else {
        FileStatus::Modified
    }
}

/// Strip the `a/` / `b/` prefixes git puts on diff paths.
fn clean_path(path: &str) -> String {
    let path = path.trim();
    path.strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_DIFF: &str = r#"diff --git a/src/main.rs b/src/main.rs
index abc123..def456 100644
--- a/src/main.rs
+++ b/src/main.rs
@@ -1,3 +1,4 @@ fn main()
 fn main() {
     println!("Hello");
+    println!("World");
 }
diff --git a/src/lib.rs b/src/lib.rs
index 111222..333444 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -10,5 +10,4 @@ impl Foo {
 impl Foo {
     fn bar(&self) {
-        // old comment
         self.do_thing();
     }
"#;

    #[test]
    fn test_parse_simple_diff() {
        let diff = parse_unified_diff(SAMPLE_DIFF, "abc", "def").unwrap();

        assert_eq!(diff.files.len(), 2);
        assert_eq!(diff.total_additions, 1);
        assert_eq!(diff.total_deletions, 1);

        let file1 = &diff.files[0];
        assert_eq!(file1.path, "src/main.rs");
        assert_eq!(file1.status, FileStatus::Modified);
        assert_eq!(file1.hunks.len(), 1);

        let hunk = &file1.hunks[0];
        assert_eq!((hunk.old_start, hunk.new_start), (1, 1));
        assert_eq!(hunk.section, "fn main()");
        assert_eq!(hunk.header, "@@ -1,3 +1,4 @@ fn main()");

        let file2 = &diff.files[1];
        assert_eq!(file2.path, "src/lib.rs");
        assert_eq!((file2.additions, file2.deletions), (0, 1));
    }

    #[test]
    fn test_parse_new_file() {
        let diff = r#"diff --git a/new_file.rs b/new_file.rs
new file mode 100644
index 0000000..abc1234
--- /dev/null
+++ b/new_file.rs
@@ -0,0 +1,3 @@
+fn new_function() {
+    // new code
+}
"#;

        let parsed = parse_unified_diff(diff, "base", "head").unwrap();
        assert_eq!(parsed.files.len(), 1);
        assert_eq!(parsed.files[0].status, FileStatus::Added);
        assert_eq!(parsed.files[0].additions, 3);
        assert_eq!(parsed.files[0].old_path, None);
    }

    #[test]
    fn test_deleted_file_keeps_source_path() {
        let diff = r#"diff --git a/old_file.rs b/old_file.rs
deleted file mode 100644
index abc1234..0000000
--- a/old_file.rs
+++ /dev/null
@@ -1,3 +0,0 @@
-fn old_function() {
-    // old code
-}
"#;

        let parsed = parse_unified_diff(diff, "base", "head").unwrap();
        let file = &parsed.files[0];
        assert_eq!(file.status, FileStatus::Deleted);
        assert_eq!(file.path, "old_file.rs");
        assert_eq!(file.deletions, 3);
        assert!(!file.is_expandable());
    }

    #[test]
    fn test_parse_renamed_file() {
        let diff = r#"diff --git a/old_name.rs b/new_name.rs
similarity index 95%
rename from old_name.rs
rename to new_name.rs
index abc123..def456 100644
--- a/old_name.rs
+++ b/new_name.rs
@@ -1,3 +1,3 @@
 fn example() {
-    // old
+    // new
 }
"#;

        let parsed = parse_unified_diff(diff, "base", "head").unwrap();
        let file = &parsed.files[0];
        assert_eq!(file.path, "new_name.rs");
        assert_eq!(file.old_path, Some("old_name.rs".to_string()));
        assert_eq!(file.status, FileStatus::Renamed);
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("a/src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("b/src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("/dev/null"), "/dev/null");
    }

    #[test]
    fn test_line_numbers() {
        let diff = parse_unified_diff(SAMPLE_DIFF, "base", "head").unwrap();
        let hunk = &diff.files[0].hunks[0];

        assert_eq!(hunk.lines[0].kind, LineKind::Context);
        assert_eq!(hunk.lines[0].content, "fn main() {");
        assert_eq!(hunk.lines[0].old_line, Some(1));
        assert_eq!(hunk.lines[0].new_line, Some(1));

        let addition = hunk
            .lines
            .iter()
            .find(|l| l.kind == LineKind::Addition)
            .unwrap();
        assert_eq!(addition.old_line, None);
        assert_eq!(addition.new_line, Some(3));
    }
}
