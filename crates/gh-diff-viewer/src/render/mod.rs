//! HTML rendering of view-model output.
//!
//! A thin adapter: every decision (pairing, highlighting, gaps, comment
//! anchors) is made by the state and row modules, this only emits markup.
//! Dynamic text is always escaped; highlighted code arrives already safe.

use crate::event::ExpandDirection;
use crate::highlight::escape_html;
use crate::model::{
    CommentPosition, DiffLine, DiffSide, FileStatus, FlatFileEntry, PendingComment, RemoteComment,
};
use crate::rows::{comment_anchor, DisplayMode, HunkRows, LinePair, SplitCell, SplitLinePair};
use crate::state::{FileView, HunkView};
use gh_pr_config::ThemeTokens;

const UNIFIED_COLUMNS: usize = 3;
const SPLIT_COLUMNS: usize = 4;

/// Renders files and the file explorer as HTML fragments.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    theme: ThemeTokens,
}

impl HtmlRenderer {
    pub fn new(theme: &ThemeTokens) -> Self {
        Self {
            theme: theme.clone(),
        }
    }

    /// Theme custom properties followed by the rules that use them.
    pub fn stylesheet(&self) -> String {
        let mut css = self.theme.css_variables();
        css.push_str(STYLE_RULES);
        css
    }

    /// Render one file: header, then its hunks unless collapsed.
    pub fn render_file(&self, view: &FileView<'_>) -> String {
        let file = view.file;
        let mut html = format!(
            "<div class=\"diff-file{}\" data-file=\"{}\">",
            if view.collapsed { " diff-collapsed" } else { "" },
            view.index
        );
        html.push_str(&format!(
            "<div class=\"diff-file-header\"><span class=\"diff-status diff-status-{}\">{}</span>\
             <span class=\"diff-file-name\">{}</span>{}</div>",
            file.status.css_class(),
            file.status.as_char(),
            escape_html(&file.display_name()),
            stats_html(file.additions, file.deletions),
        ));

        if view.collapsed {
            html.push_str("</div>");
            return html;
        }

        let mut table = TableWriter {
            view,
            html: String::new(),
            columns: match view.mode {
                DisplayMode::Unified => UNIFIED_COLUMNS,
                DisplayMode::Split => SPLIT_COLUMNS,
            },
        };
        for hunk in &view.hunks {
            table.hunk(hunk);
        }
        table.trailing_expander();

        html.push_str(&format!(
            "<table class=\"diff-table diff-{}\">{}</table>",
            view.mode, table.html
        ));
        html.push_str(&outdated_comments(&view.remote));
        html.push_str("</div>");
        html
    }

    /// Render the flattened explorer inside a container `width` percent wide.
    pub fn render_file_tree(
        &self,
        entries: &[FlatFileEntry],
        selected: Option<usize>,
        width: f64,
    ) -> String {
        let mut html = format!(
            "<nav class=\"diff-file-tree\" style=\"width: {:.2}%\"><ul>",
            width
        );
        for entry in entries {
            html.push_str(&tree_entry(entry, selected));
        }
        html.push_str("</ul></nav>");
        html
    }
}

fn stats_html(additions: usize, deletions: usize) -> String {
    format!(
        "<span class=\"diff-stats\"><span class=\"diff-stat-add\">+{}</span>\
         <span class=\"diff-stat-del\">-{}</span></span>",
        additions, deletions
    )
}

fn tree_entry(entry: &FlatFileEntry, selected: Option<usize>) -> String {
    let indent = format!("padding-left: {}em", entry.depth);
    match entry.file_index {
        None => format!(
            "<li class=\"diff-tree-entry diff-tree-dir\" data-path=\"{}\" style=\"{}\">\
             <span class=\"diff-tree-toggle\">{}</span>{}{}</li>",
            escape_html(&entry.path),
            indent,
            if entry.is_expanded { "▾" } else { "▸" },
            escape_html(&entry.name),
            stats_html(entry.additions, entry.deletions),
        ),
        Some(index) => {
            let status = entry.status.unwrap_or(FileStatus::Modified);
            format!(
                "<li class=\"diff-tree-entry diff-tree-file{}\" data-file=\"{}\" style=\"{}\">\
                 <span class=\"diff-status diff-status-{}\">{}</span>{}{}</li>",
                if selected == Some(index) { " diff-tree-selected" } else { "" },
                index,
                indent,
                status.css_class(),
                status.as_char(),
                escape_html(&entry.name),
                stats_html(entry.additions, entry.deletions),
            )
        }
    }
}

struct TableWriter<'v, 'a> {
    view: &'v FileView<'a>,
    html: String,
    columns: usize,
}

impl TableWriter<'_, '_> {
    fn hunk(&mut self, hunk: &HunkView) {
        if self.view.file.is_expandable() && hunk.hidden_above > 0 {
            self.expander(hunk.index, ExpandDirection::Up, Some(hunk.hidden_above));
        }
        match hunk.rows.as_ref() {
            HunkRows::Unified(rows) => {
                let header = escape_html(
                    self.view
                        .file
                        .hunks
                        .get(hunk.index)
                        .map_or("", |h| h.header.as_str()),
                );
                self.header_row(&header);
                for row in rows {
                    self.unified_row(row);
                }
            }
            HunkRows::Split(rows) => {
                for row in rows {
                    self.split_row(row);
                }
            }
        }
    }

    fn trailing_expander(&mut self) {
        let Some(last) = self.view.hunks.last().map(|h| h.index) else {
            return;
        };
        let gap = self.view.trailing_gap;
        if !self.view.file.is_expandable() || gap == Some(0) {
            return;
        }
        self.expander(last, ExpandDirection::Down, gap);
    }

    fn expander(&mut self, hunk: usize, direction: ExpandDirection, hidden: Option<u32>) {
        let (attr, label) = match hidden {
            Some(n) => (
                format!(" data-hidden=\"{}\"", n),
                format!("Expand {} hidden line{}", n, if n == 1 { "" } else { "s" }),
            ),
            None => (String::new(), "Load more lines".to_string()),
        };
        self.html.push_str(&format!(
            "<tr class=\"diff-expander\" data-hunk=\"{}\" data-direction=\"{}\"{}>\
             <td colspan=\"{}\">{}</td></tr>",
            hunk,
            direction.as_str(),
            attr,
            self.columns,
            label
        ));
    }

    fn header_row(&mut self, escaped: &str) {
        self.html.push_str(&format!(
            "<tr class=\"diff-hunk-header\"><td colspan=\"{}\">{}</td></tr>",
            self.columns, escaped
        ));
    }

    fn unified_row(&mut self, row: &LinePair) {
        let line = &row.line;
        let anchor = comment_anchor(line, None);
        self.html.push_str(&format!(
            "<tr class=\"diff-line diff-{}\">{}{}<td class=\"diff-code\"{}>\
             <span class=\"diff-prefix\">{}</span>{}</td></tr>",
            line.kind.css_class(),
            number_cell(line.old_line),
            number_cell(line.new_line),
            anchor_attrs(anchor),
            line.kind.prefix(),
            row.html
        ));
        self.comment_rows(anchor.into_iter());
    }

    fn split_row(&mut self, row: &SplitLinePair) {
        if row.is_header() {
            let html = row.left.as_ref().map(|c| c.html.as_str()).unwrap_or_default();
            self.header_row(html);
            return;
        }

        let left_anchor = row
            .left
            .as_ref()
            .and_then(|c| comment_anchor(&c.line, Some(DiffSide::Left)));
        let right_anchor = row
            .right
            .as_ref()
            .and_then(|c| comment_anchor(&c.line, Some(DiffSide::Right)));

        self.html.push_str("<tr class=\"diff-line\">");
        split_cells(&mut self.html, row.left.as_ref(), DiffSide::Left, left_anchor);
        split_cells(&mut self.html, row.right.as_ref(), DiffSide::Right, right_anchor);
        self.html.push_str("</tr>");
        self.comment_rows(left_anchor.into_iter().chain(right_anchor));
    }

    /// Comments and an open editor under the line they are anchored at.
    fn comment_rows(&mut self, anchors: impl Iterator<Item = CommentPosition>) {
        for position in anchors {
            let path = &self.view.file.path;
            let mut body = String::new();
            for comment in self.view.remote.iter().filter(|c| c.position == Some(position)) {
                body.push_str(&remote_comment_html(comment));
            }
            for comment in self
                .view
                .pending
                .iter()
                .filter(|c| c.is_at(path, position.side, position.line))
            {
                body.push_str(&pending_comment_html(comment));
            }
            if let Some(editor) = self.view.editor.filter(|e| e.position == position) {
                body.push_str(&format!(
                    "<div class=\"diff-comment-editor\"><textarea>{}</textarea></div>",
                    escape_html(&editor.body)
                ));
            }
            if body.is_empty() {
                continue;
            }
            self.html.push_str(&format!(
                "<tr class=\"diff-comment-row\"{}><td colspan=\"{}\">{}</td></tr>",
                anchor_attrs(Some(position)),
                self.columns,
                body
            ));
        }
    }
}

fn number_cell(number: Option<u32>) -> String {
    match number {
        Some(n) => format!("<td class=\"diff-line-number\">{}</td>", n),
        None => "<td class=\"diff-line-number\"></td>".to_string(),
    }
}

fn anchor_attrs(anchor: Option<CommentPosition>) -> String {
    match anchor {
        Some(position) => format!(
            " data-side=\"{}\" data-line=\"{}\"",
            position.side.as_github_str(),
            position.line
        ),
        None => String::new(),
    }
}

fn split_cells(
    html: &mut String,
    cell: Option<&SplitCell>,
    side: DiffSide,
    anchor: Option<CommentPosition>,
) {
    let Some(cell) = cell else {
        html.push_str("<td class=\"diff-line-number diff-empty\"></td><td class=\"diff-code diff-empty\"></td>");
        return;
    };
    let line: &DiffLine = &cell.line;
    let number = match side {
        DiffSide::Left => line.old_line,
        DiffSide::Right => line.new_line,
    };
    let kind = line.kind.css_class();
    html.push_str(&format!(
        "<td class=\"diff-line-number diff-{}\">{}</td><td class=\"diff-code diff-{}\"{}>{}</td>",
        kind,
        number.map(|n| n.to_string()).unwrap_or_default(),
        kind,
        anchor_attrs(anchor),
        cell.html
    ));
}

fn pending_comment_html(comment: &PendingComment) -> String {
    format!(
        "<div class=\"diff-comment diff-comment-pending\" data-comment-id=\"{}\">\
         <div class=\"diff-comment-author\">Pending</div>\
         <div class=\"diff-comment-body\">{}</div></div>",
        comment.id,
        escape_html(&comment.body)
    )
}

fn remote_comment_html(comment: &RemoteComment) -> String {
    format!(
        "<div class=\"diff-comment\" data-comment-id=\"{}\">\
         <div class=\"diff-comment-author\">{}</div>\
         <div class=\"diff-comment-body\">{}</div></div>",
        comment.id,
        escape_html(&comment.author),
        escape_html(&comment.body)
    )
}

/// Published comments whose line no longer exists in the diff.
fn outdated_comments(remote: &[&RemoteComment]) -> String {
    let outdated: String = remote
        .iter()
        .filter(|c| c.position.is_none())
        .map(|c| remote_comment_html(c))
        .collect();
    if outdated.is_empty() {
        return outdated;
    }
    format!("<div class=\"diff-outdated-comments\">{}</div>", outdated)
}

const STYLE_RULES: &str = r#"
.diff-table { border-collapse: collapse; width: 100%; font-family: var(--diff-font-family); font-size: var(--diff-font-size); line-height: var(--diff-line-height); }
.diff-table td { padding: 0 var(--diff-cell-padding); vertical-align: top; white-space: pre; }
.diff-line-number { width: var(--diff-gutter-width); color: var(--diff-line-number-fg); text-align: right; user-select: none; }
.diff-addition { background: var(--diff-addition-bg); }
td.diff-line-number.diff-addition { background: var(--diff-addition-gutter); }
.diff-deletion { background: var(--diff-deletion-bg); }
td.diff-line-number.diff-deletion { background: var(--diff-deletion-gutter); }
.diff-context { background: var(--diff-context-bg); }
.diff-hunk-header td { background: var(--diff-hunk-header-bg); color: var(--diff-hunk-header-fg); }
.diff-expander td { background: var(--diff-expander-bg); cursor: pointer; }
.diff-file-header { background: var(--diff-file-header-bg); padding: var(--diff-cell-padding); }
.diff-comment { background: var(--diff-comment-bg); border: 1px solid var(--diff-comment-border); white-space: normal; }
"#;
