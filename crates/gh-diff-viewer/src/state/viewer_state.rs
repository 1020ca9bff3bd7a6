//! Main state for the diff viewer.

use super::expansion::{self, ExpansionError, ExpansionRequest, DEFAULT_EXPAND_STEP};
use super::{CommentEditor, PanelResize, ReviewComposer, ReviewError, ReviewSubmission, ViewerPreferences};
use crate::action::DiffAction;
use crate::event::{DiffEvent, ExpandDirection};
use crate::highlight::{detect_language, SyntaxHighlighter};
use crate::model::{
    CommentPosition, DiffSide, FileDiff, FileTreeNode, FlatFileEntry, PendingComment,
    PullRequestDiff, RemoteComment,
};
use crate::rows::{
    comment_anchor, line_parser, line_parser_for, DisplayMode, HunkRows, RowCache,
    UnknownDisplayMode,
};
use gh_pr_config::{AppConfig, PanelConfig};
use log::debug;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Why an action was not carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error(transparent)]
    DisplayMode(#[from] UnknownDisplayMode),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),

    #[error(transparent)]
    Review(#[from] ReviewError),

    #[error("no file at index {0}")]
    NoSuchFile(usize),

    #[error("line {line} on the {side:?} side of {path} cannot take a comment")]
    NotCommentable {
        path: String,
        side: DiffSide,
        line: u32,
    },
}

/// Everything needed to render one file.
#[derive(Debug, Clone)]
pub struct FileView<'a> {
    pub index: usize,
    pub file: &'a FileDiff,
    pub mode: DisplayMode,
    /// Collapsed files carry no hunks.
    pub collapsed: bool,
    pub hunks: Vec<HunkView>,
    /// Hidden lines below the last hunk; `None` while the file end is unknown.
    pub trailing_gap: Option<u32>,
    pub pending: Vec<&'a PendingComment>,
    pub remote: Vec<&'a RemoteComment>,
    pub editor: Option<&'a CommentEditor>,
}

#[derive(Debug, Clone)]
pub struct HunkView {
    pub index: usize,
    pub rows: Arc<HunkRows>,
    /// Hidden lines between the previous hunk (or file start) and this one.
    pub hidden_above: u32,
}

/// Main state for the diff viewer.
///
/// Holds an immutable diff snapshot plus everything the user changes while
/// reviewing it. The host feeds user input in as [`DiffAction`]s and performs
/// the side effects described by the returned [`DiffEvent`]s.
#[derive(Debug, Clone)]
pub struct DiffViewerState {
    /// The pull request diff being viewed.
    pub diff: PullRequestDiff,
    /// File tree for the explorer.
    pub file_tree: FileTreeNode,
    /// Review draft with pending comments.
    pub review: ReviewComposer,
    /// Currently active comment editor (if any).
    pub comment_editor: Option<CommentEditor>,
    /// Comments already published on the pull request.
    pub remote_comments: Vec<RemoteComment>,
    /// Width of the file explorer.
    pub file_panel: PanelResize,
    selected_file: usize,
    collapsed: HashSet<usize>,
    mode: DisplayMode,
    expand_step: u32,
    row_cache: RowCache,

    /// Cached flattened file tree (invalidated on expand/collapse).
    cached_flat_tree: Option<Vec<FlatFileEntry>>,
}

impl DiffViewerState {
    /// Create a new diff viewer state with default settings.
    pub fn new(diff: PullRequestDiff) -> Self {
        let file_tree = FileTreeNode::from_files(&diff.files);
        Self {
            diff,
            file_tree,
            review: ReviewComposer::new(),
            comment_editor: None,
            remote_comments: Vec::new(),
            file_panel: PanelResize::from_config(&PanelConfig::default()),
            selected_file: 0,
            collapsed: HashSet::new(),
            mode: DisplayMode::default(),
            expand_step: DEFAULT_EXPAND_STEP,
            row_cache: RowCache::default(),
            cached_flat_tree: None,
        }
    }

    /// Create a state using the display mode, expansion step, cache size and
    /// panel bounds from `config`.
    pub fn with_config(diff: PullRequestDiff, config: &AppConfig) -> Result<Self, UnknownDisplayMode> {
        let parser = line_parser_for(&config.display_mode)?;
        let mut state = Self::new(diff);
        state.mode = parser.mode();
        state.expand_step = config.expand_step.max(1);
        state.row_cache = RowCache::new(config.row_cache_size);
        state.file_panel = PanelResize::from_config(&config.file_panel);
        Ok(state)
    }

    /// Swap in a freshly fetched diff.
    ///
    /// Pending comments survive; per-file view state does not.
    pub fn replace_diff(&mut self, diff: PullRequestDiff) {
        self.file_tree = FileTreeNode::from_files(&diff.files);
        self.diff = diff;
        self.selected_file = self
            .selected_file
            .min(self.diff.files.len().saturating_sub(1));
        self.collapsed.clear();
        self.comment_editor = None;
        self.row_cache.clear();
        self.invalidate_flat_tree_cache();
    }

    pub fn set_remote_comments(&mut self, comments: Vec<RemoteComment>) {
        self.remote_comments = comments;
    }

    // === Preferences ===

    pub fn preferences(&self) -> ViewerPreferences {
        ViewerPreferences {
            display_mode: Some(self.mode),
            file_panel_width: Some(self.file_panel.width()),
        }
    }

    pub fn apply_preferences(&mut self, preferences: &ViewerPreferences) {
        if let Some(mode) = preferences.display_mode {
            self.mode = mode;
        }
        if let Some(width) = preferences.file_panel_width {
            self.file_panel.set_width(width);
        }
    }

    // === Files ===

    pub fn selected_file(&self) -> usize {
        self.selected_file
    }

    pub fn current_file(&self) -> Option<&FileDiff> {
        self.diff.files.get(self.selected_file)
    }

    pub fn select_file(&mut self, index: usize) -> Option<DiffEvent> {
        let file = self.diff.files.get(index)?;
        self.selected_file = index;
        Some(DiffEvent::FileSelected {
            file_path: file.path.clone(),
            file_index: index,
        })
    }

    pub fn is_collapsed(&self, index: usize) -> bool {
        self.collapsed.contains(&index)
    }

    /// Flip a file between collapsed and expanded. Returns the new collapsed
    /// flag, or `None` for an unknown index.
    pub fn toggle_file_collapsed(&mut self, index: usize) -> Option<bool> {
        if index >= self.diff.files.len() {
            return None;
        }
        if self.collapsed.remove(&index) {
            Some(false)
        } else {
            self.collapsed.insert(index);
            Some(true)
        }
    }

    pub fn collapse_all(&mut self) {
        self.collapsed = (0..self.diff.files.len()).collect();
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    /// Toggle a directory in the explorer by its full path.
    pub fn toggle_directory(&mut self, path: &str) -> bool {
        let toggled = self.file_tree.toggle_directory(path);
        if toggled {
            self.invalidate_flat_tree_cache();
        }
        toggled
    }

    /// Get flattened file tree (cached).
    pub fn flat_tree(&mut self) -> &[FlatFileEntry] {
        let tree = &self.file_tree;
        self.cached_flat_tree.get_or_insert_with(|| tree.flatten())
    }

    fn invalidate_flat_tree_cache(&mut self) {
        self.cached_flat_tree = None;
    }

    // === Rows ===

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// Switch display mode by name. An unknown name leaves the state as is.
    pub fn set_display_mode(&mut self, name: &str) -> Result<DisplayMode, UnknownDisplayMode> {
        let parser = line_parser_for(name)?;
        self.mode = parser.mode();
        Ok(self.mode)
    }

    /// Rows for every hunk of a file, through the row cache.
    pub fn rows_for_file(
        &mut self,
        index: usize,
        highlighter: &dyn SyntaxHighlighter,
    ) -> Vec<Arc<HunkRows>> {
        let Some(file) = self.diff.files.get(index) else {
            return Vec::new();
        };
        let parser = line_parser(self.mode);
        let language = detect_language(&file.path);
        file.hunks
            .iter()
            .map(|hunk| {
                self.row_cache
                    .get_or_build(hunk, language.tag(), parser.as_ref(), highlighter)
            })
            .collect()
    }

    /// Gather what the renderer needs for one file.
    pub fn file_view(
        &mut self,
        index: usize,
        highlighter: &dyn SyntaxHighlighter,
    ) -> Option<FileView<'_>> {
        let collapsed = self.is_collapsed(index);
        let rows = if collapsed {
            Vec::new()
        } else {
            self.rows_for_file(index, highlighter)
        };

        let file = self.diff.files.get(index)?;
        let hunks = rows
            .into_iter()
            .enumerate()
            .map(|(i, rows)| HunkView {
                index: i,
                rows,
                hidden_above: expansion::gap_above(file, i),
            })
            .collect();
        let trailing_gap = match file.hunks.len() {
            0 => Some(0),
            n => expansion::gap_below(file, n - 1),
        };

        Some(FileView {
            index,
            file,
            mode: self.mode,
            collapsed,
            hunks,
            trailing_gap,
            pending: self
                .review
                .comments()
                .iter()
                .filter(|c| c.path == file.path)
                .collect(),
            remote: self
                .remote_comments
                .iter()
                .filter(|c| c.path == file.path)
                .collect(),
            editor: self
                .comment_editor
                .as_ref()
                .filter(|e| e.file_path == file.path),
        })
    }

    // === Context expansion ===

    /// Hidden lines above a hunk.
    pub fn hidden_lines_before(&self, file: usize, hunk: usize) -> u32 {
        self.diff
            .files
            .get(file)
            .map_or(0, |f| expansion::gap_above(f, hunk))
    }

    /// Hidden lines below a file's last hunk, `None` if not yet known.
    pub fn trailing_gap(&self, file: usize) -> Option<u32> {
        let f = self.diff.files.get(file)?;
        expansion::gap_below(f, f.hunks.len().checked_sub(1)?)
    }

    /// Plan one "load more lines" step next to a hunk.
    pub fn request_expansion(
        &self,
        file: usize,
        hunk: usize,
        direction: ExpandDirection,
    ) -> Result<ExpansionRequest, ViewerError> {
        let f = self.diff.files.get(file).ok_or(ViewerError::NoSuchFile(file))?;
        let request = expansion::plan_expansion(
            f,
            file,
            &self.diff.head_sha,
            hunk,
            direction,
            self.expand_step,
        )?;
        Ok(request)
    }

    /// Insert lines fetched for `request`.
    pub fn apply_expansion(
        &mut self,
        request: &ExpansionRequest,
        lines: Vec<String>,
    ) -> Result<usize, ExpansionError> {
        let stale = || ExpansionError::Stale(request.path.clone());
        if request.commit_sha != self.diff.head_sha {
            return Err(stale());
        }
        let file = self
            .diff
            .files
            .get_mut(request.file_index)
            .ok_or_else(stale)?;
        expansion::apply_expansion(file, request, lines)
    }

    // === Comments ===

    /// Check if the comment editor is currently active.
    pub fn is_editing_comment(&self) -> bool {
        self.comment_editor.is_some()
    }

    /// Whether a diff line of `file` can take a comment at `(side, line)`.
    pub fn is_commentable(&self, file: usize, side: DiffSide, line: u32) -> bool {
        let Some(f) = self.diff.files.get(file) else {
            return false;
        };
        let target = Some(CommentPosition::new(side, line));
        f.hunks
            .iter()
            .flat_map(|h| h.lines.iter())
            .any(|l| comment_anchor(l, Some(side)) == target)
    }

    /// Open the editor on a line. An existing pending comment there is
    /// opened for editing. Returns `false` if the line cannot take a comment.
    pub fn start_comment(&mut self, file: usize, side: DiffSide, line: u32) -> bool {
        if !self.is_commentable(file, side, line) {
            return false;
        }
        let Some(path) = self.diff.files.get(file).map(|f| f.path.clone()) else {
            return false;
        };

        let position = CommentPosition::new(side, line);
        self.comment_editor = Some(match self.review.find_comment(&path, position) {
            Some(index) => CommentEditor::edit_existing(&self.review.comments()[index]),
            None => CommentEditor::new(path, side, line),
        });
        true
    }

    /// Open the editor on the pending comment at `index`.
    pub fn edit_pending_comment(&mut self, index: usize) -> bool {
        match self.review.comments().get(index) {
            Some(comment) => {
                self.comment_editor = Some(CommentEditor::edit_existing(comment));
                true
            }
            None => false,
        }
    }

    /// Close the editor, saving its contents.
    ///
    /// An empty body discards a new comment and deletes an edited one.
    pub fn commit_comment(&mut self) -> Option<DiffEvent> {
        let editor = self.comment_editor.take()?;
        let index = editor
            .editing
            .and_then(|id| self.review.comments().iter().position(|c| c.id == id));

        if editor.is_empty() {
            let index = index?;
            self.review.remove_comment(index)?;
            return Some(DiffEvent::CommentDeleted(index));
        }

        if let Some(id) = editor.editing {
            if let Some(index) = self.review.edit_comment(id, editor.body.clone()) {
                return Some(DiffEvent::CommentEdited {
                    index,
                    body: editor.body,
                });
            }
        }

        let comment = PendingComment::new(editor.file_path, editor.position, editor.body);
        self.review.add_comment(comment.clone());
        Some(DiffEvent::CommentAdded(comment))
    }

    pub fn cancel_comment(&mut self) {
        self.comment_editor = None;
    }

    /// Delete a pending comment by index.
    pub fn delete_pending_comment(&mut self, index: usize) -> Option<DiffEvent> {
        self.review.remove_comment(index)?;
        Some(DiffEvent::CommentDeleted(index))
    }

    // === Actions ===

    /// Handle an action, returning any resulting events.
    ///
    /// This is the main entry point for processing user actions. The host is
    /// responsible for mapping its input events to [`DiffAction`] variants.
    pub fn handle_action(&mut self, action: DiffAction) -> Vec<DiffEvent> {
        if action.is_comment_action() && self.comment_editor.is_none() {
            debug!("Ignoring {:?}: no comment editor open", action);
            return Vec::new();
        }

        match self.dispatch(action) {
            Ok(event) => event.into_iter().collect(),
            Err(err) => vec![DiffEvent::Rejected(err)],
        }
    }

    fn dispatch(&mut self, action: DiffAction) -> Result<Option<DiffEvent>, ViewerError> {
        let event = match action {
            // === Files ===
            DiffAction::SelectFile(index) => {
                Some(self.select_file(index).ok_or(ViewerError::NoSuchFile(index))?)
            }
            DiffAction::NextFile => {
                let next = self.selected_file + 1;
                if next < self.diff.files.len() {
                    self.select_file(next)
                } else {
                    None
                }
            }
            DiffAction::PrevFile => match self.selected_file.checked_sub(1) {
                Some(prev) => self.select_file(prev),
                None => None,
            },
            DiffAction::ToggleFileCollapsed(index) => {
                self.toggle_file_collapsed(index)
                    .ok_or(ViewerError::NoSuchFile(index))?;
                None
            }
            DiffAction::CollapseAll => {
                self.collapse_all();
                None
            }
            DiffAction::ExpandAll => {
                self.expand_all();
                None
            }
            DiffAction::ToggleDirectory(path) => {
                self.toggle_directory(&path);
                None
            }

            // === Layout ===
            DiffAction::SetDisplayMode(name) => {
                let previous = self.mode;
                let mode = self.set_display_mode(&name)?;
                (mode != previous).then_some(DiffEvent::DisplayModeChanged(mode))
            }

            // === Context Expansion ===
            DiffAction::ExpandContext {
                file,
                hunk,
                direction,
            } => Some(DiffEvent::RequestContext(
                self.request_expansion(file, hunk, direction)?,
            )),

            // === Comments ===
            DiffAction::StartComment { file, side, line } => {
                if !self.start_comment(file, side, line) {
                    let path = self
                        .diff
                        .files
                        .get(file)
                        .ok_or(ViewerError::NoSuchFile(file))?
                        .path
                        .clone();
                    return Err(ViewerError::NotCommentable { path, side, line });
                }
                None
            }
            DiffAction::EditComment(index) => {
                self.edit_pending_comment(index);
                None
            }
            DiffAction::SetCommentBody(body) => {
                if let Some(editor) = self.comment_editor.as_mut() {
                    editor.set_body(body);
                }
                None
            }
            DiffAction::CommitComment => self.commit_comment(),
            DiffAction::CancelComment => {
                self.cancel_comment();
                None
            }
            DiffAction::DeleteComment(index) => self.delete_pending_comment(index),

            // === Review ===
            DiffAction::SetReviewEvent(event) => {
                self.review.event = event;
                None
            }
            DiffAction::NextReviewEvent => {
                self.review.next_event();
                None
            }
            DiffAction::SetReviewBody(body) => {
                self.review.body = body;
                None
            }
            DiffAction::SubmitReview => Some(DiffEvent::SubmitReview(self.begin_review_submit()?)),

            // === Explorer panel ===
            DiffAction::BeginPanelDrag { x, container_width } => {
                self.file_panel.begin_drag(x, container_width);
                None
            }
            DiffAction::PanelDragTo(x) => self
                .file_panel
                .drag_to(x)
                .then_some(DiffEvent::ScheduleAnimationFrame),
            DiffAction::PanelAnimationFrame => {
                self.file_panel.on_animation_frame().map(DiffEvent::PanelResized)
            }
            DiffAction::EndPanelDrag => {
                self.file_panel.end_drag();
                None
            }

            DiffAction::Close => Some(DiffEvent::Close),
        };
        Ok(event)
    }

    fn begin_review_submit(&mut self) -> Result<ReviewSubmission, ReviewError> {
        let submission = self.review.begin_submit()?;
        debug!(
            "Submitting {:?} review with {} comments",
            submission.event,
            submission.comments.len()
        );
        Ok(submission)
    }
}
