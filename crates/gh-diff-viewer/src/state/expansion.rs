//! Context expansion around hunks.
//!
//! Expansion is a two step exchange with the host: [`plan_expansion`] works
//! out which new-side lines are hidden next to a hunk, the host fetches them
//! from the head revision, and [`apply_expansion`] splices them in as
//! non-commentable context lines. Hunks whose gap closes are merged.

use crate::event::ExpandDirection;
use crate::model::{DiffLine, FileDiff, Hunk};
use log::debug;
use thiserror::Error;

/// Default number of lines loaded per expansion step.
pub const DEFAULT_EXPAND_STEP: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    #[error("file {0} cannot be expanded")]
    NotExpandable(String),

    #[error("hunk {hunk} does not exist in {path}")]
    NoSuchHunk { path: String, hunk: usize },

    #[error("no hidden lines in that direction")]
    NothingHidden,

    /// The file or hunk changed since the request was planned.
    #[error("expansion request for {0} is out of date")]
    Stale(String),

    #[error("expected {expected} lines above the hunk, got {got}")]
    ShortRead { expected: u32, got: usize },
}

/// Lines to fetch from the head revision for one expansion step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionRequest {
    pub file_index: usize,
    pub path: String,
    /// Revision the lines are read from.
    pub commit_sha: String,
    pub hunk_index: usize,
    pub direction: ExpandDirection,
    /// First new-side line to fetch (1-based).
    pub start_line: u32,
    pub count: u32,
    /// `(old_start, old_count, new_start, new_count)` when planned.
    span: (u32, u32, u32, u32),
}

impl ExpansionRequest {
    /// Last new-side line to fetch, inclusive.
    pub fn end_line(&self) -> u32 {
        self.start_line + self.count.saturating_sub(1)
    }
}

fn span_of(hunk: &Hunk) -> (u32, u32, u32, u32) {
    (hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count)
}

/// Hidden new-side lines between the previous hunk (or the top of the file)
/// and `hunk_index`.
pub fn gap_above(file: &FileDiff, hunk_index: usize) -> u32 {
    let Some(hunk) = file.hunks.get(hunk_index) else {
        return 0;
    };
    let previous_end = match hunk_index {
        0 => 1,
        i => file.hunks[i - 1].new_end(),
    };
    hunk.new_first().saturating_sub(previous_end)
}

/// Hidden new-side lines below `hunk_index`.
///
/// `None` means the length of the file is unknown: it is the last hunk and
/// the end of the file has not been seen yet.
pub fn gap_below(file: &FileDiff, hunk_index: usize) -> Option<u32> {
    if hunk_index + 1 < file.hunks.len() {
        return Some(gap_above(file, hunk_index + 1));
    }
    if file.end_of_file_reached || hunk_index >= file.hunks.len() {
        Some(0)
    } else {
        None
    }
}

/// Work out which lines one expansion step next to a hunk should load.
pub fn plan_expansion(
    file: &FileDiff,
    file_index: usize,
    commit_sha: &str,
    hunk_index: usize,
    direction: ExpandDirection,
    step: u32,
) -> Result<ExpansionRequest, ExpansionError> {
    if !file.is_expandable() {
        return Err(ExpansionError::NotExpandable(file.path.clone()));
    }
    let hunk = file
        .hunks
        .get(hunk_index)
        .ok_or_else(|| ExpansionError::NoSuchHunk {
            path: file.path.clone(),
            hunk: hunk_index,
        })?;
    let step = step.max(1);

    let (start_line, count) = match direction {
        ExpandDirection::Up => {
            let count = gap_above(file, hunk_index).min(step);
            (hunk.new_first() - count, count)
        }
        ExpandDirection::Down => {
            let count = match gap_below(file, hunk_index) {
                Some(gap) => gap.min(step),
                None => step,
            };
            (hunk.new_end(), count)
        }
    };
    if count == 0 {
        return Err(ExpansionError::NothingHidden);
    }

    Ok(ExpansionRequest {
        file_index,
        path: file.path.clone(),
        commit_sha: commit_sha.to_string(),
        hunk_index,
        direction,
        start_line,
        count,
        span: span_of(hunk),
    })
}

/// Splice fetched lines into the hunk the request was planned for.
///
/// Returns the number of lines inserted. Reading past the end of the file
/// below the last hunk is not an error: the short read marks the file end.
pub fn apply_expansion(
    file: &mut FileDiff,
    request: &ExpansionRequest,
    mut lines: Vec<String>,
) -> Result<usize, ExpansionError> {
    let stale = || ExpansionError::Stale(request.path.clone());
    if file.path != request.path {
        return Err(stale());
    }
    let is_last = request.hunk_index + 1 == file.hunks.len();
    let hunk = file
        .hunks
        .get_mut(request.hunk_index)
        .filter(|hunk| span_of(hunk) == request.span)
        .ok_or_else(stale)?;

    lines.truncate(request.count as usize);
    let inserted = lines.len();

    match request.direction {
        ExpandDirection::Up => {
            if inserted != request.count as usize {
                return Err(ExpansionError::ShortRead {
                    expected: request.count,
                    got: inserted,
                });
            }
            let offset = hunk.leading_offset();
            hunk.prepend_context(number_lines(lines, request.start_line, offset));
        }
        ExpandDirection::Down => {
            let offset = hunk.trailing_offset();
            hunk.append_context(number_lines(lines, request.start_line, offset));
            if is_last && inserted < request.count as usize {
                file.end_of_file_reached = true;
            }
        }
    }

    merge_adjacent(file);
    debug!(
        "Expanded {} hunk {} {}: {} lines",
        request.path,
        request.hunk_index,
        request.direction.as_str(),
        inserted
    );
    Ok(inserted)
}

fn number_lines(lines: Vec<String>, start: u32, offset: i64) -> Vec<DiffLine> {
    lines
        .into_iter()
        .zip(start..)
        .map(|(content, new_line)| {
            let old_line = u32::try_from(i64::from(new_line) + offset).unwrap_or(0);
            DiffLine::expanded(content.trim_end_matches(['\n', '\r']), old_line, new_line)
        })
        .collect()
}

/// Merge hunks whose new-side ranges touch.
fn merge_adjacent(file: &mut FileDiff) {
    let mut i = 0;
    while i + 1 < file.hunks.len() {
        if file.hunks[i].new_end() >= file.hunks[i + 1].new_first() {
            let next = file.hunks.remove(i + 1);
            file.hunks[i].merge(next);
        } else {
            i += 1;
        }
    }
}
