use super::{DisplayMode, HunkRows, LineParser};
use crate::highlight::SyntaxHighlighter;
use crate::model::Hunk;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Default number of cached hunks.
pub const DEFAULT_ROW_CACHE_SIZE: usize = 512;

/// Key for a hunk's rows: header, lines, language and mode.
pub fn fingerprint(hunk: &Hunk, language: &str, mode: DisplayMode) -> u64 {
    let mut hasher = DefaultHasher::new();
    hunk.hash(&mut hasher);
    language.hash(&mut hasher);
    mode.hash(&mut hasher);
    hasher.finish()
}

/// Memoized rows per hunk fingerprint.
///
/// When full, a fifth of the entries is dropped before inserting.
#[derive(Debug, Clone)]
pub struct RowCache {
    entries: HashMap<u64, Arc<HunkRows>>,
    max_size: usize,
}

impl Default for RowCache {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_CACHE_SIZE)
    }
}

impl RowCache {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_size: max_size.max(1),
        }
    }

    /// Cached rows for `hunk`, building them with `parser` on a miss.
    pub fn get_or_build(
        &mut self,
        hunk: &Hunk,
        language: &str,
        parser: &dyn LineParser,
        highlighter: &dyn SyntaxHighlighter,
    ) -> Arc<HunkRows> {
        let key = fingerprint(hunk, language, parser.mode());
        if let Some(rows) = self.entries.get(&key) {
            return Arc::clone(rows);
        }

        let rows = Arc::new(parser.parse(hunk, language, highlighter));

        if self.entries.len() >= self.max_size {
            let to_remove = (self.max_size / 5).max(1);
            let keys: Vec<u64> = self.entries.keys().take(to_remove).copied().collect();
            for key in keys {
                self.entries.remove(&key);
            }
        }
        self.entries.insert(key, Arc::clone(&rows));
        rows
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
