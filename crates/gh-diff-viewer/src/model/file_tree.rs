//! File explorer tree built from the changed paths.

use super::{FileDiff, FileStatus};

/// Node in the file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTreeNode {
    /// Display name (file or directory name).
    pub name: String,
    /// Full path of the directory or file ("" for the root).
    pub path: String,
    /// Index into `PullRequestDiff::files` (files only).
    pub file_index: Option<usize>,
    /// Child nodes (for directories).
    pub children: Vec<FileTreeNode>,
    /// Whether this directory is expanded.
    pub expanded: bool,
    /// File status (for files).
    pub status: Option<FileStatus>,
    /// Added lines; aggregated for directories.
    pub additions: usize,
    /// Deleted lines; aggregated for directories.
    pub deletions: usize,
}

impl FileTreeNode {
    fn directory(name: &str, path: String) -> Self {
        Self {
            name: name.to_string(),
            path,
            file_index: None,
            children: Vec::new(),
            expanded: true,
            status: None,
            additions: 0,
            deletions: 0,
        }
    }

    fn file(name: &str, index: usize, file_diff: &FileDiff) -> Self {
        Self {
            name: name.to_string(),
            path: file_diff.path.clone(),
            file_index: Some(index),
            children: Vec::new(),
            expanded: false,
            status: Some(file_diff.status),
            additions: file_diff.additions,
            deletions: file_diff.deletions,
        }
    }

    /// Build a tree from a flat list of files.
    ///
    /// Directories come first, then files; both sorted by name.
    pub fn from_files(files: &[FileDiff]) -> Self {
        let mut root = FileTreeNode::directory("", String::new());

        for (index, file) in files.iter().enumerate() {
            let parts: Vec<&str> = file.path.split('/').filter(|p| !p.is_empty()).collect();
            root.insert_path(&parts, index, file);
        }

        root.sort_recursive();
        root.aggregate_stats();
        root
    }

    fn insert_path(&mut self, parts: &[&str], index: usize, file_diff: &FileDiff) {
        match parts {
            [] => {}
            [name] => self.children.push(FileTreeNode::file(name, index, file_diff)),
            [dir, rest @ ..] => {
                let pos = self
                    .children
                    .iter()
                    .position(|c| c.is_directory() && c.name == *dir);
                let pos = match pos {
                    Some(pos) => pos,
                    None => {
                        let path = if self.path.is_empty() {
                            dir.to_string()
                        } else {
                            format!("{}/{}", self.path, dir)
                        };
                        self.children.push(FileTreeNode::directory(dir, path));
                        self.children.len() - 1
                    }
                };
                self.children[pos].insert_path(rest, index, file_diff);
            }
        }
    }

    fn sort_recursive(&mut self) {
        self.children.sort_by(|a, b| {
            b.is_directory()
                .cmp(&a.is_directory())
                .then_with(|| a.name.cmp(&b.name))
        });
        for child in &mut self.children {
            child.sort_recursive();
        }
    }

    fn aggregate_stats(&mut self) -> (usize, usize) {
        if self.is_directory() {
            let (mut add, mut del) = (0, 0);
            for child in &mut self.children {
                let (a, d) = child.aggregate_stats();
                add += a;
                del += d;
            }
            self.additions = add;
            self.deletions = del;
        }
        (self.additions, self.deletions)
    }

    /// Check if this node is a directory.
    pub fn is_directory(&self) -> bool {
        self.file_index.is_none()
    }

    /// Toggle the directory with the given full path.
    ///
    /// Returns `false` if no such directory exists.
    pub fn toggle_directory(&mut self, dir_path: &str) -> bool {
        for child in &mut self.children {
            if !child.is_directory() {
                continue;
            }
            if child.path == dir_path {
                child.expanded = !child.expanded;
                return true;
            }
            if dir_path.starts_with(&format!("{}/", child.path)) {
                return child.toggle_directory(dir_path);
            }
        }
        false
    }

    /// Flatten the tree into a list for rendering (respecting expanded state).
    pub fn flatten(&self) -> Vec<FlatFileEntry> {
        let mut result = Vec::new();
        for child in &self.children {
            child.flatten_into(0, &mut result);
        }
        result
    }

    fn flatten_into(&self, depth: usize, result: &mut Vec<FlatFileEntry>) {
        result.push(FlatFileEntry {
            depth,
            name: self.name.clone(),
            path: self.path.clone(),
            file_index: self.file_index,
            is_expanded: self.expanded,
            status: self.status,
            additions: self.additions,
            deletions: self.deletions,
        });
        if self.expanded {
            for child in &self.children {
                child.flatten_into(depth + 1, result);
            }
        }
    }
}

/// A flattened file tree entry for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatFileEntry {
    /// Nesting depth (0 = top level).
    pub depth: usize,
    pub name: String,
    pub path: String,
    /// Set for files only.
    pub file_index: Option<usize>,
    pub is_expanded: bool,
    pub status: Option<FileStatus>,
    pub additions: usize,
    pub deletions: usize,
}

impl FlatFileEntry {
    pub fn is_dir(&self) -> bool {
        self.file_index.is_none()
    }
}
