use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::utils::fs_utils::{normalized_relative, probe_readable};

/// Kind of a tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    File,
    Directory,
}

/// A node of the resolved tree, identical in shape whether it came from a
/// real directory or an extracted archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Path relative to the resolved root, `/`-separated
    pub relative_path: String,
    /// Location on disk
    pub path: PathBuf,
    pub kind: EntryKind,
    pub readable: bool,
}

impl Entry {
    /// Describe `path` as seen from `root`.
    ///
    /// Returns `None` when the path is outside the root or is neither a
    /// regular file nor a directory (sockets, dangling links).
    pub fn from_path(root: &Path, path: &Path) -> Option<Self> {
        let relative_path = normalized_relative(path, root)?;
        let metadata = fs::metadata(path).ok()?;
        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else if metadata.is_file() {
            EntryKind::File
        } else {
            return None;
        };

        Some(Self {
            relative_path,
            path: path.to_path_buf(),
            kind,
            readable: probe_readable(path).is_ok(),
        })
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Final component of the relative path
    pub fn name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }

    /// Whether this directory has a direct child whose name ends with `suffix`.
    ///
    /// Unreadable or non-directory entries never have children.
    pub fn has_child_with_suffix(&self, suffix: &str) -> bool {
        if !self.is_dir() || !self.readable {
            return false;
        }
        let Ok(children) = fs::read_dir(&self.path) else {
            return false;
        };
        children
            .filter_map(std::result::Result::ok)
            .any(|child| child.file_name().to_string_lossy().ends_with(suffix))
    }
}
