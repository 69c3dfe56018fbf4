// File system utilities

use std::fs;
use std::path::{Path, PathBuf};

/// Make a path absolute against the current directory without touching the filesystem
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(path)
}

/// True when a path is absent or only whitespace
pub fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}

/// Probe readability the way a consumer would: open files, list directories
pub fn probe_readable(path: &Path) -> std::io::Result<()> {
    if fs::metadata(path)?.is_dir() {
        fs::read_dir(path).map(drop)
    } else {
        fs::File::open(path).map(drop)
    }
}

/// Relative path from `root` rendered with `/` separators and no leading or trailing separator
pub fn normalized_relative(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// Recursively copy the contents of `from` into `to`, creating `to` first.
///
/// Returns `(files_copied, directories_created)`.
pub fn copy_dir_contents(from: &Path, to: &Path) -> std::io::Result<(usize, usize)> {
    let mut files = 0;
    let mut dirs = 0;

    fs::create_dir_all(to)?;
    dirs += 1;

    for entry in walkdir::WalkDir::new(from).min_depth(1).follow_links(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        let Ok(relative) = entry.path().strip_prefix(from) else {
            continue;
        };
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
            dirs += 1;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            files += 1;
        }
    }

    Ok((files, dirs))
}
