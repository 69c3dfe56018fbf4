// Archive accessor: exposes a zip archive as an ephemeral directory tree

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};
use zip::ZipArchive;
use crate::services::signature::is_archive;
use crate::utils::error::{ImportError, Result};

/// Prefix of every extraction directory created in temp space
const EPHEMERAL_PREFIX: &str = "sketch-import-";

/// Temporary extraction of an archive, owned by exactly one caller.
///
/// The directory tree is removed when the value is dropped, on every exit
/// path, or earlier through [`EphemeralRoot::close`].
#[derive(Debug)]
pub struct EphemeralRoot {
    dir: TempDir,
    archive: PathBuf,
}

impl EphemeralRoot {
    /// Top of the extracted tree
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The archive this root was produced from
    pub fn archive(&self) -> &Path {
        &self.archive
    }

    /// Delete the extracted tree now, reporting failures
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|e| ImportError::io(format!("Failed to remove '{}'", path.display()), e))
    }
}

/// Produces browsable trees from zip archives by extraction into temp space
#[derive(Debug, Clone, Default)]
pub struct ArchiveAccessor {
    /// Parent directory for extraction roots; system temp when `None`
    temp_parent: Option<PathBuf>,
}

impl ArchiveAccessor {
    pub fn new(temp_parent: Option<PathBuf>) -> Self {
        Self { temp_parent }
    }

    /// Extract `archive_path` into a freshly created, uniquely named directory.
    ///
    /// A failed extraction leaves nothing behind.
    pub fn mount(&self, archive_path: &Path) -> Result<EphemeralRoot> {
        if !archive_path.exists() {
            return Err(ImportError::InvalidArgument(format!(
                "'{}' does not exist",
                archive_path.display()
            )));
        }
        if !is_archive(archive_path)? {
            return Err(ImportError::InvalidArgument(format!(
                "'{}' is not a ZIP file",
                archive_path.display()
            )));
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix(EPHEMERAL_PREFIX);
        let dir = match &self.temp_parent {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| {
                    ImportError::io(format!("Failed to create '{}'", parent.display()), e)
                })?;
                builder.tempdir_in(parent)
            }
            None => builder.tempdir(),
        }
        .map_err(|e| ImportError::io("Failed to create extraction directory", e))?;

        debug!(
            archive = %archive_path.display(),
            root = %dir.path().display(),
            "extracting archive"
        );

        // `dir` is dropped, and removed, if extraction fails
        let count = extract_into(archive_path, dir.path()).map_err(|e| {
            ImportError::io(
                format!(
                    "Error when unzipping '{}' to '{}'",
                    archive_path.display(),
                    dir.path().display()
                ),
                e,
            )
        })?;
        debug!(entries = count, "archive extracted");

        Ok(EphemeralRoot {
            dir,
            archive: archive_path.to_path_buf(),
        })
    }
}

/// Write every entry of the archive below `target`.
///
/// Directories are created before their descendants; existing files are
/// overwritten. Entries that would escape `target` are rejected.
fn extract_into(archive_path: &Path, target: &Path) -> io::Result<usize> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file).map_err(zip_to_io)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(zip_to_io)?;
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("archive entry '{}' escapes the extraction root", entry.name()),
            ));
        };
        let destination = target.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&destination)?;
            continue;
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        if destination.is_dir() {
            warn!(entry = %relative.display(), "skipping file entry shadowed by a directory");
            continue;
        }
        let mut out = File::create(&destination)?;
        io::copy(&mut entry, &mut out)?;
    }

    Ok(archive.len())
}

fn zip_to_io(err: zip::result::ZipError) -> io::Error {
    match err {
        zip::result::ZipError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}
