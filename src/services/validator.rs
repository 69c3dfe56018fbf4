// Project structure validator: the single entry point used by importers

use std::path::{Path, PathBuf};
use tracing::{info, warn};
use crate::models::cancellation::CancellationToken;
use crate::models::requirement::ConstraintSet;
use crate::services::archive::{ArchiveAccessor, EphemeralRoot};
use crate::services::signature::is_archive;
use crate::services::walker::TreeWalker;
use crate::utils::config::ImportConfig;
use crate::utils::error::{ImportError, Result};
use crate::utils::fs_utils::{absolutize, is_blank, probe_readable};

/// Message reported for an absent or blank path
pub const PATH_REQUIRED: &str = "path must be specified";

/// Where the walk happens: a real directory or an extracted archive
#[derive(Debug)]
pub enum Root {
    RealDirectory(PathBuf),
    MountedArchive(EphemeralRoot),
}

impl Root {
    pub fn path(&self) -> &Path {
        match self {
            Self::RealDirectory(path) => path,
            Self::MountedArchive(root) => root.path(),
        }
    }

    pub const fn is_archive(&self) -> bool {
        matches!(self, Self::MountedArchive(_))
    }

    /// Release any ephemeral tree now; failures are logged, not returned
    pub fn release(self) {
        if let Self::MountedArchive(root) = self {
            let path = root.path().to_path_buf();
            if let Err(e) = root.close() {
                warn!(root = %path.display(), error = %e, "failed to remove ephemeral root");
            }
        }
    }
}

/// Checks that a directory or zip archive has the exported sketch project layout:
///
/// ```text
/// <root>/
///   CMakeLists.txt
///   sketch/*.ino.cpp
///   core/
/// ```
///
/// Each call is independent; no state survives between calls.
#[derive(Debug, Clone, Default)]
pub struct ProjectStructureValidator {
    accessor: ArchiveAccessor,
}

impl ProjectStructureValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self {
            accessor: ArchiveAccessor::new(config.temp_dir.clone()),
        }
    }

    /// Validate `path`, which may be absent
    pub fn validate(&self, path: Option<&Path>) -> Result<()> {
        self.run(path, None)
    }

    /// Validate `path`, aborting with [`ImportError::Cancelled`] once `token` fires
    pub fn validate_with_cancellation(
        &self,
        path: Option<&Path>,
        token: &CancellationToken,
    ) -> Result<()> {
        self.run(path, Some(token))
    }

    fn run(&self, path: Option<&Path>, token: Option<&CancellationToken>) -> Result<()> {
        let path = Self::check_path(path)?;
        info!(path = %path.display(), "validating project structure");

        let root = self.resolve(&path)?;
        let outcome = Self::walk(&root, token);
        root.release();

        match &outcome {
            Ok(()) => info!(path = %path.display(), "project structure is valid"),
            Err(e) => info!(path = %path.display(), error = %e, "project structure is invalid"),
        }
        outcome
    }

    /// Reject blank paths, absolutize, and confirm the path exists and is readable
    pub fn check_path(path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(path) if !is_blank(path) => path,
            _ => return Err(ImportError::InvalidArgument(PATH_REQUIRED.to_string())),
        };

        let path = absolutize(path)
            .map_err(|e| ImportError::io(format!("Failed to resolve '{}'", path.display()), e))?;

        match path.try_exists() {
            Ok(true) => {}
            Ok(false) => return Err(ImportError::NotFound(path)),
            Err(e) => return Err(ImportError::from_io_at(path, "Failed to inspect", e)),
        }

        probe_readable(&path).map_err(|e| ImportError::from_io_at(&path, "Failed to read", e))?;
        Ok(path)
    }

    /// Decide between a real directory and an extracted archive
    pub fn resolve(&self, path: &Path) -> Result<Root> {
        if is_archive(path)? {
            Ok(Root::MountedArchive(self.accessor.mount(path)?))
        } else {
            Ok(Root::RealDirectory(path.to_path_buf()))
        }
    }

    fn walk(root: &Root, token: Option<&CancellationToken>) -> Result<()> {
        let mut constraints = ConstraintSet::project_layout();
        let walker = match token {
            Some(token) => TreeWalker::new().with_cancellation(token),
            None => TreeWalker::new(),
        };
        walker.walk(root.path(), &mut constraints)
    }
}
