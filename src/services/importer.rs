// Importer: stages a validated export and copies it into a destination

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::models::cancellation::CancellationToken;
use crate::services::validator::{ProjectStructureValidator, Root};
use crate::utils::config::ImportConfig;
use crate::utils::error::{ImportError, Result};
use crate::utils::fs_utils::{absolutize, copy_dir_contents};

/// Outcome of a successful import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub project_name: String,
    pub target: PathBuf,
    pub files_copied: usize,
    pub directories_created: usize,
}

/// A resolved import source, with any extraction it owns
#[derive(Debug)]
pub struct StagedSource {
    root: Root,
    /// Directory whose contents get imported; may sit below `root`
    content: PathBuf,
}

impl StagedSource {
    pub fn content(&self) -> &Path {
        &self.content
    }

    pub const fn is_archive(&self) -> bool {
        self.root.is_archive()
    }

    pub fn release(self) {
        self.root.release();
    }
}

/// Imports exported sketch projects into a destination directory
#[derive(Debug, Clone, Default)]
pub struct ProjectImporter {
    validator: ProjectStructureValidator,
    config: ImportConfig,
}

impl ProjectImporter {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            validator: ProjectStructureValidator::from_config(&config),
            config,
        }
    }

    /// Resolve `path` to the directory whose contents will be imported.
    ///
    /// Archives are extracted; when the extraction holds nothing but the
    /// configured wrapper directory, that directory is used instead.
    pub fn stage(&self, path: &Path) -> Result<StagedSource> {
        let path = ProjectStructureValidator::check_path(Some(path))?;
        let root = self.validator.resolve(&path)?;

        let mut content = root.path().to_path_buf();
        if root.is_archive() {
            if let Some(inner) = single_wrapper_dir(&content, &self.config.wrapper_dir) {
                debug!(wrapper = %self.config.wrapper_dir, "stripping archive wrapper directory");
                content = inner;
            }
        }

        Ok(StagedSource { root, content })
    }

    /// Validate `path` and copy its contents into `destination/<project_name>`.
    ///
    /// Nothing is written to `destination` unless validation passes.
    pub fn import(
        &self,
        path: &Path,
        destination: &Path,
        project_name: &str,
        token: Option<&CancellationToken>,
    ) -> Result<ImportSummary> {
        validate_project_name(project_name)?;
        let target = destination.join(project_name);
        if target.exists() {
            return Err(ImportError::InvalidArgument(format!(
                "The '{project_name}' project already exists."
            )));
        }

        let staged = self.stage(path)?;
        if target_within(destination, project_name, staged.content()) {
            staged.release();
            return Err(ImportError::InvalidArgument(format!(
                "Cannot import '{}' into itself: '{}' is inside the source.",
                path.display(),
                target.display()
            )));
        }

        let validated = match token {
            Some(token) => self
                .validator
                .validate_with_cancellation(Some(staged.content()), token),
            None => self.validator.validate(Some(staged.content())),
        };
        if let Err(e) = validated {
            staged.release();
            return Err(e);
        }

        info!(
            source = %path.display(),
            target = %target.display(),
            "importing project"
        );
        let copied = copy_dir_contents(staged.content(), &target);
        staged.release();

        let (files_copied, directories_created) = match copied {
            Ok(counts) => counts,
            Err(e) => {
                if let Err(cleanup) = fs::remove_dir_all(&target) {
                    warn!(target = %target.display(), error = %cleanup, "failed to remove partial import");
                }
                return Err(ImportError::io(
                    format!("Failed to copy project into '{}'", target.display()),
                    e,
                ));
            }
        };

        Ok(ImportSummary {
            project_name: project_name.to_string(),
            target,
            files_copied,
            directories_created,
        })
    }
}

/// Default project name for a source path: archive file stem or directory name
pub fn default_project_name(path: &Path) -> Option<String> {
    let name = if path.is_dir() {
        path.file_name()
    } else {
        path.file_stem()
    }?;
    let name = name.to_string_lossy().into_owned();
    validate_project_name(&name).ok().map(|()| name)
}

/// Project names become directory names: keep them to a safe subset
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ImportError::InvalidArgument(
            "The project name should be specified.".to_string(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(ImportError::InvalidArgument(format!(
            "Invalid project name '{name}' (letters, digits, '-', '_' and '.' only)"
        )));
    }

    if name.starts_with('.') || name.starts_with('-') {
        return Err(ImportError::InvalidArgument(format!(
            "Invalid project name '{name}' (cannot start with '.' or '-')"
        )));
    }

    Ok(())
}

/// Whether `destination/<name>` would land inside `content`, lexically or after resolving links
fn target_within(destination: &Path, name: &str, content: &Path) -> bool {
    if let Ok(target) = absolutize(&destination.join(name)) {
        if target.starts_with(content) {
            return true;
        }
    }
    match (fs::canonicalize(destination), fs::canonicalize(content)) {
        (Ok(destination), Ok(content)) => destination.join(name).starts_with(content),
        _ => false,
    }
}

fn single_wrapper_dir(root: &Path, wrapper: &str) -> Option<PathBuf> {
    let mut children = fs::read_dir(root).ok()?;
    let only = children.next()?.ok()?;
    if children.next().is_some() {
        return None;
    }
    let is_dir = only.file_type().ok()?.is_dir();
    (is_dir && only.file_name() == wrapper).then(|| only.path())
}
