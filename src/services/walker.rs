// Single-pass tree walk feeding entries to a constraint set

use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;
use crate::models::cancellation::CancellationToken;
use crate::models::entry::Entry;
use crate::models::requirement::ConstraintSet;
use crate::utils::error::{ImportError, Result};

/// Walks a resolved root and reports the first unsatisfied requirement
#[derive(Debug, Default)]
pub struct TreeWalker<'a> {
    cancel: Option<&'a CancellationToken>,
}

impl<'a> TreeWalker<'a> {
    pub fn new() -> Self {
        Self { cancel: None }
    }

    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Walk `root` pre-order over its direct children.
    ///
    /// Every requirement names a direct child, so the walk never descends
    /// further and stops as soon as all requirements are satisfied. Children
    /// are visited in file-name order; the reported failure depends only on
    /// declaration order.
    pub fn walk(&self, root: &Path, constraints: &mut ConstraintSet) -> Result<()> {
        self.check_cancelled()?;

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for item in walker {
            self.check_cancelled()?;

            let dir_entry = match item {
                Ok(dir_entry) => dir_entry,
                Err(e) if e.depth() == 0 => {
                    let source = e.into_io_error().unwrap_or_else(|| {
                        std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop")
                    });
                    return Err(ImportError::from_io_at(root, "Failed to list", source));
                }
                // Broken links and vanished children cannot satisfy anything
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let Some(entry) = Entry::from_path(root, dir_entry.path()) else {
                continue;
            };
            debug!(entry = %entry.relative_path, kind = ?entry.kind, "visiting");

            for requirement in constraints.observe(&entry) {
                debug!(requirement = requirement.name, "requirement satisfied");
            }
            if constraints.all_satisfied() {
                break;
            }
        }

        match constraints.first_unsatisfied() {
            None => Ok(()),
            Some(requirement) => Err(ImportError::MissingRequirement {
                name: requirement.name,
                message: requirement.failure_message,
            }),
        }
    }

    fn check_cancelled(&self) -> Result<()> {
        match self.cancel {
            Some(token) if token.is_cancelled() => Err(ImportError::Cancelled),
            _ => Ok(()),
        }
    }
}
