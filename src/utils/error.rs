// Common error types for sketch-import

use std::path::PathBuf;
use thiserror::Error;

/// Every failure the validator and importer can report.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("'{}' does not exist.", .0.display())]
    NotFound(PathBuf),

    #[error("'{}' cannot be read.", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Displays the requirement's failure message verbatim.
    #[error("{message}")]
    MissingRequirement {
        name: &'static str,
        message: &'static str,
    },

    #[error("Validation was cancelled.")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ImportError {
    /// Wrap a low-level I/O error with a short description of what was being done
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Classify an I/O error raised while touching `path`
    pub fn from_io_at(path: impl Into<PathBuf>, context: &str, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::io(format!("{context} '{}'", path.display()), source),
        }
    }

    /// Short machine-readable name of the error kind, used in JSON reports
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::PermissionDenied(_) => "permission_denied",
            Self::Io { .. } => "io_failure",
            Self::MissingRequirement { .. } => "missing_requirement",
            Self::Cancelled => "cancelled",
            Self::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// An error rendered for the terminal, with the process exit code to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    pub message: String,
    pub exit_code: i32,
}

impl UserError {
    pub fn from_import_error(err: &ImportError) -> Self {
        let exit_code = match err {
            ImportError::MissingRequirement { .. } => 1,
            ImportError::InvalidArgument(_) | ImportError::NotFound(_) | ImportError::Config(_) => 2,
            ImportError::Io { .. } | ImportError::PermissionDenied(_) => 3,
            ImportError::Cancelled => 130,
        };
        Self {
            message: err.to_string(),
            exit_code,
        }
    }

    /// Print the message to stderr
    pub fn print(&self) {
        eprintln!("Error: {}", self.message);
    }
}
