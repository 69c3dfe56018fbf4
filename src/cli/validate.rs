use chrono::Utc;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::cli::run_cancellable;
use crate::services::signature::is_archive;
use crate::services::validator::ProjectStructureValidator;
use crate::utils::config::ImportConfig;
use crate::utils::error::{ImportError, Result};

/// Check that a directory or zip archive has the required project layout
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Directory or zip archive to validate
    pub path: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON response format for validate command
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: String,
    pub path: Option<String>,
    /// "directory" or "archive" when the path could be inspected
    pub kind: Option<String>,
    pub message: Option<String>,
    pub error_kind: Option<String>,
    pub checked_at: String,
}

impl ValidationReport {
    fn new(path: Option<&Path>, outcome: &Result<()>) -> Self {
        let kind = path
            .filter(|p| p.exists())
            .and_then(|p| is_archive(p).ok())
            .map(|archive| if archive { "archive" } else { "directory" }.to_string());

        let (status, message, error_kind) = match outcome {
            Ok(()) => ("valid".to_string(), None, None),
            Err(e) => (
                "error".to_string(),
                Some(e.to_string()),
                Some(e.kind().to_string()),
            ),
        };

        Self {
            status,
            path: path.map(|p| p.display().to_string()),
            kind,
            message,
            error_kind,
            checked_at: Utc::now().to_rfc3339(),
        }
    }
}

impl ValidateCommand {
    /// Execute the validate command
    pub async fn run(&self, config: &ImportConfig) -> Result<()> {
        let validator = ProjectStructureValidator::from_config(config);
        let path = self.path.clone();

        let outcome = run_cancellable(move |token| {
            validator.validate_with_cancellation(path.as_deref(), &token)
        })
        .await;

        if self.json {
            let report = ValidationReport::new(self.path.as_deref(), &outcome);
            let json_output = serde_json::to_string_pretty(&report).map_err(|e| {
                ImportError::io("Failed to serialize JSON response", e.into())
            })?;
            println!("{json_output}");
        } else if outcome.is_ok() {
            if let Some(path) = &self.path {
                println!("Project structure is valid: {}", path.display());
            }
        }

        outcome
    }
}
