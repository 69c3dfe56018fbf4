use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::cli::run_cancellable;
use crate::services::importer::{default_project_name, ImportSummary, ProjectImporter};
use crate::utils::config::ImportConfig;
use crate::utils::error::{ImportError, Result};

/// Validate a project and copy it into a destination directory
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Directory or zip archive to import
    pub path: PathBuf,

    /// Destination parent directory
    #[arg(long)]
    pub into: PathBuf,

    /// Project name (default: archive stem or directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON response format for import command
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportReport {
    pub status: String,
    pub project_name: String,
    pub target: String,
    pub files_copied: usize,
    pub directories_created: usize,
}

impl From<&ImportSummary> for ImportReport {
    fn from(summary: &ImportSummary) -> Self {
        Self {
            status: "success".to_string(),
            project_name: summary.project_name.clone(),
            target: summary.target.display().to_string(),
            files_copied: summary.files_copied,
            directories_created: summary.directories_created,
        }
    }
}

impl ImportCommand {
    /// Execute the import command
    pub async fn run(&self, config: &ImportConfig) -> Result<()> {
        let project_name = match &self.name {
            Some(name) => name.clone(),
            None => default_project_name(&self.path).ok_or_else(|| {
                ImportError::InvalidArgument(
                    "The project name should be specified.".to_string(),
                )
            })?,
        };

        let importer = ProjectImporter::new(config.clone());
        let source = self.path.clone();
        let destination = self.into.clone();

        let summary = run_cancellable(move |token| {
            importer.import(&source, &destination, &project_name, Some(&token))
        })
        .await?;

        if self.json {
            let json_output = serde_json::to_string_pretty(&ImportReport::from(&summary))
                .map_err(|e| ImportError::io("Failed to serialize JSON response", e.into()))?;
            println!("{json_output}");
        } else {
            println!(
                "Imported {} into {}",
                summary.project_name,
                summary.target.display()
            );
        }

        Ok(())
    }
}
