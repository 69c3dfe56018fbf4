// sketch-import - exported sketch project validator
// Core library functionality

pub mod cli;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use models::cancellation::CancellationToken;
pub use services::importer::{ImportSummary, ProjectImporter};
pub use services::validator::ProjectStructureValidator;
pub use utils::error::{ImportError, Result};
