// Configuration utilities and TOML parsing

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::utils::error::{ImportError, Result};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "SKETCH_IMPORT_CONFIG";

/// Runtime configuration for validation and import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Parent directory for ephemeral extraction roots (system temp when unset)
    pub temp_dir: Option<PathBuf>,
    /// Single wrapping directory the importer strips from extracted archives
    pub wrapper_dir: String,
    /// Default tracing filter when RUST_LOG is not set
    pub log_level: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            temp_dir: None,
            wrapper_dir: "_cmake".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl ImportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn with_wrapper_dir(mut self, name: impl Into<String>) -> Self {
        self.wrapper_dir = name.into();
        self
    }
}

/// Configuration loading and validation utilities
pub struct ConfigParser;

impl ConfigParser {
    /// Resolve and load the configuration.
    ///
    /// An explicit path (argument first, then `SKETCH_IMPORT_CONFIG`) must exist.
    /// The per-user default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<ImportConfig> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
            return Self::load_file(&path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_file(&path),
            _ => Ok(ImportConfig::default()),
        }
    }

    /// `<config_dir>/sketch-import/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sketch-import").join("config.toml"))
    }

    /// Load and validate a configuration file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<ImportConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ImportError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ImportError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<ImportConfig> {
        let config: ImportConfig = toml::from_str(content)
            .map_err(|e| ImportError::Config(format!("Invalid TOML syntax: {e}")))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &ImportConfig) -> Result<()> {
        let wrapper = config.wrapper_dir.as_str();
        if wrapper.trim().is_empty() {
            return Err(ImportError::Config("wrapper_dir cannot be empty".to_string()));
        }
        if wrapper.contains('/') || wrapper.contains('\\') || wrapper == "." || wrapper == ".." {
            return Err(ImportError::Config(format!(
                "wrapper_dir '{wrapper}' must be a single directory name"
            )));
        }

        if config.log_level.trim().is_empty() {
            return Err(ImportError::Config("log_level cannot be empty".to_string()));
        }

        Ok(())
    }
}
