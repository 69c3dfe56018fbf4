// Shared utilities: errors, configuration, filesystem helpers
pub mod config;
pub mod error;
pub mod fs_utils;
