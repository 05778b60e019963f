//! Configuration management for Gingermarket.

mod settings;

pub use settings::{
    BettingConfig, CatalogConfig, Config, ENV_PREFIX, KeyBindings, LoggingConfig, StorageConfig,
    UiConfig, WalletConfig,
};

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "gingermarket", "gingermarket")
        .ok_or_else(|| Error::config("Could not determine project directories"))
}

/// Get the configuration directory path.
pub fn config_dir() -> Result<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path.
pub fn data_dir() -> Result<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Get the log directory path.
pub fn log_dir() -> Result<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("logs"))
}

/// Resolve the storage file path, honouring an explicit override.
pub fn storage_path(config: &StorageConfig) -> Result<PathBuf> {
    match &config.path {
        Some(path) => Ok(path.clone()),
        None => data_dir().map(|dir| dir.join("storage.json")),
    }
}
