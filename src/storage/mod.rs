//! Persistent storage
//!
//! This module handles persistence of the user's settings: the key registry,
//! the backing key/value stores, and the typed settings store on top of them.

pub mod backend;
pub mod registry;
pub mod store;
pub mod value;

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

pub use backend::{JsonFileBackend, MemoryBackend, PreferencesBackend};
pub use registry::{Category, SettingDef, SettingKey, SETTINGS};
pub use store::SettingsStore;
pub use value::{SettingKind, SettingValue, SettingsMap};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "SPENTWISE_DATA_DIR";

/// File name of the settings file inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Errors raised while reading or writing persisted settings.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine the user data directory")]
    NoDataDir,

    #[error("Settings backend unavailable: {0}")]
    Unavailable(String),
}

/// Get the application data directory
///
/// `SPENTWISE_DATA_DIR` wins when set to a non-empty value.
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    ProjectDirs::from("com", "budgetapp", "SpentWise")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}

/// Get the default settings file path
pub fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join(SETTINGS_FILE))
}
