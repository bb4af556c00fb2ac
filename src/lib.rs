//! SpentWise Settings Library
//!
//! Persistent, typed user settings for the SpentWise desktop application.
//!
//! # Example
//!
//! ```no_run
//! use spentwise_settings::{AppPreferences, SettingsStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SettingsStore::open_default()?;
//!
//!     let mut prefs = store.app_preferences();
//!     prefs.dark_mode = true;
//!     store.save_app_preferences(&prefs)?;
//!
//!     assert!(store.dark_mode());
//!     Ok(())
//! }
//! ```

pub mod storage;
pub mod types;

pub use storage::{Category, SettingKey, SettingValue, SettingsStore, StorageError};
pub use types::{AccountSettings, AppPreferences, NotificationSettings};
