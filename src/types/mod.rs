//! Shared type definitions
//!
//! Bulk settings records and the choice catalogs offered for them.

pub mod options;
pub mod settings;

pub use settings::{AccountSettings, AppPreferences, NotificationSettings};
