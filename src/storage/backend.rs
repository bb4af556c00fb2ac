//! Backing key/value stores
//!
//! The settings store delegates durability to a [`PreferencesBackend`]. A
//! backend only loads and persists whole maps; the store decides what goes in.

use crate::storage::value::{SettingValue, SettingsMap};
use crate::storage::{get_settings_path, StorageError};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Persistent key/value medium behind a [`SettingsStore`](crate::storage::SettingsStore).
pub trait PreferencesBackend: Send + Sync {
    /// Read every stored entry
    fn load(&self) -> Result<SettingsMap, StorageError>;

    /// Replace the stored entries with `values`
    fn persist(&self, values: &SettingsMap) -> Result<(), StorageError>;

    /// Where the entries live, for logs and diagnostics
    fn location(&self) -> String;
}

impl<B: PreferencesBackend + ?Sized> PreferencesBackend for Box<B> {
    fn load(&self) -> Result<SettingsMap, StorageError> {
        (**self).load()
    }

    fn persist(&self, values: &SettingsMap) -> Result<(), StorageError> {
        (**self).persist(values)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

impl<B: PreferencesBackend + ?Sized> PreferencesBackend for Arc<B> {
    fn load(&self) -> Result<SettingsMap, StorageError> {
        (**self).load()
    }

    fn persist(&self, values: &SettingsMap) -> Result<(), StorageError> {
        (**self).persist(values)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

// =============================================================================
// JSON file
// =============================================================================

/// Settings kept in a flat JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend at the default settings path in the user data directory
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(get_settings_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl PreferencesBackend for JsonFileBackend {
    fn load(&self) -> Result<SettingsMap, StorageError> {
        if !self.path.exists() {
            tracing::info!("Settings file not found at {}, using defaults", self.path.display());
            return Ok(SettingsMap::new());
        }

        let json = fs::read_to_string(&self.path)?;
        let raw: Map<String, Value> = serde_json::from_str(&json)?;

        let mut values = SettingsMap::new();
        for (key, value) in raw {
            let value = SettingValue::from_json(value);
            if value.kind().is_none() {
                tracing::debug!("Keeping setting '{}' with unsupported value {}", key, value);
            }
            values.insert(key, value);
        }

        tracing::debug!("Loaded {} settings from {}", values.len(), self.path.display());
        Ok(values)
    }

    fn persist(&self, values: &SettingsMap) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(values)?;

        // Write and sync a temp file, then rename over the real one
        let temp = self.temp_path();
        let written = File::create(&temp).and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::debug!("Saved {} settings to {}", values.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// Volatile backend for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<SettingsMap>,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with `values`
    pub fn with_values(values: SettingsMap) -> Self {
        Self {
            values: Mutex::new(values),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every following `persist` fail until switched off again
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Copy of what has been persisted so far
    pub fn contents(&self) -> SettingsMap {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl PreferencesBackend for MemoryBackend {
    fn load(&self) -> Result<SettingsMap, StorageError> {
        Ok(self.contents())
    }

    fn persist(&self, values: &SettingsMap) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory backend is read-only".into()));
        }
        *self
            .values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = values.clone();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> SettingsMap {
        let mut map = SettingsMap::new();
        map.insert("fullName".into(), "Alice".into());
        map.insert("darkMode".into(), true.into());
        map.insert("animationsLevel".into(), 80.into());
        map
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("settings.json"));
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let backend = JsonFileBackend::new(&path);

        backend.persist(&sample()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = JsonFileBackend::new(&path);
        assert_eq!(reopened.load().unwrap(), sample());
    }

    #[test]
    fn test_unsupported_entries_are_written_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"darkMode": true, "fontSize": null, "animationsLevel": 12.5, "tags": ["a"]}"#,
        )
        .unwrap();

        let backend = JsonFileBackend::new(&path);
        let values = backend.load().unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values.get("darkMode"), Some(&SettingValue::Bool(true)));
        assert_eq!(values.get("fontSize"), Some(&SettingValue::Other(Value::Null)));

        backend.persist(&values).unwrap();
        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            on_disk,
            serde_json::json!({
                "animationsLevel": 12.5,
                "darkMode": true,
                "fontSize": null,
                "tags": ["a"]
            })
        );
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json at all").unwrap();

        let result = JsonFileBackend::new(&path).load();
        assert!(matches!(result, Err(StorageError::Json(_))));
    }

    #[test]
    fn test_memory_backend_write_failure() {
        let backend = MemoryBackend::with_values(sample());
        backend.set_fail_writes(true);

        let result = backend.persist(&SettingsMap::new());
        assert!(matches!(result, Err(StorageError::Unavailable(_))));
        assert_eq!(backend.contents(), sample());

        backend.set_fail_writes(false);
        backend.persist(&SettingsMap::new()).unwrap();
        assert!(backend.contents().is_empty());
    }
}
