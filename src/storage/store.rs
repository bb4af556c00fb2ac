//! Settings store
//!
//! Typed, defaulted, categorized access to the persisted settings. One store
//! is created at startup and handed to whatever needs configuration.
//!
//! Every mutation is computed on a copy of the committed map, persisted
//! through the backend, and only then swapped in. A backend failure is logged
//! and returned, and leaves the committed values untouched.

use crate::storage::backend::{JsonFileBackend, PreferencesBackend};
use crate::storage::registry::{Category, SettingKey};
use crate::storage::value::{SettingValue, SettingsMap};
use crate::storage::StorageError;
use crate::types::settings::{AccountSettings, AppPreferences, NotificationSettings};
use chrono::{Local, NaiveDate};
use std::sync::{Mutex, MutexGuard};

/// Format used for the `accountCreated` stamp
pub const ACCOUNT_CREATED_FORMAT: &str = "%B %d, %Y";

struct Inner {
    values: SettingsMap,
    backend: Box<dyn PreferencesBackend>,
    /// False until `values` is known to match what the backend holds
    in_sync: bool,
}

/// One effective setting, as listed by [`SettingsStore::snapshot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingEntry {
    pub key: SettingKey,
    pub value: SettingValue,
    /// False when `value` is the default
    pub stored: bool,
}

/// The application's settings
pub struct SettingsStore {
    inner: Mutex<Inner>,
}

impl SettingsStore {
    /// Open a store over `backend`
    ///
    /// Never fails: if the backend cannot be read the store starts empty and
    /// every getter returns its default.
    pub fn open(backend: impl PreferencesBackend + 'static) -> Self {
        let (values, in_sync) = match backend.load() {
            Ok(values) => (values, true),
            Err(e) => {
                tracing::warn!(
                    "Failed to load settings from {}, using defaults: {}",
                    backend.location(),
                    e
                );
                (SettingsMap::new(), false)
            }
        };

        Self {
            inner: Mutex::new(Inner {
                values,
                backend: Box::new(backend),
                in_sync,
            }),
        }
    }

    /// Open the store at the default settings path
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::open(JsonFileBackend::open_default()?))
    }

    /// Where the backend keeps the settings
    pub fn location(&self) -> String {
        self.lock().backend.location()
    }

    /// Re-read the backend, replacing the in-memory view
    ///
    /// On failure the current view is kept.
    pub fn reload(&self) -> Result<(), StorageError> {
        let mut inner = self.lock();
        match inner.backend.load() {
            Ok(values) => {
                inner.values = values;
                inner.in_sync = true;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to reload settings: {}", e);
                inner.in_sync = false;
                Err(e)
            }
        }
    }

    // =========================================================================
    // Generic access
    // =========================================================================

    /// Effective value of `key`: the stored one, else its default
    pub fn get(&self, key: SettingKey) -> SettingValue {
        key.value_in(&self.lock().values)
    }

    /// Whether `key` holds an explicitly stored value of its declared type
    pub fn is_stored(&self, key: SettingKey) -> bool {
        key.stored_in(&self.lock().values).is_some()
    }

    /// Every known setting with its effective value
    pub fn snapshot(&self) -> Vec<SettingEntry> {
        let inner = self.lock();
        SettingKey::all()
            .map(|key| {
                let stored = key.stored_in(&inner.values).cloned();
                SettingEntry {
                    key,
                    stored: stored.is_some(),
                    value: stored.unwrap_or_else(|| key.default_value()),
                }
            })
            .collect()
    }

    fn text(&self, key: SettingKey) -> String {
        key.text_in(&self.lock().values)
    }

    fn flag(&self, key: SettingKey) -> bool {
        key.bool_in(&self.lock().values)
    }

    fn number(&self, key: SettingKey) -> i32 {
        key.int_in(&self.lock().values)
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Write all account fields as one unit
    pub fn save_account_settings(&self, settings: &AccountSettings) -> Result<(), StorageError> {
        self.write_entries("save account settings", settings.entries())
    }

    pub fn account_settings(&self) -> AccountSettings {
        AccountSettings::from_map(&self.lock().values)
    }

    pub fn full_name(&self) -> String {
        self.text(SettingKey::FullName)
    }

    pub fn date_of_birth(&self) -> String {
        self.text(SettingKey::DateOfBirth)
    }

    pub fn username(&self) -> String {
        self.text(SettingKey::Username)
    }

    pub fn email(&self) -> String {
        self.text(SettingKey::Email)
    }

    pub fn phone(&self) -> String {
        self.text(SettingKey::Phone)
    }

    pub fn address(&self) -> String {
        self.text(SettingKey::Address)
    }

    /// Date the account was first recorded, empty if never
    pub fn account_created(&self) -> String {
        self.text(SettingKey::AccountCreated)
    }

    pub fn currency(&self) -> String {
        self.text(SettingKey::Currency)
    }

    pub fn two_factor_auth(&self) -> bool {
        self.flag(SettingKey::TwoFactorAuth)
    }

    /// Stamp `accountCreated` with `date`, unless it is already set
    ///
    /// Returns whether the stamp was written.
    pub fn record_account_created(&self, date: NaiveDate) -> Result<bool, StorageError> {
        let mut inner = self.lock();
        if SettingKey::AccountCreated.stored_in(&inner.values).is_some() {
            return Ok(false);
        }

        let mut next = inner.values.clone();
        next.insert(
            SettingKey::AccountCreated.name().to_string(),
            date.format(ACCOUNT_CREATED_FORMAT).to_string().into(),
        );
        Self::commit(&mut inner, "record account creation", next)?;
        tracing::info!("Recorded account creation date {}", date);
        Ok(true)
    }

    /// [`record_account_created`](Self::record_account_created) with the local date
    pub fn record_account_created_today(&self) -> Result<bool, StorageError> {
        self.record_account_created(Local::now().date_naive())
    }

    // =========================================================================
    // App preferences
    // =========================================================================

    /// Write all application preferences as one unit
    pub fn save_app_preferences(&self, prefs: &AppPreferences) -> Result<(), StorageError> {
        self.write_entries("save app preferences", prefs.entries())
    }

    pub fn app_preferences(&self) -> AppPreferences {
        AppPreferences::from_map(&self.lock().values)
    }

    pub fn dark_mode(&self) -> bool {
        self.flag(SettingKey::DarkMode)
    }

    pub fn font_size(&self) -> String {
        self.text(SettingKey::FontSize)
    }

    pub fn language(&self) -> String {
        self.text(SettingKey::Language)
    }

    pub fn date_format(&self) -> String {
        self.text(SettingKey::DateFormat)
    }

    pub fn time_format(&self) -> String {
        self.text(SettingKey::TimeFormat)
    }

    pub fn start_on_boot(&self) -> bool {
        self.flag(SettingKey::StartOnBoot)
    }

    pub fn start_minimized(&self) -> bool {
        self.flag(SettingKey::StartMinimized)
    }

    pub fn auto_backup(&self) -> bool {
        self.flag(SettingKey::AutoBackup)
    }

    pub fn default_view(&self) -> String {
        self.text(SettingKey::DefaultView)
    }

    pub fn chart_type(&self) -> String {
        self.text(SettingKey::ChartType)
    }

    pub fn animations_level(&self) -> i32 {
        self.number(SettingKey::AnimationsLevel)
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Write all notification settings as one unit
    pub fn save_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<(), StorageError> {
        self.write_entries("save notification settings", settings.entries())
    }

    pub fn notification_settings(&self) -> NotificationSettings {
        NotificationSettings::from_map(&self.lock().values)
    }

    pub fn notify_bills(&self) -> bool {
        self.flag(SettingKey::NotifyBills)
    }

    pub fn notify_subscriptions(&self) -> bool {
        self.flag(SettingKey::NotifySubscriptions)
    }

    pub fn notify_weekly(&self) -> bool {
        self.flag(SettingKey::NotifyWeekly)
    }

    pub fn notify_overspend(&self) -> bool {
        self.flag(SettingKey::NotifyOverspend)
    }

    pub fn notify_motivation(&self) -> bool {
        self.flag(SettingKey::NotifyMotivation)
    }

    pub fn notify_frequency(&self) -> String {
        self.text(SettingKey::NotifyFrequency)
    }

    pub fn notify_time(&self) -> String {
        self.text(SettingKey::NotifyTime)
    }

    pub fn notify_email(&self) -> bool {
        self.flag(SettingKey::NotifyEmail)
    }

    pub fn notify_desktop(&self) -> bool {
        self.flag(SettingKey::NotifyDesktop)
    }

    pub fn notify_push(&self) -> bool {
        self.flag(SettingKey::NotifyPush)
    }

    pub fn quiet_hours(&self) -> bool {
        self.flag(SettingKey::QuietHours)
    }

    pub fn quiet_from(&self) -> String {
        self.text(SettingKey::QuietFrom)
    }

    pub fn quiet_to(&self) -> String {
        self.text(SettingKey::QuietTo)
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Remove every stored key, known or not
    pub fn reset_all_settings(&self) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if inner.in_sync && inner.values.is_empty() {
            return Ok(());
        }
        Self::commit(&mut inner, "reset all settings", SettingsMap::new())?;
        tracing::info!("Reset all settings to defaults");
        Ok(())
    }

    pub fn reset_account_settings(&self) -> Result<(), StorageError> {
        self.reset_category(Category::Account)
    }

    pub fn reset_app_preferences(&self) -> Result<(), StorageError> {
        self.reset_category(Category::AppPreferences)
    }

    pub fn reset_notification_settings(&self) -> Result<(), StorageError> {
        self.reset_category(Category::Notifications)
    }

    /// Remove the keys of one category; other keys are untouched
    pub fn reset_category(&self, category: Category) -> Result<(), StorageError> {
        let mut inner = self.lock();
        let mut next = inner.values.clone();
        let mut removed = 0;
        for key in category.reset_keys() {
            if next.remove(key.name()).is_some() {
                removed += 1;
            }
        }
        if inner.in_sync && removed == 0 {
            return Ok(());
        }

        let operation = format!("reset {} settings", category);
        Self::commit(&mut inner, &operation, next)?;
        tracing::info!("Reset {} {} settings to defaults", removed, category);
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The committed map is only ever replaced whole, so it stays valid
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_entries(
        &self,
        operation: &str,
        entries: Vec<(SettingKey, SettingValue)>,
    ) -> Result<(), StorageError> {
        let mut inner = self.lock();
        let mut next = inner.values.clone();
        for (key, value) in entries {
            next.insert(key.name().to_string(), value);
        }
        if inner.in_sync && next == inner.values {
            return Ok(());
        }
        Self::commit(&mut inner, operation, next)
    }

    /// Persist `next` and make it the committed map
    fn commit(inner: &mut Inner, operation: &str, next: SettingsMap) -> Result<(), StorageError> {
        if let Err(e) = inner.backend.persist(&next) {
            tracing::warn!(
                "Failed to {} at {}: {}",
                operation,
                inner.backend.location(),
                e
            );
            return Err(e);
        }
        inner.values = next;
        inner.in_sync = true;
        tracing::debug!("Committed: {}", operation);
        Ok(())
    }
}
