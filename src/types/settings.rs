//! Bulk settings records
//!
//! One record per category, written and read as a unit by the settings store.
//! Field names serialize to the stored key names.

use crate::storage::registry::SettingKey;
use crate::storage::value::{SettingValue, SettingsMap};
use serde::{Deserialize, Serialize};

/// Account settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettings {
    pub full_name: String,
    pub date_of_birth: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Display currency, e.g. "USD ($)"
    pub currency: String,
    #[serde(rename = "twoFactorAuth")]
    pub two_factor_enabled: bool,
}

impl AccountSettings {
    /// Resolve every field from `values`, falling back to defaults
    pub fn from_map(values: &SettingsMap) -> Self {
        Self {
            full_name: SettingKey::FullName.text_in(values),
            date_of_birth: SettingKey::DateOfBirth.text_in(values),
            username: SettingKey::Username.text_in(values),
            email: SettingKey::Email.text_in(values),
            phone: SettingKey::Phone.text_in(values),
            address: SettingKey::Address.text_in(values),
            currency: SettingKey::Currency.text_in(values),
            two_factor_enabled: SettingKey::TwoFactorAuth.bool_in(values),
        }
    }

    /// Every field as a stored entry
    pub fn entries(&self) -> Vec<(SettingKey, SettingValue)> {
        vec![
            (SettingKey::FullName, self.full_name.clone().into()),
            (SettingKey::DateOfBirth, self.date_of_birth.clone().into()),
            (SettingKey::Username, self.username.clone().into()),
            (SettingKey::Email, self.email.clone().into()),
            (SettingKey::Phone, self.phone.clone().into()),
            (SettingKey::Address, self.address.clone().into()),
            (SettingKey::Currency, self.currency.clone().into()),
            (SettingKey::TwoFactorAuth, self.two_factor_enabled.into()),
        ]
    }
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self::from_map(&SettingsMap::new())
    }
}

/// Application preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPreferences {
    pub dark_mode: bool,
    /// "Small", "Medium" or "Large"
    pub font_size: String,
    pub language: String,
    pub date_format: String,
    pub time_format: String,
    pub start_on_boot: bool,
    pub start_minimized: bool,
    pub auto_backup: bool,
    /// Default budget view
    pub default_view: String,
    pub chart_type: String,
    /// Animation intensity (0 - 100)
    pub animations_level: i32,
}

impl AppPreferences {
    pub fn from_map(values: &SettingsMap) -> Self {
        Self {
            dark_mode: SettingKey::DarkMode.bool_in(values),
            font_size: SettingKey::FontSize.text_in(values),
            language: SettingKey::Language.text_in(values),
            date_format: SettingKey::DateFormat.text_in(values),
            time_format: SettingKey::TimeFormat.text_in(values),
            start_on_boot: SettingKey::StartOnBoot.bool_in(values),
            start_minimized: SettingKey::StartMinimized.bool_in(values),
            auto_backup: SettingKey::AutoBackup.bool_in(values),
            default_view: SettingKey::DefaultView.text_in(values),
            chart_type: SettingKey::ChartType.text_in(values),
            animations_level: SettingKey::AnimationsLevel.int_in(values),
        }
    }

    pub fn entries(&self) -> Vec<(SettingKey, SettingValue)> {
        vec![
            (SettingKey::DarkMode, self.dark_mode.into()),
            (SettingKey::FontSize, self.font_size.clone().into()),
            (SettingKey::Language, self.language.clone().into()),
            (SettingKey::DateFormat, self.date_format.clone().into()),
            (SettingKey::TimeFormat, self.time_format.clone().into()),
            (SettingKey::StartOnBoot, self.start_on_boot.into()),
            (SettingKey::StartMinimized, self.start_minimized.into()),
            (SettingKey::AutoBackup, self.auto_backup.into()),
            (SettingKey::DefaultView, self.default_view.clone().into()),
            (SettingKey::ChartType, self.chart_type.clone().into()),
            (SettingKey::AnimationsLevel, self.animations_level.into()),
        ]
    }
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self::from_map(&SettingsMap::new())
    }
}

/// Notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub notify_bills: bool,
    pub notify_subscriptions: bool,
    pub notify_weekly: bool,
    pub notify_overspend: bool,
    pub notify_motivation: bool,
    #[serde(rename = "notifyFrequency")]
    pub frequency: String,
    pub notify_time: String,
    pub notify_email: bool,
    pub notify_desktop: bool,
    pub notify_push: bool,
    #[serde(rename = "quietHours")]
    pub quiet_hours_enabled: bool,
    /// Quiet hours start, "HH:MM"
    pub quiet_from: String,
    /// Quiet hours end, "HH:MM"
    pub quiet_to: String,
}

impl NotificationSettings {
    pub fn from_map(values: &SettingsMap) -> Self {
        Self {
            notify_bills: SettingKey::NotifyBills.bool_in(values),
            notify_subscriptions: SettingKey::NotifySubscriptions.bool_in(values),
            notify_weekly: SettingKey::NotifyWeekly.bool_in(values),
            notify_overspend: SettingKey::NotifyOverspend.bool_in(values),
            notify_motivation: SettingKey::NotifyMotivation.bool_in(values),
            frequency: SettingKey::NotifyFrequency.text_in(values),
            notify_time: SettingKey::NotifyTime.text_in(values),
            notify_email: SettingKey::NotifyEmail.bool_in(values),
            notify_desktop: SettingKey::NotifyDesktop.bool_in(values),
            notify_push: SettingKey::NotifyPush.bool_in(values),
            quiet_hours_enabled: SettingKey::QuietHours.bool_in(values),
            quiet_from: SettingKey::QuietFrom.text_in(values),
            quiet_to: SettingKey::QuietTo.text_in(values),
        }
    }

    pub fn entries(&self) -> Vec<(SettingKey, SettingValue)> {
        vec![
            (SettingKey::NotifyBills, self.notify_bills.into()),
            (SettingKey::NotifySubscriptions, self.notify_subscriptions.into()),
            (SettingKey::NotifyWeekly, self.notify_weekly.into()),
            (SettingKey::NotifyOverspend, self.notify_overspend.into()),
            (SettingKey::NotifyMotivation, self.notify_motivation.into()),
            (SettingKey::NotifyFrequency, self.frequency.clone().into()),
            (SettingKey::NotifyTime, self.notify_time.clone().into()),
            (SettingKey::NotifyEmail, self.notify_email.into()),
            (SettingKey::NotifyDesktop, self.notify_desktop.into()),
            (SettingKey::NotifyPush, self.notify_push.into()),
            (SettingKey::QuietHours, self.quiet_hours_enabled.into()),
            (SettingKey::QuietFrom, self.quiet_from.clone().into()),
            (SettingKey::QuietTo, self.quiet_to.clone().into()),
        ]
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self::from_map(&SettingsMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::registry::Category;

    #[test]
    fn test_default_records() {
        let account = AccountSettings::default();
        assert_eq!(account.full_name, "");
        assert_eq!(account.currency, "USD ($)");
        assert!(!account.two_factor_enabled);

        let prefs = AppPreferences::default();
        assert!(!prefs.dark_mode);
        assert_eq!(prefs.font_size, "Medium");
        assert_eq!(prefs.time_format, "12-hour (AM/PM)");
        assert!(prefs.auto_backup);
        assert_eq!(prefs.chart_type, "Pie Chart");
        assert_eq!(prefs.animations_level, 50);

        let notifications = NotificationSettings::default();
        assert!(notifications.notify_bills);
        assert_eq!(notifications.frequency, "Weekly");
        assert_eq!(notifications.notify_time, "9:00 AM");
        assert!(!notifications.notify_push);
        assert_eq!(notifications.quiet_from, "22:00");
        assert_eq!(notifications.quiet_to, "07:00");
    }

    #[test]
    fn test_entries_cover_resettable_keys() {
        let mut account: Vec<SettingKey> = AccountSettings::default()
            .entries()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        account.sort();
        let mut expected: Vec<SettingKey> = Category::Account.reset_keys().collect();
        expected.sort();
        assert_eq!(account, expected);

        let prefs: Vec<SettingKey> = AppPreferences::default()
            .entries()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(prefs, Category::AppPreferences.keys().collect::<Vec<_>>());

        let notifications: Vec<SettingKey> = NotificationSettings::default()
            .entries()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(
            notifications,
            Category::Notifications.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_serialized_names_match_stored_keys() {
        let json = serde_json::to_value(NotificationSettings::default())
            .expect("Failed to serialize");
        let object = json.as_object().expect("Expected an object");
        for key in Category::Notifications.keys() {
            assert!(object.contains_key(key.name()), "missing {}", key.name());
        }

        let json = serde_json::to_value(AccountSettings::default()).expect("Failed to serialize");
        assert!(json.get("twoFactorAuth").is_some());
        assert!(json.get("dateOfBirth").is_some());
    }
}
