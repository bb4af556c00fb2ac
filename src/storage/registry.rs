//! Setting registry
//!
//! Every setting the application persists is declared exactly once in
//! [`SETTINGS`]: its stored key, its category, its type and its default.
//! Category membership and default fallback are both derived from this table.

use crate::storage::value::{SettingKind, SettingValue, SettingsMap};
use std::fmt;

/// A fixed grouping of settings supporting scoped reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Account,
    AppPreferences,
    Notifications,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Account,
        Category::AppPreferences,
        Category::Notifications,
    ];

    /// Human-readable label for UI
    pub fn label(&self) -> &'static str {
        match self {
            Category::Account => "Account",
            Category::AppPreferences => "App Preferences",
            Category::Notifications => "Notifications",
        }
    }

    /// All settings declared in this category
    pub fn keys(self) -> impl Iterator<Item = SettingKey> {
        SETTINGS
            .iter()
            .filter(move |def| def.category == self)
            .map(|def| def.key)
    }

    /// Settings removed by a scoped reset of this category
    pub fn reset_keys(self) -> impl Iterator<Item = SettingKey> {
        SETTINGS
            .iter()
            .filter(move |def| def.category == self && def.scoped_reset)
            .map(|def| def.key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Compiled-in default of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Text(&'static str),
    Bool(bool),
    Int(i32),
}

impl DefaultValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            DefaultValue::Text(_) => SettingKind::Text,
            DefaultValue::Bool(_) => SettingKind::Bool,
            DefaultValue::Int(_) => SettingKind::Int,
        }
    }

    pub fn to_value(self) -> SettingValue {
        match self {
            DefaultValue::Text(s) => SettingValue::Text(s.to_string()),
            DefaultValue::Bool(b) => SettingValue::Bool(b),
            DefaultValue::Int(n) => SettingValue::from(n),
        }
    }
}

/// One row of the settings table
#[derive(Debug, Clone, Copy)]
pub struct SettingDef {
    pub key: SettingKey,
    /// Name used in the backing store
    pub name: &'static str,
    pub category: Category,
    pub default: DefaultValue,
    /// Whether the category's scoped reset removes this key
    pub scoped_reset: bool,
}

impl SettingDef {
    pub fn kind(&self) -> SettingKind {
        self.default.kind()
    }
}

/// Every persisted setting.
///
/// Variant order matches the rows of [`SETTINGS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    // Account
    FullName,
    DateOfBirth,
    Username,
    Email,
    Phone,
    Address,
    AccountCreated,
    Currency,
    TwoFactorAuth,
    // App preferences
    DarkMode,
    FontSize,
    Language,
    DateFormat,
    TimeFormat,
    StartOnBoot,
    StartMinimized,
    AutoBackup,
    DefaultView,
    ChartType,
    AnimationsLevel,
    // Notifications
    NotifyBills,
    NotifySubscriptions,
    NotifyWeekly,
    NotifyOverspend,
    NotifyMotivation,
    NotifyFrequency,
    NotifyTime,
    NotifyEmail,
    NotifyDesktop,
    NotifyPush,
    QuietHours,
    QuietFrom,
    QuietTo,
}

const fn setting(
    key: SettingKey,
    name: &'static str,
    category: Category,
    default: DefaultValue,
) -> SettingDef {
    SettingDef {
        key,
        name,
        category,
        default,
        scoped_reset: true,
    }
}

use Category::{Account, AppPreferences, Notifications};
use DefaultValue::{Bool, Int, Text};

pub static SETTINGS: [SettingDef; 33] = [
    // Account
    setting(SettingKey::FullName, "fullName", Account, Text("")),
    setting(SettingKey::DateOfBirth, "dateOfBirth", Account, Text("")),
    setting(SettingKey::Username, "username", Account, Text("")),
    setting(SettingKey::Email, "email", Account, Text("")),
    setting(SettingKey::Phone, "phone", Account, Text("")),
    setting(SettingKey::Address, "address", Account, Text("")),
    // Account metadata, only cleared by a full reset
    SettingDef {
        key: SettingKey::AccountCreated,
        name: "accountCreated",
        category: Account,
        default: Text(""),
        scoped_reset: false,
    },
    setting(SettingKey::Currency, "currency", Account, Text("USD ($)")),
    setting(SettingKey::TwoFactorAuth, "twoFactorAuth", Account, Bool(false)),
    // App preferences
    setting(SettingKey::DarkMode, "darkMode", AppPreferences, Bool(false)),
    setting(SettingKey::FontSize, "fontSize", AppPreferences, Text("Medium")),
    setting(SettingKey::Language, "language", AppPreferences, Text("English")),
    setting(SettingKey::DateFormat, "dateFormat", AppPreferences, Text("MM/DD/YYYY")),
    setting(SettingKey::TimeFormat, "timeFormat", AppPreferences, Text("12-hour (AM/PM)")),
    setting(SettingKey::StartOnBoot, "startOnBoot", AppPreferences, Bool(false)),
    setting(SettingKey::StartMinimized, "startMinimized", AppPreferences, Bool(false)),
    setting(SettingKey::AutoBackup, "autoBackup", AppPreferences, Bool(true)),
    setting(SettingKey::DefaultView, "defaultView", AppPreferences, Text("Monthly")),
    setting(SettingKey::ChartType, "chartType", AppPreferences, Text("Pie Chart")),
    setting(SettingKey::AnimationsLevel, "animationsLevel", AppPreferences, Int(50)),
    // Notifications
    setting(SettingKey::NotifyBills, "notifyBills", Notifications, Bool(true)),
    setting(SettingKey::NotifySubscriptions, "notifySubscriptions", Notifications, Bool(true)),
    setting(SettingKey::NotifyWeekly, "notifyWeekly", Notifications, Bool(true)),
    setting(SettingKey::NotifyOverspend, "notifyOverspend", Notifications, Bool(true)),
    setting(SettingKey::NotifyMotivation, "notifyMotivation", Notifications, Bool(true)),
    setting(SettingKey::NotifyFrequency, "notifyFrequency", Notifications, Text("Weekly")),
    setting(SettingKey::NotifyTime, "notifyTime", Notifications, Text("9:00 AM")),
    setting(SettingKey::NotifyEmail, "notifyEmail", Notifications, Bool(true)),
    setting(SettingKey::NotifyDesktop, "notifyDesktop", Notifications, Bool(true)),
    setting(SettingKey::NotifyPush, "notifyPush", Notifications, Bool(false)),
    setting(SettingKey::QuietHours, "quietHours", Notifications, Bool(false)),
    setting(SettingKey::QuietFrom, "quietFrom", Notifications, Text("22:00")),
    setting(SettingKey::QuietTo, "quietTo", Notifications, Text("07:00")),
];

impl SettingKey {
    /// All keys, in table order
    pub fn all() -> impl Iterator<Item = SettingKey> {
        SETTINGS.iter().map(|def| def.key)
    }

    pub fn def(self) -> &'static SettingDef {
        &SETTINGS[self as usize]
    }

    /// Name used in the backing store
    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn category(self) -> Category {
        self.def().category
    }

    pub fn default_value(self) -> SettingValue {
        self.def().default.to_value()
    }

    /// Look up a key by its stored name (case-sensitive)
    pub fn from_name(name: &str) -> Option<SettingKey> {
        SETTINGS.iter().find(|def| def.name == name).map(|def| def.key)
    }

    /// Stored value in `values` if it has the declared type
    pub fn stored_in(self, values: &SettingsMap) -> Option<&SettingValue> {
        let value = values.get(self.name())?;
        let kind = self.def().kind();
        let matches = value.kind() == Some(kind)
            && (kind != SettingKind::Int || value.as_int().is_some());
        if !matches {
            tracing::debug!(
                "Ignoring stored {} for {} setting '{}'",
                value,
                self.def().kind(),
                self.name()
            );
            return None;
        }
        Some(value)
    }

    /// Effective value: the stored one, else the default
    pub fn value_in(self, values: &SettingsMap) -> SettingValue {
        self.stored_in(values)
            .cloned()
            .unwrap_or_else(|| self.default_value())
    }

    pub fn text_in(self, values: &SettingsMap) -> String {
        debug_assert_eq!(self.def().kind(), SettingKind::Text);
        match self.stored_in(values).and_then(SettingValue::as_text) {
            Some(text) => text.to_string(),
            None => match self.def().default {
                DefaultValue::Text(text) => text.to_string(),
                other => other.to_value().to_string(),
            },
        }
    }

    pub fn bool_in(self, values: &SettingsMap) -> bool {
        debug_assert_eq!(self.def().kind(), SettingKind::Bool);
        self.stored_in(values)
            .and_then(SettingValue::as_bool)
            .unwrap_or(matches!(self.def().default, DefaultValue::Bool(true)))
    }

    pub fn int_in(self, values: &SettingsMap) -> i32 {
        debug_assert_eq!(self.def().kind(), SettingKind::Int);
        self.stored_in(values)
            .and_then(SettingValue::as_int)
            .unwrap_or(match self.def().default {
                DefaultValue::Int(n) => n,
                _ => 0,
            })
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_order_matches_variants() {
        for (index, def) in SETTINGS.iter().enumerate() {
            assert_eq!(def.key as usize, index, "row for {} is out of order", def.name);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = SETTINGS.iter().map(|def| def.name).collect();
        assert_eq!(names.len(), SETTINGS.len());
    }

    #[test]
    fn test_category_sizes() {
        assert_eq!(Category::Account.keys().count(), 9);
        assert_eq!(Category::Account.reset_keys().count(), 8);
        assert_eq!(Category::AppPreferences.keys().count(), 11);
        assert_eq!(Category::AppPreferences.reset_keys().count(), 11);
        assert_eq!(Category::Notifications.keys().count(), 13);
        assert_eq!(Category::Notifications.reset_keys().count(), 13);
    }

    #[test]
    fn test_account_created_survives_scoped_reset() {
        assert!(Category::Account.keys().any(|k| k == SettingKey::AccountCreated));
        assert!(!Category::Account
            .reset_keys()
            .any(|k| k == SettingKey::AccountCreated));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(SettingKey::from_name("darkMode"), Some(SettingKey::DarkMode));
        assert_eq!(
            SettingKey::from_name("dateOfBirth"),
            Some(SettingKey::DateOfBirth)
        );
        assert_eq!(SettingKey::from_name("theme"), None);
        assert_eq!(SettingKey::from_name("DarkMode"), None);
    }

    #[test]
    fn test_lookup_falls_back_on_type_mismatch() {
        let mut values = SettingsMap::new();
        values.insert("darkMode".into(), "yes".into());
        values.insert("animationsLevel".into(), SettingValue::Int(i64::MAX));
        values.insert("fontSize".into(), false.into());
        values.insert("language".into(), "French".into());
        values.insert("quietHours".into(), SettingValue::Other(serde_json::Value::Null));

        assert!(!SettingKey::DarkMode.bool_in(&values));
        assert_eq!(SettingKey::AnimationsLevel.int_in(&values), 50);
        assert_eq!(SettingKey::FontSize.text_in(&values), "Medium");
        assert_eq!(SettingKey::Language.text_in(&values), "French");
        assert!(!SettingKey::QuietHours.bool_in(&values));
        assert!(SettingKey::QuietHours.stored_in(&values).is_none());
        assert_eq!(
            SettingKey::DarkMode.value_in(&values),
            SettingValue::Bool(false)
        );
    }

    #[test]
    fn test_typed_defaults() {
        assert_eq!(
            SettingKey::AnimationsLevel.default_value(),
            SettingValue::Int(50)
        );
        assert_eq!(
            SettingKey::Currency.default_value(),
            SettingValue::Text("USD ($)".into())
        );
        assert_eq!(SettingKey::AutoBackup.default_value(), SettingValue::Bool(true));
        assert_eq!(SettingKey::NotifyPush.default_value(), SettingValue::Bool(false));
        assert_eq!(SettingKey::QuietTo.def().kind(), SettingKind::Text);
    }
}
