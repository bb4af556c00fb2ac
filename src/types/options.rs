//! Choice catalogs
//!
//! The values the settings screens offer for each choice-based setting. The
//! store does not validate against these; they exist so every screen offers
//! the same lists.

use std::ops::RangeInclusive;

use crate::storage::registry::SettingKey;

pub const CURRENCIES: [&str; 7] = [
    "USD ($)",
    "EUR (€)",
    "GBP (£)",
    "JPY (¥)",
    "CAD ($)",
    "AUD ($)",
    "INR (₹)",
];

pub const FONT_SIZES: [&str; 3] = ["Small", "Medium", "Large"];

pub const DATE_FORMATS: [&str; 3] = ["MM/DD/YYYY", "DD/MM/YYYY", "YYYY-MM-DD"];

pub const TIME_FORMATS: [&str; 2] = ["12-hour (AM/PM)", "24-hour"];

pub const LANGUAGES: [&str; 6] = ["English", "Spanish", "French", "German", "Chinese", "Japanese"];

pub const DEFAULT_VIEWS: [&str; 4] = ["Monthly", "Weekly", "Yearly", "Custom"];

pub const NOTIFY_FREQUENCIES: [&str; 3] = ["Daily", "Weekly", "Monthly"];

/// Slider bounds for `animationsLevel`
pub const ANIMATIONS_LEVEL_RANGE: RangeInclusive<i32> = 0..=100;

/// Offered choices for a setting, if it is choice-based
pub fn choices_for(key: SettingKey) -> Option<&'static [&'static str]> {
    match key {
        SettingKey::Currency => Some(&CURRENCIES),
        SettingKey::FontSize => Some(&FONT_SIZES),
        SettingKey::DateFormat => Some(&DATE_FORMATS),
        SettingKey::TimeFormat => Some(&TIME_FORMATS),
        SettingKey::Language => Some(&LANGUAGES),
        SettingKey::DefaultView => Some(&DEFAULT_VIEWS),
        SettingKey::NotifyFrequency => Some(&NOTIFY_FREQUENCIES),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::value::SettingValue;

    #[test]
    fn test_defaults_are_offered_choices() {
        for key in SettingKey::all() {
            if let Some(choices) = choices_for(key) {
                let default = key.default_value();
                let default = default.as_text().expect("choice settings are text");
                assert!(
                    choices.contains(&default),
                    "default {:?} of {} not offered",
                    default,
                    key
                );
            }
        }
    }

    #[test]
    fn test_animation_default_in_range() {
        assert_eq!(SettingKey::AnimationsLevel.default_value(), SettingValue::Int(50));
        assert!(ANIMATIONS_LEVEL_RANGE.contains(&50));
    }

    #[test]
    fn test_free_text_has_no_choices() {
        assert!(choices_for(SettingKey::FullName).is_none());
        assert!(choices_for(SettingKey::DarkMode).is_none());
    }
}
