//! Settings records exchanged with the storage collaborator

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Character every quick prompt code starts with
pub const TRIGGER_CHAR: char = '/';

/// Language used until the user picks one
pub const DEFAULT_LANGUAGE: &str = "English";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickPrompt {
    pub code: String,
    pub prompt: String,
}

impl QuickPrompt {
    pub fn new(code: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            prompt: prompt.into(),
        }
    }
}

/// One entry of the user's rule list. Stored as `{ "rule": ..., "active": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "rule")]
    pub text: String,
    #[serde(rename = "active", default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl Rule {
    pub fn new(text: impl Into<String>, enabled: bool) -> Self {
        Self {
            text: text.into(),
            enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Anything but an explicit `"light"` means dark
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Storage keys, named as they appear in extension storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsKey {
    SelectedLanguage,
    ActiveLanguageEnforce,
    QuickPrompts,
    Rules,
    ActiveRulesEnforce,
    Theme,
}

impl SettingsKey {
    pub const ALL: [SettingsKey; 6] = [
        SettingsKey::SelectedLanguage,
        SettingsKey::ActiveLanguageEnforce,
        SettingsKey::QuickPrompts,
        SettingsKey::Rules,
        SettingsKey::ActiveRulesEnforce,
        SettingsKey::Theme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsKey::SelectedLanguage => "selectedLanguage",
            SettingsKey::ActiveLanguageEnforce => "activeLanguageEnforce",
            SettingsKey::QuickPrompts => "quickPrompts",
            SettingsKey::Rules => "rules",
            SettingsKey::ActiveRulesEnforce => "activeRulesEnforce",
            SettingsKey::Theme => "theme",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for SettingsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A push notification from storage: `{ key, newValue }`.
///
/// A missing `newValue` means the key was removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsChange {
    pub key: String,
    #[serde(rename = "newValue", default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

impl SettingsChange {
    pub fn new(key: SettingsKey, new_value: Value) -> Self {
        Self {
            key: key.as_str().to_string(),
            new_value: Some(new_value),
        }
    }

    pub fn removed(key: SettingsKey) -> Self {
        Self {
            key: key.as_str().to_string(),
            new_value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_wire_names() {
        let rule: Rule = serde_json::from_value(json!({ "rule": "Be terse" })).unwrap();
        assert_eq!(rule, Rule::new("Be terse", true));

        let encoded = serde_json::to_value(Rule::new("Be kind", false)).unwrap();
        assert_eq!(encoded, json!({ "rule": "Be kind", "active": false }));
    }

    #[test]
    fn test_settings_key_round_trip_names() {
        for key in SettingsKey::ALL {
            assert_eq!(SettingsKey::from_wire(key.as_str()), Some(key));
        }
        assert_eq!(SettingsKey::from_wire("unknownKey"), None);
    }

    #[test]
    fn test_theme_from_value() {
        assert_eq!(Theme::from_value(Some(&json!("light"))), Theme::Light);
        assert_eq!(Theme::from_value(Some(&json!("neon"))), Theme::Dark);
        assert_eq!(Theme::from_value(None), Theme::Dark);
    }

    #[test]
    fn test_settings_change_deserializes_storage_shape() {
        let change: SettingsChange =
            serde_json::from_value(json!({ "key": "selectedLanguage", "newValue": "French" }))
                .unwrap();
        assert_eq!(change, SettingsChange::new(SettingsKey::SelectedLanguage, json!("French")));

        let removed: SettingsChange = serde_json::from_value(json!({ "key": "rules" })).unwrap();
        assert!(removed.new_value.is_none());
    }
}
