//! Typed settings accessors over a raw store

use super::defaults::{default_quick_prompts, default_rules};
use super::sanitize::{sanitize_flag, sanitize_language, sanitize_quick_prompts, sanitize_rules};
use super::store::SettingsStore;
use crate::error::StorageError;
use crate::models::{QuickPrompt, Rule, SettingsKey, Theme};
use serde_json::Value;
use tracing::info;

/// Typed view of the settings collaborator.
///
/// Every getter and setter round-trips through sanitization, so callers never
/// see malformed entries and never persist them.
#[derive(Debug)]
pub struct Settings<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> Settings<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn get_selected_language(&self) -> Result<String, StorageError> {
        let value = self.store.get(SettingsKey::SelectedLanguage)?;
        Ok(sanitize_language(value.as_ref()))
    }

    /// Whether the user has ever stored a non-blank language
    pub fn has_selected_language(&self) -> Result<bool, StorageError> {
        let value = self.store.get(SettingsKey::SelectedLanguage)?;
        Ok(value
            .as_ref()
            .and_then(Value::as_str)
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false))
    }

    pub fn set_selected_language(&mut self, language: &str) -> Result<String, StorageError> {
        let next = sanitize_language(Some(&Value::String(language.to_string())));
        self.store.set(SettingsKey::SelectedLanguage, Value::String(next.clone()))?;
        Ok(next)
    }

    pub fn get_active_language_enforce(&self) -> Result<bool, StorageError> {
        let value = self.store.get(SettingsKey::ActiveLanguageEnforce)?;
        Ok(sanitize_flag(value.as_ref(), true))
    }

    pub fn set_active_language_enforce(&mut self, active: bool) -> Result<bool, StorageError> {
        self.store.set(SettingsKey::ActiveLanguageEnforce, Value::Bool(active))?;
        Ok(active)
    }

    pub fn get_quick_prompts(&self) -> Result<Vec<QuickPrompt>, StorageError> {
        let value = self.store.get(SettingsKey::QuickPrompts)?;
        Ok(value.as_ref().map(sanitize_quick_prompts).unwrap_or_default())
    }

    pub fn set_quick_prompts(&mut self, prompts: &[QuickPrompt]) -> Result<Vec<QuickPrompt>, StorageError> {
        let next = sanitize_quick_prompts(&serde_json::to_value(prompts)?);
        self.store.set(SettingsKey::QuickPrompts, serde_json::to_value(&next)?)?;
        Ok(next)
    }

    pub fn get_rules(&self) -> Result<Vec<Rule>, StorageError> {
        let value = self.store.get(SettingsKey::Rules)?;
        Ok(value.as_ref().map(sanitize_rules).unwrap_or_default())
    }

    pub fn set_rules(&mut self, rules: &[Rule]) -> Result<Vec<Rule>, StorageError> {
        let next = sanitize_rules(&serde_json::to_value(rules)?);
        self.store.set(SettingsKey::Rules, serde_json::to_value(&next)?)?;
        Ok(next)
    }

    pub fn get_active_rules_enforce(&self) -> Result<bool, StorageError> {
        let value = self.store.get(SettingsKey::ActiveRulesEnforce)?;
        Ok(sanitize_flag(value.as_ref(), true))
    }

    pub fn set_active_rules_enforce(&mut self, active: bool) -> Result<bool, StorageError> {
        self.store.set(SettingsKey::ActiveRulesEnforce, Value::Bool(active))?;
        Ok(active)
    }

    pub fn get_theme(&self) -> Result<Theme, StorageError> {
        let value = self.store.get(SettingsKey::Theme)?;
        Ok(Theme::from_value(value.as_ref()))
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Theme, StorageError> {
        self.store.set(SettingsKey::Theme, Value::String(theme.as_str().to_string()))?;
        Ok(theme)
    }

    /// Install hook: store the default prompts and rules when the stored
    /// lists are missing or empty. Returns whether anything was written.
    pub fn seed_defaults(&mut self) -> Result<bool, StorageError> {
        let mut seeded = false;

        if is_empty_list(self.store.get(SettingsKey::QuickPrompts)?.as_ref()) {
            self.store.set(
                SettingsKey::QuickPrompts,
                serde_json::to_value(default_quick_prompts())?,
            )?;
            seeded = true;
        }

        if is_empty_list(self.store.get(SettingsKey::Rules)?.as_ref()) {
            self.store.set(SettingsKey::Rules, serde_json::to_value(default_rules())?)?;
            seeded = true;
        }

        if seeded {
            info!("seeded default quick prompts and rules");
        }
        Ok(seeded)
    }
}

fn is_empty_list(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .map(|items| items.is_empty())
        .unwrap_or(true)
}
