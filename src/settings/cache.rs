//! In-memory settings snapshot used by the page-side pipelines

use super::sanitize::{sanitize_flag, sanitize_language, sanitize_quick_prompts, sanitize_rules};
use super::service::Settings;
use super::store::SettingsStore;
use crate::error::StorageError;
use crate::models::{Rule, SettingsChange, SettingsKey, DEFAULT_LANGUAGE};
use crate::transformer::shorthand::PromptMap;
use serde_json::{Map, Value};
use tracing::debug;

/// Cached copy of everything the expander and injector read.
///
/// Built once at startup (or left at its defaults until storage answers) and
/// then kept current through [`SettingsCache::apply_change`]. Each change
/// replaces one whole cached value; nothing is merged.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsCache {
    selected_language: String,
    language_enforce: bool,
    prompts: PromptMap,
    rules: Vec<Rule>,
    rules_enforce: bool,
}

impl Default for SettingsCache {
    fn default() -> Self {
        Self {
            selected_language: DEFAULT_LANGUAGE.to_string(),
            language_enforce: true,
            prompts: PromptMap::default(),
            rules: Vec::new(),
            rules_enforce: true,
        }
    }
}

impl SettingsCache {
    /// Load every cached value through the typed settings accessors
    pub fn load<S: SettingsStore>(settings: &Settings<S>) -> Result<Self, StorageError> {
        Ok(Self {
            selected_language: settings.get_selected_language()?,
            language_enforce: settings.get_active_language_enforce()?,
            prompts: PromptMap::from_prompts(&settings.get_quick_prompts()?),
            rules: settings.get_rules()?,
            rules_enforce: settings.get_active_rules_enforce()?,
        })
    }

    /// Build from a raw storage object as returned by `storage.local.get`
    pub fn from_storage_values(values: &Map<String, Value>) -> Self {
        let mut cache = Self::default();
        for (key, value) in values {
            cache.apply_change(&SettingsChange {
                key: key.clone(),
                new_value: Some(value.clone()),
            });
        }
        cache
    }

    /// Apply one storage notification. Returns `false` for keys the cache
    /// does not track.
    pub fn apply_change(&mut self, change: &SettingsChange) -> bool {
        let Some(key) = SettingsKey::from_wire(&change.key) else {
            return false;
        };
        let value = change.new_value.as_ref();

        match key {
            SettingsKey::SelectedLanguage => {
                self.selected_language = sanitize_language(value);
            }
            SettingsKey::ActiveLanguageEnforce => {
                self.language_enforce = sanitize_flag(value, true);
            }
            SettingsKey::QuickPrompts => {
                let prompts = value.map(sanitize_quick_prompts).unwrap_or_default();
                self.prompts = PromptMap::from_prompts(&prompts);
            }
            SettingsKey::Rules => {
                self.rules = value.map(sanitize_rules).unwrap_or_default();
            }
            SettingsKey::ActiveRulesEnforce => {
                self.rules_enforce = sanitize_flag(value, true);
            }
            SettingsKey::Theme => return false,
        }

        debug!(key = %key, "applied settings change");
        true
    }

    pub fn selected_language(&self) -> &str {
        &self.selected_language
    }

    pub fn language_enforce(&self) -> bool {
        self.language_enforce
    }

    pub fn prompts(&self) -> &PromptMap {
        &self.prompts
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rules_enforce(&self) -> bool {
        self.rules_enforce
    }
}
