//! Key-value backing stores for settings

use crate::error::StorageError;
use crate::models::{SettingsChange, SettingsKey};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw key-value access to persisted settings.
///
/// Values are stored untyped; [`super::Settings`] applies sanitization on
/// both directions.
pub trait SettingsStore {
    fn get(&self, key: SettingsKey) -> Result<Option<Value>, StorageError>;

    fn set(&mut self, key: SettingsKey, value: Value) -> Result<(), StorageError>;

    /// Every known key that currently has a value, keyed by wire name
    fn get_all(&self) -> Result<Map<String, Value>, StorageError> {
        let mut all = Map::new();
        for key in SettingsKey::ALL {
            if let Some(value) = self.get(key)? {
                all.insert(key.as_str().to_string(), value);
            }
        }
        Ok(all)
    }
}

/// In-memory store that records the change notifications it would push
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<SettingsKey, Value>,
    changes: Vec<SettingsChange>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every access fails, as when extension storage is gone
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, key: SettingsKey, value: Value) -> Self {
        self.values.insert(key, value);
        self
    }

    /// Drain the notifications produced since the last call
    pub fn take_changes(&mut self) -> Vec<SettingsChange> {
        std::mem::take(&mut self.changes)
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable {
            Err(StorageError::Unavailable("storage area is not reachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: SettingsKey) -> Result<Option<Value>, StorageError> {
        self.check_available()?;
        Ok(self.values.get(&key).cloned())
    }

    fn set(&mut self, key: SettingsKey, value: Value) -> Result<(), StorageError> {
        self.check_available()?;
        self.values.insert(key, value.clone());
        self.changes.push(SettingsChange::new(key, value));
        Ok(())
    }
}

/// Settings persisted as a JSON object in a file.
///
/// The file is read as JSON5 so hand-edited files may carry comments and
/// trailing commas; writes produce plain pretty-printed JSON. A missing file
/// reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "settings file missing, using empty settings");
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        let parsed: Value = json5::from_str(&content)
            .map_err(|e| StorageError::Parse(format!("{}: {}", self.path.display(), e)))?;

        match parsed {
            Value::Object(map) => Ok(map),
            _ => Err(StorageError::Parse(format!(
                "{}: top level must be an object",
                self.path.display()
            ))),
        }
    }

    fn write_object(&self, object: &Map<String, Value>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(object)?;
        fs::write(&self.path, content).map_err(|e| {
            StorageError::Unavailable(format!("cannot write {}: {}", self.path.display(), e))
        })
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: SettingsKey) -> Result<Option<Value>, StorageError> {
        Ok(self.read_object()?.get(key.as_str()).cloned())
    }

    fn set(&mut self, key: SettingsKey, value: Value) -> Result<(), StorageError> {
        let mut object = self.read_object()?;
        object.insert(key.as_str().to_string(), value);
        self.write_object(&object)
    }

    fn get_all(&self) -> Result<Map<String, Value>, StorageError> {
        let object = self.read_object()?;
        Ok(object
            .into_iter()
            .filter(|(name, _)| SettingsKey::from_wire(name).is_some())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_records_changes() {
        let mut store = MemoryStore::new();
        store.set(SettingsKey::SelectedLanguage, json!("German")).unwrap();

        assert_eq!(store.get(SettingsKey::SelectedLanguage).unwrap(), Some(json!("German")));
        let changes = store.take_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].key, "selectedLanguage");
        assert!(store.take_changes().is_empty());
    }

    #[test]
    fn test_unavailable_store_fails() {
        let mut store = MemoryStore::unavailable();
        assert!(matches!(
            store.get(SettingsKey::Rules),
            Err(StorageError::Unavailable(_))
        ));
        assert!(store.set(SettingsKey::Rules, json!([])).is_err());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("settings.json"));
        assert_eq!(store.get(SettingsKey::Theme).unwrap(), None);
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_reads_json5_and_writes_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{
                // picked in the popup
                selectedLanguage: "Italian",
                unrelated: 1,
            }"#,
        )
        .unwrap();

        let mut store = FileStore::new(&path);
        assert_eq!(store.get(SettingsKey::SelectedLanguage).unwrap(), Some(json!("Italian")));

        store.set(SettingsKey::ActiveRulesEnforce, json!(false)).unwrap();
        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["activeRulesEnforce"], json!(false));
        assert_eq!(written["selectedLanguage"], json!("Italian"));

        let all = store.get_all().unwrap();
        assert!(all.contains_key("selectedLanguage"));
        assert!(!all.contains_key("unrelated"));
    }

    #[test]
    fn test_file_store_rejects_non_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get(SettingsKey::Rules), Err(StorageError::Parse(_))));
    }
}
