//! End-to-end tests: settings file → cache → router → message field

use deepseek_toolkit::field::{FieldNotification, MemoryField};
use deepseek_toolkit::models::{SettingsChange, SettingsKey};
use deepseek_toolkit::router::{ControlInfo, EventRouter, PageEvent};
use deepseek_toolkit::settings::{FileStore, MemoryStore, Settings, SettingsCache, SettingsStore};
use deepseek_toolkit::transformer::{ensure_directives, expand_shorthand};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn enter() -> PageEvent {
    PageEvent::KeyDown {
        key: "Enter".to_string(),
        shift: false,
        editable: true,
    }
}

#[test]
fn test_seeded_settings_drive_expansion_and_injection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let mut settings = Settings::new(FileStore::new(&path));
    assert!(settings.seed_defaults().unwrap());
    assert!(!settings.seed_defaults().unwrap());
    settings.set_selected_language("Spanish").unwrap();
    settings.set_active_rules_enforce(false).unwrap();

    let cache = SettingsCache::load(&settings).unwrap();
    let router = EventRouter::new(&cache);
    let mut field = MemoryField::new("/review fn main() {}");

    assert!(router.handle(&PageEvent::Input { editable: true }, Some(&mut field)));
    assert!(field.text().starts_with("Act as a principal engineer conducting a code review."));
    assert!(field.text().ends_with("Code to review:\n fn main() {}"));

    assert!(router.handle(&enter(), Some(&mut field)));
    assert!(field.text().starts_with("Please respond only in Spanish.\n\nAct as a principal engineer"));
    assert_eq!(field.writes(), 2);
}

#[test]
fn test_hand_edited_json5_settings_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            // edited by hand
            selectedLanguage: "German",
            activeLanguageEnforce: true,
            activeRulesEnforce: true,
            rules: [
                { rule: "Be terse", active: true },
                { rule: "Be kind", active: false },
                { rule: "   " },
            ],
            quickPrompts: [
                { code: "tldr", prompt: "Summarize:" },
                { code: "/TLDR", prompt: "duplicate" },
                { code: "/x", prompt: "" },
            ],
        }"#,
    )
    .unwrap();

    let settings = Settings::new(FileStore::new(&path));
    let cache = SettingsCache::load(&settings).unwrap();
    assert_eq!(cache.prompts().len(), 1);
    assert_eq!(cache.rules().len(), 2);

    let mut field = MemoryField::new("/tldr this article");
    assert!(expand_shorthand(&mut field, &cache));
    assert!(ensure_directives(&mut field, &cache));
    assert_eq!(
        field.text(),
        "[Rules]\n1. Be terse\n[/Rules]\n\nPlease respond only in German.\n\nSummarize: this article"
    );
}

#[test]
fn test_storage_changes_update_the_next_submit() {
    let mut settings = Settings::new(MemoryStore::new());
    settings.set_selected_language("French").unwrap();

    let mut cache = SettingsCache::default();
    for change in settings.store_mut().take_changes() {
        cache.apply_change(&change);
    }

    let mut field = MemoryField::new("Salut");
    assert!(ensure_directives(&mut field, &cache));
    assert_eq!(field.text(), "Please respond only in French.\n\nSalut");

    cache.apply_change(&SettingsChange::new(SettingsKey::SelectedLanguage, json!("Italian")));
    assert!(EventRouter::new(&cache).handle(&PageEvent::Submit, Some(&mut field)));
    assert_eq!(field.text(), "Please respond only in Italian.\n\nSalut");

    cache.apply_change(&SettingsChange::new(SettingsKey::ActiveLanguageEnforce, json!(false)));
    cache.apply_change(&SettingsChange::new(SettingsKey::ActiveRulesEnforce, json!(false)));
    assert!(!ensure_directives(&mut field, &cache));
    assert_eq!(field.writes(), 2);
}

#[test]
fn test_send_button_click_and_rich_text_field() {
    let mut cache = SettingsCache::default();
    cache.apply_change(&SettingsChange::new(
        SettingsKey::Rules,
        json!([{ "rule": "Cite sources" }]),
    ));
    cache.apply_change(&SettingsChange::new(SettingsKey::ActiveLanguageEnforce, json!(false)));

    let click = PageEvent::Pointer {
        control: Some(ControlInfo {
            aria_label: Some("Send".to_string()),
            text: String::new(),
            button_type: "button".to_string(),
            in_form: false,
        }),
    };

    let mut field = MemoryField::rich_text("Why is the sky blue?");
    assert!(EventRouter::new(&cache).handle(&click, Some(&mut field)));

    let expected = "[Rules]\n1. Cite sources\n[/Rules]\n\nWhy is the sky blue?";
    assert_eq!(field.text(), expected);
    assert_eq!(
        field.notifications(),
        &[FieldNotification::Input {
            data: Some(expected.to_string())
        }]
    );
}

#[test]
fn test_blank_field_untouched_by_every_event() {
    let cache = SettingsCache::default();
    let router = EventRouter::new(&cache);
    let mut field = MemoryField::new("  ");

    for event in [PageEvent::Input { editable: true }, enter(), PageEvent::Submit] {
        assert!(!router.handle(&event, Some(&mut field)));
    }
    assert_eq!(field.writes(), 0);
}

#[test]
fn test_unavailable_storage_keeps_defaults() {
    let settings = Settings::new(MemoryStore::unavailable());
    assert!(SettingsCache::load(&settings).is_err());
    assert!(settings.store().get_all().is_err());

    // The page keeps working on the default cache
    let cache = SettingsCache::default();
    let mut field = MemoryField::new("Hi");
    assert!(ensure_directives(&mut field, &cache));
    assert_eq!(field.text(), "Please respond only in English.\n\nHi");
}
