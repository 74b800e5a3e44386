//! WebAssembly bindings for the content script and popup

use crate::error::ExportError;
use crate::export;
use crate::extractor;
use crate::models::{ExportResponse, ExportedChat, SettingsChange};
use crate::settings::{default_quick_prompts, default_rules, SettingsCache, CURATED_LANGUAGES};
use crate::transformer::{ensure_directives, expand_shorthand};
use crate::web::{active_document, attach_listeners, console_log, find_input_element, snapshot_document};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

/// Page-side state: the settings cache shared with every listener
#[wasm_bindgen]
pub struct ContentScript {
    settings: Rc<RefCell<SettingsCache>>,
    attached: bool,
}

#[wasm_bindgen]
impl ContentScript {
    /// Starts with the default settings until `load_settings` is called
    #[wasm_bindgen(constructor)]
    pub fn new() -> ContentScript {
        ContentScript {
            settings: Rc::new(RefCell::new(SettingsCache::default())),
            attached: false,
        }
    }

    /// Replace the cache from the object returned by `chrome.storage.local.get`
    pub fn load_settings(&self, values_json: &str) -> Result<(), JsValue> {
        let values: Value =
            serde_json::from_str(values_json).map_err(|e| js_error("Invalid settings", e))?;
        let cache = match values.as_object() {
            Some(map) => SettingsCache::from_storage_values(map),
            None => SettingsCache::default(),
        };
        *self.settings.borrow_mut() = cache;
        console_log!("deepseek-toolkit: settings loaded");
        Ok(())
    }

    /// Apply one `storage.onChanged` entry; `new_value_json` is absent when
    /// the key was removed. Returns whether the cache tracks the key.
    pub fn apply_storage_change(&self, key: &str, new_value_json: Option<String>) -> Result<bool, JsValue> {
        let new_value = match new_value_json {
            Some(json) => Some(
                serde_json::from_str::<Value>(&json).map_err(|e| js_error("Invalid setting value", e))?,
            ),
            None => None,
        };
        let change = SettingsChange {
            key: key.to_string(),
            new_value,
        };
        Ok(self.settings.borrow_mut().apply_change(&change))
    }

    /// Register the page listeners once
    pub fn attach(&mut self) -> Result<(), JsValue> {
        if self.attached {
            return Ok(());
        }
        let document = active_document().ok_or_else(|| JsValue::from_str("No document"))?;
        attach_listeners(&document, Rc::clone(&self.settings))?;
        self.attached = true;
        Ok(())
    }

    /// Run the shorthand expander on the message field
    pub fn expand_active_field(&self) -> bool {
        let Some(mut field) = active_document().and_then(|d| find_input_element(&d)) else {
            return false;
        };
        expand_shorthand(&mut field, &self.settings.borrow())
    }

    /// Run the directive injector on the message field
    pub fn ensure_active_field(&self) -> bool {
        let Some(mut field) = active_document().and_then(|d| find_input_element(&d)) else {
            return false;
        };
        ensure_directives(&mut field, &self.settings.borrow())
    }

    /// Answer an export request with `{title, markdown}` or `{error}`
    pub fn export_chat(&self) -> Result<String, JsValue> {
        let result = active_document()
            .and_then(|d| snapshot_document(&d))
            .ok_or_else(|| ExportError::Scrape("page has no body".to_string()))
            .and_then(|document| extractor::export_chat(&document));

        if let Err(e) = &result {
            console_log!("deepseek-toolkit: export failed: {}", e);
        }

        serde_json::to_string(&ExportResponse::from(result))
            .map_err(|e| js_error("Failed to serialize export", e))
    }
}

impl Default for ContentScript {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the active tab before forwarding an export request.
///
/// Takes the tab as JSON (`null` when there is none) and returns
/// `{"tabId": n}` or `{"error": message}`.
#[wasm_bindgen]
pub fn resolve_export_tab(tab_json: &str) -> Result<String, JsValue> {
    let tab: Option<export::TabInfo> =
        serde_json::from_str(tab_json).map_err(|e| js_error("Invalid tab", e))?;

    let response = match export::resolve_export_tab(tab.as_ref()) {
        Ok(id) => serde_json::json!({ "tabId": id }),
        Err(e) => serde_json::json!({ "error": e.to_string() }),
    };
    Ok(response.to_string())
}

/// Response for an export request the page never answered, e.g. when the
/// content script is not injected
#[wasm_bindgen]
pub fn messaging_failure(message: &str) -> Result<String, JsValue> {
    let response = ExportResponse::from(Err::<ExportedChat, _>(ExportError::Messaging(message.to_string())));
    serde_json::to_string(&response).map_err(|e| js_error("Failed to serialize export", e))
}

/// Suggested download name for an exported chat title
#[wasm_bindgen]
pub fn export_filename(title: &str) -> String {
    export::export_filename(title)
}

/// Curated language names as a JSON array
#[wasm_bindgen]
pub fn curated_languages() -> Result<String, JsValue> {
    serde_json::to_string(CURATED_LANGUAGES).map_err(|e| js_error("Failed to serialize languages", e))
}

/// Default quick prompts and rules, in storage layout
#[wasm_bindgen]
pub fn default_settings() -> Result<String, JsValue> {
    let defaults = serde_json::json!({
        "quickPrompts": default_quick_prompts(),
        "rules": default_rules(),
    });
    serde_json::to_string_pretty(&defaults).map_err(|e| js_error("Failed to serialize defaults", e))
}
