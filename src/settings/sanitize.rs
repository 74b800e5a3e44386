//! Sanitization applied to every value read from or written to storage
//!
//! Storage holds whatever the settings pages (or a hand-edited settings
//! file) put there. Malformed and duplicate entries are dropped silently.

use crate::models::{QuickPrompt, Rule, DEFAULT_LANGUAGE, TRIGGER_CHAR};
use crate::utils::{collapse_whitespace, loose_string};
use serde_json::Value;
use std::collections::HashSet;

/// Shortest accepted code, trigger character included
pub const MIN_CODE_LEN: usize = 2;

/// Trim a code and make sure it starts with the trigger character
pub fn normalize_code(raw: &str) -> String {
    let code = raw.trim();
    if code.is_empty() {
        return String::new();
    }
    if code.starts_with(TRIGGER_CHAR) {
        code.to_string()
    } else {
        format!("{}{}", TRIGGER_CHAR, code)
    }
}

/// Case-insensitive lookup key for a code
pub fn code_key(raw: &str) -> String {
    normalize_code(raw).to_lowercase()
}

pub fn sanitize_quick_prompts(value: &Value) -> Vec<QuickPrompt> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut sanitized = Vec::new();

    for item in items {
        let code = normalize_code(&loose_string(item.get("code")));
        let prompt = loose_string(item.get("prompt")).trim().to_string();

        if code.chars().count() < MIN_CODE_LEN || prompt.is_empty() {
            continue;
        }
        if !seen.insert(code.to_lowercase()) {
            continue;
        }

        sanitized.push(QuickPrompt { code, prompt });
    }

    sanitized
}

pub fn sanitize_rules(value: &Value) -> Vec<Rule> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let text = loose_string(item.get("rule")).trim().to_string();
            if text.is_empty() {
                return None;
            }
            let enabled = item.get("active").and_then(Value::as_bool).unwrap_or(true);
            Some(Rule { text, enabled })
        })
        .collect()
}

/// Stored language name on a single line, or the default when missing or blank
pub fn sanitize_language(value: Option<&Value>) -> String {
    let language = collapse_whitespace(&loose_string(value));
    if language.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        language
    }
}

/// Stored toggle; anything that is not a boolean falls back to `default`
pub fn sanitize_flag(value: Option<&Value>, default: bool) -> bool {
    value.and_then(Value::as_bool).unwrap_or(default)
}
