//! Quick prompt expansion
//!
//! A trigger token is a run of non-whitespace starting with `/`, preceded by
//! start-of-text or whitespace. It only becomes eligible once followed by
//! whitespace, i.e. once the user has finished typing it.

use crate::field::TextField;
use crate::models::{QuickPrompt, TRIGGER_CHAR};
use crate::settings::sanitize::{code_key, MIN_CODE_LEN};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

lazy_static! {
    // Group 2 is the token; the trailing whitespace is checked by hand since
    // the regex crate has no lookahead.
    static ref TRIGGER_TOKEN: Regex = Regex::new(&format!(
        r"(^|\s)({}\S+)",
        regex::escape(&TRIGGER_CHAR.to_string())
    ))
    .unwrap();
}

/// Lookup from normalized, lowercased code to template text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptMap {
    entries: HashMap<String, String>,
}

impl PromptMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a prompt list; later entries win on conflicting codes
    pub fn from_prompts(prompts: &[QuickPrompt]) -> Self {
        let mut map = Self::new();
        for prompt in prompts {
            map.insert(&prompt.code, &prompt.prompt);
        }
        map
    }

    /// Register a template. Codes shorter than two characters or empty
    /// templates are ignored.
    pub fn insert(&mut self, code: &str, template: &str) -> bool {
        let key = code_key(code);
        if key.chars().count() < MIN_CODE_LEN || template.is_empty() {
            return false;
        }
        self.entries.insert(key, template.to_string());
        true
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(&code_key(code)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Replaces finished trigger tokens with their templates
pub struct ShorthandExpander<'a> {
    prompts: &'a PromptMap,
}

impl<'a> ShorthandExpander<'a> {
    pub fn new(prompts: &'a PromptMap) -> Self {
        Self { prompts }
    }

    /// Expand every eligible token in one pass.
    ///
    /// Returns `None` when nothing was replaced so callers can skip the write.
    pub fn expand_text(&self, text: &str) -> Option<String> {
        if self.prompts.is_empty() {
            return None;
        }

        let mut expanded = String::with_capacity(text.len());
        let mut last = 0;
        let mut replaced = 0;

        for caps in TRIGGER_TOKEN.captures_iter(text) {
            let Some(token) = caps.get(2) else {
                continue;
            };

            let finished = text[token.end()..]
                .chars()
                .next()
                .map_or(false, char::is_whitespace);
            if !finished {
                continue;
            }

            let Some(template) = self.prompts.get(token.as_str()) else {
                continue;
            };

            expanded.push_str(&text[last..token.start()]);
            expanded.push_str(template);
            last = token.end();
            replaced += 1;
        }

        if replaced == 0 {
            return None;
        }

        expanded.push_str(&text[last..]);
        debug!(replaced, "expanded quick prompt codes");
        Some(expanded)
    }

    /// Expand the field's text in place; no write happens when nothing matched
    pub fn expand<F: TextField + ?Sized>(&self, field: &mut F) -> bool {
        let current = field.read();
        match self.expand_text(&current) {
            Some(next) => {
                field.write(&next);
                true
            }
            None => false,
        }
    }
}
