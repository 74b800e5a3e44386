//! Editing operations behind the options pages and the CLI

use super::sanitize::{code_key, normalize_code, MIN_CODE_LEN};
use super::service::Settings;
use super::store::SettingsStore;
use crate::error::EditError;
use crate::models::{QuickPrompt, Rule};
use tracing::info;

impl<S: SettingsStore> Settings<S> {
    /// Add a quick prompt, or replace the one currently coded `editing`.
    ///
    /// The code is normalized first. It must not collide with another
    /// prompt's code (case-insensitively) unless it is the one being edited.
    pub fn save_quick_prompt(
        &mut self,
        code: &str,
        prompt: &str,
        editing: Option<&str>,
    ) -> Result<Vec<QuickPrompt>, EditError> {
        let code = normalize_code(code);
        let prompt = prompt.trim();

        if code.chars().count() < MIN_CODE_LEN {
            return Err(EditError::InvalidCode);
        }
        if prompt.is_empty() {
            return Err(EditError::EmptyPrompt);
        }

        let key = code_key(&code);
        let editing = editing.map(code_key);
        let mut prompts = self.get_quick_prompts()?;

        let duplicate = prompts.iter().any(|item| code_key(&item.code) == key);
        if duplicate && editing.as_deref() != Some(key.as_str()) {
            return Err(EditError::DuplicateCode);
        }

        let next = QuickPrompt::new(code, prompt);
        match editing {
            Some(old) if old == key => {
                for item in prompts.iter_mut().filter(|item| code_key(&item.code) == key) {
                    *item = next.clone();
                }
            }
            Some(old) => {
                prompts.retain(|item| code_key(&item.code) != old);
                prompts.push(next);
            }
            None => prompts.push(next),
        }

        let saved = self.set_quick_prompts(&prompts)?;
        info!(count = saved.len(), "saved quick prompts");
        Ok(saved)
    }

    pub fn remove_quick_prompt(&mut self, code: &str) -> Result<Vec<QuickPrompt>, EditError> {
        let key = code_key(code);
        let mut prompts = self.get_quick_prompts()?;
        let before = prompts.len();
        prompts.retain(|item| code_key(&item.code) != key);

        if prompts.len() == before {
            return Err(EditError::UnknownCode(normalize_code(code)));
        }
        Ok(self.set_quick_prompts(&prompts)?)
    }

    /// Append an enabled rule, or replace the text of rule `editing`
    /// (zero-based) keeping its enabled state
    pub fn save_rule(&mut self, text: &str, editing: Option<usize>) -> Result<Vec<Rule>, EditError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(EditError::EmptyRule);
        }

        let mut rules = self.get_rules()?;
        match editing {
            Some(index) => {
                let rule = rules.get_mut(index).ok_or(EditError::UnknownRule(index + 1))?;
                rule.text = text.to_string();
            }
            None => rules.push(Rule::new(text, true)),
        }

        Ok(self.set_rules(&rules)?)
    }

    /// Flip rule `index` (zero-based) on or off
    pub fn toggle_rule(&mut self, index: usize) -> Result<Vec<Rule>, EditError> {
        let mut rules = self.get_rules()?;
        let rule = rules.get_mut(index).ok_or(EditError::UnknownRule(index + 1))?;
        rule.enabled = !rule.enabled;
        Ok(self.set_rules(&rules)?)
    }

    pub fn remove_rule(&mut self, index: usize) -> Result<Vec<Rule>, EditError> {
        let mut rules = self.get_rules()?;
        if index >= rules.len() {
            return Err(EditError::UnknownRule(index + 1));
        }
        rules.remove(index);
        Ok(self.set_rules(&rules)?)
    }
}
