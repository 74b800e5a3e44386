//! Rules and language directive injection
//!
//! Outgoing messages start with zero or more directive blocks, rules block
//! first:
//!
//! ```text
//! [Rules]
//! 1. <rule text>
//! [/Rules]
//!
//! Please respond only in <language>.
//!
//! ```
//!
//! Injection is a rewrite, not an append: any leading blocks already in the
//! field are stripped and the currently desired ones are put back, so
//! repeated submits never stack prefixes.

use crate::field::TextField;
use crate::models::Rule;
use crate::settings::SettingsCache;
use crate::utils::collapse_whitespace;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

pub const RULES_OPEN: &str = "[Rules]";
pub const RULES_CLOSE: &str = "[/Rules]";

lazy_static! {
    static ref RULES_BLOCK: Regex =
        Regex::new(r"(?i)^\[Rules\]\n(?s:.*?)\[/Rules\]\n\n").unwrap();
    static ref LANGUAGE_BLOCK: Regex =
        Regex::new(r"(?is)^Please respond only in .+?\.\n\n").unwrap();
}

/// Render the rules block for the enabled rules, numbered from 1.
///
/// `None` when no rule is enabled.
pub fn rules_block(rules: &[Rule]) -> Option<String> {
    let lines: Vec<String> = rules
        .iter()
        .filter(|rule| rule.enabled)
        .enumerate()
        .map(|(i, rule)| format!("{}. {}", i + 1, rule.text))
        .collect();

    if lines.is_empty() {
        return None;
    }

    Some(format!("{}\n{}\n{}\n\n", RULES_OPEN, lines.join("\n"), RULES_CLOSE))
}

pub fn language_block(language: &str) -> String {
    format!("Please respond only in {}.\n\n", language)
}

/// Strip every leading directive block, in whatever order they were composed
pub fn strip_directives(text: &str) -> &str {
    let mut body = text;
    loop {
        if let Some(m) = RULES_BLOCK.find(body) {
            body = &body[m.end()..];
        } else if let Some(m) = LANGUAGE_BLOCK.find(body) {
            body = &body[m.end()..];
        } else {
            return body;
        }
    }
}

/// The prefix blocks currently wanted in front of every message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveSet {
    /// `Some` while rules enforcement is on
    rules: Option<Vec<Rule>>,
    /// `Some` while language enforcement is on
    language: Option<String>,
}

impl DirectiveSet {
    pub fn new(
        rules_enforce: bool,
        rules: &[Rule],
        language_enforce: bool,
        language: &str,
    ) -> Self {
        Self {
            rules: rules_enforce.then(|| rules.to_vec()),
            language: language_enforce.then(|| collapse_whitespace(language)),
        }
    }

    pub fn from_settings(cache: &SettingsCache) -> Self {
        Self::new(
            cache.rules_enforce(),
            cache.rules(),
            cache.language_enforce(),
            cache.selected_language(),
        )
    }

    /// Both enforcements off: the injector leaves messages alone entirely
    pub fn is_inert(&self) -> bool {
        self.rules.is_none() && self.language.is_none()
    }

    /// Concatenated prefix, rules block before language block
    pub fn prefix(&self) -> String {
        let mut prefix = String::new();
        if let Some(block) = self.rules.as_deref().and_then(rules_block) {
            prefix.push_str(&block);
        }
        if let Some(language) = &self.language {
            prefix.push_str(&language_block(language));
        }
        prefix
    }
}

pub struct DirectiveInjector {
    directives: DirectiveSet,
}

impl DirectiveInjector {
    pub fn new(directives: DirectiveSet) -> Self {
        Self { directives }
    }

    pub fn from_settings(cache: &SettingsCache) -> Self {
        Self::new(DirectiveSet::from_settings(cache))
    }

    /// Compute the rewritten text, or `None` when the text must stay as is
    pub fn apply(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() || self.directives.is_inert() {
            return None;
        }

        let body = strip_directives(text);
        let desired = format!("{}{}", self.directives.prefix(), body);

        if desired == text {
            None
        } else {
            Some(desired)
        }
    }

    /// Make the field start with exactly the desired directive blocks.
    ///
    /// At most one write; none when the field already matches.
    pub fn ensure_directives<F: TextField + ?Sized>(&self, field: &mut F) -> bool {
        let current = field.read();
        match self.apply(&current) {
            Some(next) => {
                debug!("rewrote directive prefix");
                field.write(&next);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::MemoryField;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn injector(rules_enforce: bool, rules: &[Rule], language_enforce: bool, language: &str) -> DirectiveInjector {
        DirectiveInjector::new(DirectiveSet::new(rules_enforce, rules, language_enforce, language))
    }

    fn ensure(injector: &DirectiveInjector, text: &str) -> String {
        injector.apply(text).unwrap_or_else(|| text.to_string())
    }

    #[test]
    fn test_rules_block_skips_disabled_and_renumbers() {
        let rules = [
            Rule::new("Be terse", true),
            Rule::new("Be kind", false),
            Rule::new("Cite sources", true),
        ];
        assert_eq!(
            rules_block(&rules).unwrap(),
            "[Rules]\n1. Be terse\n2. Cite sources\n[/Rules]\n\n"
        );
        assert_eq!(rules_block(&[Rule::new("off", false)]), None);
        assert_eq!(rules_block(&[]), None);
    }

    #[test]
    fn test_only_enabled_rule_is_injected() {
        let rules = [Rule::new("Be terse", true), Rule::new("Be kind", false)];
        let injector = injector(true, &rules, false, "English");

        assert_eq!(ensure(&injector, "Hi"), "[Rules]\n1. Be terse\n[/Rules]\n\nHi");
    }

    #[test]
    fn test_stale_prefixes_replaced() {
        let injector = injector(true, &[], true, "Spanish");
        let prior = "[Rules]\n1. Old\n[/Rules]\n\nPlease respond only in French.\n\nHello";

        assert_eq!(ensure(&injector, prior), "Please respond only in Spanish.\n\nHello");
    }

    #[test]
    fn test_both_blocks_in_fixed_order() {
        let rules = [Rule::new("Be terse", true)];
        let injector = injector(true, &rules, true, "German");

        assert_eq!(
            ensure(&injector, "Hallo"),
            "[Rules]\n1. Be terse\n[/Rules]\n\nPlease respond only in German.\n\nHallo"
        );
    }

    #[test]
    fn test_language_first_composition_is_recognized() {
        let rules = [Rule::new("Be terse", true)];
        let injector = injector(true, &rules, true, "German");
        let reversed = "Please respond only in German.\n\n[Rules]\n1. Be terse\n[/Rules]\n\nHallo";

        assert_eq!(
            ensure(&injector, reversed),
            "[Rules]\n1. Be terse\n[/Rules]\n\nPlease respond only in German.\n\nHallo"
        );
    }

    #[test_case("Hello" ; "plain")]
    #[test_case("[Rules]\n1. x\n[/Rules]\n\nHi" ; "with stale rules")]
    #[test_case("Please respond only in French.\n\nBonjour" ; "with stale language")]
    fn test_inert_when_both_enforcements_off(text: &str) {
        let injector = injector(false, &[Rule::new("x", true)], false, "French");
        assert_eq!(injector.apply(text), None);
    }

    #[test_case("Hello")]
    #[test_case("")]
    #[test_case("  \n")]
    #[test_case("[Rules]\n1. Old\n[/Rules]\n\n[Rules]\n1. Older\n[/Rules]\n\nHi")]
    #[test_case("Please respond only in A.\n\nPlease respond only in B.\n\nHi")]
    #[test_case("Please respond only in French.\n\n")]
    #[test_case("[rules]\n1. lower\n[/rules]\n\nx")]
    fn test_idempotent(text: &str) {
        let configs = [
            injector(true, &[Rule::new("R", true)], true, "Spanish"),
            injector(true, &[Rule::new("R", true)], false, "Spanish"),
            injector(false, &[], true, "Spanish"),
            injector(true, &[], false, "Spanish"),
            injector(false, &[], true, "Simplified\nChinese"),
            injector(true, &[Rule::new("R", true)], true, " Old\tChurch  Slavonic "),
        ];
        for injector in &configs {
            let once = ensure(injector, text);
            assert_eq!(ensure(injector, &once), once);
        }
    }

    #[test]
    fn test_multiline_language_is_one_line_directive() {
        let injector = injector(false, &[], true, "Simplified\nChinese");
        let once = ensure(&injector, "Hello");

        assert_eq!(once, "Please respond only in Simplified Chinese.\n\nHello");
        assert_eq!(ensure(&injector, &once), once);
        assert_eq!(
            ensure(&injector, "Please respond only in Simplified\nChinese.\n\nHello"),
            once
        );
    }

    #[test]
    fn test_blank_field_untouched() {
        let injector = injector(true, &[Rule::new("R", true)], true, "Spanish");
        let mut field = MemoryField::new("   \n\t");

        assert!(!injector.ensure_directives(&mut field));
        assert_eq!(field.writes(), 0);
        assert_eq!(field.text(), "   \n\t");
    }

    #[test]
    fn test_repeated_submits_write_once() {
        let injector = injector(false, &[], true, "Japanese");
        let mut field = MemoryField::new("Hello");

        assert!(injector.ensure_directives(&mut field));
        assert!(!injector.ensure_directives(&mut field));
        assert_eq!(field.writes(), 1);
        assert_eq!(field.text(), "Please respond only in Japanese.\n\nHello");
    }

    #[test]
    fn test_partially_deleted_prefix_is_treated_as_body() {
        let injector = injector(false, &[], true, "Japanese");
        let edited = "Please respond only in Japan\n\nHello";

        assert_eq!(
            ensure(&injector, edited),
            "Please respond only in Japanese.\n\nPlease respond only in Japan\n\nHello"
        );
    }
}
