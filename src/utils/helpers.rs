//! Helper utility functions

use serde_json::Value;

/// Fallback stem used when a title sanitizes to nothing
pub const DEFAULT_FILENAME_STEM: &str = "deepseek-chat";

/// Read a loosely typed storage value as text.
///
/// Strings are returned as-is, numbers and booleans are stringified, anything
/// else (missing, null, arrays, objects) becomes the empty string.
pub fn loose_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Join the whitespace-separated words of `text` with single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `...`
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

/// Sanitize a conversation title for use as a file name stem
pub fn sanitize_filename(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let stem: String = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect();

    if stem.is_empty() {
        DEFAULT_FILENAME_STEM.to_string()
    } else {
        stem
    }
}

/// Normalize a user-entered download name so it always ends in `.md`
pub fn markdown_filename(input: &str) -> String {
    let name = input.trim();
    if name.is_empty() {
        return format!("{}.md", DEFAULT_FILENAME_STEM);
    }
    if name.ends_with(".md") {
        name.to_string()
    } else {
        format!("{}.md", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loose_string() {
        assert_eq!(loose_string(Some(&json!("abc"))), "abc");
        assert_eq!(loose_string(Some(&json!(42))), "42");
        assert_eq!(loose_string(Some(&json!(null))), "");
        assert_eq!(loose_string(Some(&json!(["a"]))), "");
        assert_eq!(loose_string(None), "");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Simplified\n\tChinese  "), "Simplified Chinese");
        assert_eq!(collapse_whitespace(" \n "), "");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 60), "short");
        let long = "x".repeat(61);
        assert_eq!(truncate_with_ellipsis(&long, 60), format!("{}...", "x".repeat(60)));
        assert_eq!(truncate_with_ellipsis("äöüß", 2), "äö...");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("My Chat: Rust & Go!"), "my-chat-rust-go");
        assert_eq!(sanitize_filename("   "), "deepseek-chat");
        assert_eq!(sanitize_filename("日本語"), "deepseek-chat");
        assert_eq!(sanitize_filename(&"a ".repeat(40)).len(), 50);
    }

    #[test]
    fn test_markdown_filename() {
        assert_eq!(markdown_filename(""), "deepseek-chat.md");
        assert_eq!(markdown_filename("notes"), "notes.md");
        assert_eq!(markdown_filename(" notes.md "), "notes.md");
    }
}
