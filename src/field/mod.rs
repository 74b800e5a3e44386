//! Text-field adapter contract
//!
//! The page has two kinds of editable surface: value-bearing controls
//! (`textarea`, `input`) and rich-text regions (`contenteditable`). Both are
//! reached through [`TextField`] so the expander and injector never branch on
//! representation. The browser implementation lives in `crate::web::field`.

/// Notification a write produces for observers of the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNotification {
    /// `input` event; `data` carries the inserted text for rich regions
    Input { data: Option<String> },
    /// `change` event
    Change,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `textarea` / `input`: written through the native value setter
    Value,
    /// `contenteditable` region: written through an editing command
    RichText,
}

/// Read/write access to the message field.
///
/// After `write(text)`, `read()` returns `text` (or a normalized equivalent)
/// and the host page has been notified of the edit.
pub trait TextField {
    fn read(&self) -> String;

    fn write(&mut self, text: &str);

    fn kind(&self) -> FieldKind;
}

/// In-process field that records the notifications a write would dispatch
#[derive(Debug, Clone)]
pub struct MemoryField {
    text: String,
    kind: FieldKind,
    notifications: Vec<FieldNotification>,
    writes: usize,
}

impl MemoryField {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: FieldKind::Value,
            notifications: Vec::new(),
            writes: 0,
        }
    }

    pub fn rich_text(text: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::RichText,
            ..Self::new(text)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn notifications(&self) -> &[FieldNotification] {
        &self.notifications
    }
}

impl TextField for MemoryField {
    fn read(&self) -> String {
        self.text.clone()
    }

    fn write(&mut self, text: &str) {
        self.text = text.to_string();
        self.writes += 1;
        match self.kind {
            FieldKind::Value => {
                self.notifications.push(FieldNotification::Input { data: None });
                self.notifications.push(FieldNotification::Change);
            }
            FieldKind::RichText => {
                self.notifications.push(FieldNotification::Input {
                    data: Some(text.to_string()),
                });
            }
        }
    }

    fn kind(&self) -> FieldKind {
        self.kind
    }
}
