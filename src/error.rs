//! Typed errors surfaced by the settings store and the export pipeline

use thiserror::Error;

/// Failures of the settings backing store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("settings storage is unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read settings: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(String),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reasons an export request could not produce a document.
///
/// The `Display` text is exactly what the popup shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("No active tab found.")]
    NoActiveTab,

    #[error("Please open a DeepSeek chat first.")]
    UnsupportedHost,

    #[error("No conversation found on this page.")]
    NoConversation,

    #[error("Failed to scrape chat: {0}")]
    Scrape(String),

    #[error("{0}")]
    Messaging(String),
}

/// Rejected settings edits; the `Display` text is the status line shown
#[derive(Debug, Error)]
pub enum EditError {
    #[error("Code is required and must start with /")]
    InvalidCode,

    #[error("Prompt is required.")]
    EmptyPrompt,

    #[error("Code already exists. Use another code or edit the existing one.")]
    DuplicateCode,

    #[error("No quick prompt {0}.")]
    UnknownCode(String),

    #[error("Rule text is required.")]
    EmptyRule,

    #[error("No rule #{0}.")]
    UnknownRule(usize),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
