//! DeepSeek chat toolkit
//!
//! Quick prompt expansion, rule and language directive injection, and
//! conversation export to Markdown for the DeepSeek web chat. The core works
//! on plain text and owned DOM snapshots; the `web` and `wasm` modules bind it
//! to a live page when compiled for WebAssembly.

pub mod error;
pub mod models;
pub mod settings;
pub mod field;
pub mod transformer;
pub mod dom;
pub mod extractor;
pub mod router;
pub mod export;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod web;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{EditError, ExportError, StorageError};
pub use models::{ExportDocument, ExportResponse, ExportedChat, QuickPrompt, Rule, SettingsChange, SettingsKey};
pub use settings::{Settings, SettingsCache, SettingsStore};
pub use field::{MemoryField, TextField};
pub use transformer::{ensure_directives, expand_shorthand, DirectiveInjector, ShorthandExpander};
pub use extractor::{export_chat, ConversationExtractor};
pub use router::{EventRouter, PageEvent, RouterAction};
