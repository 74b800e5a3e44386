//! Settings collaborator: storage contract, sanitization, defaults and the
//! page-side cache

pub mod store;
pub mod sanitize;
pub mod service;
pub mod cache;
pub mod defaults;
pub mod editor;

pub use store::{FileStore, MemoryStore, SettingsStore};
pub use sanitize::{code_key, normalize_code, sanitize_quick_prompts, sanitize_rules};
pub use service::Settings;
pub use cache::SettingsCache;
pub use defaults::{default_quick_prompts, default_rules, is_curated_language, CURATED_LANGUAGES};
