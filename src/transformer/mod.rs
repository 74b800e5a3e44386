//! Message text transformations applied before submission

pub mod shorthand;
pub mod directives;

pub use shorthand::{PromptMap, ShorthandExpander};
pub use directives::{DirectiveInjector, DirectiveSet};

use crate::field::TextField;
use crate::settings::SettingsCache;

/// Expand finished quick prompt codes in the field using the cached prompts
pub fn expand_shorthand<F: TextField + ?Sized>(field: &mut F, settings: &SettingsCache) -> bool {
    ShorthandExpander::new(settings.prompts()).expand(field)
}

/// Rewrite the field's directive prefix from the cached settings
pub fn ensure_directives<F: TextField + ?Sized>(field: &mut F, settings: &SettingsCache) -> bool {
    DirectiveInjector::from_settings(settings).ensure_directives(field)
}
