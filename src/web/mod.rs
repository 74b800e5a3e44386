//! Browser bindings: live field access, DOM snapshots and event listeners

pub mod field;
pub mod listeners;
pub mod snapshot;

pub use field::{find_input_element, PageField};
pub use listeners::attach_listeners;
pub use snapshot::snapshot_document;

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

pub(crate) use console_log;

/// The page's `document`, when running in a window
pub fn active_document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}
