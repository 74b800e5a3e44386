//! Core data models shared by the pipelines

pub mod settings;
pub mod document;

pub use settings::*;
pub use document::*;
