//! Small shared helpers

pub mod helpers;

pub use helpers::*;
