//! Layout implementations

pub mod json;
pub mod pattern;

pub use json::JsonLayout;
pub use pattern::PatternLayout;

pub use crate::core::Layout;
