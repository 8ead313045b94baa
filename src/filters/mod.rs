//! Filter implementations

pub mod regex;
pub mod threshold;

pub use self::regex::RegexFilter;
pub use threshold::ThresholdFilter;

pub use crate::core::{CompositeFilter, Filter, FilterDecision};
