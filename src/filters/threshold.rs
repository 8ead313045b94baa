//! Level threshold filter

use crate::core::{
    config, Filter, FilterDecision, LevelRegistry, LogEvent, LogLevel, LoggerError, Result,
};
use serde_json::Value;
use std::sync::Arc;

pub const TYPE_NAME: &str = "ThresholdFilter";

/// Matches events whose level passes `level` in the context's level order
#[derive(Debug, Clone)]
pub struct ThresholdFilter {
    level: LogLevel,
    levels: LevelRegistry,
    on_match: FilterDecision,
    on_mismatch: FilterDecision,
}

impl ThresholdFilter {
    pub fn new(level: LogLevel, levels: LevelRegistry) -> Self {
        Self {
            level,
            levels,
            on_match: FilterDecision::Neutral,
            on_mismatch: FilterDecision::Deny,
        }
    }

    #[must_use]
    pub fn with_decisions(mut self, on_match: FilterDecision, on_mismatch: FilterDecision) -> Self {
        self.on_match = on_match;
        self.on_mismatch = on_mismatch;
        self
    }

    pub fn level(&self) -> &LogLevel {
        &self.level
    }

    /// Factory for the `ThresholdFilter` type
    ///
    /// Options: `level` (required), `onMatch` (default `neutral`),
    /// `onMismatch` (default `deny`).
    pub fn factory(options: &Value, levels: &LevelRegistry) -> Result<Arc<dyn Filter>> {
        let name = config::option_str(options, "level")
            .ok_or_else(|| LoggerError::config(TYPE_NAME, "missing 'level' option"))?;
        let filter = Self::new(levels.resolve(name)?, levels.clone()).with_decisions(
            config::option_decision(options, "onMatch", FilterDecision::Neutral)?,
            config::option_decision(options, "onMismatch", FilterDecision::Deny)?,
        );
        Ok(Arc::new(filter))
    }
}

impl Filter for ThresholdFilter {
    fn filter(&self, event: &LogEvent) -> FilterDecision {
        if self.levels.is_below(event.level(), &self.level) {
            self.on_match
        } else {
            self.on_mismatch
        }
    }

    fn type_name(&self) -> &str {
        TYPE_NAME
    }
}
