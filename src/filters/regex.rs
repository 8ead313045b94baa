//! Message regex filter

use crate::core::{
    config, Filter, FilterDecision, LevelRegistry, LogEvent, LoggerError, Result,
};
use regex_lite::Regex;
use serde_json::Value;
use std::sync::Arc;

pub const TYPE_NAME: &str = "RegexFilter";

/// Matches a regular expression against the message text
///
/// With `use_raw_message` the raw format string is tested instead of the
/// rendered text, falling back to the rendered text for messages that have
/// no format string.
#[derive(Debug, Clone)]
pub struct RegexFilter {
    regex: Regex,
    use_raw_message: bool,
    on_match: FilterDecision,
    on_mismatch: FilterDecision,
}

impl RegexFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| LoggerError::config(TYPE_NAME, format!("invalid regex '{}': {}", pattern, e)))?;
        Ok(Self {
            regex,
            use_raw_message: false,
            on_match: FilterDecision::Neutral,
            on_mismatch: FilterDecision::Deny,
        })
    }

    #[must_use]
    pub fn with_raw_message(mut self, use_raw_message: bool) -> Self {
        self.use_raw_message = use_raw_message;
        self
    }

    #[must_use]
    pub fn with_decisions(mut self, on_match: FilterDecision, on_mismatch: FilterDecision) -> Self {
        self.on_match = on_match;
        self.on_mismatch = on_mismatch;
        self
    }

    /// Factory for the `RegexFilter` type
    ///
    /// Options: `regex` (required), `useRawMsg`, `onMatch` (default
    /// `neutral`), `onMismatch` (default `deny`).
    pub fn factory(options: &Value, _levels: &LevelRegistry) -> Result<Arc<dyn Filter>> {
        let pattern = config::option_str(options, "regex")
            .ok_or_else(|| LoggerError::config(TYPE_NAME, "missing 'regex' option"))?;
        let filter = Self::new(pattern)?
            .with_raw_message(config::option_bool(options, "useRawMsg", false)?)
            .with_decisions(
                config::option_decision(options, "onMatch", FilterDecision::Neutral)?,
                config::option_decision(options, "onMismatch", FilterDecision::Deny)?,
            );
        Ok(Arc::new(filter))
    }
}

impl Filter for RegexFilter {
    fn filter(&self, event: &LogEvent) -> FilterDecision {
        let message = event.message();
        let text = match message.format() {
            Some(format) if self.use_raw_message => format,
            _ => message.formatted_message(),
        };
        if self.regex.is_match(text) {
            self.on_match
        } else {
            self.on_mismatch
        }
    }

    fn type_name(&self) -> &str {
        TYPE_NAME
    }
}
