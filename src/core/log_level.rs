//! Log level definitions and the ordered level registry
//!
//! Levels are plain names. Their relative severity lives in a
//! [`LevelRegistry`], which keeps concrete levels ordered from most severe
//! to most verbose and brackets them with the `off` and `all` sentinels.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Keyword used in configuration for "take the level from the parent"
pub const INHERIT: &str = "inherit";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LogLevel(Cow<'static, str>);

impl LogLevel {
    /// Sentinel threshold that lets every concrete level through
    pub const ALL: LogLevel = LogLevel(Cow::Borrowed("all"));
    /// Sentinel threshold that blocks everything
    pub const OFF: LogLevel = LogLevel(Cow::Borrowed("off"));

    pub const ERROR: LogLevel = LogLevel(Cow::Borrowed("error"));
    pub const WARN: LogLevel = LogLevel(Cow::Borrowed("warn"));
    pub const INFO: LogLevel = LogLevel(Cow::Borrowed("info"));
    pub const LOG: LogLevel = LogLevel(Cow::Borrowed("log"));
    pub const TRACE: LogLevel = LogLevel(Cow::Borrowed("trace"));

    /// Create a level from a name; names are case-insensitive
    pub fn new(name: impl AsRef<str>) -> Self {
        LogLevel(Cow::Owned(name.as_ref().trim().to_lowercase()))
    }

    pub fn to_str(&self) -> &str {
        &self.0
    }

    /// `true` for `all` and `off`
    pub fn is_sentinel(&self) -> bool {
        *self == LogLevel::ALL || *self == LogLevel::OFF
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Invalid log level: empty name".to_string());
        }
        if trimmed.eq_ignore_ascii_case(INHERIT) {
            return Err(format!("Invalid log level: '{}' is reserved", s));
        }
        Ok(LogLevel::new(trimmed))
    }
}

impl From<String> for LogLevel {
    fn from(s: String) -> Self {
        LogLevel::new(s)
    }
}

impl From<&str> for LogLevel {
    fn from(s: &str) -> Self {
        LogLevel::new(s)
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.0.into_owned()
    }
}

/// Ordered set of severities
///
/// Position 0 is the most severe level. A candidate level passes a
/// threshold when its position is less than or equal to the threshold's.
#[derive(Debug, Clone)]
pub struct LevelRegistry {
    ordered: Vec<LogLevel>,
}

impl LevelRegistry {
    /// Registry seeded with `error`, `warn`, `info`, `log`, `trace`
    pub fn new() -> Self {
        Self {
            ordered: vec![
                LogLevel::ERROR,
                LogLevel::WARN,
                LogLevel::INFO,
                LogLevel::LOG,
                LogLevel::TRACE,
            ],
        }
    }

    /// Concrete levels, most severe first
    pub fn levels(&self) -> &[LogLevel] {
        &self.ordered
    }

    /// Register `name` directly after (less severe than) `after`
    ///
    /// Without a reference level the new level becomes the most verbose one.
    pub fn register(&mut self, name: &str, after: Option<&str>) -> Result<LogLevel> {
        let level: LogLevel = name
            .parse()
            .map_err(|e: String| LoggerError::config("levels", e))?;
        if self.contains(&level) {
            return Err(LoggerError::DuplicateLevel(level.to_string()));
        }

        let position = match after {
            Some(reference) => {
                let reference = LogLevel::new(reference);
                let idx = self
                    .position(&reference)
                    .ok_or_else(|| LoggerError::UnknownReferenceLevel(reference.to_string()))?;
                idx + 1
            }
            None => self.ordered.len(),
        };

        self.ordered.insert(position, level.clone());
        Ok(level)
    }

    /// Whether `level` is a registered concrete level or a sentinel
    pub fn contains(&self, level: &LogLevel) -> bool {
        level.is_sentinel() || self.position(level).is_some()
    }

    /// Validate a configured level name
    pub fn resolve(&self, name: &str) -> Result<LogLevel> {
        let level = LogLevel::new(name);
        if self.contains(&level) {
            Ok(level)
        } else {
            Err(LoggerError::UnknownLevel(name.to_string()))
        }
    }

    fn position(&self, level: &LogLevel) -> Option<usize> {
        self.ordered.iter().position(|l| l == level)
    }

    /// Does a message at `candidate` pass a node whose threshold is `threshold`?
    ///
    /// `off` never passes and blocks everything; `all` lets every level
    /// through except `off`. Unregistered names never pass.
    pub fn is_below(&self, candidate: &LogLevel, threshold: &LogLevel) -> bool {
        if *threshold == LogLevel::OFF || *candidate == LogLevel::OFF {
            return false;
        }
        if *threshold == LogLevel::ALL {
            return true;
        }
        match (self.position(candidate), self.position(threshold)) {
            (Some(c), Some(t)) => c <= t,
            _ => false,
        }
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
