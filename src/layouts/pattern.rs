//! Pattern layout
//!
//! Conversion tokens:
//!
//! | Token      | Output                                             |
//! |------------|----------------------------------------------------|
//! | `%d`       | timestamp, ISO 8601 with milliseconds              |
//! | `%d{fmt}`  | timestamp, `fmt` is a keyword or strftime string   |
//! | `%p`       | level name in upper case                           |
//! | `%c`       | logger name, `root` for the root logger            |
//! | `%t`       | thread name or id                                  |
//! | `%m`       | formatted message                                  |
//! | `%n`       | newline                                            |
//! | `%%`       | a literal `%`                                      |

use crate::core::{
    config::{self, DEFAULT_CONSOLE_PATTERN},
    Layout, LogEvent, LoggerError, Result, TimestampFormat,
};
use serde_json::Value;
use std::sync::Arc;

pub const TYPE_NAME: &str = "PatternLayout";

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Date(TimestampFormat),
    Level,
    Logger,
    Thread,
    Message,
}

/// Renders events through a compiled conversion pattern
#[derive(Debug, Clone)]
pub struct PatternLayout {
    pattern: String,
    segments: Vec<Segment>,
}

impl PatternLayout {
    /// Compile a pattern; unknown tokens and unterminated `%d{` are errors
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let segments = compile(&pattern)?;
        Ok(Self { pattern, segments })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Factory for the `PatternLayout` type; reads the `pattern` option
    pub fn factory(options: &Value) -> Result<Arc<dyn Layout>> {
        let pattern = config::option_str(options, "pattern").unwrap_or(DEFAULT_CONSOLE_PATTERN);
        Ok(Arc::new(Self::new(pattern)?))
    }
}

impl Default for PatternLayout {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_CONSOLE_PATTERN.to_string(),
            segments: compile(DEFAULT_CONSOLE_PATTERN).unwrap_or_default(),
        }
    }
}

fn compile(pattern: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }

        let token = chars
            .next()
            .ok_or_else(|| LoggerError::pattern(pattern, "dangling '%' at end of pattern"))?;

        let segment = match token {
            '%' => {
                literal.push('%');
                continue;
            }
            'n' => {
                literal.push('\n');
                continue;
            }
            'd' if chars.peek() == Some(&'{') => {
                chars.next();
                let mut spec = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => spec.push(ch),
                        None => return Err(LoggerError::pattern(pattern, "unterminated '%d{'")),
                    }
                }
                Segment::Date(TimestampFormat::from_spec(&spec).map_err(|_| {
                    LoggerError::pattern(pattern, format!("invalid date format '{}'", spec))
                })?)
            }
            'd' => Segment::Date(TimestampFormat::Iso8601),
            'p' => Segment::Level,
            'c' => Segment::Logger,
            't' => Segment::Thread,
            'm' => Segment::Message,
            other => {
                return Err(LoggerError::pattern(
                    pattern,
                    format!("unknown conversion '%{}'", other),
                ))
            }
        };

        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(segment);
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

impl Layout for PatternLayout {
    fn format(&self, event: &LogEvent) -> String {
        let mut out = String::with_capacity(64);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Date(format) => out.push_str(&format.format(&event.timestamp())),
                Segment::Level => out.push_str(&event.level().to_str().to_uppercase()),
                Segment::Logger => {
                    out.push_str(if event.logger_name().is_empty() {
                        "root"
                    } else {
                        event.logger_name()
                    });
                }
                Segment::Thread => out.push_str(event.thread()),
                Segment::Message => out.push_str(event.message().formatted_message()),
            }
        }
        out
    }

    fn type_name(&self) -> &str {
        TYPE_NAME
    }
}
