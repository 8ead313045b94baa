//! JSON layout for structured output
//!
//! Each event becomes one JSON object (JSONL when written line by line),
//! compatible with log aggregation tools like ELK or Loki.

use crate::core::{config, Layout, LogEvent, Param, Result, TimestampFormat};
use serde_json::{Map, Value};
use std::sync::Arc;

pub const TYPE_NAME: &str = "JsonLayout";

#[derive(Debug, Clone, Default)]
pub struct JsonLayout {
    pretty: bool,
    timestamp_format: TimestampFormat,
    include_parameters: bool,
}

impl JsonLayout {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Also emit the raw message template and its parameters
    #[must_use]
    pub fn with_parameters(mut self, include: bool) -> Self {
        self.include_parameters = include;
        self
    }

    /// Factory for the `JsonLayout` type
    ///
    /// Options: `pretty` (bool), `timestamp` (keyword or strftime string),
    /// `parameters` (bool).
    pub fn factory(options: &Value) -> Result<Arc<dyn Layout>> {
        let mut layout = Self::new()
            .with_pretty(config::option_bool(options, "pretty", false)?)
            .with_parameters(config::option_bool(options, "parameters", false)?);
        if let Some(spec) = config::option_str(options, "timestamp") {
            layout = layout.with_timestamp_format(TimestampFormat::from_spec(spec)?);
        }
        Ok(Arc::new(layout))
    }

    fn timestamp_value(&self, event: &LogEvent) -> Value {
        let timestamp = event.timestamp();
        match self.timestamp_format {
            TimestampFormat::Unix => Value::Number(timestamp.timestamp().into()),
            TimestampFormat::UnixMillis => Value::Number(timestamp.timestamp_millis().into()),
            _ => Value::String(self.timestamp_format.format(&timestamp)),
        }
    }

    fn to_value(&self, event: &LogEvent) -> Value {
        let mut object = Map::new();
        object.insert("timestamp".to_string(), self.timestamp_value(event));
        object.insert(
            "level".to_string(),
            Value::String(event.level().to_str().to_string()),
        );
        object.insert(
            "logger".to_string(),
            Value::String(event.logger_name().to_string()),
        );
        object.insert(
            "message".to_string(),
            Value::String(event.message().formatted_message().to_string()),
        );
        object.insert("thread".to_string(), Value::String(event.thread().to_string()));

        if self.include_parameters {
            let message = event.message();
            if let Some(format) = message.format() {
                object.insert("format".to_string(), Value::String(format.to_string()));
            }
            let params: Vec<Value> = message.parameters().iter().map(Param::to_json_value).collect();
            object.insert("parameters".to_string(), Value::Array(params));
        }

        Value::Object(object)
    }
}

impl Layout for JsonLayout {
    fn format(&self, event: &LogEvent) -> String {
        let value = self.to_value(event);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        rendered.unwrap_or_default()
    }

    fn type_name(&self) -> &str {
        TYPE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Message};
    use serde_json::json;

    fn event() -> LogEvent {
        LogEvent::new(
            "app.http",
            LogLevel::INFO,
            Message::new(vec!["GET {} -> {}".into(), "/health".into(), 200.into()]),
        )
    }

    #[test]
    fn test_json_fields() {
        let line = JsonLayout::new().format(&event());
        let parsed: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["logger"], "app.http");
        assert_eq!(parsed["message"], "GET /health -> 200");
        assert!(parsed["timestamp"].is_string());
        assert!(parsed.get("parameters").is_none());
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_numeric_timestamp_and_parameters() {
        let layout = JsonLayout::factory(&json!({ "timestamp": "UNIX_MILLIS", "parameters": true })).unwrap();
        let e = event();
        let parsed: Value = serde_json::from_str(&layout.format(&e)).unwrap();

        assert_eq!(parsed["timestamp"], json!(e.timestamp_millis()));
        assert_eq!(parsed["format"], "GET {} -> {}");
        assert_eq!(parsed["parameters"], json!(["/health", 200]));
    }

    #[test]
    fn test_pretty_output() {
        let layout = JsonLayout::factory(&json!({ "pretty": true })).unwrap();
        assert!(layout.format(&event()).contains('\n'));
    }

    #[test]
    fn test_invalid_timestamp_option_rejected() {
        assert!(matches!(
            JsonLayout::factory(&json!({ "timestamp": "%Q" })),
            Err(crate::core::LoggerError::InvalidPattern { .. })
        ));
    }
}
