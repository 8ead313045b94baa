//! Configuration normalization
//!
//! The configuration object accepted by `LoggerContext::initialize` comes in
//! several equivalent shapes: arrays of entries, objects keyed by type (or
//! role), single inline objects, appender references mixed with inline
//! appender definitions inside logger entries, and a legacy `property`
//! list for properties. [`normalize`] flattens all of them into ordered
//! lists of logger and appender specs.

use super::error::{LoggerError, Result};
use super::filter::FilterDecision;
use serde_json::{json, Map, Value};

/// Default pattern for the `console` shorthand
pub const DEFAULT_CONSOLE_PATTERN: &str = "%d{%H:%M:%S%.3f} %p %c - %m";

/// Property name controlling the pending-event buffer capacity
pub const MAX_PENDING_EVENTS: &str = "maxPendingEvents";

/// A logger entry after normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggerSpec {
    pub name: String,
    pub root: bool,
    pub level: Option<String>,
    pub additivity: Option<bool>,
    /// Flat list of appender names, inline definitions already hoisted
    pub appender_refs: Vec<String>,
    pub filters: Vec<Value>,
}

impl LoggerSpec {
    /// Key of the logger in the tree; the root logger is the empty name
    pub fn logger_name(&self) -> &str {
        if self.root {
            ""
        } else {
            &self.name
        }
    }
}

/// An appender entry after normalization
#[derive(Debug, Clone, PartialEq)]
pub struct AppenderSpec {
    pub type_name: String,
    pub name: String,
    pub level: Option<String>,
    /// Explicit `layout` object
    pub layout: Option<Value>,
    pub filters: Vec<Value>,
    /// The complete entry, including type-specific options and inline layouts
    pub raw: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedConfig {
    pub loggers: Vec<LoggerSpec>,
    pub appenders: Vec<AppenderSpec>,
    /// Context-wide filter entries, each carrying a `type`
    pub filters: Vec<Value>,
    pub max_pending_events: Option<usize>,
}

/// Expand the `console [pattern]` shorthand into a structured configuration
pub fn shorthand(text: &str) -> Result<Value> {
    let trimmed = text.trim();
    let keyword = trimmed.split_whitespace().next().unwrap_or_default();
    if !keyword.eq_ignore_ascii_case("console") {
        return Err(LoggerError::config(
            "configuration",
            format!("unsupported shorthand '{}'", text),
        ));
    }

    let pattern = trimmed[keyword.len()..].trim();
    let pattern = if pattern.is_empty() {
        DEFAULT_CONSOLE_PATTERN
    } else {
        pattern
    };

    Ok(json!({
        "loggers": [{ "root": true, "level": "all", "appenders": ["console"] }],
        "appenders": [{
            "type": "ConsoleAppender",
            "name": "console",
            "layout": { "type": "PatternLayout", "pattern": pattern }
        }]
    }))
}

/// Flatten a structured configuration
pub fn normalize(config: &Value) -> Result<NormalizedConfig> {
    let root = config
        .as_object()
        .ok_or_else(|| LoggerError::config("configuration", "expected an object or a shorthand string"))?;

    let mut normalized = NormalizedConfig::default();

    for (key, entry) in entries(root.get("appenders"), EntryKind::Typed, "appenders")? {
        let spec = appender_spec(key.as_deref(), entry)?;
        normalized.appenders.push(spec);
    }

    for (key, entry) in entries(root.get("loggers"), EntryKind::Logger, "loggers")? {
        let mut inline = Vec::new();
        let spec = logger_spec(key.as_deref(), entry, &mut inline)?;
        normalized.appenders.extend(inline);
        normalized.loggers.push(spec);
    }

    normalized.filters = filter_entries(root.get("filters"))?;

    if let Some(properties) = root.get("properties") {
        normalized.max_pending_events = max_pending_events(properties)?;
    }

    Ok(normalized)
}

#[derive(Clone, Copy, PartialEq)]
enum EntryKind {
    /// Entries carry a `type`; object keys name the type
    Typed,
    /// Logger entries; object keys name a role, `root` marks the root
    Logger,
}

fn is_single_entry(map: &Map<String, Value>, kind: EntryKind) -> bool {
    match kind {
        EntryKind::Typed => map.get("type").is_some_and(Value::is_string),
        EntryKind::Logger => {
            map.get("name").is_some_and(Value::is_string)
                || map.get("root").is_some_and(Value::is_boolean)
                || map.get("level").is_some_and(Value::is_string)
        }
    }
}

/// Split an array, a keyed object or a single inline object into entries
fn entries(
    value: Option<&Value>,
    kind: EntryKind,
    component: &str,
) -> Result<Vec<(Option<String>, Map<String, Value>)>> {
    let mut out = Vec::new();
    match value {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            for item in items {
                out.push((None, as_entry(item, component)?));
            }
        }
        Some(Value::Object(map)) if is_single_entry(map, kind) => {
            out.push((None, map.clone()));
        }
        Some(Value::Object(map)) => {
            for (key, item) in map {
                match item {
                    Value::Array(items) => {
                        for nested in items {
                            out.push((Some(key.clone()), as_entry(nested, component)?));
                        }
                    }
                    other => out.push((Some(key.clone()), as_entry(other, component)?)),
                }
            }
        }
        Some(other) => {
            return Err(LoggerError::config(
                component,
                format!("expected an array or an object, found {}", other),
            ))
        }
    }
    Ok(out)
}

fn as_entry(value: &Value, component: &str) -> Result<Map<String, Value>> {
    value
        .as_object()
        .cloned()
        .ok_or_else(|| LoggerError::config(component, format!("expected an object entry, found {}", value)))
}

fn appender_spec(key: Option<&str>, mut entry: Map<String, Value>) -> Result<AppenderSpec> {
    let type_name = match entry.get("type") {
        Some(Value::String(t)) => t.clone(),
        Some(other) => {
            return Err(LoggerError::config("appenders", format!("invalid type {}", other)))
        }
        None => key
            .map(str::to_string)
            .ok_or_else(|| LoggerError::config("appenders", "appender entry has no type"))?,
    };
    entry.insert("type".to_string(), Value::String(type_name.clone()));

    let name = string_field(&entry, "name", "appenders")?.ok_or_else(|| {
        LoggerError::config("appenders", format!("appender of type '{}' has no name", type_name))
    })?;
    let level = string_field(&entry, "level", "appenders")?;
    let layout = entry.get("layout").cloned();
    let filters = nested_filters(&entry)?;

    Ok(AppenderSpec {
        type_name,
        name,
        level,
        layout,
        filters,
        raw: entry,
    })
}

fn logger_spec(
    key: Option<&str>,
    entry: Map<String, Value>,
    inline_appenders: &mut Vec<AppenderSpec>,
) -> Result<LoggerSpec> {
    let name = string_field(&entry, "name", "loggers")?.unwrap_or_default();
    let root = match entry.get("root") {
        Some(value) => bool_value(value, "loggers", "root")?,
        None => key == Some("root"),
    };
    let level = string_field(&entry, "level", "loggers")?;
    let additivity = entry
        .get("additivity")
        .map(|v| bool_value(v, "loggers", "additivity"))
        .transpose()?;

    let mut appender_refs = Vec::new();

    match entry.get("appenders") {
        None | Some(Value::Null) => {}
        Some(Value::String(single)) => appender_refs.push(single.clone()),
        Some(Value::Array(items)) => {
            for item in items {
                match item {
                    Value::String(name) => appender_refs.push(name.clone()),
                    Value::Object(def) => {
                        let spec = appender_spec(None, def.clone())?;
                        appender_refs.push(spec.name.clone());
                        inline_appenders.push(spec);
                    }
                    other => {
                        return Err(LoggerError::config(
                            "loggers",
                            format!("invalid appender reference {}", other),
                        ))
                    }
                }
            }
        }
        Some(object @ Value::Object(_)) => {
            for (type_key, def) in entries(Some(object), EntryKind::Typed, "loggers")? {
                let spec = appender_spec(type_key.as_deref(), def)?;
                appender_refs.push(spec.name.clone());
                inline_appenders.push(spec);
            }
        }
        Some(other) => {
            return Err(LoggerError::config(
                "loggers",
                format!("invalid appenders {}", other),
            ))
        }
    }

    if let Some(refs) = entry.get("appender-ref") {
        collect_refs(refs, &mut appender_refs)?;
    }

    let filters = nested_filters(&entry)?;

    Ok(LoggerSpec {
        name,
        root,
        level,
        additivity,
        appender_refs,
        filters,
    })
}

fn collect_refs(value: &Value, out: &mut Vec<String>) -> Result<()> {
    match value {
        Value::String(name) => out.push(name.clone()),
        Value::Object(map) => match map.get("ref") {
            Some(Value::String(name)) => out.push(name.clone()),
            _ => {
                return Err(LoggerError::config(
                    "appender-ref",
                    format!("entry without a string 'ref': {}", value),
                ))
            }
        },
        Value::Array(items) => {
            for item in items {
                collect_refs(item, out)?;
            }
        }
        other => {
            return Err(LoggerError::config(
                "appender-ref",
                format!("invalid reference {}", other),
            ))
        }
    }
    Ok(())
}

/// `filters` followed by `filter`, both in any of the accepted shapes
fn nested_filters(entry: &Map<String, Value>) -> Result<Vec<Value>> {
    let mut filters = filter_entries(entry.get("filters"))?;
    filters.extend(filter_entries(entry.get("filter"))?);
    Ok(filters)
}

fn filter_entries(value: Option<&Value>) -> Result<Vec<Value>> {
    let mut out = Vec::new();
    for (key, mut entry) in entries(value, EntryKind::Typed, "filters")? {
        if !entry.contains_key("type") {
            let type_name = key
                .ok_or_else(|| LoggerError::config("filters", "filter entry has no type"))?;
            entry.insert("type".to_string(), Value::String(type_name));
        }
        out.push(Value::Object(entry));
    }
    Ok(out)
}

fn max_pending_events(properties: &Value) -> Result<Option<usize>> {
    if let Some(value) = properties.get(MAX_PENDING_EVENTS) {
        return usize_value(value, MAX_PENDING_EVENTS).map(Some);
    }

    let named = |entry: &Value| -> Option<Value> {
        let name = entry.get("name")?.as_str()?;
        (name == MAX_PENDING_EVENTS).then(|| entry.get("value").cloned().unwrap_or(Value::Null))
    };

    let found = match properties.get("property") {
        Some(Value::Array(items)) => items.iter().find_map(named),
        Some(entry @ Value::Object(_)) => named(entry),
        _ => None,
    };

    found
        .map(|value| usize_value(&value, MAX_PENDING_EVENTS))
        .transpose()
}

fn string_field(entry: &Map<String, Value>, key: &str, component: &str) -> Result<Option<String>> {
    match entry.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(LoggerError::config(
            component,
            format!("'{}' must be a string, found {}", key, other),
        )),
    }
}

fn bool_value(value: &Value, component: &str, key: &str) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(LoggerError::config(
            component,
            format!("'{}' must be a boolean, found {}", key, other),
        )),
    }
}

fn usize_value(value: &Value, key: &str) -> Result<usize> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        LoggerError::config("properties", format!("'{}' must be a non-negative integer, found {}", key, value))
    })
}

/// String option of a component entry
pub fn option_str<'a>(options: &'a Value, key: &str) -> Option<&'a str> {
    options.get(key).and_then(Value::as_str)
}

/// Boolean option of a component entry, accepting `"true"`/`"false"` strings
pub fn option_bool(options: &Value, key: &str, default: bool) -> Result<bool> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => bool_value(value, key, key),
    }
}

/// Filter decision option (`onMatch` / `onMismatch`)
pub fn option_decision(options: &Value, key: &str, default: FilterDecision) -> Result<FilterDecision> {
    match option_str(options, key) {
        None => Ok(default),
        Some(text) => text
            .parse()
            .map_err(|e: String| LoggerError::config(key, e)),
    }
}
