//! Log messages with lazy formatting
//!
//! A [`Message`] keeps the raw parameters of a trace call and renders them
//! only when something (usually a layout) asks for the formatted text.

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::fmt;

/// Token replaced by the next parameter in a format string
pub const PLACEHOLDER: &str = "{}";

/// A single message parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Param {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Json(serde_json::Value),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::String(s) => write!(f, "{}", s),
            Param::Int(i) => write!(f, "{}", i),
            Param::Float(fl) => write!(f, "{}", fl),
            Param::Bool(b) => write!(f, "{}", b),
            Param::Null => write!(f, "null"),
            Param::Json(v) => write!(f, "{}", v),
        }
    }
}

impl Param {
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Param::String(s) => serde_json::Value::String(s.clone()),
            Param::Int(i) => serde_json::Value::from(*i),
            Param::Float(f) => serde_json::Value::from(*f),
            Param::Bool(b) => serde_json::Value::Bool(*b),
            Param::Null => serde_json::Value::Null,
            Param::Json(v) => v.clone(),
        }
    }
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Param::String(s)
    }
}

impl From<&String> for Param {
    fn from(s: &String) -> Self {
        Param::String(s.clone())
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::String(s.to_string())
    }
}

impl From<i64> for Param {
    fn from(i: i64) -> Self {
        Param::Int(i)
    }
}

impl From<i32> for Param {
    fn from(i: i32) -> Self {
        Param::Int(i as i64)
    }
}

impl From<u32> for Param {
    fn from(i: u32) -> Self {
        Param::Int(i as i64)
    }
}

impl From<u64> for Param {
    fn from(i: u64) -> Self {
        i64::try_from(i).map(Param::Int).unwrap_or(Param::Float(i as f64))
    }
}

impl From<usize> for Param {
    fn from(i: usize) -> Self {
        Param::Int(i as i64)
    }
}

impl From<f64> for Param {
    fn from(f: f64) -> Self {
        Param::Float(f)
    }
}

impl From<bool> for Param {
    fn from(b: bool) -> Self {
        Param::Bool(b)
    }
}

impl From<serde_json::Value> for Param {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(s) => Param::String(s),
            serde_json::Value::Bool(b) => Param::Bool(b),
            serde_json::Value::Null => Param::Null,
            other => Param::Json(other),
        }
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Param::Null)
    }
}

/// Caller-defined message rendering
///
/// Wrap an implementation with [`Message::custom`] to hand a pre-built
/// message to a trace method; the logger passes it through untouched.
pub trait MessageFormat: Send + Sync + fmt::Debug {
    fn formatted_message(&self) -> String;

    /// Raw format string, if the message has one
    fn format(&self) -> Option<&str> {
        None
    }

    fn parameters(&self) -> &[Param] {
        &[]
    }
}

#[derive(Debug)]
enum Content {
    Parameterized {
        format: Option<String>,
        params: Vec<Param>,
    },
    Custom(Box<dyn MessageFormat>),
}

#[derive(Debug)]
pub struct Message {
    content: Content,
    formatted: OnceCell<String>,
}

impl Message {
    /// Build a message from the raw arguments of a trace call
    ///
    /// When the first parameter is a string containing `{}` it becomes the
    /// format string and the rest are substitution values; otherwise every
    /// parameter is positional.
    pub fn new(mut params: Vec<Param>) -> Self {
        let format = match params.first() {
            Some(Param::String(s)) if s.contains(PLACEHOLDER) => match params.remove(0) {
                Param::String(s) => Some(s),
                _ => None,
            },
            _ => None,
        };
        Self {
            content: Content::Parameterized { format, params },
            formatted: OnceCell::new(),
        }
    }

    pub fn custom(message: impl MessageFormat + 'static) -> Self {
        Self {
            content: Content::Custom(Box::new(message)),
            formatted: OnceCell::new(),
        }
    }

    /// Raw format string, `None` when the parameters are purely positional
    pub fn format(&self) -> Option<&str> {
        match &self.content {
            Content::Parameterized { format, .. } => format.as_deref(),
            Content::Custom(custom) => custom.format(),
        }
    }

    pub fn parameters(&self) -> &[Param] {
        match &self.content {
            Content::Parameterized { params, .. } => params,
            Content::Custom(custom) => custom.parameters(),
        }
    }

    /// Render the message; computed once and cached
    pub fn formatted_message(&self) -> &str {
        self.formatted.get_or_init(|| match &self.content {
            Content::Parameterized { format, params } => render(format.as_deref(), params),
            Content::Custom(custom) => custom.formatted_message(),
        })
    }

    /// Whether the formatted text has been produced yet
    pub fn is_formatted(&self) -> bool {
        self.formatted.get().is_some()
    }
}

fn render(format: Option<&str>, params: &[Param]) -> String {
    let Some(format) = format else {
        return params
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
    };

    let mut out = String::with_capacity(format.len() + params.len() * 8);
    let mut remaining = params.iter();
    let mut rest = format;
    while let Some(idx) = rest.find(PLACEHOLDER) {
        out.push_str(&rest[..idx]);
        match remaining.next() {
            Some(param) => out.push_str(&param.to_string()),
            None => out.push_str(PLACEHOLDER),
        }
        rest = &rest[idx + PLACEHOLDER.len()..];
    }
    out.push_str(rest);

    // Surplus values are kept rather than silently dropped
    for param in remaining {
        out.push(' ');
        out.push_str(&param.to_string());
    }
    out
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::new(vec![Param::from(s)])
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::new(vec![Param::String(s)])
    }
}

impl From<Vec<Param>> for Message {
    fn from(params: Vec<Param>) -> Self {
        Message::new(params)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formatted_message())
    }
}
