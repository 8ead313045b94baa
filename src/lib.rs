//! # Rust Logger Hierarchy
//!
//! A hierarchical logging core in the log4j tradition: dot-separated named
//! loggers arranged in a tree, declarative configuration, layered
//! accept/deny/neutral filters and appenders with an async start/stop
//! lifecycle.
//!
//! ## Features
//!
//! - **Logger tree**: `a.b.c` is a child of `a.b`, levels are inherited
//! - **Declarative configuration**: JSON values or a `console` shorthand
//! - **Pluggable components**: appender, filter and layout factories by type name
//! - **Custom levels**: register levels anywhere in the severity order
//! - **Pending buffer**: events logged before start are replayed in order
//!
//! ## Example
//!
//! ```
//! use rust_logger_hierarchy::prelude::*;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let context = LoggerContext::new();
//! context
//!     .load(&json!({
//!         "loggers": [
//!             { "root": true, "level": "warn", "appenders": ["stdout"] },
//!             { "name": "app.db", "level": "trace" }
//!         ],
//!         "appenders": [{
//!             "type": "ConsoleAppender",
//!             "name": "stdout",
//!             "layout": { "type": "PatternLayout", "pattern": "%p %c - %m" }
//!         }]
//!     }))
//!     .await?;
//!
//! let db = context.get_logger("app.db.pool");
//! db.trace(message!("connections: {}", 4));
//! context.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod appenders;
pub mod core;
pub mod filters;
pub mod layouts;
pub mod macros;
pub mod manager;

pub mod prelude {
    pub use crate::core::{
        Appender, ContextState, Filter, FilterDecision, Layout, LogEvent, LogLevel, Logger,
        LoggerContext, LoggerError, Message, Param, Result,
    };
    pub use crate::message;
}

pub use crate::core::{
    AcceptAll, Appender, AppenderCore, AppenderSettings, CompositeFilter, ContextMetrics,
    ContextState, Filter, FilterDecision, Layout, LevelRegistry, LogEvent, LogLevel, Logger,
    LoggerContext, LoggerError, LoggerSettings, Message, MessageFormat, Param, Registry, Result,
    TimestampFormat,
};
