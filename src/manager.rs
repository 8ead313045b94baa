//! Process-wide facade over a single [`LoggerContext`]
//!
//! Applications that only ever need one logger hierarchy can use these
//! free functions instead of passing a context around.
//!
//! ```
//! use rust_logger_hierarchy::manager;
//!
//! manager::initialize(&"console %p %c - %m".into()).unwrap();
//! let logger = manager::get_logger("app.startup");
//! logger.info("configuration loaded");
//! ```

use crate::core::{
    Appender, AppenderSettings, Filter, LevelRegistry, Layout, LogLevel, Logger, LoggerContext,
    Result,
};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Arc;

static GLOBAL_CONTEXT: Lazy<LoggerContext> = Lazy::new(LoggerContext::new);

/// The shared context behind this facade
pub fn context() -> LoggerContext {
    GLOBAL_CONTEXT.clone()
}

/// Fetch or create a logger; the empty name is the root logger
///
/// Names are not normalized: surrounding whitespace is part of the name.
pub fn get_logger(name: &str) -> Logger {
    GLOBAL_CONTEXT.get_logger(name)
}

pub fn root_logger() -> Logger {
    GLOBAL_CONTEXT.root_logger()
}

pub fn initialize(config: &Value) -> Result<()> {
    GLOBAL_CONTEXT.initialize(config)
}

pub async fn start() -> Result<()> {
    GLOBAL_CONTEXT.start().await
}

pub async fn stop() -> Result<()> {
    GLOBAL_CONTEXT.stop().await
}

pub async fn load(config: &Value) -> Result<()> {
    GLOBAL_CONTEXT.load(config).await
}

pub async fn unload() -> Result<()> {
    GLOBAL_CONTEXT.unload().await
}

pub fn register_appender<F>(type_name: impl Into<String>, factory: F)
where
    F: Fn(AppenderSettings) -> Result<Arc<dyn Appender>> + Send + Sync + 'static,
{
    GLOBAL_CONTEXT.register_appender(type_name, factory);
}

pub fn register_filter<F>(type_name: impl Into<String>, factory: F)
where
    F: Fn(&Value, &LevelRegistry) -> Result<Arc<dyn Filter>> + Send + Sync + 'static,
{
    GLOBAL_CONTEXT.register_filter(type_name, factory);
}

pub fn register_layout<F>(type_name: impl Into<String>, factory: F)
where
    F: Fn(&Value) -> Result<Arc<dyn Layout>> + Send + Sync + 'static,
{
    GLOBAL_CONTEXT.register_layout(type_name, factory);
}

pub fn register_level(name: &str, after: Option<&str>) -> Result<LogLevel> {
    GLOBAL_CONTEXT.register_level(name, after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_shares_one_context() {
        let a = get_logger("manager.test.a");
        assert_eq!(a, context().get_logger("manager.test.a"));
        assert_eq!(a.parent(), Some(get_logger("manager.test")));
        assert!(root_logger().is_root());
    }
}
