//! String-keyed registries of appender, filter and layout factories

use super::{
    appender::{Appender, AppenderSettings},
    error::{LoggerError, Result},
    filter::Filter,
    layout::Layout,
    log_level::LevelRegistry,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

pub type AppenderFactory =
    Arc<dyn Fn(AppenderSettings) -> Result<Arc<dyn Appender>> + Send + Sync>;
pub type FilterFactory =
    Arc<dyn Fn(&Value, &LevelRegistry) -> Result<Arc<dyn Filter>> + Send + Sync>;
pub type LayoutFactory = Arc<dyn Fn(&Value) -> Result<Arc<dyn Layout>> + Send + Sync>;

/// Constructors by type name
///
/// Registering a type name twice replaces the earlier factory.
#[derive(Clone, Default)]
pub struct Registry {
    appenders: BTreeMap<String, AppenderFactory>,
    filters: BTreeMap<String, FilterFactory>,
    layouts: BTreeMap<String, LayoutFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the appenders, filters and layouts shipped with the crate
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        #[cfg(feature = "console")]
        registry.register_appender(
            crate::appenders::console::TYPE_NAME,
            Arc::new(crate::appenders::console::ConsoleAppender::factory),
        );
        #[cfg(feature = "file")]
        registry.register_appender(
            crate::appenders::file::TYPE_NAME,
            Arc::new(crate::appenders::file::FileAppender::factory),
        );
        registry.register_layout(
            crate::layouts::pattern::TYPE_NAME,
            Arc::new(crate::layouts::pattern::PatternLayout::factory),
        );
        registry.register_layout(
            crate::layouts::json::TYPE_NAME,
            Arc::new(crate::layouts::json::JsonLayout::factory),
        );
        registry.register_filter(
            crate::filters::regex::TYPE_NAME,
            Arc::new(crate::filters::regex::RegexFilter::factory),
        );
        registry.register_filter(
            crate::filters::threshold::TYPE_NAME,
            Arc::new(crate::filters::threshold::ThresholdFilter::factory),
        );
        registry
    }

    pub fn register_appender(&mut self, type_name: impl Into<String>, factory: AppenderFactory) {
        self.appenders.insert(type_name.into(), factory);
    }

    pub fn register_filter(&mut self, type_name: impl Into<String>, factory: FilterFactory) {
        self.filters.insert(type_name.into(), factory);
    }

    pub fn register_layout(&mut self, type_name: impl Into<String>, factory: LayoutFactory) {
        self.layouts.insert(type_name.into(), factory);
    }

    pub fn appender(&self, type_name: &str) -> Result<AppenderFactory> {
        self.appenders
            .get(type_name)
            .cloned()
            .ok_or_else(|| LoggerError::UnknownAppenderType(type_name.to_string()))
    }

    pub fn filter(&self, type_name: &str) -> Result<FilterFactory> {
        self.filters
            .get(type_name)
            .cloned()
            .ok_or_else(|| LoggerError::UnknownFilterType(type_name.to_string()))
    }

    pub fn layout(&self, type_name: &str) -> Result<LayoutFactory> {
        self.layouts
            .get(type_name)
            .cloned()
            .ok_or_else(|| LoggerError::UnknownLayoutType(type_name.to_string()))
    }

    /// Registered layout type names, in sorted order
    pub fn layout_types(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }
}
