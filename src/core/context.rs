//! Logger context: the logger tree, configuration and lifecycle
//!
//! A [`LoggerContext`] owns every logger node, the type registries, the
//! appenders of the current configuration generation, the context-wide
//! filter and the pending-event buffer. It moves through
//! `Unconfigured -> Initializing -> Initialized -> Started`; `stop` returns
//! to `Initialized` and `initialize` always restarts at `Initializing`.

use super::{
    appender::{Appender, AppenderSettings},
    config::{self, AppenderSpec, NormalizedConfig},
    error::{LoggerError, Result},
    filter::{self, Filter},
    layout::Layout,
    log_event::LogEvent,
    log_level::{LevelRegistry, LogLevel, INHERIT},
    logger::{Logger, LoggerNode, LoggerSettings, ROOT_NAME},
    message::Message,
    metrics::ContextMetrics,
    pending::{PendingBuffer, PendingEvent, DEFAULT_MAX_PENDING_EVENTS},
    registry::Registry,
};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;

/// Lifecycle state of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextState {
    Unconfigured,
    Initializing,
    Initialized,
    Started,
}

impl fmt::Display for ContextState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextState::Unconfigured => write!(f, "Unconfigured"),
            ContextState::Initializing => write!(f, "Initializing"),
            ContextState::Initialized => write!(f, "Initialized"),
            ContextState::Started => write!(f, "Started"),
        }
    }
}

/// Inputs to the filter pipeline captured for one trace call
pub(crate) struct Gate {
    pub(crate) context_filter: Option<Arc<dyn Filter>>,
    pub(crate) passes_level: bool,
    pub(crate) local_filter: Option<Arc<dyn Filter>>,
}

struct Inner {
    state: ContextState,
    levels: LevelRegistry,
    registry: Registry,
    loggers: HashMap<String, LoggerNode>,
    appenders: Vec<Arc<dyn Appender>>,
    filter: Option<Arc<dyn Filter>>,
    start_time: Option<DateTime<Utc>>,
    pending: PendingBuffer,
}

impl Inner {
    fn new(registry: Registry) -> Self {
        let mut loggers = HashMap::new();
        loggers.insert(ROOT_NAME.to_string(), LoggerNode::root());
        Self {
            state: ContextState::Unconfigured,
            levels: LevelRegistry::new(),
            registry,
            loggers,
            appenders: Vec::new(),
            filter: None,
            start_time: None,
            pending: PendingBuffer::new(DEFAULT_MAX_PENDING_EVENTS),
        }
    }

    /// Fetch a node, creating it and any missing ancestors first
    fn ensure_logger(&mut self, name: &str) -> &mut LoggerNode {
        if !self.loggers.contains_key(name) {
            let node = match super::logger::parent_name(name) {
                None => LoggerNode::root(),
                Some(parent) => {
                    let parent_node = self.ensure_logger(parent);
                    parent_node.children.insert(name.to_string());
                    let level = parent_node.level.clone();
                    let filter = parent_node.filter.clone();
                    LoggerNode::child_of(parent, level, filter)
                }
            };
            self.loggers.insert(name.to_string(), node);
        }
        self.loggers
            .entry(name.to_string())
            .or_insert_with(LoggerNode::root)
    }

    /// Level of the node, or of its nearest ancestor that has one
    fn effective_level(&self, name: &str) -> LogLevel {
        let mut current = Some(name);
        while let Some(key) = current {
            match self.loggers.get(key) {
                Some(node) => {
                    if let Some(level) = &node.level {
                        return level.clone();
                    }
                    current = node.parent.as_deref();
                }
                None => current = super::logger::parent_name(key),
            }
        }
        LogLevel::ALL
    }

    fn reset_tree(&mut self) {
        for node in self.loggers.values_mut() {
            node.reset();
        }
        self.appenders.clear();
        self.filter = None;
    }

    /// Fill every `inherit` level and missing filter from the parent, top down
    fn propagate_levels(&mut self) {
        if let Some(root) = self.loggers.get_mut(ROOT_NAME) {
            if root.level.is_none() {
                root.level = Some(LogLevel::ALL);
            }
        }

        let mut queue = VecDeque::from([ROOT_NAME.to_string()]);
        while let Some(name) = queue.pop_front() {
            let Some(node) = self.loggers.get(&name) else {
                continue;
            };
            let level = node.level.clone();
            let filter = node.filter.clone();
            let children: Vec<String> = node.children.iter().cloned().collect();

            for child in children {
                if let Some(child_node) = self.loggers.get_mut(&child) {
                    if child_node.level.is_none() {
                        child_node.level = level.clone();
                    }
                    if child_node.filter.is_none() {
                        child_node.filter = filter.clone();
                    }
                }
                queue.push_back(child);
            }
        }
    }

    fn install(&mut self, generation: Generation) {
        self.reset_tree();
        self.filter = generation.filter;
        self.appenders = generation.appenders;
        let evicted = self.pending.set_capacity(
            generation
                .max_pending_events
                .unwrap_or(DEFAULT_MAX_PENDING_EVENTS),
        );
        if evicted > 0 {
            eprintln!(
                "[LOGGER WARNING] Pending buffer shrunk, {} buffered events discarded",
                evicted
            );
        }

        for (name, settings) in generation.loggers {
            self.ensure_logger(&name).initialize(settings);
        }
        self.propagate_levels();
    }

    /// Appenders reached by an accepted event logged on `name`
    fn propagation_chain(&self, name: &str) -> Vec<Arc<dyn Appender>> {
        let mut chain = Vec::new();
        let mut current = Some(name);
        while let Some(key) = current {
            let Some(node) = self.loggers.get(key) else {
                break;
            };
            chain.extend(node.appenders.iter().cloned());
            current = if node.additive {
                node.parent.as_deref()
            } else {
                None
            };
        }
        chain
    }
}

/// Objects built from one configuration, ready to be installed
struct Generation {
    filter: Option<Arc<dyn Filter>>,
    appenders: Vec<Arc<dyn Appender>>,
    loggers: Vec<(String, LoggerSettings)>,
    max_pending_events: Option<usize>,
}

fn build_filter(
    entries: &[Value],
    registry: &Registry,
    levels: &LevelRegistry,
) -> Result<Option<Arc<dyn Filter>>> {
    let mut filters = Vec::with_capacity(entries.len());
    for entry in entries {
        let type_name = config::option_str(entry, "type")
            .ok_or_else(|| LoggerError::config("filters", "filter entry has no type"))?;
        let factory = registry.filter(type_name)?;
        filters.push(factory(entry, levels)?);
    }
    Ok(filter::combine(filters))
}

/// Explicit `layout.type` wins; otherwise the first registered layout type
/// present as an inline key of the appender entry
fn build_layout(spec: &AppenderSpec, registry: &Registry) -> Result<Arc<dyn Layout>> {
    if let Some(layout) = &spec.layout {
        let type_name = config::option_str(layout, "type").ok_or_else(|| {
            LoggerError::config(
                format!("appender '{}'", spec.name),
                "layout has no type",
            )
        })?;
        let factory = registry.layout(type_name)?;
        return factory(layout);
    }

    for type_name in registry.layout_types() {
        if let Some(inline) = spec.raw.get(type_name) {
            let factory = registry.layout(type_name)?;
            return factory(inline);
        }
    }

    Err(LoggerError::MissingLayout(spec.name.clone()))
}

fn build(config: NormalizedConfig, registry: &Registry, levels: &LevelRegistry) -> Result<Generation> {
    let filter = build_filter(&config.filters, registry, levels)?;

    let mut appenders = Vec::with_capacity(config.appenders.len());
    let mut by_name: HashMap<String, Arc<dyn Appender>> = HashMap::new();
    for spec in config.appenders {
        let factory = registry.appender(&spec.type_name)?;
        if by_name.contains_key(&spec.name) {
            return Err(LoggerError::DuplicateAppender(spec.name));
        }
        let layout = build_layout(&spec, registry)?;
        let appender_filter = build_filter(&spec.filters, registry, levels)?;
        let level = match &spec.level {
            Some(level) => levels.resolve(level)?,
            None => LogLevel::ALL,
        };

        let appender = factory(AppenderSettings {
            name: spec.name.clone(),
            type_name: spec.type_name.clone(),
            level,
            filter: appender_filter,
            layout,
            levels: levels.clone(),
            options: Value::Object(spec.raw),
        })?;
        by_name.insert(spec.name, Arc::clone(&appender));
        appenders.push(appender);
    }

    let mut loggers = Vec::with_capacity(config.loggers.len());
    for spec in config.loggers {
        let name = spec.logger_name().to_string();
        let display = if name.is_empty() { "root" } else { name.as_str() };

        let logger_appenders = spec
            .appender_refs
            .iter()
            .map(|reference| {
                by_name
                    .get(reference)
                    .cloned()
                    .ok_or_else(|| LoggerError::unknown_appender_ref(display, reference.as_str()))
            })
            .collect::<Result<Vec<_>>>()?;

        let level = match spec.level.as_deref() {
            None => None,
            Some(level) if level.trim().eq_ignore_ascii_case(INHERIT) => None,
            Some(level) => Some(levels.resolve(level)?),
        };

        let settings = LoggerSettings {
            level,
            additive: spec.additivity.unwrap_or(true),
            appenders: logger_appenders,
            filter: build_filter(&spec.filters, registry, levels)?,
        };
        loggers.push((name, settings));
    }

    Ok(Generation {
        filter,
        appenders,
        loggers,
        max_pending_events: config.max_pending_events,
    })
}

struct Shared {
    inner: Mutex<Inner>,
    metrics: ContextMetrics,
}

/// The orchestrator of a logger hierarchy
///
/// Cloning is cheap and yields another handle to the same context.
///
/// # Example
///
/// ```
/// use rust_logger_hierarchy::LoggerContext;
/// use serde_json::json;
///
/// let context = LoggerContext::new();
/// context
///     .initialize(&json!({
///         "loggers": [{ "root": true, "level": "warn", "appenders": ["console"] }],
///         "appenders": [{
///             "type": "ConsoleAppender",
///             "name": "console",
///             "layout": { "type": "PatternLayout", "pattern": "%p %c - %m" }
///         }]
///     }))
///     .unwrap();
///
/// let logger = context.get_logger("app.db");
/// assert_eq!(logger.parent(), Some(context.get_logger("app")));
/// ```
#[derive(Clone)]
pub struct LoggerContext {
    shared: Arc<Shared>,
}

impl LoggerContext {
    /// Context with the built-in appender, filter and layout types registered
    pub fn new() -> Self {
        Self::with_registry(Registry::with_builtins())
    }

    /// Context with empty type registries
    pub fn empty() -> Self {
        Self::with_registry(Registry::new())
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::new(registry)),
                metrics: ContextMetrics::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared.inner.lock()
    }

    pub(crate) fn same_context(&self, other: &LoggerContext) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    pub fn metrics(&self) -> &ContextMetrics {
        &self.shared.metrics
    }

    pub fn state(&self) -> ContextState {
        self.lock().state
    }

    pub fn is_started(&self) -> bool {
        self.state() == ContextState::Started
    }

    /// Time of the last successful `start`
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.lock().start_time
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Events evicted from the pending buffer since the last start
    pub fn discarded_count(&self) -> u64 {
        self.lock().pending.discarded()
    }

    pub fn max_pending_events(&self) -> usize {
        self.lock().pending.capacity()
    }

    // ------------------------------------------------------------------
    // Registries
    // ------------------------------------------------------------------

    pub fn register_appender<F>(&self, type_name: impl Into<String>, factory: F)
    where
        F: Fn(AppenderSettings) -> Result<Arc<dyn Appender>> + Send + Sync + 'static,
    {
        self.lock()
            .registry
            .register_appender(type_name, Arc::new(factory));
    }

    pub fn register_filter<F>(&self, type_name: impl Into<String>, factory: F)
    where
        F: Fn(&Value, &LevelRegistry) -> Result<Arc<dyn Filter>> + Send + Sync + 'static,
    {
        self.lock()
            .registry
            .register_filter(type_name, Arc::new(factory));
    }

    pub fn register_layout<F>(&self, type_name: impl Into<String>, factory: F)
    where
        F: Fn(&Value) -> Result<Arc<dyn Layout>> + Send + Sync + 'static,
    {
        self.lock()
            .registry
            .register_layout(type_name, Arc::new(factory));
    }

    /// Register a custom level directly after (less severe than) `after`
    pub fn register_level(&self, name: &str, after: Option<&str>) -> Result<LogLevel> {
        self.lock().levels.register(name, after)
    }

    /// Concrete levels, most severe first
    pub fn levels(&self) -> Vec<LogLevel> {
        self.lock().levels.levels().to_vec()
    }

    pub fn is_below(&self, candidate: &LogLevel, threshold: &LogLevel) -> bool {
        self.lock().levels.is_below(candidate, threshold)
    }

    // ------------------------------------------------------------------
    // Logger tree
    // ------------------------------------------------------------------

    /// Fetch or create the logger called `name`; the empty name is the root
    ///
    /// Names are used verbatim, so `" a"` and `"a"` are different loggers.
    pub fn get_logger(&self, name: &str) -> Logger {
        self.lock().ensure_logger(name);
        Logger::attach(self.clone(), name)
    }

    pub fn root_logger(&self) -> Logger {
        self.get_logger(ROOT_NAME)
    }

    /// Names of every logger created so far, root included
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().loggers.keys().cloned().collect();
        names.sort();
        names
    }

    pub(crate) fn with_node<T>(&self, name: &str, f: impl FnOnce(&LoggerNode) -> T) -> T {
        let mut inner = self.lock();
        f(inner.ensure_logger(name))
    }

    pub(crate) fn with_node_mut<T>(&self, name: &str, f: impl FnOnce(&mut LoggerNode) -> T) -> T {
        let mut inner = self.lock();
        f(inner.ensure_logger(name))
    }

    pub(crate) fn passes_level(&self, name: &str, level: &LogLevel) -> bool {
        let inner = self.lock();
        let threshold = inner.effective_level(name);
        inner.levels.is_below(level, &threshold)
    }

    /// Buffer the event while not started; otherwise capture the filter
    /// inputs for it
    pub(crate) fn gate(&self, name: &str, event: LogEvent) -> Option<(LogEvent, Gate)> {
        let mut inner = self.lock();
        if inner.state != ContextState::Started {
            let evicted = inner.pending.push(name, event);
            self.metrics().record_buffered();
            if evicted > 0 {
                self.metrics().record_discarded(evicted as u64);
            }
            return None;
        }

        let threshold = inner.effective_level(name);
        let passes_level = inner.levels.is_below(event.level(), &threshold);
        let local_filter = inner.ensure_logger(name).filter.clone();
        let gate = Gate {
            context_filter: inner.filter.clone(),
            passes_level,
            local_filter,
        };
        Some((event, gate))
    }

    pub(crate) fn propagation_chain(&self, name: &str) -> Vec<Arc<dyn Appender>> {
        self.lock().propagation_chain(name)
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Apply a configuration object or a `console [pattern]` shorthand string
    ///
    /// The caller's value is copied, never retained. Every known logger is
    /// reset, appenders and filters are instantiated through the registries,
    /// and `inherit` levels are resolved down the tree. The context is left
    /// not started; events logged until `start` are buffered.
    ///
    /// # Errors
    ///
    /// Configuration errors (unknown types, duplicate appender names,
    /// unresolved appender references, unknown levels, missing layouts).
    /// After an error the tree is reset and the context is `Unconfigured`.
    pub fn initialize(&self, config: &Value) -> Result<()> {
        let (registry, levels) = {
            let mut inner = self.lock();
            inner.state = ContextState::Initializing;
            (inner.registry.clone(), inner.levels.clone())
        };

        let built = match config {
            Value::String(text) => config::shorthand(text),
            other => Ok(other.clone()),
        }
        .and_then(|config| config::normalize(&config))
        .and_then(|normalized| build(normalized, &registry, &levels));

        let mut inner = self.lock();
        match built {
            Ok(generation) => {
                inner.install(generation);
                inner.state = ContextState::Initialized;
                Ok(())
            }
            Err(e) => {
                inner.reset_tree();
                inner.propagate_levels();
                inner.state = ContextState::Unconfigured;
                Err(e)
            }
        }
    }

    /// Parse JSON text and apply it with [`LoggerContext::initialize`]
    pub fn initialize_from_str(&self, json: &str) -> Result<()> {
        let value: Value = serde_json::from_str(json)?;
        self.initialize(&value)
    }

    /// Appender of the current configuration generation by name
    pub fn appender(&self, name: &str) -> Option<Arc<dyn Appender>> {
        self.lock()
            .appenders
            .iter()
            .find(|a| a.name() == name)
            .cloned()
    }

    pub fn appenders(&self) -> Vec<Arc<dyn Appender>> {
        self.lock().appenders.clone()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Start every appender concurrently, then replay buffered events
    ///
    /// The first appender error is returned and the context stays not
    /// started; appenders still starting are not awaited further. There is
    /// no timeout: a hung appender keeps this future pending.
    pub async fn start(&self) -> Result<()> {
        let appenders = self.appenders();
        try_join_all(appenders.iter().map(|appender| appender.start())).await?;

        let (pending, discarded) = {
            let mut inner = self.lock();
            inner.state = ContextState::Started;
            inner.start_time = Some(Utc::now());
            inner.pending.drain()
        };
        self.replay(pending, discarded);
        Ok(())
    }

    /// Stop every appender concurrently; on success the context is no
    /// longer started
    pub async fn stop(&self) -> Result<()> {
        let appenders = self.appenders();
        try_join_all(appenders.iter().map(|appender| appender.stop())).await?;

        let mut inner = self.lock();
        if inner.state == ContextState::Started {
            inner.state = ContextState::Initialized;
        }
        Ok(())
    }

    /// `initialize` followed by `start`
    pub async fn load(&self, config: &Value) -> Result<()> {
        self.initialize(config)?;
        self.start().await
    }

    pub async fn unload(&self) -> Result<()> {
        self.stop().await
    }

    /// Deliver events captured before start, preceded by one warning on
    /// the root logger when some had to be discarded
    ///
    /// The notice goes straight to root's appenders: root's level and
    /// filters never suppress it.
    fn replay(&self, pending: Vec<PendingEvent>, discarded: u64) {
        if discarded > 0 {
            let notice = LogEvent::new(
                ROOT_NAME,
                LogLevel::WARN,
                Message::new(vec![
                    "{} log events were discarded before the logging system started".into(),
                    discarded.into(),
                ]),
            );
            match self.root_logger().append(&notice) {
                Ok(()) => {
                    self.metrics().record_logged();
                }
                Err(e) => {
                    self.metrics().record_append_failure();
                    eprintln!(
                        "[LOGGER WARNING] {} log events were discarded before start and the notice could not be delivered: {}",
                        discarded, e
                    );
                }
            }
        }

        for PendingEvent { logger, event } in pending {
            Logger::attach(self.clone(), &logger).trace_event(event);
        }
    }
}

impl Default for LoggerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("LoggerContext")
            .field("state", &inner.state)
            .field("loggers", &inner.loggers.len())
            .field("appenders", &inner.appenders.len())
            .field("pending", &inner.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::memory::{MemoryAppender, MemorySink};
    use serde_json::json;

    fn context_with_memory() -> (LoggerContext, MemorySink) {
        let context = LoggerContext::new();
        let sink = MemorySink::new();
        context.register_appender("MemoryAppender", MemoryAppender::factory(sink.clone()));
        (context, sink)
    }

    fn memory(name: &str) -> Value {
        json!({ "type": "MemoryAppender", "name": name, "layout": { "type": "PatternLayout", "pattern": "%m" } })
    }

    #[test]
    fn test_get_logger_is_memoized_and_builds_parents() {
        let context = LoggerContext::new();
        let abc = context.get_logger("a.b.c");

        assert_eq!(abc, context.get_logger("a.b.c"));
        assert_eq!(abc.parent(), Some(context.get_logger("a.b")));
        assert_eq!(
            context.get_logger("a.b").parent(),
            Some(context.get_logger("a"))
        );
        assert_eq!(context.get_logger("a").parent(), Some(context.root_logger()));
        assert_eq!(context.root_logger().parent(), None);
        assert_eq!(context.get_logger("a").children(), vec!["a.b".to_string()]);
    }

    #[test]
    fn test_get_logger_uses_names_verbatim() {
        let context = LoggerContext::new();
        let padded = context.get_logger(" a");

        assert_eq!(padded.name(), " a");
        assert_ne!(padded, context.get_logger("a"));
        assert_eq!(padded.parent(), Some(context.root_logger()));
    }

    #[test]
    fn test_level_inheritance() {
        let context = LoggerContext::new();
        context
            .initialize(&json!({
                "loggers": [
                    { "root": true, "level": "error" },
                    { "name": "a", "level": "info" }
                ]
            }))
            .unwrap();

        assert_eq!(context.get_logger("a.b").level(), Some(LogLevel::INFO));
        assert_eq!(context.get_logger("x").level(), Some(LogLevel::ERROR));
    }

    #[test]
    fn test_existing_children_reinherit_after_initialize() {
        let context = LoggerContext::new();
        let child = context.get_logger("svc.worker");
        context
            .initialize(&json!({ "loggers": [{ "name": "svc", "level": "warn" }] }))
            .unwrap();

        assert_eq!(child.level(), Some(LogLevel::WARN));
        assert_eq!(context.root_logger().level(), Some(LogLevel::ALL));
    }

    #[test]
    fn test_inherit_keyword() {
        let context = LoggerContext::new();
        context
            .initialize(&json!({
                "loggers": [
                    { "root": true, "level": "warn" },
                    { "name": "a", "level": "INHERIT" }
                ]
            }))
            .unwrap();
        assert_eq!(context.get_logger("a").level(), Some(LogLevel::WARN));
    }

    #[test]
    fn test_filter_inherited_from_parent() {
        let context = LoggerContext::new();
        context
            .initialize(&json!({
                "loggers": [{ "name": "a", "filter": { "type": "RegexFilter", "regex": "x" } }]
            }))
            .unwrap();
        assert!(context.get_logger("a").has_filter());
        assert!(context.get_logger("a.b").has_filter());
        assert!(!context.get_logger("z").has_filter());
    }

    #[test]
    fn test_configuration_errors() {
        let (context, _sink) = context_with_memory();

        let err = context
            .initialize(&json!({ "appenders": [{ "type": "Nope", "name": "a" }] }))
            .unwrap_err();
        assert!(matches!(err, LoggerError::UnknownAppenderType(t) if t == "Nope"));
        assert_eq!(context.state(), ContextState::Unconfigured);

        let err = context
            .initialize(&json!({ "appenders": [memory("a"), memory("a")] }))
            .unwrap_err();
        assert!(matches!(err, LoggerError::DuplicateAppender(n) if n == "a"));

        let err = context
            .initialize(&json!({ "loggers": [{ "name": "x", "appenders": ["ghost"] }] }))
            .unwrap_err();
        assert!(matches!(err, LoggerError::UnknownAppenderRef { .. }));

        let err = context
            .initialize(&json!({ "appenders": [{ "type": "MemoryAppender", "name": "a" }] }))
            .unwrap_err();
        assert!(matches!(err, LoggerError::MissingLayout(n) if n == "a"));

        let err = context
            .initialize(&json!({ "filters": [{ "type": "Marker" }] }))
            .unwrap_err();
        assert!(matches!(err, LoggerError::UnknownFilterType(_)));

        let err = context
            .initialize(&json!({ "loggers": [{ "name": "x", "level": "verbose" }] }))
            .unwrap_err();
        assert!(matches!(err, LoggerError::UnknownLevel(_)));
    }

    #[test]
    fn test_inline_layout_key() {
        let (context, _sink) = context_with_memory();
        context
            .initialize(&json!({
                "appenders": [{ "type": "MemoryAppender", "name": "a", "JsonLayout": {} }]
            }))
            .unwrap();
        assert!(context.appender("a").is_some());
    }

    #[test]
    fn test_caller_config_untouched() {
        let context = LoggerContext::new();
        let config = json!({ "loggers": { "root": { "level": "warn" } } });
        let before = config.clone();
        context.initialize(&config).unwrap();
        assert_eq!(config, before);
    }

    #[test]
    fn test_events_buffered_before_start() {
        let (context, sink) = context_with_memory();
        context
            .initialize(&json!({
                "loggers": [{ "root": true, "appenders": ["m"] }],
                "appenders": [memory("m")]
            }))
            .unwrap();

        context.get_logger("a").info("early");
        assert_eq!(context.pending_len(), 1);
        assert!(sink.is_empty());
        assert_eq!(context.metrics().events_buffered(), 1);
    }

    #[test]
    fn test_max_pending_events_property() {
        let context = LoggerContext::new();
        context
            .initialize(&json!({ "properties": { "maxPendingEvents": 5 } }))
            .unwrap();
        assert_eq!(context.max_pending_events(), 5);

        context.initialize(&json!({})).unwrap();
        assert_eq!(context.max_pending_events(), DEFAULT_MAX_PENDING_EVENTS);
    }

    #[test]
    fn test_start_replays_and_stop_rebuffers() {
        let (context, sink) = context_with_memory();
        context
            .initialize(&json!({
                "properties": { "maxPendingEvents": 2 },
                "loggers": [{ "root": true, "appenders": ["m"] }],
                "appenders": [memory("m")]
            }))
            .unwrap();

        let logger = context.get_logger("boot");
        logger.info("one");
        logger.info("two");
        logger.info("three");
        assert_eq!(context.discarded_count(), 1);

        tokio_test::block_on(context.start()).unwrap();
        assert_eq!(
            sink.lines(),
            vec![
                "1 log events were discarded before the logging system started",
                "two",
                "three"
            ]
        );

        tokio_test::block_on(context.stop()).unwrap();
        logger.info("four");
        assert_eq!(context.pending_len(), 1);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_register_level_on_context() {
        let context = LoggerContext::new();
        let debug = context.register_level("debug", Some("log")).unwrap();
        assert!(context.is_below(&LogLevel::INFO, &debug));
        assert!(matches!(
            context.register_level("debug", None),
            Err(LoggerError::DuplicateLevel(_))
        ));
    }
}
