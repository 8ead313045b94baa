//! Named loggers and the trace/propagation path
//!
//! Logger nodes live in the owning [`LoggerContext`], keyed by name; parent
//! and child links are names, never pointers. A [`Logger`] is a cheap handle
//! (context + name) through which applications emit events.

use super::{
    appender::Appender,
    context::LoggerContext,
    error::Result,
    filter::{Filter, FilterDecision},
    log_event::LogEvent,
    log_level::LogLevel,
    message::Message,
};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Name of the root logger in the tree
pub const ROOT_NAME: &str = "";

/// Parent of a dotted name: everything before the last `.`, or the root
pub fn parent_name(name: &str) -> Option<&str> {
    if name.is_empty() {
        return None;
    }
    Some(name.rsplit_once('.').map(|(parent, _)| parent).unwrap_or(ROOT_NAME))
}

/// Resolved configuration for one logger
#[derive(Clone)]
pub struct LoggerSettings {
    /// `None` inherits from the parent
    pub level: Option<LogLevel>,
    pub additive: bool,
    pub appenders: Vec<Arc<dyn Appender>>,
    pub filter: Option<Arc<dyn Filter>>,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: None,
            additive: true,
            appenders: Vec::new(),
            filter: None,
        }
    }
}

/// A node of the logger tree
pub(crate) struct LoggerNode {
    pub(crate) parent: Option<String>,
    pub(crate) children: BTreeSet<String>,
    pub(crate) appenders: Vec<Arc<dyn Appender>>,
    pub(crate) filter: Option<Arc<dyn Filter>>,
    pub(crate) level: Option<LogLevel>,
    pub(crate) additive: bool,
}

impl LoggerNode {
    pub(crate) fn root() -> Self {
        Self {
            parent: None,
            children: BTreeSet::new(),
            appenders: Vec::new(),
            filter: None,
            level: Some(LogLevel::ALL),
            additive: true,
        }
    }

    /// A new child starts with its parent's current level and filter
    pub(crate) fn child_of(
        parent: &str,
        level: Option<LogLevel>,
        filter: Option<Arc<dyn Filter>>,
    ) -> Self {
        Self {
            parent: Some(parent.to_string()),
            children: BTreeSet::new(),
            appenders: Vec::new(),
            filter,
            level,
            additive: true,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.appenders.clear();
        self.level = None;
        self.filter = None;
        self.additive = true;
    }

    pub(crate) fn initialize(&mut self, settings: LoggerSettings) {
        self.level = settings.level;
        self.additive = settings.additive;
        self.appenders = settings.appenders;
        self.filter = settings.filter;
    }
}

/// Handle to a named logger
///
/// Two handles are equal when they belong to the same context and carry
/// the same name, i.e. they address the same node.
#[derive(Clone)]
pub struct Logger {
    context: LoggerContext,
    name: Arc<str>,
}

impl Logger {
    pub(crate) fn attach(context: LoggerContext, name: &str) -> Self {
        Self {
            context,
            name: Arc::from(name),
        }
    }

    /// Dotted name; empty for the root logger
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    pub fn context(&self) -> &LoggerContext {
        &self.context
    }

    pub fn parent(&self) -> Option<Logger> {
        let parent = self.context.with_node(&self.name, |node| node.parent.clone())?;
        Some(Logger::attach(self.context.clone(), &parent))
    }

    /// Names of the loggers created below this one
    pub fn children(&self) -> Vec<String> {
        self.context
            .with_node(&self.name, |node| node.children.iter().cloned().collect())
    }

    /// Threshold of this node; `None` only while it still inherits
    pub fn level(&self) -> Option<LogLevel> {
        self.context.with_node(&self.name, |node| node.level.clone())
    }

    pub fn is_additive(&self) -> bool {
        self.context.with_node(&self.name, |node| node.additive)
    }

    pub fn has_filter(&self) -> bool {
        self.context.with_node(&self.name, |node| node.filter.is_some())
    }

    pub fn appender_names(&self) -> Vec<String> {
        self.context.with_node(&self.name, |node| {
            node.appenders.iter().map(|a| a.name().to_string()).collect()
        })
    }

    pub fn set_level(&self, level: Option<LogLevel>) {
        self.context.with_node_mut(&self.name, |node| node.level = level);
    }

    pub fn set_additive(&self, additive: bool) {
        self.context.with_node_mut(&self.name, |node| node.additive = additive);
    }

    pub fn set_filter(&self, filter: Option<Arc<dyn Filter>>) {
        self.context.with_node_mut(&self.name, |node| node.filter = filter);
    }

    pub fn add_appender(&self, appender: Arc<dyn Appender>) {
        self.context
            .with_node_mut(&self.name, |node| node.appenders.push(appender));
    }

    /// Would an event at `level` pass this logger's level gate?
    ///
    /// Ignores filters, so a context-wide filter may still accept events
    /// for which this returns `false`.
    pub fn is_enabled(&self, level: &LogLevel) -> bool {
        self.context.passes_level(&self.name, level)
    }

    #[inline]
    pub fn error(&self, message: impl Into<Message>) {
        self.trace_at_level(LogLevel::ERROR, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<Message>) {
        self.trace_at_level(LogLevel::WARN, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<Message>) {
        self.trace_at_level(LogLevel::INFO, message);
    }

    #[inline]
    pub fn log(&self, message: impl Into<Message>) {
        self.trace_at_level(LogLevel::LOG, message);
    }

    #[inline]
    pub fn trace(&self, message: impl Into<Message>) {
        self.trace_at_level(LogLevel::TRACE, message);
    }

    /// Emit an event at any registered level
    pub fn trace_at_level(&self, level: LogLevel, message: impl Into<Message>) {
        let event = LogEvent::new(self.name.as_ref(), level, message.into());
        self.trace_event(event);
    }

    /// Run an event through the context filter, the level gate and the local
    /// filter, then propagate it
    ///
    /// Before the context is started the event is parked in the pending
    /// buffer instead. A context-wide `accept` skips the level gate; the
    /// local filter can only veto with `deny`.
    pub(crate) fn trace_event(&self, event: LogEvent) {
        let Some((event, gate)) = self.context.gate(&self.name, event) else {
            return;
        };
        let metrics = self.context.metrics();

        let decision = match gate.context_filter.as_ref().map(|f| f.filter(&event)) {
            Some(FilterDecision::Neutral) | None if gate.passes_level => FilterDecision::Accept,
            Some(FilterDecision::Neutral) | None => FilterDecision::Deny,
            Some(decision) => decision,
        };
        if decision != FilterDecision::Accept {
            metrics.record_filtered();
            return;
        }

        if let Some(local) = gate.local_filter {
            if local.filter(&event) == FilterDecision::Deny {
                metrics.record_filtered();
                return;
            }
        }

        match self.append(&event) {
            Ok(()) => {
                metrics.record_logged();
            }
            Err(e) => {
                metrics.record_append_failure();
                eprintln!(
                    "[LOGGER ERROR] Logger '{}' failed to append event: {}",
                    self.display_name(),
                    e
                );
            }
        }
    }

    /// Hand an accepted event to this logger's appenders, then to each
    /// additive ancestor's appenders
    ///
    /// Ancestors' levels and filters are not consulted; only each appender's
    /// own gate applies. Propagation stops below the first non-additive
    /// logger. The first appender error aborts the walk.
    pub fn append(&self, event: &LogEvent) -> Result<()> {
        for appender in self.context.propagation_chain(&self.name) {
            appender.append(event)?;
        }
        Ok(())
    }

    fn display_name(&self) -> &str {
        if self.is_root() {
            "root"
        } else {
            &self.name
        }
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        self.context.same_context(&other.context) && self.name == other.name
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.display_name())
            .field("level", &self.level())
            .field("additive", &self.is_additive())
            .finish()
    }
}
