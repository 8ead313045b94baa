//! Appender trait for log output destinations
//!
//! Concrete appenders implement [`Appender::do_append`] and, when they own
//! resources, [`Appender::open`] / [`Appender::close`]. The provided
//! `start`, `stop` and `append` methods carry the lifecycle flag and the
//! per-appender filter and level gate shared by every appender.

use super::{
    error::{LoggerError, Result},
    filter::{Filter, FilterDecision},
    layout::Layout,
    log_event::LogEvent,
    log_level::{LevelRegistry, LogLevel},
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Everything the context resolved for one appender entry
#[derive(Clone)]
pub struct AppenderSettings {
    pub name: String,
    pub type_name: String,
    /// Appender threshold, `all` unless configured
    pub level: LogLevel,
    pub filter: Option<Arc<dyn Filter>>,
    pub layout: Arc<dyn Layout>,
    pub levels: LevelRegistry,
    /// The raw configuration entry with type-specific options
    pub options: serde_json::Value,
}

/// State shared by all appender implementations
pub struct AppenderCore {
    name: String,
    level: LogLevel,
    filter: Option<Arc<dyn Filter>>,
    layout: Arc<dyn Layout>,
    levels: LevelRegistry,
    started: AtomicBool,
}

impl AppenderCore {
    pub fn new(settings: &AppenderSettings) -> Self {
        Self {
            name: settings.name.clone(),
            level: settings.level.clone(),
            filter: settings.filter.clone(),
            layout: Arc::clone(&settings.layout),
            levels: settings.levels.clone(),
            started: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> &LogLevel {
        &self.level
    }

    pub fn layout(&self) -> &dyn Layout {
        self.layout.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    pub fn set_started(&self, started: bool) {
        self.started.store(started, Ordering::Release);
    }

    /// Own filter first; a neutral verdict falls back to the level threshold
    pub fn decide(&self, event: &LogEvent) -> FilterDecision {
        let decision = self
            .filter
            .as_ref()
            .map(|f| f.filter(event))
            .unwrap_or(FilterDecision::Neutral);

        match decision {
            FilterDecision::Neutral if self.levels.is_below(event.level(), &self.level) => {
                FilterDecision::Accept
            }
            FilterDecision::Neutral => FilterDecision::Deny,
            other => other,
        }
    }
}

#[async_trait]
pub trait Appender: Send + Sync {
    fn core(&self) -> &AppenderCore;

    /// Write one accepted event; `line` is the layout output
    fn do_append(&self, event: &LogEvent, line: &str) -> Result<()>;

    /// Acquire resources (files, connections) before the first event
    async fn open(&self) -> Result<()> {
        Ok(())
    }

    /// Release resources; buffered output must be flushed here
    async fn close(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        self.core().name()
    }

    async fn start(&self) -> Result<()> {
        self.open().await?;
        self.core().set_started(true);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.core().set_started(false);
        self.close().await
    }

    /// Gate the event through this appender's filter and level, then write it
    ///
    /// Fails with [`LoggerError::AppenderNotStarted`] when called before
    /// `start` has completed.
    fn append(&self, event: &LogEvent) -> Result<()> {
        let core = self.core();
        if !core.is_started() {
            return Err(LoggerError::not_started(core.name()));
        }
        if core.decide(event) == FilterDecision::Deny {
            return Ok(());
        }
        let line = core.layout().format(event);
        self.do_append(event, &line)
    }
}
