//! In-memory appender for capturing output in tests and tools

use crate::core::{Appender, AppenderCore, AppenderSettings, LogEvent, LogLevel, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// One event as seen by a [`MemoryAppender`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub appender: String,
    pub logger: String,
    pub level: LogLevel,
    pub message: String,
    /// Layout output
    pub line: String,
    pub timestamp_millis: i64,
}

/// Shared store the memory appenders of one factory write into
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.line.clone()).collect()
    }

    /// Layout output captured by the appender called `appender`
    pub fn lines_for(&self, appender: &str) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.appender == appender)
            .map(|e| e.line.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    fn push(&self, event: CapturedEvent) {
        self.events.lock().push(event);
    }
}

/// Appender recording every accepted event into a [`MemorySink`]
///
/// Not registered by default; register it under a type name of your choice:
///
/// ```
/// use rust_logger_hierarchy::appenders::{MemoryAppender, MemorySink};
/// use rust_logger_hierarchy::LoggerContext;
///
/// let sink = MemorySink::new();
/// let context = LoggerContext::new();
/// context.register_appender("MemoryAppender", MemoryAppender::factory(sink.clone()));
/// ```
pub struct MemoryAppender {
    core: AppenderCore,
    sink: MemorySink,
}

impl MemoryAppender {
    pub fn new(settings: &AppenderSettings, sink: MemorySink) -> Self {
        Self {
            core: AppenderCore::new(settings),
            sink,
        }
    }

    pub fn factory(
        sink: MemorySink,
    ) -> impl Fn(AppenderSettings) -> Result<Arc<dyn Appender>> + Send + Sync + 'static {
        move |settings| Ok(Arc::new(MemoryAppender::new(&settings, sink.clone())) as Arc<dyn Appender>)
    }

    pub fn sink(&self) -> &MemorySink {
        &self.sink
    }
}

#[async_trait]
impl Appender for MemoryAppender {
    fn core(&self) -> &AppenderCore {
        &self.core
    }

    fn do_append(&self, event: &LogEvent, line: &str) -> Result<()> {
        self.sink.push(CapturedEvent {
            appender: self.core.name().to_string(),
            logger: event.logger_name().to_string(),
            level: event.level().clone(),
            message: event.message().formatted_message().to_string(),
            line: line.to_string(),
            timestamp_millis: event.timestamp_millis(),
        });
        Ok(())
    }
}
