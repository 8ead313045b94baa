//! Log event record

use super::log_level::LogLevel;
use super::message::Message;
use chrono::{DateTime, Utc};
use std::cell::RefCell;

// Thread-local cache for the thread label to avoid repeated allocations
thread_local! {
    static THREAD_LABEL_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Thread name if set, thread id otherwise; cached on first access
fn thread_label() -> String {
    THREAD_LABEL_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let current = std::thread::current();
                current
                    .name()
                    .map(String::from)
                    .unwrap_or_else(|| format!("{:?}", current.id()))
            })
            .clone()
    })
}

/// Immutable record of one accepted trace call
///
/// Built exactly once per trace call and handed by reference to every
/// appender on the propagation path; nothing after construction mutates it.
#[derive(Debug)]
pub struct LogEvent {
    logger_name: String,
    level: LogLevel,
    message: Message,
    timestamp: DateTime<Utc>,
    thread: String,
}

impl LogEvent {
    pub fn new(logger_name: impl Into<String>, level: LogLevel, message: Message) -> Self {
        Self {
            logger_name: logger_name.into(),
            level,
            message,
            timestamp: Utc::now(),
            thread: thread_label(),
        }
    }

    /// Name of the originating logger; empty for the root logger
    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn level(&self) -> &LogLevel {
        &self.level
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    pub fn thread(&self) -> &str {
        &self.thread
    }
}
