//! Layout trait for turning events into text

use super::log_event::LogEvent;

pub trait Layout: Send + Sync {
    fn format(&self, event: &LogEvent) -> String;

    fn type_name(&self) -> &str;
}
