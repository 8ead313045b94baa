//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod layout;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod pending;
pub mod registry;
pub mod timestamp;

pub use appender::{Appender, AppenderCore, AppenderSettings};
pub use context::{ContextState, LoggerContext};
pub use error::{LoggerError, Result};
pub use filter::{AcceptAll, CompositeFilter, Filter, FilterDecision};
pub use layout::Layout;
pub use log_event::LogEvent;
pub use log_level::{LevelRegistry, LogLevel};
pub use logger::{Logger, LoggerSettings};
pub use message::{Message, MessageFormat, Param};
pub use metrics::ContextMetrics;
pub use pending::DEFAULT_MAX_PENDING_EVENTS;
pub use registry::{AppenderFactory, FilterFactory, LayoutFactory, Registry};
pub use timestamp::TimestampFormat;
