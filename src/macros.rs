//! Logging macros for ergonomic parameterized messages.
//!
//! The first argument after the logger is the format string; each `{}` in
//! it is replaced by the next argument when (and only when) the message is
//! formatted. Arguments are captured as [`Param`](crate::Param) values, so
//! anything with a `From` conversion into `Param` can be passed.
//!
//! # Examples
//!
//! ```
//! use rust_logger_hierarchy::{info, LoggerContext};
//!
//! let context = LoggerContext::new();
//! let logger = context.get_logger("server");
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let user_id = 42;
//! let action = "login";
//! info!(logger, "User {} performed action: {}", user_id, action);
//! ```

/// Build a [`Message`](crate::Message) from parameters.
///
/// ```
/// use rust_logger_hierarchy::message;
///
/// let msg = message!("Hello {}", "world");
/// assert_eq!(msg.formatted_message(), "Hello world");
///
/// let positional = message!("x", "y");
/// assert_eq!(positional.formatted_message(), "x y");
/// ```
#[macro_export]
macro_rules! message {
    ($($arg:expr),+ $(,)?) => {
        $crate::Message::new(vec![$($crate::Param::from($arg)),+])
    };
}

/// Log at an arbitrary level, including custom registered levels.
///
/// ```
/// # use rust_logger_hierarchy::{LoggerContext, LogLevel};
/// # let context = LoggerContext::new();
/// # let logger = context.get_logger("app");
/// use rust_logger_hierarchy::log_at;
/// log_at!(logger, LogLevel::INFO, "Simple message");
/// log_at!(logger, LogLevel::new("notice"), "Code: {}", 500);
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:expr),+ $(,)?) => {
        $logger.trace_at_level($level, $crate::message!($($arg),+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::ERROR, $($arg),+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_logger_hierarchy::LoggerContext;
/// # let logger = LoggerContext::new().get_logger("disk");
/// use rust_logger_hierarchy::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::WARN, $($arg),+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::INFO, $($arg),+)
    };
}

/// Log a message at the `log` level, between `info` and `trace`.
#[macro_export]
macro_rules! log {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::LOG, $($arg),+)
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::TRACE, $($arg),+)
    };
}
