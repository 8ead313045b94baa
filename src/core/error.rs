//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (configuration or layout) error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Appender type missing from the appender registry
    #[error("Unknown appender type '{0}'")]
    UnknownAppenderType(String),

    /// Filter type missing from the filter registry
    #[error("Unknown filter type '{0}'")]
    UnknownFilterType(String),

    /// Layout type missing from the layout registry
    #[error("Unknown layout type '{0}'")]
    UnknownLayoutType(String),

    /// Two appender definitions share a name
    #[error("Duplicate appender name '{0}'")]
    DuplicateAppender(String),

    /// A logger references an appender that was never defined
    #[error("Logger '{logger}' references unknown appender '{appender}'")]
    UnknownAppenderRef { logger: String, appender: String },

    /// No layout could be resolved for an appender
    #[error("No layout configured for appender '{0}'")]
    MissingLayout(String),

    /// Level name already registered
    #[error("Duplicate level '{0}'")]
    DuplicateLevel(String),

    /// Reference level for a registration does not exist
    #[error("Unknown reference level '{0}'")]
    UnknownReferenceLevel(String),

    /// Level name not present in the level registry
    #[error("Unknown level '{0}'")]
    UnknownLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Layout pattern could not be parsed
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// `append` was called on an appender that is not started
    #[error("Appender '{name}' is not started")]
    AppenderNotStarted { name: String },

    /// Appender failed to start
    #[error("Appender '{name}' failed to start: {message}")]
    AppenderStart { name: String, message: String },

    /// Appender failed to stop
    #[error("Appender '{name}' failed to stop: {message}")]
    AppenderStop { name: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an unknown appender reference error
    pub fn unknown_appender_ref(logger: impl Into<String>, appender: impl Into<String>) -> Self {
        LoggerError::UnknownAppenderRef {
            logger: logger.into(),
            appender: appender.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an appender-not-started error
    pub fn not_started(name: impl Into<String>) -> Self {
        LoggerError::AppenderNotStarted { name: name.into() }
    }

    /// Create an appender start failure
    pub fn start_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::AppenderStart {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an appender stop failure
    pub fn stop_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::AppenderStop {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Whether this error belongs to the configuration category
    ///
    /// Configuration errors are raised synchronously by `initialize` and
    /// `register_level`; lifecycle errors surface from `start`/`stop`.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::UnknownAppenderType(_)
                | LoggerError::UnknownFilterType(_)
                | LoggerError::UnknownLayoutType(_)
                | LoggerError::DuplicateAppender(_)
                | LoggerError::UnknownAppenderRef { .. }
                | LoggerError::MissingLayout(_)
                | LoggerError::DuplicateLevel(_)
                | LoggerError::UnknownReferenceLevel(_)
                | LoggerError::UnknownLevel(_)
                | LoggerError::InvalidConfiguration { .. }
                | LoggerError::InvalidPattern { .. }
                | LoggerError::JsonError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("appenders", "missing name");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::unknown_appender_ref("a.b", "console");
        assert!(matches!(err, LoggerError::UnknownAppenderRef { .. }));

        let err = LoggerError::not_started("file");
        assert!(matches!(err, LoggerError::AppenderNotStarted { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::UnknownAppenderType("Syslog".to_string());
        assert_eq!(err.to_string(), "Unknown appender type 'Syslog'");

        let err = LoggerError::unknown_appender_ref("app.db", "missing");
        assert_eq!(
            err.to_string(),
            "Logger 'app.db' references unknown appender 'missing'"
        );

        let err = LoggerError::start_failed("file", "Permission denied");
        assert_eq!(
            err.to_string(),
            "Appender 'file' failed to start: Permission denied"
        );
    }

    #[test]
    fn test_configuration_category() {
        assert!(LoggerError::DuplicateLevel("warn".into()).is_configuration());
        assert!(LoggerError::MissingLayout("a".into()).is_configuration());
        assert!(!LoggerError::not_started("a").is_configuration());
        assert!(!LoggerError::start_failed("a", "x").is_configuration());
    }
}
