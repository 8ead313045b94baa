//! Console appender implementation

use crate::core::{
    config, Appender, AppenderCore, AppenderSettings, LogEvent, LogLevel, Result,
};
use async_trait::async_trait;
use colored::{Color, Colorize};
use std::io::Write;
use std::sync::Arc;

pub const TYPE_NAME: &str = "ConsoleAppender";

/// Writes layout output to stdout; `error` events go to stderr
pub struct ConsoleAppender {
    core: AppenderCore,
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new(settings: &AppenderSettings) -> Self {
        Self {
            core: AppenderCore::new(settings),
            use_colors: false,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Factory for the `ConsoleAppender` type; reads the `colors` option
    pub fn factory(settings: AppenderSettings) -> Result<Arc<dyn Appender>> {
        let use_colors = config::option_bool(&settings.options, "colors", false)?;
        Ok(Arc::new(Self::new(&settings).with_colors(use_colors)))
    }

    fn color_for(level: &LogLevel) -> Option<Color> {
        match level.to_str() {
            "error" => Some(Color::Red),
            "warn" => Some(Color::Yellow),
            "info" => Some(Color::Green),
            "log" => Some(Color::Blue),
            "trace" => Some(Color::BrightBlack),
            _ => None,
        }
    }

    fn render(&self, event: &LogEvent, line: &str) -> String {
        match Self::color_for(event.level()) {
            Some(color) if self.use_colors => line.color(color).to_string(),
            _ => line.to_string(),
        }
    }
}

#[async_trait]
impl Appender for ConsoleAppender {
    fn core(&self) -> &AppenderCore {
        &self.core
    }

    fn do_append(&self, event: &LogEvent, line: &str) -> Result<()> {
        let output = self.render(event, line);

        // Route errors to stderr, everything else to stdout
        if event.level() == &LogLevel::ERROR {
            let mut stderr = std::io::stderr().lock();
            writeln!(stderr, "{}", output)?;
        } else {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", output)?;
        }
        Ok(())
    }
}
