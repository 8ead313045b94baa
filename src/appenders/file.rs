//! File appender implementation

use crate::core::{
    config, Appender, AppenderCore, AppenderSettings, LogEvent, LoggerError, Result,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const TYPE_NAME: &str = "FileAppender";

/// Appends one layout line per event to a file
///
/// The file is opened (created if needed) when the appender starts and
/// flushed when it stops.
pub struct FileAppender {
    core: AppenderCore,
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileAppender {
    pub fn new(settings: &AppenderSettings, path: impl Into<PathBuf>) -> Self {
        Self {
            core: AppenderCore::new(settings),
            path: path.into(),
            writer: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Factory for the `FileAppender` type; `path` is required
    pub fn factory(settings: AppenderSettings) -> Result<Arc<dyn Appender>> {
        let path = config::option_str(&settings.options, "path").ok_or_else(|| {
            LoggerError::config(
                format!("appender '{}'", settings.name),
                "FileAppender requires a 'path' option",
            )
        })?;
        Ok(Arc::new(Self::new(&settings, path)))
    }

    pub fn flush(&self) -> Result<()> {
        if let Some(writer) = self.writer.lock().as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

#[async_trait]
impl Appender for FileAppender {
    fn core(&self) -> &AppenderCore {
        &self.core
    }

    async fn open(&self) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::start_failed(
                    self.core.name(),
                    format!("cannot open '{}': {}", self.path.display(), e),
                )
            })?;
        *self.writer.lock() = Some(BufWriter::new(file));
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let writer = self.writer.lock().take();
        if let Some(mut writer) = writer {
            writer.flush().map_err(|e| {
                LoggerError::stop_failed(self.core.name(), e.to_string())
            })?;
        }
        Ok(())
    }

    fn do_append(&self, _event: &LogEvent, line: &str) -> Result<()> {
        let mut guard = self.writer.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LevelRegistry, LogLevel, Message};
    use crate::layouts::PatternLayout;
    use serde_json::json;
    use tempfile::tempdir;

    fn settings(options: serde_json::Value) -> AppenderSettings {
        AppenderSettings {
            name: "file".to_string(),
            type_name: TYPE_NAME.to_string(),
            level: LogLevel::WARN,
            filter: None,
            layout: Arc::new(PatternLayout::new("%p %c %m").unwrap()),
            levels: LevelRegistry::new(),
            options,
        }
    }

    #[tokio::test]
    async fn test_file_appender_writes_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let appender =
            FileAppender::factory(settings(json!({ "path": path.to_str().unwrap() }))).unwrap();

        appender.start().await.unwrap();
        appender
            .append(&LogEvent::new("db", LogLevel::ERROR, Message::from("down")))
            .unwrap();
        appender
            .append(&LogEvent::new("db", LogLevel::INFO, Message::from("ignored")))
            .unwrap();
        appender.stop().await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "ERROR db down\n");
    }

    #[tokio::test]
    async fn test_open_failure_is_start_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("app.log");
        let appender = FileAppender::new(&settings(json!({})), &path);

        let err = appender.start().await.unwrap_err();
        assert!(matches!(err, LoggerError::AppenderStart { .. }));
        assert!(!appender.core().is_started());
    }

    #[test]
    fn test_factory_requires_path() {
        assert!(matches!(
            FileAppender::factory(settings(json!({}))),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }
}
