//! Standard output appender implementation

use crate::core::{Appender, AppenderSettings, LogEvent, LogLevel, LoggerInfo, PatternFormatter, Result};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Writes rendered events to the process's standard output.
///
/// Each event is rendered and written while this appender's lock is held, so
/// lines from concurrent callers never interleave through the same instance.
pub struct StdoutAppender {
    settings: Mutex<AppenderSettings>,
}

impl StdoutAppender {
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(AppenderSettings::default()),
        }
    }

    /// Use a shared, already compiled formatter
    ///
    /// # Example
    ///
    /// ```
    /// use pattern_logger::appenders::StdoutAppender;
    /// use pattern_logger::PatternFormatter;
    /// use std::sync::Arc;
    ///
    /// let formatter = Arc::new(PatternFormatter::new("%d [%p] %m%n"));
    /// let appender = StdoutAppender::new().with_formatter(formatter);
    /// ```
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<PatternFormatter>) -> Self {
        self.settings.get_mut().formatter = formatter;
        self
    }

    /// Compile `pattern` and use it for this appender
    #[must_use]
    pub fn with_pattern(self, pattern: &str) -> Self {
        self.with_formatter(Arc::new(PatternFormatter::new(pattern)))
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.settings.get_mut().level = level;
        self
    }
}

impl Default for StdoutAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for StdoutAppender {
    fn log(&self, logger: LoggerInfo<'_>, level: LogLevel, event: &LogEvent<'_>) -> Result<()> {
        let settings = self.settings.lock();
        if let Some(output) = settings.render(logger, level, event) {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn level(&self) -> LogLevel {
        self.settings.lock().level
    }

    fn set_level(&self, level: LogLevel) {
        self.settings.lock().level = level;
    }

    fn formatter(&self) -> Arc<PatternFormatter> {
        Arc::clone(&self.settings.lock().formatter)
    }

    fn set_formatter(&self, formatter: Arc<PatternFormatter>) {
        self.settings.lock().formatter = formatter;
    }

    fn name(&self) -> &str {
        "stdout"
    }
}
