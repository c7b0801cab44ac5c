//! Appender trait for log output destinations

use super::error::Result;
use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::logger::LoggerInfo;
use super::pattern::PatternFormatter;
use std::sync::Arc;

/// A sink that conditionally writes rendered events.
///
/// Appenders are shared between loggers as `Arc<dyn Appender>`, so every
/// method takes `&self`; implementations keep their own lock around
/// "render + write" so concurrent callers never interleave within one event.
pub trait Appender: Send + Sync {
    /// Render and write `event` if `level` passes this appender's threshold.
    fn log(&self, logger: LoggerInfo<'_>, level: LogLevel, event: &LogEvent<'_>) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn level(&self) -> LogLevel;
    fn set_level(&self, level: LogLevel);
    fn formatter(&self) -> Arc<PatternFormatter>;
    fn set_formatter(&self, formatter: Arc<PatternFormatter>);
    fn name(&self) -> &str;
}

/// Threshold and formatter every appender carries.
///
/// There is no "no formatter" state: settings always start from a formatter,
/// [`PatternFormatter::default`] when none is given.
#[derive(Debug, Clone)]
pub struct AppenderSettings {
    pub level: LogLevel,
    pub formatter: Arc<PatternFormatter>,
}

impl AppenderSettings {
    pub fn new(formatter: Arc<PatternFormatter>) -> Self {
        Self {
            level: LogLevel::Debug,
            formatter,
        }
    }

    /// Rendered text for `event`, or `None` when `level` is below the threshold.
    pub fn render(
        &self,
        logger: LoggerInfo<'_>,
        level: LogLevel,
        event: &LogEvent<'_>,
    ) -> Option<String> {
        if !level.passes(self.level) {
            return None;
        }
        Some(self.formatter.format(logger, level, event))
    }
}

impl Default for AppenderSettings {
    fn default() -> Self {
        Self::new(Arc::new(PatternFormatter::default()))
    }
}
