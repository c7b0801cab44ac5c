//! Main logger implementation

use super::{appender::Appender, error::Result, log_event::LogEvent, log_level::LogLevel};
use parking_lot::RwLock;
use std::sync::Arc;

/// Name of the logger created by [`Logger::new`].
pub const ROOT_LOGGER_NAME: &str = "root";

/// Lightweight view of a logger handed down the dispatch chain, so
/// formatters can render the logger's name without owning the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerInfo<'a> {
    pub name: &'a str,
    pub level: LogLevel,
}

/// Named dispatcher fanning leveled events out to its appenders.
///
/// Dispatch is synchronous: every appender has written (or skipped) the
/// event by the time [`Logger::log`] returns. `log` never fails or panics
/// into the caller; appender errors and panics are reported on stderr.
pub struct Logger {
    name: String,
    level: RwLock<LogLevel>,
    appenders: RwLock<Vec<Arc<dyn Appender>>>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::named(ROOT_LOGGER_NAME)
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(LogLevel::Debug),
            appenders: RwLock::new(Vec::new()),
        }
    }

    /// Dispatch `event` to every appender, in insertion order, if `level`
    /// passes this logger's threshold.
    pub fn log(&self, level: LogLevel, event: &LogEvent<'_>) {
        let threshold = *self.level.read();
        if !level.passes(threshold) {
            return;
        }

        let info = LoggerInfo {
            name: &self.name,
            level: threshold,
        };
        let appenders = self.appenders.read();
        Self::dispatch(&appenders, info, level, event);
    }

    /// Per-appender isolation: an appender that errors or panics does not
    /// keep the event from the remaining appenders.
    fn dispatch(
        appenders: &[Arc<dyn Appender>],
        info: LoggerInfo<'_>,
        level: LogLevel,
        event: &LogEvent<'_>,
    ) {
        for (idx, appender) in appenders.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.log(info, level, event)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Logger '{}': appender #{} ({}) failed: {}",
                        info.name,
                        idx,
                        appender.name(),
                        e
                    );
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Logger '{}': appender #{} ({}) panicked: {}. \
                         Other appenders continue to function.",
                        info.name,
                        idx,
                        appender.name(),
                        panic_msg
                    );
                }
            }
        }
    }

    #[inline]
    pub fn debug(&self, event: &LogEvent<'_>) {
        self.log(LogLevel::Debug, event);
    }

    #[inline]
    pub fn info(&self, event: &LogEvent<'_>) {
        self.log(LogLevel::Info, event);
    }

    #[inline]
    pub fn warn(&self, event: &LogEvent<'_>) {
        self.log(LogLevel::Warn, event);
    }

    #[inline]
    pub fn error(&self, event: &LogEvent<'_>) {
        self.log(LogLevel::Error, event);
    }

    #[inline]
    pub fn fatal(&self, event: &LogEvent<'_>) {
        self.log(LogLevel::Fatal, event);
    }

    /// Append `appender` to the dispatch list. Duplicates are not rejected.
    pub fn add_appender(&self, appender: Arc<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Remove the first entry that is the same allocation as `appender`.
    ///
    /// Returns whether anything was removed.
    pub fn del_appender<A: Appender + ?Sized>(&self, appender: &Arc<A>) -> bool {
        let mut appenders = self.appenders.write();
        let position = appenders
            .iter()
            .position(|existing| std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(appender)));
        match position {
            Some(idx) => {
                appenders.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear_appenders(&self) {
        self.appenders.write().clear();
    }

    pub fn appenders(&self) -> Vec<Arc<dyn Appender>> {
        self.appenders.read().clone()
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn info_snapshot(&self) -> LoggerInfo<'_> {
        LoggerInfo {
            name: &self.name,
            level: self.level(),
        }
    }

    /// Flush every appender, even past a failing one; the first error is returned.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for appender in self.appenders.read().iter() {
            if let Err(e) = appender.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("appenders", &self.appender_count())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!(
                "[LOGGER ERROR] Logger '{}': failed to flush during shutdown: {}",
                self.name, e
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use pattern_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .name("app")
///     .level(LogLevel::Info)
///     .appender(StdoutAppender::new())
///     .build();
///
/// assert_eq!(logger.name(), "app");
/// assert_eq!(logger.appender_count(), 1);
/// ```
pub struct LoggerBuilder {
    name: String,
    level: LogLevel,
    appenders: Vec<Arc<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            name: ROOT_LOGGER_NAME.to_string(),
            level: LogLevel::Debug,
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Add an appender owned by this logger alone
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Arc::new(appender));
        self
    }

    /// Add an appender that other loggers may also hold
    #[must_use = "builder methods return a new value"]
    pub fn shared_appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::named(self.name);
        logger.set_level(self.level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::appender::AppenderSettings;
    use crate::core::error::LoggerError;
    use crate::core::pattern::PatternFormatter;
    use parking_lot::Mutex;

    struct CaptureAppender {
        settings: Mutex<AppenderSettings>,
        lines: Mutex<Vec<String>>,
    }

    impl CaptureAppender {
        fn new(pattern: &str) -> Arc<Self> {
            Arc::new(Self {
                settings: Mutex::new(AppenderSettings::new(Arc::new(PatternFormatter::new(
                    pattern,
                )))),
                lines: Mutex::new(Vec::new()),
            })
        }

        fn lines(&self) -> Vec<String> {
            self.lines.lock().clone()
        }
    }

    impl Appender for CaptureAppender {
        fn log(&self, logger: LoggerInfo<'_>, level: LogLevel, event: &LogEvent<'_>) -> Result<()> {
            if let Some(line) = self.settings.lock().render(logger, level, event) {
                self.lines.lock().push(line);
            }
            Ok(())
        }

        fn flush(&self) -> Result<()> {
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
            "capture"
        }
    }

    struct BrokenAppender {
        panic: bool,
    }

    #[derive(Default)]
    struct FlushCounter {
        fail: bool,
        flushes: Mutex<usize>,
    }

    impl Appender for FlushCounter {
        fn log(&self, _: LoggerInfo<'_>, _: LogLevel, _: &LogEvent<'_>) -> Result<()> {
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            *self.flushes.lock() += 1;
            if self.fail {
                return Err(LoggerError::other("flush refused"));
            }
            Ok(())
        }

        fn level(&self) -> LogLevel {
            LogLevel::Debug
        }

        fn set_level(&self, _: LogLevel) {}

        fn formatter(&self) -> Arc<PatternFormatter> {
            Arc::new(PatternFormatter::default())
        }

        fn set_formatter(&self, _: Arc<PatternFormatter>) {}

        fn name(&self) -> &str {
            "flush-counter"
        }
    }

    impl Appender for BrokenAppender {
        fn log(&self, _: LoggerInfo<'_>, _: LogLevel, _: &LogEvent<'_>) -> Result<()> {
            if self.panic {
                panic!("sink exploded");
            }
            Err(LoggerError::other("Simulated failure"))
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn level(&self) -> LogLevel {
            LogLevel::Debug
        }

        fn set_level(&self, _: LogLevel) {}

        fn formatter(&self) -> Arc<PatternFormatter> {
            Arc::new(PatternFormatter::default())
        }

        fn set_formatter(&self, _: Arc<PatternFormatter>) {}

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn event(message: &str) -> LogEvent<'static> {
        LogEvent::new("logger.rs", 1, message)
    }

    #[test]
    fn test_logger_threshold() {
        let logger = Logger::new();
        let capture = CaptureAppender::new("%p %m");
        logger.add_appender(capture.clone());
        logger.set_level(LogLevel::Warn);

        logger.debug(&event("a"));
        logger.info(&event("b"));
        logger.warn(&event("c"));
        logger.error(&event("d"));
        logger.fatal(&event("e"));

        assert_eq!(capture.lines(), vec!["WARN c", "ERROR d", "FATAL e"]);
    }

    #[test]
    fn test_appender_threshold_is_independent() {
        let logger = Logger::new();
        let everything = CaptureAppender::new("%m");
        let errors_only = CaptureAppender::new("%m");
        errors_only.set_level(LogLevel::Error);
        logger.add_appender(everything.clone());
        logger.add_appender(errors_only.clone());

        logger.info(&event("info"));
        logger.error(&event("error"));

        assert_eq!(everything.lines(), vec!["info", "error"]);
        assert_eq!(errors_only.lines(), vec!["error"]);
    }

    #[test]
    fn test_unknown_level_is_dropped() {
        let logger = Logger::new();
        logger.set_level(LogLevel::Unknown);
        let capture = CaptureAppender::new("%m");
        logger.add_appender(capture.clone());

        logger.log(LogLevel::Unknown, &event("never"));
        logger.log(LogLevel::Debug, &event("yes"));

        assert_eq!(capture.lines(), vec!["yes"]);
    }

    #[test]
    fn test_logger_name_reaches_formatter() {
        let logger = Logger::named("net");
        let capture = CaptureAppender::new("[%c] %m");
        logger.add_appender(capture.clone());

        logger.info(&event("up"));

        assert_eq!(capture.lines(), vec!["[net] up"]);
    }

    #[test]
    fn test_duplicate_appender_dispatches_twice() {
        let logger = Logger::new();
        let capture = CaptureAppender::new("%m");
        logger.add_appender(capture.clone());
        logger.add_appender(capture.clone());

        logger.info(&event("x"));
        assert_eq!(capture.lines(), vec!["x", "x"]);

        assert!(logger.del_appender(&capture));
        assert_eq!(logger.appender_count(), 1);
    }

    #[test]
    fn test_del_appender() {
        let logger = Logger::new();
        let kept = CaptureAppender::new("%m");
        let stranger = CaptureAppender::new("%m");
        logger.add_appender(kept.clone());

        assert!(!logger.del_appender(&stranger));
        assert_eq!(logger.appender_count(), 1);

        let temporary = CaptureAppender::new("%m");
        logger.add_appender(temporary.clone());
        assert!(logger.del_appender(&temporary));

        let remaining = logger.appenders();
        assert_eq!(remaining.len(), 1);
        assert!(std::ptr::addr_eq(
            Arc::as_ptr(&remaining[0]),
            Arc::as_ptr(&kept)
        ));
    }

    #[test]
    fn test_failing_appenders_are_isolated() {
        let logger = Logger::new();
        let capture = CaptureAppender::new("%m");
        logger.add_appender(Arc::new(BrokenAppender { panic: false }));
        logger.add_appender(Arc::new(BrokenAppender { panic: true }));
        logger.add_appender(capture.clone());

        logger.error(&event("survives"));

        assert_eq!(capture.lines(), vec!["survives"]);
    }

    #[test]
    fn test_flush_reaches_every_appender() {
        let logger = Logger::new();
        let failing = Arc::new(FlushCounter {
            fail: true,
            ..FlushCounter::default()
        });
        let healthy = Arc::new(FlushCounter::default());
        logger.add_appender(failing.clone());
        logger.add_appender(healthy.clone());

        let err = logger.flush().unwrap_err();
        assert!(matches!(err, LoggerError::Other(_)));
        assert_eq!(*failing.flushes.lock(), 1);
        assert_eq!(*healthy.flushes.lock(), 1);

        drop(logger);
        assert_eq!(*healthy.flushes.lock(), 2);
    }

    #[test]
    fn test_info_snapshot() {
        let logger = Logger::named("snap");
        logger.set_level(LogLevel::Error);
        assert_eq!(
            logger.info_snapshot(),
            LoggerInfo {
                name: "snap",
                level: LogLevel::Error,
            }
        );
    }

    #[test]
    fn test_builder() {
        let shared = CaptureAppender::new("%c:%m");
        let logger = Logger::builder()
            .name("svc")
            .level(LogLevel::Info)
            .shared_appender(shared.clone())
            .build();

        assert_eq!(logger.name(), "svc");
        assert_eq!(logger.level(), LogLevel::Info);
        logger.debug(&event("hidden"));
        logger.info(&event("shown"));
        assert_eq!(shared.lines(), vec!["svc:shown"]);
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default().build();
        assert_eq!(logger.name(), ROOT_LOGGER_NAME);
        assert_eq!(logger.level(), LogLevel::Debug);
        assert_eq!(logger.appender_count(), 0);
    }
}
