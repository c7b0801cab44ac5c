//! File appender implementation

use crate::core::{
    Appender, AppenderSettings, LogEvent, LogLevel, LoggerError, LoggerInfo, PatternFormatter,
    Result,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How [`FileAppender::reopen`] opens its path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileMode {
    /// Start from an empty file on every (re)open
    #[default]
    Truncate,
    /// Keep existing content and write after it
    Append,
}

struct FileState {
    settings: AppenderSettings,
    mode: FileMode,
    file: Option<File>,
}

/// Writes rendered events to a file it exclusively owns.
///
/// While no file is open (never opened, or the last [`reopen`](Self::reopen)
/// failed) events are silently dropped. Writes are unbuffered.
pub struct FileAppender {
    path: PathBuf,
    state: Mutex<FileState>,
}

impl FileAppender {
    /// Create an appender for `path` without touching the filesystem.
    ///
    /// Nothing is written until [`reopen`](Self::reopen) succeeds.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(FileState {
                settings: AppenderSettings::default(),
                mode: FileMode::default(),
                file: None,
            }),
        }
    }

    /// Create an appender and open `path` right away.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pattern_logger::appenders::{FileAppender, FileMode};
    ///
    /// let appender = FileAppender::open("/var/log/app.log", FileMode::Append)
    ///     .unwrap()
    ///     .with_pattern("%d [%p] %m%n");
    /// ```
    pub fn open(path: impl Into<PathBuf>, mode: FileMode) -> Result<Self> {
        let appender = Self::new(path).with_mode(mode);
        appender.reopen()?;
        Ok(appender)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: FileMode) -> Self {
        self.state.get_mut().mode = mode;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<PatternFormatter>) -> Self {
        self.state.get_mut().settings.formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_pattern(self, pattern: &str) -> Self {
        self.with_formatter(Arc::new(PatternFormatter::new(pattern)))
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.state.get_mut().settings.level = level;
        self
    }

    /// Close the current handle, if any, and open the path again using the
    /// configured [`FileMode`].
    ///
    /// On failure the appender stays closed and drops events until a later
    /// `reopen` succeeds.
    pub fn reopen(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.file = None;

        let mut options = OpenOptions::new();
        options.create(true);
        match state.mode {
            FileMode::Truncate => options.write(true).truncate(true),
            FileMode::Append => options.append(true),
        };

        let file = options.open(&self.path).map_err(|e| {
            LoggerError::io_operation(
                "opening log file",
                format!("cannot open '{}'", self.path.display()),
                e,
            )
        })?;
        state.file = Some(file);
        Ok(())
    }

    /// Switch to `mode` and [`reopen`](Self::reopen).
    pub fn reopen_with(&self, mode: FileMode) -> Result<()> {
        self.state.lock().mode = mode;
        self.reopen()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> FileMode {
        self.state.lock().mode
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().file.is_some()
    }
}

impl Appender for FileAppender {
    fn log(&self, logger: LoggerInfo<'_>, level: LogLevel, event: &LogEvent<'_>) -> Result<()> {
        let mut state = self.state.lock();
        let FileState { settings, file, .. } = &mut *state;

        let Some(file) = file.as_mut() else {
            return Ok(());
        };
        if let Some(output) = settings.render(logger, level, event) {
            file.write_all(output.as_bytes()).map_err(|e| {
                LoggerError::io_operation(
                    "writing log file",
                    format!("cannot write to '{}'", self.path.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(file) = state.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }

    fn level(&self) -> LogLevel {
        self.state.lock().settings.level
    }

    fn set_level(&self, level: LogLevel) {
        self.state.lock().settings.level = level;
    }

    fn formatter(&self) -> Arc<PatternFormatter> {
        Arc::clone(&self.state.lock().settings.formatter)
    }

    fn set_formatter(&self, formatter: Arc<PatternFormatter>) {
        self.state.lock().settings.formatter = formatter;
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ROOT: LoggerInfo<'static> = LoggerInfo {
        name: "root",
        level: LogLevel::Debug,
    };

    fn write(appender: &FileAppender, level: LogLevel, message: &str) {
        let event = LogEvent::new("file.rs", 9, message);
        appender.log(ROOT, level, &event).expect("write failed");
    }

    #[test]
    fn test_new_is_lazy() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("lazy.log");

        let appender = FileAppender::new(&path).with_pattern("%m\n");
        assert!(!appender.is_open());
        assert!(!path.exists());

        write(&appender, LogLevel::Info, "dropped");
        assert!(!path.exists());

        appender.reopen().expect("reopen failed");
        write(&appender, LogLevel::Info, "kept");
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept\n");
    }

    #[test]
    fn test_threshold() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("threshold.log");

        let appender = FileAppender::open(&path, FileMode::Truncate)
            .expect("open failed")
            .with_pattern("%p %m%n")
            .with_level(LogLevel::Error);

        write(&appender, LogLevel::Warn, "no");
        write(&appender, LogLevel::Error, "yes");
        write(&appender, LogLevel::Fatal, "also");

        assert_eq!(fs::read_to_string(&path).unwrap(), "ERROR yes\nFATAL also\n");
    }

    #[test]
    fn test_truncate_and_append_modes() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("modes.log");
        fs::write(&path, "old\n").unwrap();

        let appender = FileAppender::open(&path, FileMode::Append)
            .expect("open failed")
            .with_pattern("%m%n");
        write(&appender, LogLevel::Info, "appended");
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nappended\n");

        appender.reopen_with(FileMode::Truncate).expect("reopen failed");
        assert_eq!(appender.mode(), FileMode::Truncate);
        write(&appender, LogLevel::Info, "fresh");
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_reopen_after_delete() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("deleted.log");

        let appender = FileAppender::open(&path, FileMode::Truncate)
            .expect("open failed")
            .with_pattern("%m%n");
        write(&appender, LogLevel::Info, "before");

        fs::remove_file(&path).unwrap();
        appender.reopen().expect("reopen failed");
        write(&appender, LogLevel::Info, "after");

        assert_eq!(fs::read_to_string(&path).unwrap(), "after\n");
    }

    #[test]
    fn test_failed_reopen_drops_events() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing_dir").join("x.log");

        let appender = FileAppender::new(&path);
        let err = appender.reopen().unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(!appender.is_open());

        write(&appender, LogLevel::Fatal, "lost");
        assert!(!path.exists());
    }
}
