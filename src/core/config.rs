//! Declarative logger configuration
//!
//! Describes a logger and its appenders as data (JSON via serde) and builds
//! a ready [`Logger`] from it. Building is strict: templates that fail to
//! compile and files that cannot be opened are rejected up front instead of
//! surfacing later as markers or silently dropped output.
//!
//! # Examples
//!
//! ```
//! use pattern_logger::{LoggerConfig, LogLevel};
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "name": "app",
//!     "level": "INFO",
//!     "appenders": [ { "type": "stdout", "pattern": "[%p] %m%n" } ]
//! }"#).unwrap();
//!
//! let logger = config.build().unwrap();
//! assert_eq!(logger.level(), LogLevel::Info);
//! ```

use super::directive::DirectiveRegistry;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::logger::{Logger, ROOT_LOGGER_NAME};
use super::pattern::{PatternFormatter, DEFAULT_PATTERN};
use crate::appenders::{FileAppender, FileMode, StdoutAppender};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub name: String,
    pub level: LogLevel,
    /// Template for appenders that do not set their own
    pub pattern: String,
    pub appenders: Vec<AppenderConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppenderConfig {
    Stdout {
        #[serde(default)]
        level: Option<LogLevel>,
        #[serde(default)]
        pattern: Option<String>,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        level: Option<LogLevel>,
        #[serde(default)]
        pattern: Option<String>,
        #[serde(default)]
        mode: FileMode,
    },
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: ROOT_LOGGER_NAME.to_string(),
            level: LogLevel::Debug,
            pattern: DEFAULT_PATTERN.to_string(),
            appenders: Vec::new(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json(&json)
    }

    pub fn build(&self) -> Result<Logger> {
        self.build_with(&DirectiveRegistry::standard())
    }

    /// Build using a custom directive table for every template.
    pub fn build_with(&self, registry: &DirectiveRegistry) -> Result<Logger> {
        // Appenders without a pattern share one compiled default
        let default_formatter = Arc::new(PatternFormatter::compile_strict_with(
            self.pattern.as_str(),
            registry,
        )?);
        let formatter_for = |pattern: &Option<String>| -> Result<Arc<PatternFormatter>> {
            match pattern {
                Some(pattern) => Ok(Arc::new(PatternFormatter::compile_strict_with(
                    pattern.as_str(),
                    registry,
                )?)),
                None => Ok(Arc::clone(&default_formatter)),
            }
        };

        let logger = Logger::named(self.name.clone());
        logger.set_level(self.level);

        for appender in &self.appenders {
            match appender {
                AppenderConfig::Stdout { level, pattern } => {
                    let mut stdout = StdoutAppender::new().with_formatter(formatter_for(pattern)?);
                    if let Some(level) = level {
                        stdout = stdout.with_level(*level);
                    }
                    logger.add_appender(Arc::new(stdout));
                }
                AppenderConfig::File {
                    path,
                    level,
                    pattern,
                    mode,
                } => {
                    if path.as_os_str().is_empty() {
                        return Err(LoggerError::config("file appender", "path must not be empty"));
                    }
                    let formatter = formatter_for(pattern)?;
                    let mut file = FileAppender::open(path.clone(), *mode)
                        .map_err(|e| {
                            LoggerError::file_appender(path.display().to_string(), e.to_string())
                        })?
                        .with_formatter(formatter);
                    if let Some(level) = level {
                        file = file.with_level(*level);
                    }
                    logger.add_appender(Arc::new(file));
                }
            }
        }

        Ok(logger)
    }
}
