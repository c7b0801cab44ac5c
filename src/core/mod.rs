//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod directive;
pub mod error;
pub mod format_item;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod pattern;

pub use appender::{Appender, AppenderSettings};
pub use config::{AppenderConfig, LoggerConfig};
pub use directive::{DirectiveFactory, DirectiveRegistry};
pub use error::{LoggerError, Result};
pub use format_item::{FormatItem, DEFAULT_DATE_FORMAT};
pub use log_event::{current_fiber_id, current_thread_id, elapsed_ms, set_current_fiber_id, LogEvent};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, LoggerInfo, ROOT_LOGGER_NAME};
pub use pattern::{PatternFormatter, DEFAULT_PATTERN, PATTERN_ERROR_MARKER};
