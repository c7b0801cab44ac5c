//! # Pattern Logger
//!
//! A small logging library: named loggers dispatch leveled events to a chain
//! of appenders, each rendering the event through a compiled pattern.
//!
//! ## Features
//!
//! - **Pattern formatter**: printf-style templates (`%d{%Y-%m-%d} [%p] %f:%l %m%n`)
//!   compiled once, rendered many times
//! - **Two-stage filtering**: logger and appender thresholds are independent
//! - **Shared appenders**: one sink can serve several loggers
//! - **Thread safe**: each appender writes one event at a time
//!
//! ## Example
//!
//! ```
//! use pattern_logger::prelude::*;
//! use pattern_logger::info;
//!
//! let logger = Logger::builder()
//!     .name("app")
//!     .appender(StdoutAppender::new().with_pattern("%d{%H:%M:%S} [%p] %c %f:%l %m%n"))
//!     .build();
//!
//! info!(logger, "listening on port {}", 8080);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{FileAppender, FileMode, StdoutAppender};
    pub use crate::core::{
        Appender, AppenderConfig, DirectiveRegistry, FormatItem, LogEvent, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerInfo, PatternFormatter, Result,
    };
}

pub use crate::appenders::{FileAppender, FileMode, StdoutAppender};
pub use crate::core::{
    Appender, AppenderConfig, AppenderSettings, DirectiveFactory, DirectiveRegistry, FormatItem,
    LogEvent, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerInfo,
    PatternFormatter, Result, DEFAULT_PATTERN,
};
