//! Logging macros for ergonomic log message formatting.
//!
//! These macros capture the call site (`file!()`, `line!()`) into a
//! [`LogEvent`](crate::LogEvent), format the message like `format!`, and hand
//! the event to the logger.
//!
//! # Examples
//!
//! ```
//! use pattern_logger::prelude::*;
//! use pattern_logger::info;
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Build a [`LogEvent`](crate::LogEvent) for the current call site.
///
/// # Examples
///
/// ```
/// use pattern_logger::log_event;
///
/// let event = log_event!("user {} logged in", 42);
/// assert_eq!(event.message(), "user 42 logged in");
/// assert_eq!(event.file(), file!());
/// ```
#[macro_export]
macro_rules! log_event {
    ($($arg:tt)+) => {
        $crate::LogEvent::new(file!(), line!(), format!($($arg)+))
    };
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::new();
/// use pattern_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, &$crate::log_event!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::new();
/// use pattern_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::new();
/// use pattern_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
