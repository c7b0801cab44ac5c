//! Compiled pattern segments

use super::error::{LoggerError, Result};
use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::logger::LoggerInfo;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Date pattern used by `%d` when no sub-format is given.
pub const DEFAULT_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// One renderer produced by the pattern compiler.
///
/// Items are stateless: rendering never mutates them, so a compiled sequence
/// can be shared and reused across threads indefinitely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatItem {
    /// `%m`
    Message,
    /// `%p`
    Level,
    /// `%r`
    Elapsed,
    /// `%c`
    LoggerName,
    /// `%t`
    ThreadId,
    /// `%F`
    FiberId,
    /// `%d{...}`, holding a strftime pattern already checked by [`FormatItem::date_time`]
    DateTime(String),
    /// `%f`
    FileName,
    /// `%l`
    Line,
    /// `%n`
    NewLine,
    /// `%T`
    Tab,
    /// Literal text between directives, and error markers
    Literal(String),
}

impl FormatItem {
    /// Build a `%d` item, rejecting sub-formats chrono cannot render.
    pub fn date_time(format: &str) -> Result<Self> {
        let format = if format.is_empty() {
            DEFAULT_DATE_FORMAT
        } else {
            format
        };
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::formatter(
                format,
                "invalid date/time sub-format",
            ));
        }
        // Some specifiers parse but only fail when formatting (`%#z`)
        let mut scratch = String::new();
        if write!(scratch, "{}", DateTime::<Utc>::default().format(format)).is_err() {
            return Err(LoggerError::formatter(
                format,
                "date/time sub-format cannot be rendered",
            ));
        }
        Ok(FormatItem::DateTime(format.to_string()))
    }

    pub fn render(
        &self,
        buf: &mut String,
        logger: LoggerInfo<'_>,
        level: LogLevel,
        event: &LogEvent<'_>,
    ) {
        // Writing into a String cannot fail; `DateTime` patterns are trial-rendered on construction
        let _ = match self {
            FormatItem::Message => {
                buf.push_str(event.message());
                Ok(())
            }
            FormatItem::Level => {
                buf.push_str(level.to_str());
                Ok(())
            }
            FormatItem::Elapsed => write!(buf, "{}", event.elapsed_ms()),
            FormatItem::LoggerName => {
                buf.push_str(logger.name);
                Ok(())
            }
            FormatItem::ThreadId => write!(buf, "{}", event.thread_id()),
            FormatItem::FiberId => write!(buf, "{}", event.fiber_id()),
            FormatItem::DateTime(format) => write!(buf, "{}", event.time().format(format)),
            FormatItem::FileName => {
                buf.push_str(event.file());
                Ok(())
            }
            FormatItem::Line => write!(buf, "{}", event.line()),
            FormatItem::NewLine => {
                buf.push('\n');
                Ok(())
            }
            FormatItem::Tab => {
                buf.push('\t');
                Ok(())
            }
            FormatItem::Literal(text) => {
                buf.push_str(text);
                Ok(())
            }
        };
    }
}
