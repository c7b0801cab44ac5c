//! Pattern formatter
//!
//! Compiles a printf-like template such as `%d{%Y-%m-%d} [%p] %f:%l %m%n`
//! once into a sequence of [`FormatItem`]s, then renders events on demand.
//!
//! # Syntax
//!
//! - any character other than `%` is copied literally
//! - `%%` is a literal `%`
//! - `%x` is a directive, where `x` is the run of ASCII letters after `%`
//! - `%x{sub}` passes `sub` to the directive (for `%d`, a strftime pattern)
//!
//! Compilation never fails. Malformed input is reported through
//! [`PatternFormatter::is_error`] and shows up in the rendered output as
//! `<<error_format %x>>` (unknown directive) or `<<pattern_error>>`
//! (a `{` that is never closed).
//!
//! # Examples
//!
//! ```
//! use pattern_logger::{LogEvent, LogLevel, LoggerInfo, PatternFormatter};
//!
//! let formatter = PatternFormatter::new("[%p] %m%n");
//! let event = LogEvent::new(file!(), line!(), "hello");
//! let logger = LoggerInfo { name: "root", level: LogLevel::Debug };
//!
//! assert_eq!(formatter.format(logger, LogLevel::Error, &event), "[ERROR] hello\n");
//! ```

use super::directive::DirectiveRegistry;
use super::error::{LoggerError, Result};
use super::format_item::FormatItem;
use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::logger::LoggerInfo;

/// Template used by appenders that are not given one.
pub const DEFAULT_PATTERN: &str = "%d{%Y-%m-%d %H:%M:%S}%T%t%T%F%T[%p]%T[%c]%T%f:%l%T%m%n";

/// Marker emitted in place of a directive whose `{` is never closed.
pub const PATTERN_ERROR_MARKER: &str = "<<pattern_error>>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFormatter {
    pattern: String,
    items: Vec<FormatItem>,
    errors: Vec<String>,
}

impl PatternFormatter {
    /// Compile `pattern` against the standard directive table.
    ///
    /// Problems are printed to stderr once and embedded as markers.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::with_registry(pattern, &DirectiveRegistry::standard())
    }

    /// Compile `pattern` against a caller-supplied directive table.
    pub fn with_registry(pattern: impl Into<String>, registry: &DirectiveRegistry) -> Self {
        let formatter = Self::compile(pattern.into(), registry);
        for error in &formatter.errors {
            eprintln!(
                "[LOGGER ERROR] Pattern '{}': {}",
                formatter.pattern, error
            );
        }
        formatter
    }

    /// Compile `pattern`, rejecting it if any directive is malformed.
    pub fn compile_strict(pattern: impl Into<String>) -> Result<Self> {
        Self::compile_strict_with(pattern, &DirectiveRegistry::standard())
    }

    pub fn compile_strict_with(
        pattern: impl Into<String>,
        registry: &DirectiveRegistry,
    ) -> Result<Self> {
        let formatter = Self::compile(pattern.into(), registry);
        if formatter.is_error() {
            return Err(LoggerError::formatter(
                formatter.pattern,
                formatter.errors.join("; "),
            ));
        }
        Ok(formatter)
    }

    /// Single left-to-right scan, no backtracking.
    fn compile(pattern: String, registry: &DirectiveRegistry) -> Self {
        let chars: Vec<char> = pattern.chars().collect();
        let mut items = Vec::new();
        let mut errors = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            if chars[i] != '%' {
                literal.push(chars[i]);
                i += 1;
                continue;
            }

            if chars.get(i + 1) == Some(&'%') {
                literal.push('%');
                i += 2;
                continue;
            }

            let mut n = i + 1;
            let mut name = String::new();
            let mut sub_format = String::new();
            let mut in_sub_format = false;

            while n < chars.len() {
                let c = chars[n];
                if in_sub_format {
                    n += 1;
                    if c == '}' {
                        in_sub_format = false;
                        break;
                    }
                    sub_format.push(c);
                } else if c == '{' {
                    in_sub_format = true;
                    n += 1;
                } else if c.is_ascii_alphabetic() || c == '}' {
                    name.push(c);
                    n += 1;
                } else {
                    break;
                }
            }

            flush_literal(&mut literal, &mut items);

            if in_sub_format {
                let rest: String = chars[i..].iter().collect();
                errors.push(format!("unterminated sub-format in '{}'", rest));
                items.push(FormatItem::Literal(PATTERN_ERROR_MARKER.to_string()));
                break;
            }

            match registry.get(&name) {
                Some(factory) => match factory(&sub_format) {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        errors.push(format!("directive %{}: {}", name, e));
                        items.push(FormatItem::Literal(format!(
                            "<<error_format %{}{{{}}}>>",
                            name, sub_format
                        )));
                    }
                },
                None => {
                    errors.push(format!("unknown directive '%{}'", name));
                    items.push(FormatItem::Literal(format!("<<error_format %{}>>", name)));
                }
            }

            i = n;
        }

        flush_literal(&mut literal, &mut items);

        Self {
            pattern,
            items,
            errors,
        }
    }

    /// Render `event` into a fresh string.
    pub fn format(&self, logger: LoggerInfo<'_>, level: LogLevel, event: &LogEvent<'_>) -> String {
        let mut buf = String::with_capacity(self.pattern.len() + event.message().len() + 32);
        self.format_into(&mut buf, logger, level, event);
        buf
    }

    /// Append the rendering of `event` to `buf`.
    pub fn format_into(
        &self,
        buf: &mut String,
        logger: LoggerInfo<'_>,
        level: LogLevel,
        event: &LogEvent<'_>,
    ) {
        for item in &self.items {
            item.render(buf, logger, level, event);
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn items(&self) -> &[FormatItem] {
        &self.items
    }

    /// Whether compilation hit a malformed or unknown directive.
    pub fn is_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl Default for PatternFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

fn flush_literal(literal: &mut String, items: &mut Vec<FormatItem>) {
    if !literal.is_empty() {
        items.push(FormatItem::Literal(std::mem::take(literal)));
    }
}
