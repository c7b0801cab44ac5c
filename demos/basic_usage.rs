//! Basic logger usage example
//!
//! Demonstrates a stdout logger, level filtering and pattern templates.
//!
//! Run with: cargo run --example basic_usage

use pattern_logger::prelude::*;
use pattern_logger::{debug, error, info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Pattern Logger - Basic Usage Example ===\n");

    let stdout = Arc::new(StdoutAppender::new().with_pattern("%d{%H:%M:%S} [%p] %c %f:%l - %m%n"));

    let logger = Logger::named("demo");
    logger.add_appender(stdout.clone());

    println!("1. Logging at different levels:");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");

    println!("\n2. Logger threshold set to WARN - debug and info won't show:");
    logger.set_level(LogLevel::Warn);
    debug!(logger, "Debug message (hidden)");
    info!(logger, "Info message (hidden)");
    warn!(logger, "Warning message (visible)");

    println!("\n3. Swapping the template at runtime:");
    logger.set_level(LogLevel::Debug);
    stdout.set_formatter(Arc::new(PatternFormatter::new("%p%T%t%T%m%n")));
    info!(logger, "tab separated");

    println!("\n4. A malformed template stays visible:");
    stdout.set_formatter(Arc::new(PatternFormatter::new("%q %m%n")));
    info!(logger, "see the marker");

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
