//! File logging example
//!
//! Demonstrates a file appender next to stdout, per-appender thresholds,
//! reopening after the file was removed, and JSON configuration.
//!
//! Run with: cargo run --example file_logging

use pattern_logger::prelude::*;
use pattern_logger::{error, info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Pattern Logger - File Logging Example ===\n");

    let log_dir = std::env::temp_dir().join("pattern_logger_demo");
    std::fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("errors.log");

    let errors = Arc::new(
        FileAppender::open(&log_path, FileMode::Truncate)?
            .with_pattern("%d%T%p%T%m%n")
            .with_level(LogLevel::Error),
    );

    let logger = Logger::builder()
        .name("files")
        .appender(StdoutAppender::new().with_pattern("[%p] %m%n"))
        .shared_appender(errors.clone())
        .build();

    info!(logger, "stdout only");
    warn!(logger, "stdout only, too");
    error!(logger, "both sinks");

    println!("\nRemoving {} and reopening", log_path.display());
    std::fs::remove_file(&log_path)?;
    errors.reopen()?;
    error!(logger, "written to the recreated file");

    logger.flush()?;
    println!("\n{}:\n{}", log_path.display(), std::fs::read_to_string(&log_path)?);

    println!("Configuring from JSON:");
    let config = LoggerConfig::from_json(
        r#"{ "name": "configured", "level": "INFO",
             "appenders": [ { "type": "stdout", "pattern": "%c | %p | %m%n" } ] }"#,
    )?;
    let configured = config.build()?;
    info!(configured, "built from configuration");

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
