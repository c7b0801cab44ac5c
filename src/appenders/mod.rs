//! Appender implementations

pub mod file;
pub mod stdout;

pub use file::{FileAppender, FileMode};
pub use stdout::StdoutAppender;

// Re-export the trait next to its implementations
pub use crate::core::Appender;
