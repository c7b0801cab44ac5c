//! Directive registry used by the pattern compiler
//!
//! Maps directive names (the letters after `%`) to factories building the
//! matching [`FormatItem`]. The registry is plain data passed to the compiler,
//! so callers can extend or override directives without global state.

use super::error::Result;
use super::format_item::FormatItem;
use std::collections::HashMap;
use std::fmt;

/// Builds a format item from the directive's `{...}` sub-format (empty if absent).
pub type DirectiveFactory = fn(&str) -> Result<FormatItem>;

#[derive(Clone)]
pub struct DirectiveRegistry {
    factories: HashMap<String, DirectiveFactory>,
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("DirectiveRegistry")
            .field("directives", &names)
            .finish()
    }
}

impl DirectiveRegistry {
    /// A registry with no directives; every `%x` compiles to an error marker.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// The standard directive table.
    ///
    /// | code | renders |
    /// |---|---|
    /// | `m` | message |
    /// | `p` | level name |
    /// | `r` | elapsed ms |
    /// | `c` | logger name |
    /// | `t` | thread id |
    /// | `F` | fiber id |
    /// | `d` | timestamp, sub-format is a strftime pattern |
    /// | `f` | source file |
    /// | `l` | source line |
    /// | `n` | newline |
    /// | `T` | tab |
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry
            .register("m", |_| Ok(FormatItem::Message))
            .register("p", |_| Ok(FormatItem::Level))
            .register("r", |_| Ok(FormatItem::Elapsed))
            .register("c", |_| Ok(FormatItem::LoggerName))
            .register("t", |_| Ok(FormatItem::ThreadId))
            .register("F", |_| Ok(FormatItem::FiberId))
            .register("d", FormatItem::date_time)
            .register("f", |_| Ok(FormatItem::FileName))
            .register("l", |_| Ok(FormatItem::Line))
            .register("n", |_| Ok(FormatItem::NewLine))
            .register("T", |_| Ok(FormatItem::Tab));
        registry
    }

    /// Add or replace the factory for `name`.
    pub fn register(&mut self, name: impl Into<String>, factory: DirectiveFactory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    pub fn get(&self, name: &str) -> Option<DirectiveFactory> {
        self.factories.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let registry = DirectiveRegistry::standard();
        for code in ["m", "p", "r", "c", "t", "F", "d", "f", "l", "n", "T"] {
            assert!(registry.contains(code), "missing directive {}", code);
        }
        assert_eq!(registry.len(), 11);
        assert!(!registry.contains("q"));
        assert!(!registry.contains("M"));
    }

    #[test]
    fn test_register_overrides() {
        let mut registry = DirectiveRegistry::standard();
        registry.register("n", |_| Ok(FormatItem::Literal("\r\n".to_string())));

        let factory = registry.get("n").expect("registered");
        assert_eq!(factory("").unwrap(), FormatItem::Literal("\r\n".to_string()));
    }

    #[test]
    fn test_sub_format_reaches_factory() {
        let registry = DirectiveRegistry::standard();
        let factory = registry.get("d").expect("registered");
        assert_eq!(
            factory("%H:%M").unwrap(),
            FormatItem::DateTime("%H:%M".to_string())
        );
    }
}
