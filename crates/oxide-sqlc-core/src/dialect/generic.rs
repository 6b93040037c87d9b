//! The built-in `default` dialect.

use super::{Dialect, DialectOptions, DEFAULT_DIALECT};

/// Standard SQL with double-quoted identifiers, `?` placeholders and every
/// feature enabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        DEFAULT_DIALECT
    }

    fn options(&self) -> DialectOptions {
        DialectOptions::default()
    }
}
