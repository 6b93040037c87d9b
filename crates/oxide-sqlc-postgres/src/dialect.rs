//! PostgreSQL dialect implementation.

use oxide_sqlc_core::dialect::{Dialect, DialectOptions};

/// PostgreSQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        crate::NAME
    }

    fn options(&self) -> DialectOptions {
        DialectOptions {
            placeholder_fragment: String::from("$"),
            include_placeholder_num: true,
            conflict_update_requires_target: true,
            supports_limit_on_update: false,
            supports_order_by_on_update: false,
            supports_limit_on_delete: false,
            supports_order_by_on_delete: false,
            blob_prefix: String::from("'\\x"),
            ..DialectOptions::default()
        }
    }
}
