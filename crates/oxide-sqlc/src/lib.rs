//! # oxide-sqlc
//!
//! Dialect-aware SQL compiler.
//!
//! Statements are built once against a dialect-neutral expression model and
//! compiled into SQL text plus bound arguments for any registered dialect.
//! This crate re-exports [`oxide_sqlc_core`] and bundles the dialect crates
//! enabled through cargo features:
//!
//! | feature | dialect name | crate |
//! |---------|--------------|-------|
//! | `postgres` | `postgres` | `oxide-sqlc-postgres` |
//! | `mysql` | `mysql` | `oxide-sqlc-mysql` |
//! | `sqlite` | `sqlite` | `oxide-sqlc-sqlite` |
//! | `sqlserver` | `sqlserver` | `oxide-sqlc-sqlserver` |
//!
//! The `default` dialect is always available.
//!
//! ## Example
//!
//! ```rust
//! use oxide_sqlc::builder::{col, Select};
//!
//! oxide_sqlc::register_builtin_dialects();
//!
//! let stmt = Select::new().from("users").where_clause(col("id").eq(7));
//!
//! let pg = stmt.to_prepared_sql("postgres").unwrap();
//! assert_eq!(pg.sql, r#"SELECT * FROM "users" WHERE "id" = $1"#);
//!
//! let my = stmt.to_prepared_sql("mysql").unwrap();
//! assert_eq!(my.sql, "SELECT * FROM `users` WHERE `id` = ?");
//! ```

pub use oxide_sqlc_core::*;

#[cfg(feature = "mysql")]
pub use oxide_sqlc_mysql as mysql;
#[cfg(feature = "postgres")]
pub use oxide_sqlc_postgres as postgres;
#[cfg(feature = "sqlite")]
pub use oxide_sqlc_sqlite as sqlite;
#[cfg(feature = "sqlserver")]
pub use oxide_sqlc_sqlserver as sqlserver;

use tracing::debug;

/// Registers every dialect enabled at build time.
///
/// Safe to call more than once; later calls replace the registrations with
/// identical options.
pub fn register_builtin_dialects() {
    #[cfg(feature = "postgres")]
    postgres::register();
    #[cfg(feature = "mysql")]
    mysql::register();
    #[cfg(feature = "sqlite")]
    sqlite::register();
    #[cfg(feature = "sqlserver")]
    sqlserver::register();
    debug!(
        dialects = ?dialect::registered_dialects(),
        "registered built-in SQL dialects"
    );
}
