//! # oxide-sqlc-postgres
//!
//! PostgreSQL dialect for `oxide-sqlc-core`.
//!
//! # How PostgreSQL differs from the `default` dialect
//!
//! - **[Placeholders]**: numbered `$1`, `$2`, ... in the order the values
//!   appear in the statement.
//! - **[UPSERT]**: `ON CONFLICT (target) DO UPDATE SET ... WHERE ...`. A
//!   `DO UPDATE` action needs a conflict target; `DO NOTHING` does not.
//! - **[Binary strings]**: blobs render in hex format, `'\x0aff'`.
//! - **[Row locks]**: `FOR UPDATE`, `FOR NO KEY UPDATE`, `FOR SHARE` and
//!   `FOR KEY SHARE`, with `NOWAIT` or `SKIP LOCKED`.
//!
//! [Placeholders]: https://www.postgresql.org/docs/current/sql-prepare.html
//! [UPSERT]: https://www.postgresql.org/docs/current/sql-insert.html#SQL-ON-CONFLICT
//! [Binary strings]: https://www.postgresql.org/docs/current/datatype-binary.html
//! [Row locks]: https://www.postgresql.org/docs/current/sql-select.html#SQL-FOR-UPDATE-SHARE
//!
//! ## Example
//!
//! ```rust
//! use oxide_sqlc_core::builder::{col, Select};
//!
//! oxide_sqlc_postgres::register();
//!
//! let out = Select::new()
//!     .from("t")
//!     .where_clause(col("c").eq(10))
//!     .to_prepared_sql(oxide_sqlc_postgres::NAME)
//!     .unwrap();
//! assert_eq!(out.sql, r#"SELECT * FROM "t" WHERE "c" = $1"#);
//! ```

mod dialect;

pub use dialect::PostgresDialect;

use oxide_sqlc_core::Dialect;

/// Name the dialect registers under.
pub const NAME: &str = "postgres";

/// Registers the PostgreSQL dialect.
pub fn register() {
    PostgresDialect::new().register();
}
