//! # oxide-sqlc-sqlite
//!
//! SQLite dialect for `oxide-sqlc-core`.
//!
//! # How SQLite differs from the `default` dialect
//!
//! - **[Booleans]**: SQLite has no separate boolean storage class. `TRUE`
//!   and `FALSE` are aliases for `1` and `0`, so booleans render as `1` and
//!   `0` and `IS TRUE` becomes `IS 1`.
//! - **[UPSERT]**: `ON CONFLICT (target) DO NOTHING` and
//!   `ON CONFLICT (target) DO UPDATE SET ...` (since SQLite 3.24.0). An
//!   untargeted `DO NOTHING` compiles to `INSERT OR IGNORE INTO`. A
//!   `WHERE` on the update is rejected.
//! - **[RETURNING]**: supported on INSERT, UPDATE and DELETE (since SQLite
//!   3.35.0).
//! - **Identifier quoting**: SQLite uses double quotes (`"`) as the
//!   standard quoting style, though it also accepts backticks and square
//!   brackets. See [SQLite keywords].
//! - **No row locks**: `FOR UPDATE` and friends are rejected.
//! - **No `TRUNCATE`**: truncation compiles to `DELETE FROM`, which SQLite
//!   optimizes into a table truncation when there is no WHERE clause.
//! - **Compound selects**: no `INTERSECT ALL` / `EXCEPT ALL`, and the
//!   right-hand select is never parenthesized.
//!
//! [Booleans]: https://www.sqlite.org/datatype3.html#boolean_datatype
//! [UPSERT]: https://www.sqlite.org/lang_upsert.html
//! [RETURNING]: https://www.sqlite.org/lang_returning.html
//! [SQLite keywords]: https://www.sqlite.org/lang_keywords.html
//!
//! ## Example
//!
//! ```rust
//! use oxide_sqlc_core::builder::{col, Select};
//!
//! oxide_sqlc_sqlite::register();
//!
//! let out = Select::new()
//!     .from("t")
//!     .where_clause(col("flag").is_true())
//!     .to_sql(oxide_sqlc_sqlite::NAME)
//!     .unwrap();
//! assert_eq!(out.sql, r#"SELECT * FROM "t" WHERE "flag" IS 1"#);
//! ```

mod dialect;

pub use dialect::SqliteDialect;

use oxide_sqlc_core::Dialect;

/// Name the dialect registers under.
pub const NAME: &str = "sqlite";

/// Registers the SQLite dialect.
pub fn register() {
    SqliteDialect::new().register();
}
