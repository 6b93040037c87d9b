//! # oxide-sqlc-sqlserver
//!
//! Microsoft SQL Server dialect for `oxide-sqlc-core`.
//!
//! # How SQL Server differs from the `default` dialect
//!
//! - **Placeholders**: numbered `@p1`, `@p2`, ... as used by TDS drivers.
//! - **[Booleans]**: there is no boolean type, only `BIT`. Booleans render
//!   as `1` and `0`, and `IS TRUE` becomes `= 1`.
//! - **Paging**: a bare limit renders as [`SELECT TOP (n)`]; a limit with an
//!   offset renders as [`OFFSET n ROWS FETCH NEXT m ROWS ONLY`], which
//!   requires an `ORDER BY`.
//! - **No `RETURNING`, no upserts**: `OUTPUT` and `MERGE` have different
//!   shapes, so both clauses are rejected.
//! - **Pattern matching**: no `ILIKE` and no regular expression operators.
//! - **CTEs**: `WITH` is implicitly recursive, so no `RECURSIVE` keyword.
//! - **Binary literals**: `0x0aff`.
//!
//! [Booleans]: https://learn.microsoft.com/en-us/sql/t-sql/data-types/bit-transact-sql
//! [`SELECT TOP (n)`]: https://learn.microsoft.com/en-us/sql/t-sql/queries/top-transact-sql
//! [`OFFSET n ROWS FETCH NEXT m ROWS ONLY`]: https://learn.microsoft.com/en-us/sql/t-sql/queries/select-order-by-clause-transact-sql
//!
//! ## Example
//!
//! ```rust
//! use oxide_sqlc_core::builder::{col, Select};
//!
//! oxide_sqlc_sqlserver::register();
//!
//! let out = Select::new()
//!     .from("t")
//!     .where_clause(col("active").is_true())
//!     .order_by(["id"])
//!     .limit(10)
//!     .offset(20)
//!     .to_prepared_sql(oxide_sqlc_sqlserver::NAME)
//!     .unwrap();
//! assert_eq!(
//!     out.sql,
//!     r#"SELECT * FROM "t" WHERE "active" = 1 ORDER BY "id" OFFSET @p1 ROWS FETCH NEXT @p2 ROWS ONLY"#
//! );
//! assert_eq!(out.args.len(), 2);
//! ```

mod dialect;

pub use dialect::SqlServerDialect;

use oxide_sqlc_core::Dialect;

/// Name the dialect registers under.
pub const NAME: &str = "sqlserver";

/// Registers the SQL Server dialect.
pub fn register() {
    SqlServerDialect::new().register();
}
