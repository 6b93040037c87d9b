//! # oxide-sqlc-core
//!
//! A dialect-aware SQL compiler.
//!
//! Statements are built as plain values with a dialect-neutral expression
//! model, then compiled for a named dialect into SQL text and, in prepared
//! mode, the ordered list of arguments bound to its placeholders.
//!
//! This crate provides:
//! - The expression model ([`ast`]) and its builders ([`builder`])
//! - Dialect configuration and the process-wide registry ([`dialect`])
//! - The compiler that walks a dialect's declared clause order ([`compiler`])
//!
//! ## Compiling for a dialect
//!
//! ```rust
//! use oxide_sqlc_core::builder::{col, Select};
//!
//! let out = Select::new()
//!     .from("t")
//!     .where_clause(col("c").eq(10))
//!     .to_prepared_sql("default")
//!     .unwrap();
//!
//! assert_eq!(out.sql, r#"SELECT * FROM "t" WHERE "c" = ?"#);
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values never reach the SQL text in prepared mode. When inlined, strings
//! are escaped through the dialect's escape table:
//!
//! ```rust
//! use oxide_sqlc_core::builder::{col, Select, SqlValue};
//!
//! let user_input = "'; DROP TABLE users; --";
//! let out = Select::new()
//!     .columns(["id"])
//!     .from("users")
//!     .where_clause(col("name").eq(user_input))
//!     .to_prepared_sql("default")
//!     .unwrap();
//!
//! assert_eq!(out.sql, r#"SELECT "id" FROM "users" WHERE "name" = ?"#);
//! assert_eq!(out.args, vec![SqlValue::Text(user_input.to_string())]);
//! ```
//!
//! ## Unsupported features are errors
//!
//! A clause the dialect cannot express is rejected, never dropped:
//!
//! ```rust
//! use oxide_sqlc_core::dialect::{register_dialect, DialectOptions};
//! use oxide_sqlc_core::builder::Insert;
//! use oxide_sqlc_core::SqlError;
//!
//! register_dialect(
//!     "no-returning",
//!     DialectOptions { supports_returning: false, ..DialectOptions::default() },
//! );
//! let err = Insert::into_table("t")
//!     .values([1])
//!     .returning(["id"])
//!     .to_sql("no-returning")
//!     .unwrap_err();
//! assert_eq!(err, SqlError::unsupported("RETURNING", "no-returning"));
//! ```

pub mod ast;
pub mod builder;
pub mod compiler;
pub mod dialect;
pub mod error;

pub use ast::{Expr, Statement};
pub use builder::{col, Delete, Insert, Select, SqlValue, Truncate, Update};
pub use compiler::{compile, compile_with_options, escape_string, CompiledSql};
pub use dialect::{lookup_dialect, register_dialect, Dialect, DialectOptions};
pub use error::{Result, SqlError};
