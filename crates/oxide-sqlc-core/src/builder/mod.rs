//! Statement and expression builders.
//!
//! Builders consume `self` and return the updated statement, so partially
//! built statements can be cloned and extended independently. Nothing is
//! validated until the statement is compiled for a dialect.
//!
//! # Example
//!
//! ```rust
//! use oxide_sqlc_core::builder::{col, Select};
//!
//! let out = Select::new()
//!     .columns(["id", "name"])
//!     .from("users")
//!     .where_clause(col("age").gte(18))
//!     .to_prepared_sql("default")
//!     .unwrap();
//!
//! assert_eq!(out.sql, r#"SELECT "id", "name" FROM "users" WHERE "age" >= ?"#);
//! ```

/// WITH helpers shared by every statement that accepts common tables.
macro_rules! with_methods {
    ($ty:ident) => {
        impl $ty {
            /// Adds a common table expression.
            #[must_use]
            pub fn with(mut self, name: impl Into<String>, query: $crate::ast::Select) -> Self {
                self.with.tables.push($crate::ast::CommonTable {
                    name: name.into(),
                    query: Box::new(query),
                });
                self
            }

            /// Adds a common table expression and marks the WITH clause
            /// recursive.
            #[must_use]
            pub fn with_recursive(
                mut self,
                name: impl Into<String>,
                query: $crate::ast::Select,
            ) -> Self {
                self.with.recursive = true;
                self.with(name, query)
            }
        }
    };
}

mod delete;
pub(crate) mod expr;
mod insert;
mod select;
mod update;
pub mod value;

pub use crate::ast::{
    Conflict, Delete, Ex, Insert, JoinType, LockStrength, LockWait, Op, Record, Select, Truncate,
    Update, WindowDef,
};
pub use expr::{
    and, avg, col, count, default_value, excluded, func, lit, max, min, not, or, raw, star, sum,
    table, tuple, IntoColumn, IntoExpr,
};
pub use value::{SqlValue, ToSqlValue};
