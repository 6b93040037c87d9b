//! Statement compiler.
//!
//! Walks a statement in the fragment order declared by a dialect and
//! produces SQL text plus, in prepared mode, the arguments bound to its
//! placeholders in the order they appear.

mod conflict;
mod context;
mod expression;
mod literal;
mod statement;

use tracing::trace;

use crate::ast::{Delete, Insert, Select, Statement, Truncate, Update};
use crate::builder::value::SqlValue;
use crate::dialect::{lookup_dialect, DialectOptions};
use crate::error::Result;

use context::SqlBuilder;

pub use literal::escape_string;

/// Compiled SQL text and its bound arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSql {
    /// SQL text.
    pub sql: String,
    /// Arguments, one per placeholder, in order. Empty unless prepared.
    pub args: Vec<SqlValue>,
}

impl CompiledSql {
    /// Splits into `(sql, args)`.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.args)
    }
}

/// Compiles `statement` for the dialect registered under `dialect`.
///
/// # Errors
///
/// Returns [`SqlError::DialectNotFound`](crate::SqlError::DialectNotFound)
/// for an unknown dialect and any other [`SqlError`](crate::SqlError) raised
/// while rendering. No SQL is returned on error.
pub fn compile(statement: &Statement, dialect: &str, prepared: bool) -> Result<CompiledSql> {
    let options = lookup_dialect(dialect)?;
    compile_with_options(statement, dialect, &options, prepared)
}

/// Compiles `statement` with options that need not be registered.
///
/// `dialect` only names the options in errors and logs.
///
/// # Errors
///
/// Returns the [`SqlError`](crate::SqlError) raised while rendering.
pub fn compile_with_options(
    statement: &Statement,
    dialect: &str,
    options: &DialectOptions,
    prepared: bool,
) -> Result<CompiledSql> {
    run(options, dialect, prepared, statement.kind(), |b| match statement {
        Statement::Select(s) => b.select(s),
        Statement::Insert(s) => b.insert(s),
        Statement::Update(s) => b.update(s),
        Statement::Delete(s) => b.delete(s),
        Statement::Truncate(s) => b.truncate(s),
    })
}

fn run(
    options: &DialectOptions,
    dialect: &str,
    prepared: bool,
    kind: &str,
    render: impl FnOnce(&mut SqlBuilder<'_>) -> Result<()>,
) -> Result<CompiledSql> {
    let mut builder = SqlBuilder::new(options, dialect, prepared);
    render(&mut builder)?;
    let (sql, args) = builder.finish();
    trace!(dialect, kind, prepared, args = args.len(), "compiled statement");
    Ok(CompiledSql { sql, args })
}

macro_rules! compile_methods {
    ($($ty:ident => $kind:literal, $method:ident;)*) => {
        $(
            impl $ty {
                /// Compiles with literals inlined.
                ///
                /// # Errors
                ///
                /// See [`compile`].
                pub fn to_sql(&self, dialect: &str) -> Result<CompiledSql> {
                    self.compile_for(dialect, false)
                }

                /// Compiles with placeholders and bound arguments.
                ///
                /// # Errors
                ///
                /// See [`compile`].
                pub fn to_prepared_sql(&self, dialect: &str) -> Result<CompiledSql> {
                    self.compile_for(dialect, true)
                }

                fn compile_for(&self, dialect: &str, prepared: bool) -> Result<CompiledSql> {
                    let options = lookup_dialect(dialect)?;
                    run(&options, dialect, prepared, $kind, |b| b.$method(self))
                }
            }
        )*
    };
}

compile_methods! {
    Select => "select", select;
    Insert => "insert", insert;
    Update => "update", update;
    Delete => "delete", delete;
    Truncate => "truncate", truncate;
}
