#![allow(dead_code)]

use oxide_sqlc_core::builder::SqlValue;
use oxide_sqlc_core::dialect::{register_dialect, DialectOptions};
use oxide_sqlc_core::{compile, CompiledSql, SqlError, Statement};

pub const DEFAULT: &str = "default";

pub fn sql(stmt: impl Into<Statement>) -> String {
    compile_in(DEFAULT, stmt, false).sql
}

pub fn prepared(stmt: impl Into<Statement>) -> (String, Vec<SqlValue>) {
    compile_in(DEFAULT, stmt, true).into_parts()
}

pub fn compile_in(dialect: &str, stmt: impl Into<Statement>, prepared: bool) -> CompiledSql {
    let stmt = stmt.into();
    compile(&stmt, dialect, prepared)
        .unwrap_or_else(|e| panic!("Failed to compile {stmt:?} for {dialect}\nError: {e}"))
}

pub fn compile_err(dialect: &str, stmt: impl Into<Statement>) -> SqlError {
    let stmt = stmt.into();
    compile(&stmt, dialect, false)
        .expect_err(&format!("Expected compile error for {stmt:?} in {dialect}"))
}

/// Registers `options` under a test-local name and returns the name.
pub fn register(name: &str, options: DialectOptions) -> String {
    register_dialect(name, options);
    String::from(name)
}

/// Counts placeholders of the form `$N`.
pub fn numbered_placeholders(sql: &str, prefix: char) -> Vec<usize> {
    let mut out = Vec::new();
    let mut chars = sql.char_indices().peekable();
    while let Some((_, ch)) = chars.next() {
        if ch != prefix {
            continue;
        }
        let mut digits = String::new();
        while let Some((_, d)) = chars.peek().copied() {
            if d.is_ascii_digit() {
                digits.push(d);
                chars.next();
            } else {
                break;
            }
        }
        if let Ok(n) = digits.parse() {
            out.push(n);
        }
    }
    out
}
