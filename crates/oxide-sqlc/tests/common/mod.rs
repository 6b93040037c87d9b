#![allow(dead_code)]

use oxide_sqlc::builder::SqlValue;
use oxide_sqlc::{compile, register_builtin_dialects, CompiledSql, SqlError, Statement};

pub const DIALECTS: [&str; 5] = ["default", "postgres", "mysql", "sqlite", "sqlserver"];

pub fn setup() {
    register_builtin_dialects();
}

pub fn compile_in(dialect: &str, stmt: impl Into<Statement>, prepared: bool) -> CompiledSql {
    let stmt = stmt.into();
    compile(&stmt, dialect, prepared)
        .unwrap_or_else(|e| panic!("Failed to compile {stmt:?} for {dialect}\nError: {e}"))
}

pub fn sql(dialect: &str, stmt: impl Into<Statement>) -> String {
    compile_in(dialect, stmt, false).sql
}

pub fn prepared(dialect: &str, stmt: impl Into<Statement>) -> (String, Vec<SqlValue>) {
    compile_in(dialect, stmt, true).into_parts()
}

pub fn compile_err(dialect: &str, stmt: impl Into<Statement>) -> SqlError {
    let stmt = stmt.into();
    compile(&stmt, dialect, false)
        .expect_err(&format!("Expected compile error for {stmt:?} in {dialect}"))
}

/// Numbers of the `<prefix>N` placeholders in `sql`, in order.
pub fn numbered_placeholders(sql: &str, prefix: &str) -> Vec<usize> {
    sql.match_indices(prefix)
        .filter_map(|(at, _)| {
            let digits: String = sql[at + prefix.len()..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok()
        })
        .collect()
}
