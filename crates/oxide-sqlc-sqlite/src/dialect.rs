//! SQLite dialect implementation.

use std::collections::BTreeMap;

use oxide_sqlc_core::ast::{BitwiseOperator, BooleanOperator, CompoundKind};
use oxide_sqlc_core::dialect::{
    default_bitwise_operators, default_boolean_operators, default_compounds, Dialect,
    DialectOptions,
};

/// SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

// LIKE is already case-insensitive for ASCII; REGEXP needs a user function.
fn boolean_operators() -> BTreeMap<BooleanOperator, String> {
    let mut ops = default_boolean_operators();
    ops.insert(BooleanOperator::ILike, String::from("LIKE"));
    ops.insert(BooleanOperator::NotILike, String::from("NOT LIKE"));
    ops.insert(BooleanOperator::RegexpLike, String::from("REGEXP"));
    ops.insert(BooleanOperator::RegexpNotLike, String::from("NOT REGEXP"));
    ops.remove(&BooleanOperator::RegexpILike);
    ops.remove(&BooleanOperator::RegexpNotILike);
    ops
}

fn bitwise_operators() -> BTreeMap<BitwiseOperator, String> {
    let mut ops = default_bitwise_operators();
    ops.remove(&BitwiseOperator::Xor);
    ops
}

fn compounds() -> BTreeMap<CompoundKind, String> {
    let mut compounds = default_compounds();
    compounds.remove(&CompoundKind::IntersectAll);
    compounds.remove(&CompoundKind::ExceptAll);
    compounds
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        crate::NAME
    }

    fn options(&self) -> DialectOptions {
        DialectOptions {
            supports_conflict_update_where: false,
            supports_insert_ignore_syntax: true,
            conflict_update_requires_target: true,
            supports_distinct_on: false,
            supports_limit_on_update: false,
            supports_order_by_on_update: false,
            supports_limit_on_delete: false,
            supports_order_by_on_delete: false,
            supports_multiple_update_tables: false,
            wrap_compounds_in_parens: false,
            true_literal: String::from("1"),
            false_literal: String::from("0"),
            time_format: String::from("%Y-%m-%d %H:%M:%S%.f"),
            insert_ignore_clause: String::from("INSERT OR IGNORE INTO"),
            truncate_clause: String::from("DELETE FROM"),
            cascade_fragment: None,
            restrict_fragment: None,
            restart_identity_fragment: None,
            nowait_fragment: None,
            skip_locked_fragment: None,
            boolean_operator_lookup: boolean_operators(),
            bitwise_operator_lookup: bitwise_operators(),
            compound_lookup: compounds(),
            lock_lookup: BTreeMap::new(),
            ..DialectOptions::default()
        }
    }
}
