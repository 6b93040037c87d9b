//! MySQL dialect implementation.

use std::collections::BTreeMap;

use oxide_sqlc_core::ast::{BitwiseOperator, BooleanOperator, JoinType, LockStrength};
use oxide_sqlc_core::dialect::{
    default_bitwise_operators, default_boolean_operators, default_join_types, default_locks,
    Dialect, DialectOptions,
};

/// MySQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn escaped_runes() -> BTreeMap<char, String> {
    [
        ('\'', "\\'"),
        ('"', "\\\""),
        ('\\', "\\\\"),
        ('\n', "\\n"),
        ('\r', "\\r"),
        ('\0', "\\0"),
        ('\x1a', "\\Z"),
    ]
    .into_iter()
    .map(|(ch, s)| (ch, String::from(s)))
    .collect()
}

fn boolean_operators() -> BTreeMap<BooleanOperator, String> {
    let mut ops = default_boolean_operators();
    for (op, spelled) in [
        (BooleanOperator::Like, "LIKE BINARY"),
        (BooleanOperator::NotLike, "NOT LIKE BINARY"),
        (BooleanOperator::ILike, "LIKE"),
        (BooleanOperator::NotILike, "NOT LIKE"),
        (BooleanOperator::RegexpLike, "REGEXP BINARY"),
        (BooleanOperator::RegexpNotLike, "NOT REGEXP BINARY"),
        (BooleanOperator::RegexpILike, "REGEXP"),
        (BooleanOperator::RegexpNotILike, "NOT REGEXP"),
    ] {
        ops.insert(op, String::from(spelled));
    }
    ops
}

fn bitwise_operators() -> BTreeMap<BitwiseOperator, String> {
    let mut ops = default_bitwise_operators();
    ops.insert(BitwiseOperator::Xor, String::from("^"));
    ops
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        crate::NAME
    }

    fn options(&self) -> DialectOptions {
        let mut join_type_lookup = default_join_types();
        join_type_lookup.remove(&JoinType::Full);
        let mut lock_lookup = default_locks();
        lock_lookup.remove(&LockStrength::NoKeyUpdate);
        lock_lookup.remove(&LockStrength::KeyShare);

        DialectOptions {
            supports_returning: false,
            supports_conflict_target: false,
            supports_conflict_update_where: false,
            supports_insert_ignore_syntax: true,
            supports_distinct_on: false,
            use_from_clause_for_multiple_update_tables: false,
            quote_rune: '`',
            escaped_runes: escaped_runes(),
            time_format: String::from("%Y-%m-%d %H:%M:%S%.6f"),
            excluded_prefix: String::from("VALUES("),
            excluded_suffix: String::from(")"),
            insert_ignore_clause: String::from("INSERT IGNORE INTO"),
            default_values_fragment: String::from(" VALUES ()"),
            conflict_fragment: String::new(),
            conflict_do_nothing_fragment: String::new(),
            conflict_do_update_fragment: String::from(" ON DUPLICATE KEY UPDATE "),
            cascade_fragment: None,
            restrict_fragment: None,
            restart_identity_fragment: None,
            nulls_first_fragment: None,
            nulls_last_fragment: None,
            boolean_operator_lookup: boolean_operators(),
            bitwise_operator_lookup: bitwise_operators(),
            join_type_lookup,
            lock_lookup,
            ..DialectOptions::default()
        }
    }
}
