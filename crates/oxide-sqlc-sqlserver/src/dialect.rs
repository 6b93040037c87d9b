//! SQL Server dialect implementation.

use std::collections::BTreeMap;

use oxide_sqlc_core::ast::{BitwiseOperator, BooleanOperator, CompoundKind, JoinType};
use oxide_sqlc_core::dialect::{
    default_bitwise_operators, default_boolean_operators, default_compounds, default_join_types,
    Dialect, DialectOptions, SqlFragment,
};

/// SQL Server dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn boolean_operators() -> BTreeMap<BooleanOperator, String> {
    let mut ops = default_boolean_operators();
    for op in [
        BooleanOperator::ILike,
        BooleanOperator::NotILike,
        BooleanOperator::RegexpLike,
        BooleanOperator::RegexpNotLike,
        BooleanOperator::RegexpILike,
        BooleanOperator::RegexpNotILike,
    ] {
        ops.remove(&op);
    }
    ops
}

fn bitwise_operators() -> BTreeMap<BitwiseOperator, String> {
    let mut ops = default_bitwise_operators();
    ops.insert(BitwiseOperator::Xor, String::from("^"));
    ops.remove(&BitwiseOperator::LeftShift);
    ops.remove(&BitwiseOperator::RightShift);
    ops
}

fn join_types() -> BTreeMap<JoinType, String> {
    let mut joins = default_join_types();
    joins.remove(&JoinType::Natural);
    joins
}

fn compounds() -> BTreeMap<CompoundKind, String> {
    let mut compounds = default_compounds();
    compounds.remove(&CompoundKind::IntersectAll);
    compounds.remove(&CompoundKind::ExceptAll);
    compounds
}

fn select_order() -> Vec<SqlFragment> {
    vec![
        SqlFragment::CommonTable,
        SqlFragment::SelectWithLimit,
        SqlFragment::From,
        SqlFragment::Join,
        SqlFragment::Where,
        SqlFragment::GroupBy,
        SqlFragment::Having,
        SqlFragment::Compounds,
        SqlFragment::OrderWithOffsetFetch,
    ]
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        crate::NAME
    }

    fn options(&self) -> DialectOptions {
        DialectOptions {
            supports_returning: false,
            supports_on_conflict: false,
            supports_conflict_target: false,
            supports_conflict_update_where: false,
            supports_distinct_on: false,
            supports_limit_on_update: false,
            supports_order_by_on_update: false,
            supports_limit_on_delete: false,
            supports_order_by_on_delete: false,
            boolean_data_type_supported: false,
            use_literal_is_bools: false,
            placeholder_fragment: String::from("@p"),
            include_placeholder_num: true,
            true_literal: String::from("1"),
            false_literal: String::from("0"),
            time_format: String::from("%Y-%m-%d %H:%M:%S%.f"),
            blob_prefix: String::from("0x"),
            blob_suffix: String::new(),
            recursive_fragment: String::new(),
            truncate_clause: String::from("TRUNCATE TABLE"),
            cascade_fragment: None,
            restrict_fragment: None,
            restart_identity_fragment: None,
            nulls_first_fragment: None,
            nulls_last_fragment: None,
            nowait_fragment: None,
            skip_locked_fragment: None,
            boolean_operator_lookup: boolean_operators(),
            bitwise_operator_lookup: bitwise_operators(),
            join_type_lookup: join_types(),
            compound_lookup: compounds(),
            lock_lookup: BTreeMap::new(),
            select_sql_order: select_order(),
            insert_sql_order: vec![
                SqlFragment::CommonTable,
                SqlFragment::InsertBegin,
                SqlFragment::Into,
                SqlFragment::Insert,
            ],
            update_sql_order: vec![
                SqlFragment::CommonTable,
                SqlFragment::UpdateBegin,
                SqlFragment::Sources,
                SqlFragment::UpdateSet,
                SqlFragment::UpdateFrom,
                SqlFragment::Where,
            ],
            delete_sql_order: vec![
                SqlFragment::CommonTable,
                SqlFragment::DeleteBegin,
                SqlFragment::From,
                SqlFragment::Where,
            ],
            ..DialectOptions::default()
        }
    }
}
