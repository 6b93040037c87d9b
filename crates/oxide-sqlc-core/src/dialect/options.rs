//! Dialect configuration.
//!
//! A dialect is pure data: the compiler never branches on a dialect's name,
//! only on the flags, spellings and fragment orders declared here. A missing
//! lookup entry or `None` fragment means the dialect lacks the feature.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ast::{BitwiseOperator, BooleanOperator, CompoundKind, JoinType, LockStrength};

/// One independently orderable clause of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlFragment {
    /// `WITH [RECURSIVE] ...` (every statement kind except truncate).
    CommonTable,
    /// `SELECT [DISTINCT] columns`.
    Select,
    /// `SELECT [DISTINCT] TOP (n) columns`; takes over LIMIT when no offset is set.
    SelectWithLimit,
    /// ` FROM ...` (select and delete).
    From,
    /// Joins.
    Join,
    /// ` WHERE ...`.
    Where,
    /// ` GROUP BY ...`.
    GroupBy,
    /// ` HAVING ...`.
    Having,
    /// ` WINDOW ...`.
    Window,
    /// UNION / INTERSECT / EXCEPT.
    Compounds,
    /// ` ORDER BY ...`.
    Order,
    /// ` ORDER BY ... OFFSET n ROWS FETCH NEXT m ROWS ONLY`.
    OrderWithOffsetFetch,
    /// ` LIMIT n`.
    Limit,
    /// ` OFFSET n`.
    Offset,
    /// Row locking.
    For,
    /// `INSERT INTO` or the insert-ignore clause.
    InsertBegin,
    /// The insert's target table.
    Into,
    /// Column list and source rows.
    Insert,
    /// Conflict handling.
    OnConflict,
    /// ` RETURNING ...`.
    Returning,
    /// `UPDATE`.
    UpdateBegin,
    /// The updated table(s).
    Sources,
    /// ` SET ...`.
    UpdateSet,
    /// ` FROM ...` for multi-table updates.
    UpdateFrom,
    /// `DELETE`.
    DeleteBegin,
    /// The whole TRUNCATE statement.
    Truncate,
}

/// Settings for one SQL dialect.
///
/// Deserializing fills missing fields from [`DialectOptions::default`], so a
/// configuration document only needs the fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectOptions {
    pub supports_returning: bool,
    pub supports_on_conflict: bool,
    pub supports_conflict_target: bool,
    pub supports_conflict_update_where: bool,
    pub supports_insert_ignore_syntax: bool,
    pub conflict_update_requires_target: bool,
    pub supports_with_cte: bool,
    pub supports_with_cte_recursive: bool,
    pub supports_distinct_on: bool,
    pub supports_window_function: bool,
    pub supports_limit_on_update: bool,
    pub supports_order_by_on_update: bool,
    pub supports_limit_on_delete: bool,
    pub supports_order_by_on_delete: bool,
    pub supports_multiple_update_tables: bool,
    /// `UPDATE a SET ... FROM b` instead of `UPDATE a, b SET ...`.
    pub use_from_clause_for_multiple_update_tables: bool,
    /// `UNION (SELECT ...)` instead of `UNION SELECT ...`.
    pub wrap_compounds_in_parens: bool,
    /// When false, `IS [NOT] <bool>` compiles to `= / !=` against the
    /// true / false spellings.
    pub boolean_data_type_supported: bool,
    /// Inline booleans on the right of `IS` even in prepared mode.
    pub use_literal_is_bools: bool,
    pub quote_identifiers: bool,

    /// Identifier quote.
    pub quote_rune: char,
    /// String literal quote.
    pub string_quote: char,
    /// Placeholder text, e.g. `?`, `$` or `@p`.
    pub placeholder_fragment: String,
    /// Append the 1-based placeholder number to the fragment.
    pub include_placeholder_num: bool,
    /// Replacements applied to string literals, rune by rune.
    pub escaped_runes: BTreeMap<char, String>,
    pub null_literal: String,
    pub true_literal: String,
    pub false_literal: String,
    /// chrono strftime pattern for timestamps.
    pub time_format: String,
    pub blob_prefix: String,
    pub blob_suffix: String,
    /// Rendered for an empty value list, e.g. `IN (NULL)`.
    pub empty_list_fragment: String,
    /// Wraps the column inside `excluded(...)`.
    pub excluded_prefix: String,
    pub excluded_suffix: String,

    pub with_fragment: String,
    pub recursive_fragment: String,
    pub select_clause: String,
    pub distinct_fragment: String,
    pub insert_clause: String,
    pub insert_ignore_clause: String,
    pub update_clause: String,
    pub delete_clause: String,
    pub truncate_clause: String,
    pub default_values_fragment: String,
    pub conflict_fragment: String,
    pub conflict_do_nothing_fragment: String,
    pub conflict_do_update_fragment: String,
    pub returning_fragment: String,
    pub cascade_fragment: Option<String>,
    pub restrict_fragment: Option<String>,
    pub restart_identity_fragment: Option<String>,
    pub nulls_first_fragment: Option<String>,
    pub nulls_last_fragment: Option<String>,
    pub nowait_fragment: Option<String>,
    pub skip_locked_fragment: Option<String>,

    pub boolean_operator_lookup: BTreeMap<BooleanOperator, String>,
    pub bitwise_operator_lookup: BTreeMap<BitwiseOperator, String>,
    pub join_type_lookup: BTreeMap<JoinType, String>,
    pub compound_lookup: BTreeMap<CompoundKind, String>,
    pub lock_lookup: BTreeMap<LockStrength, String>,

    pub select_sql_order: Vec<SqlFragment>,
    pub insert_sql_order: Vec<SqlFragment>,
    pub update_sql_order: Vec<SqlFragment>,
    pub delete_sql_order: Vec<SqlFragment>,
    pub truncate_sql_order: Vec<SqlFragment>,
}

impl Default for DialectOptions {
    fn default() -> Self {
        Self {
            supports_returning: true,
            supports_on_conflict: true,
            supports_conflict_target: true,
            supports_conflict_update_where: true,
            supports_insert_ignore_syntax: false,
            conflict_update_requires_target: false,
            supports_with_cte: true,
            supports_with_cte_recursive: true,
            supports_distinct_on: true,
            supports_window_function: true,
            supports_limit_on_update: true,
            supports_order_by_on_update: true,
            supports_limit_on_delete: true,
            supports_order_by_on_delete: true,
            supports_multiple_update_tables: true,
            use_from_clause_for_multiple_update_tables: true,
            wrap_compounds_in_parens: true,
            boolean_data_type_supported: true,
            use_literal_is_bools: true,
            quote_identifiers: true,

            quote_rune: '"',
            string_quote: '\'',
            placeholder_fragment: String::from("?"),
            include_placeholder_num: false,
            escaped_runes: [('\'', "''")]
                .into_iter()
                .map(|(ch, s)| (ch, String::from(s)))
                .collect(),
            null_literal: String::from("NULL"),
            true_literal: String::from("TRUE"),
            false_literal: String::from("FALSE"),
            time_format: String::from("%Y-%m-%dT%H:%M:%S%.f%:z"),
            blob_prefix: String::from("X'"),
            blob_suffix: String::from("'"),
            empty_list_fragment: String::from("(NULL)"),
            excluded_prefix: String::from("EXCLUDED."),
            excluded_suffix: String::new(),

            with_fragment: String::from("WITH "),
            recursive_fragment: String::from("RECURSIVE "),
            select_clause: String::from("SELECT"),
            distinct_fragment: String::from(" DISTINCT"),
            insert_clause: String::from("INSERT INTO"),
            insert_ignore_clause: String::from("INSERT IGNORE INTO"),
            update_clause: String::from("UPDATE"),
            delete_clause: String::from("DELETE"),
            truncate_clause: String::from("TRUNCATE"),
            default_values_fragment: String::from(" DEFAULT VALUES"),
            conflict_fragment: String::from(" ON CONFLICT"),
            conflict_do_nothing_fragment: String::from(" DO NOTHING"),
            conflict_do_update_fragment: String::from(" DO UPDATE SET "),
            returning_fragment: String::from(" RETURNING "),
            cascade_fragment: Some(String::from(" CASCADE")),
            restrict_fragment: Some(String::from(" RESTRICT")),
            restart_identity_fragment: Some(String::from(" RESTART IDENTITY")),
            nulls_first_fragment: Some(String::from(" NULLS FIRST")),
            nulls_last_fragment: Some(String::from(" NULLS LAST")),
            nowait_fragment: Some(String::from(" NOWAIT")),
            skip_locked_fragment: Some(String::from(" SKIP LOCKED")),

            boolean_operator_lookup: default_boolean_operators(),
            bitwise_operator_lookup: default_bitwise_operators(),
            join_type_lookup: default_join_types(),
            compound_lookup: default_compounds(),
            lock_lookup: default_locks(),

            select_sql_order: default_select_order(),
            insert_sql_order: default_insert_order(),
            update_sql_order: default_update_order(),
            delete_sql_order: default_delete_order(),
            truncate_sql_order: vec![SqlFragment::Truncate],
        }
    }
}

impl DialectOptions {
    /// Fragment order for a statement kind as returned by
    /// [`Statement::kind`](crate::ast::Statement::kind).
    #[must_use]
    pub fn order_for(&self, kind: &str) -> &[SqlFragment] {
        match kind {
            "select" => &self.select_sql_order,
            "insert" => &self.insert_sql_order,
            "update" => &self.update_sql_order,
            "delete" => &self.delete_sql_order,
            "truncate" => &self.truncate_sql_order,
            _ => &[],
        }
    }
}

fn lookup<K: Ord + Copy>(entries: &[(K, &str)]) -> BTreeMap<K, String> {
    entries
        .iter()
        .map(|(k, v)| (*k, String::from(*v)))
        .collect()
}

/// Operator spellings of the `default` dialect.
#[must_use]
pub fn default_boolean_operators() -> BTreeMap<BooleanOperator, String> {
    use BooleanOperator as Op;
    lookup(&[
        (Op::Eq, "="),
        (Op::NotEq, "!="),
        (Op::Is, "IS"),
        (Op::IsNot, "IS NOT"),
        (Op::Gt, ">"),
        (Op::Gte, ">="),
        (Op::Lt, "<"),
        (Op::Lte, "<="),
        (Op::In, "IN"),
        (Op::NotIn, "NOT IN"),
        (Op::Like, "LIKE"),
        (Op::NotLike, "NOT LIKE"),
        (Op::ILike, "ILIKE"),
        (Op::NotILike, "NOT ILIKE"),
        (Op::RegexpLike, "~"),
        (Op::RegexpNotLike, "!~"),
        (Op::RegexpILike, "~*"),
        (Op::RegexpNotILike, "!~*"),
    ])
}

/// Bitwise operator spellings of the `default` dialect.
#[must_use]
pub fn default_bitwise_operators() -> BTreeMap<BitwiseOperator, String> {
    use BitwiseOperator as Op;
    lookup(&[
        (Op::And, "&"),
        (Op::Or, "|"),
        (Op::Xor, "#"),
        (Op::LeftShift, "<<"),
        (Op::RightShift, ">>"),
        (Op::Inversion, "~"),
    ])
}

/// Join keywords of the `default` dialect.
#[must_use]
pub fn default_join_types() -> BTreeMap<JoinType, String> {
    lookup(&[
        (JoinType::Inner, " INNER JOIN "),
        (JoinType::Left, " LEFT JOIN "),
        (JoinType::Right, " RIGHT JOIN "),
        (JoinType::Full, " FULL JOIN "),
        (JoinType::Cross, " CROSS JOIN "),
        (JoinType::Natural, " NATURAL JOIN "),
    ])
}

/// Set operation keywords of the `default` dialect.
#[must_use]
pub fn default_compounds() -> BTreeMap<CompoundKind, String> {
    lookup(&[
        (CompoundKind::Union, " UNION "),
        (CompoundKind::UnionAll, " UNION ALL "),
        (CompoundKind::Intersect, " INTERSECT "),
        (CompoundKind::IntersectAll, " INTERSECT ALL "),
        (CompoundKind::Except, " EXCEPT "),
        (CompoundKind::ExceptAll, " EXCEPT ALL "),
    ])
}

/// Row lock clauses of the `default` dialect.
#[must_use]
pub fn default_locks() -> BTreeMap<LockStrength, String> {
    lookup(&[
        (LockStrength::Update, " FOR UPDATE"),
        (LockStrength::NoKeyUpdate, " FOR NO KEY UPDATE"),
        (LockStrength::Share, " FOR SHARE"),
        (LockStrength::KeyShare, " FOR KEY SHARE"),
    ])
}

/// `WITH`, `SELECT`, `FROM`, joins, `WHERE`, `GROUP BY`, `HAVING`, `WINDOW`,
/// compounds, `ORDER BY`, `LIMIT`, `OFFSET`, locks.
#[must_use]
pub fn default_select_order() -> Vec<SqlFragment> {
    vec![
        SqlFragment::CommonTable,
        SqlFragment::Select,
        SqlFragment::From,
        SqlFragment::Join,
        SqlFragment::Where,
        SqlFragment::GroupBy,
        SqlFragment::Having,
        SqlFragment::Window,
        SqlFragment::Compounds,
        SqlFragment::Order,
        SqlFragment::Limit,
        SqlFragment::Offset,
        SqlFragment::For,
    ]
}

#[must_use]
pub fn default_insert_order() -> Vec<SqlFragment> {
    vec![
        SqlFragment::CommonTable,
        SqlFragment::InsertBegin,
        SqlFragment::Into,
        SqlFragment::Insert,
        SqlFragment::OnConflict,
        SqlFragment::Returning,
    ]
}

#[must_use]
pub fn default_update_order() -> Vec<SqlFragment> {
    vec![
        SqlFragment::CommonTable,
        SqlFragment::UpdateBegin,
        SqlFragment::Sources,
        SqlFragment::UpdateSet,
        SqlFragment::UpdateFrom,
        SqlFragment::Where,
        SqlFragment::Order,
        SqlFragment::Limit,
        SqlFragment::Returning,
    ]
}

#[must_use]
pub fn default_delete_order() -> Vec<SqlFragment> {
    vec![
        SqlFragment::CommonTable,
        SqlFragment::DeleteBegin,
        SqlFragment::From,
        SqlFragment::Where,
        SqlFragment::Order,
        SqlFragment::Limit,
        SqlFragment::Returning,
    ]
}
