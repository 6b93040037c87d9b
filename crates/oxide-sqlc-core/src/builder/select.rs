//! SELECT builder.
//!
//! Clauses can be added in any order; the dialect decides where each one
//! lands in the output.
//!
//! ```rust
//! use oxide_sqlc_core::builder::{col, Select};
//!
//! let out = Select::new()
//!     .where_clause(col("active").eq(true))
//!     .from("users")
//!     .columns(["id", "name"])
//!     .to_prepared_sql("default")
//!     .unwrap();
//!
//! assert_eq!(out.sql, r#"SELECT "id", "name" FROM "users" WHERE "active" IS TRUE"#);
//! ```

use super::expr::{IntoColumn, IntoExpr};
use crate::ast::{
    Compound, CompoundKind, Distinct, Expr, Join, JoinCondition, JoinType, Lock, LockStrength,
    LockWait, Select, WindowDef,
};

impl Select {
    /// Creates an empty SELECT (`SELECT *`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the projected columns.
    #[must_use]
    pub fn columns<C: IntoColumn>(mut self, cols: impl IntoIterator<Item = C>) -> Self {
        self.columns = cols.into_iter().map(IntoColumn::into_column).collect();
        self
    }

    /// Adds one projected column.
    #[must_use]
    pub fn column(mut self, col: impl IntoColumn) -> Self {
        self.columns.push(col.into_column());
        self
    }

    /// `SELECT DISTINCT`.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = Some(Distinct::All);
        self
    }

    /// `SELECT DISTINCT ON (...)`.
    #[must_use]
    pub fn distinct_on<C: IntoColumn>(mut self, cols: impl IntoIterator<Item = C>) -> Self {
        self.distinct = Some(Distinct::On(
            cols.into_iter().map(IntoColumn::into_column).collect(),
        ));
        self
    }

    /// Adds a FROM source: a table name, an aliased table or a sub-select.
    #[must_use]
    pub fn from(mut self, source: impl IntoColumn) -> Self {
        self.from.push(source.into_column());
        self
    }

    /// Adds a join.
    #[must_use]
    pub fn join(mut self, kind: JoinType, source: impl IntoColumn, on: Expr) -> Self {
        self.joins.push(Join {
            kind,
            source: source.into_column(),
            condition: JoinCondition::On(on),
        });
        self
    }

    /// Adds a join with `USING (...)`.
    #[must_use]
    pub fn join_using<S: Into<String>>(
        mut self,
        kind: JoinType,
        source: impl IntoColumn,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.joins.push(Join {
            kind,
            source: source.into_column(),
            condition: JoinCondition::Using(columns.into_iter().map(Into::into).collect()),
        });
        self
    }

    /// Adds an INNER JOIN.
    #[must_use]
    pub fn inner_join(self, source: impl IntoColumn, on: Expr) -> Self {
        self.join(JoinType::Inner, source, on)
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(self, source: impl IntoColumn, on: Expr) -> Self {
        self.join(JoinType::Left, source, on)
    }

    /// Adds a RIGHT JOIN.
    #[must_use]
    pub fn right_join(self, source: impl IntoColumn, on: Expr) -> Self {
        self.join(JoinType::Right, source, on)
    }

    /// Adds a FULL JOIN.
    #[must_use]
    pub fn full_join(self, source: impl IntoColumn, on: Expr) -> Self {
        self.join(JoinType::Full, source, on)
    }

    /// Adds a CROSS JOIN.
    #[must_use]
    pub fn cross_join(mut self, source: impl IntoColumn) -> Self {
        self.joins.push(Join {
            kind: JoinType::Cross,
            source: source.into_column(),
            condition: JoinCondition::None,
        });
        self
    }

    /// Adds a NATURAL JOIN.
    #[must_use]
    pub fn natural_join(mut self, source: impl IntoColumn) -> Self {
        self.joins.push(Join {
            kind: JoinType::Natural,
            source: source.into_column(),
            condition: JoinCondition::None,
        });
        self
    }

    /// Adds a WHERE condition; conditions are joined with AND.
    #[must_use]
    pub fn where_clause(mut self, cond: impl IntoExpr) -> Self {
        self.where_.push(cond.into_expr());
        self
    }

    /// Adds GROUP BY expressions.
    #[must_use]
    pub fn group_by<C: IntoColumn>(mut self, cols: impl IntoIterator<Item = C>) -> Self {
        self.group_by
            .extend(cols.into_iter().map(IntoColumn::into_column));
        self
    }

    /// Adds a HAVING condition; conditions are joined with AND.
    #[must_use]
    pub fn having(mut self, cond: impl IntoExpr) -> Self {
        self.having.push(cond.into_expr());
        self
    }

    /// Adds a named window (see [`WindowDef::named`]).
    #[must_use]
    pub fn window(mut self, window: WindowDef) -> Self {
        self.windows.push(window);
        self
    }

    fn compound(mut self, kind: CompoundKind, query: Self) -> Self {
        self.compounds.push(Compound {
            kind,
            query: Box::new(query),
        });
        self
    }

    /// `UNION`.
    #[must_use]
    pub fn union(self, query: Self) -> Self {
        self.compound(CompoundKind::Union, query)
    }

    /// `UNION ALL`.
    #[must_use]
    pub fn union_all(self, query: Self) -> Self {
        self.compound(CompoundKind::UnionAll, query)
    }

    /// `INTERSECT`.
    #[must_use]
    pub fn intersect(self, query: Self) -> Self {
        self.compound(CompoundKind::Intersect, query)
    }

    /// `INTERSECT ALL`.
    #[must_use]
    pub fn intersect_all(self, query: Self) -> Self {
        self.compound(CompoundKind::IntersectAll, query)
    }

    /// `EXCEPT`.
    #[must_use]
    pub fn except(self, query: Self) -> Self {
        self.compound(CompoundKind::Except, query)
    }

    /// `EXCEPT ALL`.
    #[must_use]
    pub fn except_all(self, query: Self) -> Self {
        self.compound(CompoundKind::ExceptAll, query)
    }

    /// Adds ORDER BY expressions. Plain columns sort ascending.
    #[must_use]
    pub fn order_by<C: IntoColumn>(mut self, cols: impl IntoIterator<Item = C>) -> Self {
        self.order_by
            .extend(cols.into_iter().map(IntoColumn::into_column));
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets OFFSET.
    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the row lock.
    #[must_use]
    pub fn lock(mut self, strength: LockStrength, wait: LockWait) -> Self {
        self.lock = Some(Lock { strength, wait });
        self
    }

    /// `FOR UPDATE`.
    #[must_use]
    pub fn for_update(self) -> Self {
        self.lock(LockStrength::Update, LockWait::Wait)
    }

    /// `FOR NO KEY UPDATE`.
    #[must_use]
    pub fn for_no_key_update(self) -> Self {
        self.lock(LockStrength::NoKeyUpdate, LockWait::Wait)
    }

    /// `FOR SHARE`.
    #[must_use]
    pub fn for_share(self) -> Self {
        self.lock(LockStrength::Share, LockWait::Wait)
    }

    /// `FOR KEY SHARE`.
    #[must_use]
    pub fn for_key_share(self) -> Self {
        self.lock(LockStrength::KeyShare, LockWait::Wait)
    }

    /// Adds NOWAIT to the row lock.
    #[must_use]
    pub fn nowait(mut self) -> Self {
        if let Some(lock) = &mut self.lock {
            lock.wait = LockWait::NoWait;
        }
        self
    }

    /// Adds SKIP LOCKED to the row lock.
    #[must_use]
    pub fn skip_locked(mut self) -> Self {
        if let Some(lock) = &mut self.lock {
            lock.wait = LockWait::SkipLocked;
        }
        self
    }
}

with_methods!(Select);
