//! DELETE and TRUNCATE builders.

use super::expr::{IntoColumn, IntoExpr};
use crate::ast::{Delete, Truncate, TruncateBehavior};

impl Delete {
    /// Creates a DELETE from `table`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from(table: impl IntoColumn) -> Self {
        Self {
            table: Some(table.into_column()),
            ..Self::default()
        }
    }

    /// Adds a WHERE condition; conditions are joined with AND.
    #[must_use]
    pub fn where_clause(mut self, cond: impl IntoExpr) -> Self {
        self.where_.push(cond.into_expr());
        self
    }

    /// Adds ORDER BY expressions.
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

    /// Adds RETURNING columns.
    #[must_use]
    pub fn returning<C: IntoColumn>(mut self, cols: impl IntoIterator<Item = C>) -> Self {
        self.returning
            .extend(cols.into_iter().map(IntoColumn::into_column));
        self
    }
}

with_methods!(Delete);

impl Truncate {
    /// Creates a TRUNCATE of one table.
    #[must_use]
    pub fn table(table: impl IntoColumn) -> Self {
        Self {
            tables: vec![table.into_column()],
            ..Self::default()
        }
    }

    /// Creates a TRUNCATE of several tables.
    #[must_use]
    pub fn tables<C: IntoColumn>(tables: impl IntoIterator<Item = C>) -> Self {
        Self {
            tables: tables.into_iter().map(IntoColumn::into_column).collect(),
            ..Self::default()
        }
    }

    /// `RESTART IDENTITY`.
    #[must_use]
    pub fn restart_identity(mut self) -> Self {
        self.restart_identity = true;
        self
    }

    /// `CASCADE`.
    #[must_use]
    pub fn cascade(mut self) -> Self {
        self.behavior = Some(TruncateBehavior::Cascade);
        self
    }

    /// `RESTRICT`.
    #[must_use]
    pub fn restrict(mut self) -> Self {
        self.behavior = Some(TruncateBehavior::Restrict);
        self
    }
}
