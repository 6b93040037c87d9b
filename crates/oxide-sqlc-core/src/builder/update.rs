//! UPDATE builder.

use super::expr::{IntoColumn, IntoExpr};
use crate::ast::{Record, Update};

impl Update {
    /// Creates an UPDATE of `table`.
    #[must_use]
    pub fn table(table: impl IntoColumn) -> Self {
        Self {
            table: Some(table.into_column()),
            ..Self::default()
        }
    }

    /// Replaces the SET record.
    #[must_use]
    pub fn set(mut self, record: Record) -> Self {
        self.set = record;
        self
    }

    /// Sets one column.
    #[must_use]
    pub fn set_value(mut self, column: impl Into<String>, value: impl IntoExpr) -> Self {
        self.set = std::mem::take(&mut self.set).set(column, value);
        self
    }

    /// Adds tables for a multi-table update.
    #[must_use]
    pub fn from<C: IntoColumn>(mut self, tables: impl IntoIterator<Item = C>) -> Self {
        self.from
            .extend(tables.into_iter().map(IntoColumn::into_column));
        self
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

with_methods!(Update);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, SqlValue};
    use crate::error::SqlError;

    #[test]
    fn test_simple_update() {
        let out = Update::table("users")
            .set_value("name", "Bob")
            .where_clause(col("id").eq(1))
            .to_prepared_sql("default")
            .unwrap();
        assert_eq!(out.sql, r#"UPDATE "users" SET "name" = ? WHERE "id" = ?"#);
        assert_eq!(
            out.args,
            vec![SqlValue::Text(String::from("Bob")), SqlValue::Int(1)]
        );
    }

    #[test]
    fn test_set_keeps_insertion_order() {
        let out = Update::table("t")
            .set(Record::new().set("b", 2).set("a", col("a").bit_or(1)))
            .to_sql("default")
            .unwrap();
        assert_eq!(out.sql, r#"UPDATE "t" SET "b" = 2, "a" = ("a" | 1)"#);
    }

    #[test]
    fn test_multi_table_update_uses_from() {
        let out = Update::table("items")
            .set_value("price", col("p.price"))
            .from(["p"])
            .where_clause(col("items.id").eq(col("p.item_id")))
            .to_sql("default")
            .unwrap();
        assert_eq!(
            out.sql,
            r#"UPDATE "items" SET "price" = "p"."price" FROM "p" WHERE "items"."id" = "p"."item_id""#
        );
    }

    #[test]
    fn test_empty_set_is_invalid() {
        let err = Update::table("t").to_sql("default").unwrap_err();
        assert!(matches!(err, SqlError::InvalidExpression(_)));
    }

    #[test]
    fn test_duplicate_set_column_is_invalid() {
        let err = Update::table("t")
            .set_value("a", 1)
            .set_value("a", 2)
            .to_sql("default")
            .unwrap_err();
        assert!(matches!(err, SqlError::InvalidExpression(_)));
    }
}
