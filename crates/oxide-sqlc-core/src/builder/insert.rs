//! INSERT builder and conflict clauses.

use super::expr::{IntoColumn, IntoExpr};
use crate::ast::{Conflict, ConflictAction, Insert, InsertSource, Record, Select};

impl Insert {
    /// Creates an INSERT into `table`.
    #[must_use]
    pub fn into_table(table: impl IntoColumn) -> Self {
        Self {
            table: Some(table.into_column()),
            ..Self::default()
        }
    }

    /// Sets the column list used by [`Insert::values`] and
    /// [`Insert::from_query`].
    #[must_use]
    pub fn columns<C: IntoColumn>(mut self, cols: impl IntoIterator<Item = C>) -> Self {
        self.columns = cols.into_iter().map(IntoColumn::into_column).collect();
        self
    }

    /// Adds a row of values aligned with the column list.
    #[must_use]
    pub fn values<T: IntoExpr>(mut self, row: impl IntoIterator<Item = T>) -> Self {
        let row = row.into_iter().map(IntoExpr::into_expr).collect();
        match &mut self.source {
            InsertSource::Rows(rows) => rows.push(row),
            source => *source = InsertSource::Rows(vec![row]),
        }
        self
    }

    /// Adds a record; the first record fixes the column list.
    #[must_use]
    pub fn record(mut self, record: Record) -> Self {
        match &mut self.source {
            InsertSource::Records(records) => records.push(record),
            source => *source = InsertSource::Records(vec![record]),
        }
        self
    }

    /// Adds several records.
    #[must_use]
    pub fn records(self, records: impl IntoIterator<Item = Record>) -> Self {
        records.into_iter().fold(self, Self::record)
    }

    /// Inserts the rows produced by a query.
    #[must_use]
    pub fn from_query(mut self, query: Select) -> Self {
        self.source = InsertSource::Query(Box::new(query));
        self
    }

    /// Inserts a single row of defaults.
    #[must_use]
    pub fn default_values(mut self) -> Self {
        self.source = InsertSource::DefaultValues;
        self
    }

    /// Sets the conflict clause.
    #[must_use]
    pub fn on_conflict(mut self, conflict: Conflict) -> Self {
        self.conflict = Some(conflict);
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

with_methods!(Insert);

impl Conflict {
    /// Skips conflicting rows (`ON CONFLICT DO NOTHING`, `INSERT IGNORE`).
    #[must_use]
    pub fn do_nothing() -> Self {
        Self {
            target: Vec::new(),
            action: ConflictAction::DoNothing,
        }
    }

    /// Updates the conflicting row with `set`.
    #[must_use]
    pub fn do_update<S: Into<String>>(target: impl IntoIterator<Item = S>, set: Record) -> Self {
        Self {
            target: target.into_iter().map(Into::into).collect(),
            action: ConflictAction::DoUpdate { set, where_: None },
        }
    }

    /// Updates the conflicting row with `set` when `cond` holds.
    #[must_use]
    pub fn do_update_where<S: Into<String>>(
        target: impl IntoIterator<Item = S>,
        set: Record,
        cond: impl IntoExpr,
    ) -> Self {
        Self {
            target: target.into_iter().map(Into::into).collect(),
            action: ConflictAction::DoUpdate {
                set,
                where_: Some(cond.into_expr()),
            },
        }
    }

    /// Sets the conflict target columns.
    #[must_use]
    pub fn target<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.target = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Conflict target columns.
    #[must_use]
    pub fn target_columns(&self) -> &[String] {
        &self.target
    }

    /// The action taken on conflict.
    #[must_use]
    pub const fn action(&self) -> &ConflictAction {
        &self.action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, excluded, SqlValue};
    use crate::error::SqlError;

    #[test]
    fn test_simple_insert() {
        let out = Insert::into_table("users")
            .columns(["name", "email"])
            .values(["Alice", "alice@example.com"])
            .to_prepared_sql("default")
            .unwrap();
        assert_eq!(
            out.sql,
            r#"INSERT INTO "users" ("name", "email") VALUES (?, ?)"#
        );
        assert_eq!(
            out.args,
            vec![
                SqlValue::Text(String::from("Alice")),
                SqlValue::Text(String::from("alice@example.com")),
            ]
        );
    }

    #[test]
    fn test_insert_multiple_rows() {
        let out = Insert::into_table("users")
            .columns(["name"])
            .values(["Alice"])
            .values(["Bob"])
            .to_sql("default")
            .unwrap();
        assert_eq!(
            out.sql,
            r#"INSERT INTO "users" ("name") VALUES ('Alice'), ('Bob')"#
        );
    }

    #[test]
    fn test_insert_records_reorders_by_first() {
        let out = Insert::into_table("t")
            .record(Record::new().set("a", 1).set("b", 2))
            .record(Record::new().set("b", 4).set("a", 3))
            .to_sql("default")
            .unwrap();
        assert_eq!(out.sql, r#"INSERT INTO "t" ("a", "b") VALUES (1, 2), (3, 4)"#);
    }

    #[test]
    fn test_insert_records_must_match() {
        let err = Insert::into_table("t")
            .record(Record::new().set("a", 1))
            .record(Record::new().set("b", 2))
            .to_sql("default")
            .unwrap_err();
        assert!(matches!(err, SqlError::InvalidExpression(_)));
    }

    #[test]
    fn test_row_width_mismatch() {
        let err = Insert::into_table("t")
            .columns(["a", "b"])
            .values([1])
            .to_sql("default")
            .unwrap_err();
        assert!(matches!(err, SqlError::InvalidExpression(_)));
    }

    #[test]
    fn test_insert_sql_injection_prevention() {
        let out = Insert::into_table("users")
            .columns(["name"])
            .values(["'; DROP TABLE users; --"])
            .to_sql("default")
            .unwrap();
        assert_eq!(
            out.sql,
            r#"INSERT INTO "users" ("name") VALUES ('''; DROP TABLE users; --')"#
        );
    }

    #[test]
    fn test_default_values_and_query() {
        let out = Insert::into_table("t").to_sql("default").unwrap();
        assert_eq!(out.sql, r#"INSERT INTO "t" DEFAULT VALUES"#);

        let out = Insert::into_table("archive")
            .columns(["id"])
            .from_query(Select::new().column("id").from("t"))
            .to_sql("default")
            .unwrap();
        assert_eq!(
            out.sql,
            r#"INSERT INTO "archive" ("id") SELECT "id" FROM "t""#
        );
    }

    #[test]
    fn test_upsert_with_returning() {
        let out = Insert::into_table("users")
            .record(Record::new().set("id", 1).set("name", "Alice"))
            .on_conflict(Conflict::do_update_where(
                ["id"],
                Record::new().set("name", excluded("name")),
                col("users.locked").is_false(),
            ))
            .returning(["id"])
            .to_prepared_sql("default")
            .unwrap();
        assert_eq!(
            out.sql,
            concat!(
                r#"INSERT INTO "users" ("id", "name") VALUES (?, ?)"#,
                r#" ON CONFLICT ("id") DO UPDATE SET "name" = EXCLUDED."name""#,
                r#" WHERE "users"."locked" IS FALSE RETURNING "id""#
            )
        );
        assert_eq!(out.args.len(), 2);
    }

    #[test]
    fn test_missing_table() {
        let err = Insert::default()
            .record(Record::new().set("a", 1))
            .to_sql("default")
            .unwrap_err();
        assert_eq!(err, SqlError::invalid("INSERT requires a table"));
    }
}
