//! Statement rendering driven by the dialect's fragment orders.
//!
//! Each walker records which clauses the statement carries, then visits the
//! dialect's fragments in order. A fragment renders and consumes its clause;
//! whatever is left when the walk ends is unsupported by the dialect.

use std::collections::BTreeSet;

use crate::ast::{
    Delete, Distinct, Expr, Identifier, Insert, InsertSource, Join, JoinCondition, Lock, LockWait,
    Record, Select, Truncate, TruncateBehavior, Update, With,
};
use crate::dialect::SqlFragment;
use crate::error::{Result, SqlError};

use super::conflict::uses_insert_ignore;
use super::context::SqlBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Clause {
    Begin,
    With,
    Columns,
    Table,
    Values,
    Set,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    Window,
    Compound,
    Order,
    Limit,
    Offset,
    Lock,
    UpdateFrom,
    Conflict,
    Returning,
    Truncate,
}

impl Clause {
    const fn feature_name(self) -> &'static str {
        match self {
            Self::Begin => "statement keyword",
            Self::With => "WITH",
            Self::Columns => "SELECT",
            Self::Table => "target table",
            Self::Values => "VALUES",
            Self::Set => "SET",
            Self::From => "FROM",
            Self::Join => "JOIN",
            Self::Where => "WHERE",
            Self::GroupBy => "GROUP BY",
            Self::Having => "HAVING",
            Self::Window => "WINDOW",
            Self::Compound => "compound query",
            Self::Order => "ORDER BY",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Lock => "row locking",
            Self::UpdateFrom => "multiple update tables",
            Self::Conflict => "ON CONFLICT",
            Self::Returning => "RETURNING",
            Self::Truncate => "TRUNCATE",
        }
    }

    /// Clauses without which the statement is not SQL at all.
    const fn required(self) -> bool {
        matches!(
            self,
            Self::Begin | Self::Columns | Self::Table | Self::Values | Self::Set | Self::Truncate
        )
    }
}

#[derive(Default)]
struct Pending(BTreeSet<Clause>);

impl Pending {
    fn mark(&mut self, clause: Clause, present: bool) {
        if present {
            self.0.insert(clause);
        }
    }

    fn take(&mut self, clause: Clause) -> bool {
        self.0.remove(&clause)
    }

    fn finish(self, b: &SqlBuilder<'_>, kind: &str) -> Result<()> {
        match self.0.into_iter().next() {
            None => Ok(()),
            Some(clause) if clause.required() => Err(b.invalid_dialect(format!(
                "the {kind} order never renders {}",
                clause.feature_name()
            ))),
            Some(clause) => Err(b.unsupported(clause.feature_name())),
        }
    }
}

fn has_conditions(conds: &[Expr]) -> bool {
    conds.iter().any(|e| !e.is_empty_condition())
}

impl SqlBuilder<'_> {
    fn misplaced(&self, fragment: SqlFragment, kind: &str) -> SqlError {
        self.invalid_dialect(format!("{fragment:?} is not a {kind} fragment"))
    }

    pub(crate) fn select(&mut self, select: &Select) -> Result<()> {
        let options = self.options;
        let mut pending = Pending::default();
        pending.mark(Clause::With, !select.with.is_empty());
        pending.mark(Clause::Columns, true);
        pending.mark(Clause::From, !select.from.is_empty());
        pending.mark(Clause::Join, !select.joins.is_empty());
        pending.mark(Clause::Where, has_conditions(&select.where_));
        pending.mark(Clause::GroupBy, !select.group_by.is_empty());
        pending.mark(Clause::Having, has_conditions(&select.having));
        pending.mark(Clause::Window, !select.windows.is_empty());
        pending.mark(Clause::Compound, !select.compounds.is_empty());
        pending.mark(Clause::Order, !select.order_by.is_empty());
        pending.mark(Clause::Limit, select.limit.is_some());
        pending.mark(Clause::Offset, select.offset.is_some());
        pending.mark(Clause::Lock, select.lock.is_some());

        for &fragment in &options.select_sql_order {
            match fragment {
                SqlFragment::CommonTable => {
                    if pending.take(Clause::With) {
                        self.with(&select.with)?;
                    }
                }
                SqlFragment::Select => {
                    if pending.take(Clause::Columns) {
                        self.select_columns(select, None)?;
                    }
                }
                SqlFragment::SelectWithLimit => {
                    if pending.take(Clause::Columns) {
                        let top = if select.offset.is_none() && pending.take(Clause::Limit) {
                            select.limit
                        } else {
                            None
                        };
                        self.select_columns(select, top)?;
                    }
                }
                SqlFragment::From => {
                    if pending.take(Clause::From) {
                        self.push(" FROM ");
                        self.expr_list(&select.from)?;
                    }
                }
                SqlFragment::Join => {
                    if pending.take(Clause::Join) {
                        for join in &select.joins {
                            self.join(join)?;
                        }
                    }
                }
                SqlFragment::Where => {
                    if pending.take(Clause::Where) {
                        self.push(" WHERE ");
                        self.conditions(&select.where_)?;
                    }
                }
                SqlFragment::GroupBy => {
                    if pending.take(Clause::GroupBy) {
                        self.push(" GROUP BY ");
                        self.expr_list(&select.group_by)?;
                    }
                }
                SqlFragment::Having => {
                    if pending.take(Clause::Having) {
                        self.push(" HAVING ");
                        self.conditions(&select.having)?;
                    }
                }
                SqlFragment::Window => {
                    if pending.take(Clause::Window) {
                        self.windows(select)?;
                    }
                }
                SqlFragment::Compounds => {
                    if pending.take(Clause::Compound) {
                        self.compounds(select)?;
                    }
                }
                SqlFragment::Order => {
                    if pending.take(Clause::Order) {
                        self.order_by(&select.order_by)?;
                    }
                }
                SqlFragment::OrderWithOffsetFetch => {
                    let has_order = pending.take(Clause::Order);
                    if pending.take(Clause::Offset) {
                        if !has_order {
                            return Err(SqlError::invalid(
                                "OFFSET ... FETCH requires an ORDER BY",
                            ));
                        }
                        self.order_by(&select.order_by)?;
                        self.push(" OFFSET ");
                        self.count(select.offset.unwrap_or_default())?;
                        self.push(" ROWS");
                        if pending.take(Clause::Limit) {
                            self.push(" FETCH NEXT ");
                            self.count(select.limit.unwrap_or_default())?;
                            self.push(" ROWS ONLY");
                        }
                    } else if has_order {
                        self.order_by(&select.order_by)?;
                    }
                }
                SqlFragment::Limit => {
                    if let (true, Some(limit)) = (pending.take(Clause::Limit), select.limit) {
                        self.push(" LIMIT ");
                        self.count(limit)?;
                    }
                }
                SqlFragment::Offset => {
                    if let (true, Some(offset)) = (pending.take(Clause::Offset), select.offset) {
                        self.push(" OFFSET ");
                        self.count(offset)?;
                    }
                }
                SqlFragment::For => {
                    if let (true, Some(lock)) = (pending.take(Clause::Lock), &select.lock) {
                        self.lock(lock)?;
                    }
                }
                other => return Err(self.misplaced(other, "select")),
            }
        }
        pending.finish(self, "select")
    }

    pub(crate) fn insert(&mut self, insert: &Insert) -> Result<()> {
        let options = self.options;
        let table = insert
            .table
            .as_ref()
            .ok_or_else(|| SqlError::invalid("INSERT requires a table"))?;
        let mut pending = Pending::default();
        pending.mark(Clause::With, !insert.with.is_empty());
        pending.mark(Clause::Begin, true);
        pending.mark(Clause::Table, true);
        pending.mark(Clause::Values, true);
        pending.mark(Clause::Conflict, insert.conflict.is_some());
        pending.mark(Clause::Returning, !insert.returning.is_empty());

        for &fragment in &options.insert_sql_order {
            match fragment {
                SqlFragment::CommonTable => {
                    if pending.take(Clause::With) {
                        self.with(&insert.with)?;
                    }
                }
                SqlFragment::InsertBegin => {
                    if pending.take(Clause::Begin) {
                        if uses_insert_ignore(options, insert.conflict.as_ref()) {
                            self.push(&options.insert_ignore_clause);
                        } else {
                            self.push(&options.insert_clause);
                        }
                    }
                }
                SqlFragment::Into => {
                    if pending.take(Clause::Table) {
                        self.push_char(' ');
                        self.expr(table)?;
                    }
                }
                SqlFragment::Insert => {
                    if pending.take(Clause::Values) {
                        self.insert_source(insert)?;
                    }
                }
                SqlFragment::OnConflict => {
                    if let (true, Some(conflict)) =
                        (pending.take(Clause::Conflict), &insert.conflict)
                    {
                        self.conflict(conflict)?;
                    }
                }
                SqlFragment::Returning => {
                    if pending.take(Clause::Returning) {
                        self.returning(&insert.returning)?;
                    }
                }
                other => return Err(self.misplaced(other, "insert")),
            }
        }
        pending.finish(self, "insert")
    }

    pub(crate) fn update(&mut self, update: &Update) -> Result<()> {
        let options = self.options;
        let table = update
            .table
            .as_ref()
            .ok_or_else(|| SqlError::invalid("UPDATE requires a table"))?;
        let mut pending = Pending::default();
        pending.mark(Clause::With, !update.with.is_empty());
        pending.mark(Clause::Begin, true);
        pending.mark(Clause::Table, true);
        pending.mark(Clause::Set, true);
        pending.mark(Clause::UpdateFrom, !update.from.is_empty());
        pending.mark(Clause::Where, has_conditions(&update.where_));
        pending.mark(Clause::Order, !update.order_by.is_empty());
        pending.mark(Clause::Limit, update.limit.is_some());
        pending.mark(Clause::Returning, !update.returning.is_empty());

        for &fragment in &options.update_sql_order {
            match fragment {
                SqlFragment::CommonTable => {
                    if pending.take(Clause::With) {
                        self.with(&update.with)?;
                    }
                }
                SqlFragment::UpdateBegin => {
                    if pending.take(Clause::Begin) {
                        self.push(&options.update_clause);
                    }
                }
                SqlFragment::Sources => {
                    if pending.take(Clause::Table) {
                        self.push_char(' ');
                        self.expr(table)?;
                        if !options.use_from_clause_for_multiple_update_tables
                            && pending.take(Clause::UpdateFrom)
                        {
                            self.require_multiple_update_tables()?;
                            self.push(", ");
                            self.expr_list(&update.from)?;
                        }
                    }
                }
                SqlFragment::UpdateSet => {
                    if pending.take(Clause::Set) {
                        if update.set.is_empty() {
                            return Err(SqlError::invalid(
                                "UPDATE requires at least one column to set",
                            ));
                        }
                        self.push(" SET ");
                        self.assignments(&update.set)?;
                    }
                }
                SqlFragment::UpdateFrom => {
                    if options.use_from_clause_for_multiple_update_tables
                        && pending.take(Clause::UpdateFrom)
                    {
                        self.require_multiple_update_tables()?;
                        self.push(" FROM ");
                        self.expr_list(&update.from)?;
                    }
                }
                SqlFragment::Where => {
                    if pending.take(Clause::Where) {
                        self.push(" WHERE ");
                        self.conditions(&update.where_)?;
                    }
                }
                SqlFragment::Order => {
                    if pending.take(Clause::Order) {
                        if !options.supports_order_by_on_update {
                            return Err(self.unsupported("ORDER BY on UPDATE"));
                        }
                        self.order_by(&update.order_by)?;
                    }
                }
                SqlFragment::Limit => {
                    if let (true, Some(limit)) = (pending.take(Clause::Limit), update.limit) {
                        if !options.supports_limit_on_update {
                            return Err(self.unsupported("LIMIT on UPDATE"));
                        }
                        self.push(" LIMIT ");
                        self.count(limit)?;
                    }
                }
                SqlFragment::Returning => {
                    if pending.take(Clause::Returning) {
                        self.returning(&update.returning)?;
                    }
                }
                other => return Err(self.misplaced(other, "update")),
            }
        }
        pending.finish(self, "update")
    }

    pub(crate) fn delete(&mut self, delete: &Delete) -> Result<()> {
        let options = self.options;
        let table = delete
            .table
            .as_ref()
            .ok_or_else(|| SqlError::invalid("DELETE requires a table"))?;
        let mut pending = Pending::default();
        pending.mark(Clause::With, !delete.with.is_empty());
        pending.mark(Clause::Begin, true);
        pending.mark(Clause::Table, true);
        pending.mark(Clause::Where, has_conditions(&delete.where_));
        pending.mark(Clause::Order, !delete.order_by.is_empty());
        pending.mark(Clause::Limit, delete.limit.is_some());
        pending.mark(Clause::Returning, !delete.returning.is_empty());

        for &fragment in &options.delete_sql_order {
            match fragment {
                SqlFragment::CommonTable => {
                    if pending.take(Clause::With) {
                        self.with(&delete.with)?;
                    }
                }
                SqlFragment::DeleteBegin => {
                    if pending.take(Clause::Begin) {
                        self.push(&options.delete_clause);
                    }
                }
                SqlFragment::From => {
                    if pending.take(Clause::Table) {
                        self.push(" FROM ");
                        self.expr(table)?;
                    }
                }
                SqlFragment::Where => {
                    if pending.take(Clause::Where) {
                        self.push(" WHERE ");
                        self.conditions(&delete.where_)?;
                    }
                }
                SqlFragment::Order => {
                    if pending.take(Clause::Order) {
                        if !options.supports_order_by_on_delete {
                            return Err(self.unsupported("ORDER BY on DELETE"));
                        }
                        self.order_by(&delete.order_by)?;
                    }
                }
                SqlFragment::Limit => {
                    if let (true, Some(limit)) = (pending.take(Clause::Limit), delete.limit) {
                        if !options.supports_limit_on_delete {
                            return Err(self.unsupported("LIMIT on DELETE"));
                        }
                        self.push(" LIMIT ");
                        self.count(limit)?;
                    }
                }
                SqlFragment::Returning => {
                    if pending.take(Clause::Returning) {
                        self.returning(&delete.returning)?;
                    }
                }
                other => return Err(self.misplaced(other, "delete")),
            }
        }
        pending.finish(self, "delete")
    }

    pub(crate) fn truncate(&mut self, truncate: &Truncate) -> Result<()> {
        let options = self.options;
        if truncate.tables.is_empty() {
            return Err(SqlError::invalid("TRUNCATE requires a table"));
        }
        let mut pending = Pending::default();
        pending.mark(Clause::Truncate, true);

        for &fragment in &options.truncate_sql_order {
            match fragment {
                SqlFragment::Truncate => {
                    if pending.take(Clause::Truncate) {
                        self.push(&options.truncate_clause);
                        self.push_char(' ');
                        self.expr_list(&truncate.tables)?;
                        if truncate.restart_identity {
                            let keyword = options
                                .restart_identity_fragment
                                .as_deref()
                                .ok_or_else(|| self.unsupported("RESTART IDENTITY"))?;
                            self.push(keyword);
                        }
                        if let Some(behavior) = truncate.behavior {
                            let (keyword, feature) = match behavior {
                                TruncateBehavior::Cascade => (&options.cascade_fragment, "CASCADE"),
                                TruncateBehavior::Restrict => {
                                    (&options.restrict_fragment, "RESTRICT")
                                }
                            };
                            let keyword =
                                keyword.as_deref().ok_or_else(|| self.unsupported(feature))?;
                            self.push(keyword);
                        }
                    }
                }
                other => return Err(self.misplaced(other, "truncate")),
            }
        }
        pending.finish(self, "truncate")
    }

    fn with(&mut self, with: &With) -> Result<()> {
        let options = self.options;
        if !options.supports_with_cte {
            return Err(self.unsupported("WITH"));
        }
        self.push(&options.with_fragment);
        if with.recursive {
            if !options.supports_with_cte_recursive {
                return Err(self.unsupported("WITH RECURSIVE"));
            }
            self.push(&options.recursive_fragment);
        }
        self.comma_list(&with.tables, |b, table| {
            b.quote_name(&table.name);
            b.push(" AS (");
            b.select(&table.query)?;
            b.push_char(')');
            Ok(())
        })?;
        self.push_char(' ');
        Ok(())
    }

    fn select_columns(&mut self, select: &Select, top: Option<u64>) -> Result<()> {
        let options = self.options;
        self.push(&options.select_clause);
        match &select.distinct {
            None => {}
            Some(Distinct::All) => self.push(&options.distinct_fragment),
            Some(Distinct::On(exprs)) => {
                if !options.supports_distinct_on {
                    return Err(self.unsupported("DISTINCT ON"));
                }
                self.push(&options.distinct_fragment);
                self.push(" ON (");
                self.expr_list(exprs)?;
                self.push_char(')');
            }
        }
        if let Some(n) = top {
            self.push(" TOP (");
            self.count(n)?;
            self.push_char(')');
        }
        self.push_char(' ');
        if select.columns.is_empty() {
            self.push_char('*');
            Ok(())
        } else {
            self.expr_list(&select.columns)
        }
    }

    fn join(&mut self, join: &Join) -> Result<()> {
        let options = self.options;
        let keyword = options
            .join_type_lookup
            .get(&join.kind)
            .ok_or_else(|| self.unsupported(join.kind.feature_name()))?;
        self.push(keyword);
        self.expr(&join.source)?;
        match &join.condition {
            JoinCondition::None => Ok(()),
            _ if !join.kind.takes_condition() => Err(SqlError::invalid(format!(
                "{} does not take a condition",
                join.kind.feature_name()
            ))),
            JoinCondition::On(cond) => {
                self.push(" ON ");
                self.expr(cond)
            }
            JoinCondition::Using(columns) => {
                if columns.is_empty() {
                    return Err(SqlError::invalid("USING requires at least one column"));
                }
                self.push(" USING (");
                self.comma_list(columns, |b, c| {
                    b.quote_name(c);
                    Ok(())
                })?;
                self.push_char(')');
                Ok(())
            }
        }
    }

    fn windows(&mut self, select: &Select) -> Result<()> {
        if !self.options.supports_window_function {
            return Err(self.unsupported("WINDOW"));
        }
        self.push(" WINDOW ");
        self.comma_list(&select.windows, |b, def| {
            let name = def
                .name
                .as_deref()
                .ok_or_else(|| SqlError::invalid("a WINDOW clause entry needs a name"))?;
            b.quote_name(name);
            b.push(" AS (");
            b.window_body(def)?;
            b.push_char(')');
            Ok(())
        })
    }

    fn compounds(&mut self, select: &Select) -> Result<()> {
        let options = self.options;
        for compound in &select.compounds {
            let keyword = options
                .compound_lookup
                .get(&compound.kind)
                .ok_or_else(|| self.unsupported(compound.kind.feature_name()))?;
            self.push(keyword);
            if options.wrap_compounds_in_parens {
                self.push_char('(');
                self.select(&compound.query)?;
                self.push_char(')');
            } else {
                self.select(&compound.query)?;
            }
        }
        Ok(())
    }

    fn order_by(&mut self, order: &[Expr]) -> Result<()> {
        self.push(" ORDER BY ");
        self.expr_list(order)
    }

    fn lock(&mut self, lock: &Lock) -> Result<()> {
        let options = self.options;
        let clause = options
            .lock_lookup
            .get(&lock.strength)
            .ok_or_else(|| self.unsupported(lock.strength.feature_name()))?;
        self.push(clause);
        let wait = match lock.wait {
            LockWait::Wait => None,
            LockWait::NoWait => Some((&options.nowait_fragment, "NOWAIT")),
            LockWait::SkipLocked => Some((&options.skip_locked_fragment, "SKIP LOCKED")),
        };
        if let Some((fragment, feature)) = wait {
            let fragment = fragment.as_deref().ok_or_else(|| self.unsupported(feature))?;
            self.push(fragment);
        }
        Ok(())
    }

    fn require_multiple_update_tables(&self) -> Result<()> {
        if self.options.supports_multiple_update_tables {
            Ok(())
        } else {
            Err(self.unsupported("multiple update tables"))
        }
    }

    fn insert_source(&mut self, insert: &Insert) -> Result<()> {
        let options = self.options;
        match &insert.source {
            InsertSource::DefaultValues => {
                if !insert.columns.is_empty() {
                    return Err(SqlError::invalid(
                        "an INSERT with a column list needs values",
                    ));
                }
                self.push(&options.default_values_fragment);
                Ok(())
            }
            InsertSource::Rows(rows) => {
                if rows.is_empty() {
                    return Err(SqlError::invalid("INSERT has no rows"));
                }
                for (i, row) in rows.iter().enumerate() {
                    if row.is_empty() {
                        return Err(SqlError::invalid(format!("row {i} is empty")));
                    }
                    if !insert.columns.is_empty() && row.len() != insert.columns.len() {
                        return Err(SqlError::invalid(format!(
                            "row {i} has {} values for {} columns",
                            row.len(),
                            insert.columns.len()
                        )));
                    }
                }
                self.insert_columns(&insert.columns)?;
                self.push(" VALUES ");
                self.comma_list(rows, |b, row| {
                    b.push_char('(');
                    b.expr_list(row)?;
                    b.push_char(')');
                    Ok(())
                })
            }
            InsertSource::Records(records) => self.insert_records(insert, records),
            InsertSource::Query(query) => {
                self.insert_columns(&insert.columns)?;
                self.push_char(' ');
                self.select(query)
            }
        }
    }

    fn insert_columns(&mut self, columns: &[Expr]) -> Result<()> {
        if columns.is_empty() {
            return Ok(());
        }
        self.push(" (");
        self.expr_list(columns)?;
        self.push_char(')');
        Ok(())
    }

    fn insert_records(&mut self, insert: &Insert, records: &[Record]) -> Result<()> {
        if !insert.columns.is_empty() {
            return Err(SqlError::invalid(
                "an INSERT of records takes its columns from the records",
            ));
        }
        let first = records
            .first()
            .ok_or_else(|| SqlError::invalid("INSERT has no rows"))?;
        if first.is_empty() {
            return Err(SqlError::invalid("record 0 has no columns"));
        }
        let columns: Vec<&str> = first.columns().collect();
        for (i, record) in records.iter().enumerate() {
            record.validate().map_err(SqlError::InvalidExpression)?;
            if record.len() != columns.len() || columns.iter().any(|c| record.get(c).is_none()) {
                return Err(SqlError::invalid(format!(
                    "record {i} does not set the same columns as record 0"
                )));
            }
        }
        self.push(" (");
        self.comma_list(&columns, |b, c| {
            b.quote_name(c);
            Ok(())
        })?;
        self.push(") VALUES ");
        self.comma_list(records, |b, record| {
            b.push_char('(');
            b.comma_list(&columns, |b, c| match record.get(c) {
                Some(value) => b.expr(value),
                None => Err(SqlError::invalid(format!("column \"{c}\" is missing"))),
            })?;
            b.push_char(')');
            Ok(())
        })
    }

    /// Renders `"a" = 1, "b" = 2`.
    pub(crate) fn assignments(&mut self, set: &Record) -> Result<()> {
        set.validate().map_err(SqlError::InvalidExpression)?;
        let pairs: Vec<(&str, &Expr)> = set.iter().collect();
        self.comma_list(&pairs, |b, (column, value)| {
            b.identifier(&Identifier::parse(column))?;
            b.push(" = ");
            b.expr(value)
        })
    }

    fn returning(&mut self, columns: &[Expr]) -> Result<()> {
        let options = self.options;
        if !options.supports_returning {
            return Err(self.unsupported("RETURNING"));
        }
        self.push(&options.returning_fragment);
        self.expr_list(columns)
    }
}
