//! Expression rendering.
//!
//! Comparisons and ranges are parenthesized only when nested inside another
//! operator; bitwise operations always are. Condition lists render bare at
//! the top of a clause and in parentheses anywhere else.

use crate::ast::{
    BitwiseExpr, BitwiseOperator, BooleanExpr, BooleanOperator, Expr, ExprList, FunctionCall,
    ListKind, NullsOrder, OrderedExpr, RangeExpr, RangeOperator, RawSql, SortDirection, WindowDef,
    WindowRef,
};
use crate::builder::value::SqlValue;
use crate::error::{Result, SqlError};

use super::context::SqlBuilder;

impl SqlBuilder<'_> {
    /// Renders an expression at the top of a clause.
    pub(crate) fn expr(&mut self, expr: &Expr) -> Result<()> {
        self.expr_at(expr, false)
    }

    /// Renders the AND of `conds`, skipping empty condition lists.
    pub(crate) fn conditions(&mut self, conds: &[Expr]) -> Result<()> {
        let items: Vec<&Expr> = conds.iter().filter(|e| !e.is_empty_condition()).collect();
        match items.as_slice() {
            [] => Err(SqlError::invalid("empty condition")),
            [single] => self.expr_at(single, false),
            _ => self.joined(ListKind::And, &items),
        }
    }

    /// Renders `expr`, `expr, expr`, ... at the top level.
    pub(crate) fn expr_list(&mut self, exprs: &[Expr]) -> Result<()> {
        self.comma_list(exprs, |b, e| b.expr(e))
    }

    fn expr_at(&mut self, expr: &Expr, nested: bool) -> Result<()> {
        match expr {
            Expr::Identifier(ident) => self.identifier(ident),
            Expr::Literal(value) => self.literal(value),
            Expr::Raw(raw) => self.raw(raw),
            Expr::Aliased { expr, alias } => {
                self.expr_at(expr, true)?;
                self.push(" AS ");
                self.identifier(alias)
            }
            Expr::Boolean(b) => self.wrap(nested, |s| s.boolean(b)),
            Expr::Bitwise(b) => self.bitwise(b),
            Expr::Range(r) => self.wrap(nested, |s| s.range(r)),
            Expr::List(list) => self.list(list, nested),
            Expr::Tuple(items) => self.tuple(items),
            Expr::Ordered(ordered) => self.ordered(ordered),
            Expr::Cast { expr, ty } => {
                self.push("CAST(");
                self.expr(expr)?;
                self.push(" AS ");
                self.push(ty);
                self.push_char(')');
                Ok(())
            }
            Expr::Function(func) => self.function(func),
            Expr::Subquery(select) => {
                self.push_char('(');
                self.select(select)?;
                self.push_char(')');
                Ok(())
            }
            Expr::Not(inner) => self.wrap(nested, |s| {
                s.push("NOT (");
                s.expr(inner)?;
                s.push_char(')');
                Ok(())
            }),
            Expr::Ex(ex) => self.expr_at(&ex.to_expr(), nested),
            Expr::Excluded(column) => {
                if column.is_empty() {
                    return Err(SqlError::invalid("excluded column name is empty"));
                }
                let options = self.options;
                self.push(&options.excluded_prefix);
                self.quote_name(column);
                self.push(&options.excluded_suffix);
                Ok(())
            }
            Expr::Default => {
                self.push("DEFAULT");
                Ok(())
            }
        }
    }

    fn wrap(&mut self, parens: bool, render: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        if parens {
            self.push_char('(');
        }
        render(self)?;
        if parens {
            self.push_char(')');
        }
        Ok(())
    }

    fn boolean_operator(&mut self, op: BooleanOperator) -> Result<()> {
        let options = self.options;
        let spelled = options
            .boolean_operator_lookup
            .get(&op)
            .ok_or_else(|| self.unsupported(op.feature_name()))?;
        self.push_char(' ');
        self.push(spelled);
        self.push_char(' ');
        Ok(())
    }

    fn boolean(&mut self, b: &BooleanExpr) -> Result<()> {
        if let (BooleanOperator::Is | BooleanOperator::IsNot, Expr::Literal(SqlValue::Bool(value))) =
            (b.op, b.rhs.as_ref())
        {
            return self.is_bool(b.op, &b.lhs, *value);
        }
        self.expr_at(&b.lhs, true)?;
        self.boolean_operator(b.op)?;
        self.expr_at(&b.rhs, true)
    }

    fn is_bool(&mut self, op: BooleanOperator, lhs: &Expr, value: bool) -> Result<()> {
        let options = self.options;
        self.expr_at(lhs, true)?;
        if !options.boolean_data_type_supported {
            let op = if op == BooleanOperator::Is {
                BooleanOperator::Eq
            } else {
                BooleanOperator::NotEq
            };
            self.boolean_operator(op)?;
            self.bool_literal(value);
            return Ok(());
        }
        self.boolean_operator(op)?;
        if self.prepared && !options.use_literal_is_bools {
            self.placeholder(SqlValue::Bool(value));
        } else {
            self.bool_literal(value);
        }
        Ok(())
    }

    fn bitwise(&mut self, b: &BitwiseExpr) -> Result<()> {
        let options = self.options;
        let spelled = options
            .bitwise_operator_lookup
            .get(&b.op)
            .ok_or_else(|| self.unsupported(b.op.feature_name()))?;
        self.push_char('(');
        if b.op == BitwiseOperator::Inversion {
            self.push(spelled);
        } else {
            let lhs = b.lhs.as_deref().ok_or_else(|| {
                SqlError::invalid(format!("{} needs a left operand", b.op.feature_name()))
            })?;
            self.expr_at(lhs, true)?;
            self.push_char(' ');
            self.push(spelled);
            self.push_char(' ');
        }
        self.expr_at(&b.rhs, true)?;
        self.push_char(')');
        Ok(())
    }

    fn range(&mut self, r: &RangeExpr) -> Result<()> {
        self.expr_at(&r.lhs, true)?;
        self.push(match r.op {
            RangeOperator::Between => " BETWEEN ",
            RangeOperator::NotBetween => " NOT BETWEEN ",
        });
        self.expr_at(&r.start, true)?;
        self.push(" AND ");
        self.expr_at(&r.end, true)
    }

    fn list(&mut self, list: &ExprList, nested: bool) -> Result<()> {
        let items: Vec<&Expr> = list
            .items
            .iter()
            .filter(|e| !e.is_empty_condition())
            .collect();
        match items.as_slice() {
            [] => Err(SqlError::invalid("empty condition list")),
            [single] => self.expr_at(single, nested),
            _ => self.wrap(nested, |s| s.joined(list.kind, &items)),
        }
    }

    fn joined(&mut self, kind: ListKind, items: &[&Expr]) -> Result<()> {
        let separator = match kind {
            ListKind::And => " AND ",
            ListKind::Or => " OR ",
        };
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(separator);
            }
            self.expr_at(item, matches!(item, Expr::List(_) | Expr::Ex(_)))?;
        }
        Ok(())
    }

    fn tuple(&mut self, items: &[Expr]) -> Result<()> {
        if items.is_empty() {
            let options = self.options;
            self.push(&options.empty_list_fragment);
            return Ok(());
        }
        self.push_char('(');
        self.expr_list(items)?;
        self.push_char(')');
        Ok(())
    }

    fn raw(&mut self, raw: &RawSql) -> Result<()> {
        let mut args = raw.args.iter();
        for ch in raw.sql.chars() {
            if ch == '?' {
                let arg = args.next().ok_or_else(|| {
                    SqlError::invalid(format!("raw SQL {:?} has more `?` than arguments", raw.sql))
                })?;
                self.expr_at(arg, true)?;
            } else {
                self.push_char(ch);
            }
        }
        if args.next().is_some() {
            return Err(SqlError::invalid(format!(
                "raw SQL {:?} has more arguments than `?`",
                raw.sql
            )));
        }
        Ok(())
    }

    fn ordered(&mut self, ordered: &OrderedExpr) -> Result<()> {
        let options = self.options;
        self.expr_at(&ordered.expr, true)?;
        self.push(match ordered.direction {
            SortDirection::Asc => " ASC",
            SortDirection::Desc => " DESC",
        });
        if let Some(nulls) = ordered.nulls {
            let (fragment, feature) = match nulls {
                NullsOrder::First => (&options.nulls_first_fragment, "NULLS FIRST"),
                NullsOrder::Last => (&options.nulls_last_fragment, "NULLS LAST"),
            };
            let fragment = fragment.as_deref().ok_or_else(|| self.unsupported(feature))?;
            self.push(fragment);
        }
        Ok(())
    }

    fn function(&mut self, func: &FunctionCall) -> Result<()> {
        if func.name.is_empty() {
            return Err(SqlError::invalid("function name is empty"));
        }
        self.push(&func.name);
        self.push_char('(');
        if func.distinct {
            self.push("DISTINCT ");
        }
        self.expr_list(&func.args)?;
        self.push_char(')');
        if let Some(window) = &func.over {
            if !self.options.supports_window_function {
                return Err(self.unsupported("window functions"));
            }
            self.push(" OVER ");
            match window {
                WindowRef::Named(name) => self.quote_name(name),
                WindowRef::Inline(def) => {
                    self.push_char('(');
                    self.window_body(def)?;
                    self.push_char(')');
                }
            }
        }
        Ok(())
    }

    /// Renders the inside of a window's parentheses.
    pub(crate) fn window_body(&mut self, def: &WindowDef) -> Result<()> {
        let mut first = true;
        if let Some(parent) = &def.parent {
            self.quote_name(parent);
            first = false;
        }
        if !def.partition_by.is_empty() {
            if !first {
                self.push_char(' ');
            }
            self.push("PARTITION BY ");
            self.expr_list(&def.partition_by)?;
            first = false;
        }
        if !def.order_by.is_empty() {
            if !first {
                self.push_char(' ');
            }
            self.push("ORDER BY ");
            self.expr_list(&def.order_by)?;
        }
        Ok(())
    }
}
