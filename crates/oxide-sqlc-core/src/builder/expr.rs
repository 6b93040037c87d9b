//! Expression builder.
//!
//! Every method consumes its receiver and returns a new expression; nothing
//! is mutated in place. Operator spelling is left to the dialect.

use super::value::ToSqlValue;
use crate::ast::{
    BitwiseExpr, BitwiseOperator, BooleanExpr, BooleanOperator, Ex, Expr, ExprList, FunctionCall,
    Identifier, ListKind, NullsOrder, OrderedExpr, RangeExpr, RangeOperator, RawSql, Select,
    SortDirection, WindowDef, WindowRef,
};
use crate::builder::value::SqlValue;

/// Conversion into an expression. Values become literals.
pub trait IntoExpr {
    /// Performs the conversion.
    fn into_expr(self) -> Expr;
}

impl<T: ToSqlValue> IntoExpr for T {
    fn into_expr(self) -> Expr {
        Expr::Literal(self.to_sql_value())
    }
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for Identifier {
    fn into_expr(self) -> Expr {
        Expr::Identifier(self)
    }
}

impl IntoExpr for Select {
    fn into_expr(self) -> Expr {
        Expr::Subquery(Box::new(self))
    }
}

impl IntoExpr for Ex {
    fn into_expr(self) -> Expr {
        Expr::Ex(self)
    }
}

/// Conversion into a column-like expression. Strings become identifiers.
///
/// Used wherever a name is expected: projected columns, FROM sources,
/// GROUP BY, ORDER BY, RETURNING.
pub trait IntoColumn {
    /// Performs the conversion.
    fn into_column(self) -> Expr;
}

impl IntoColumn for &str {
    fn into_column(self) -> Expr {
        Expr::Identifier(Identifier::parse(self))
    }
}

impl IntoColumn for String {
    fn into_column(self) -> Expr {
        Expr::Identifier(Identifier::parse(&self))
    }
}

impl IntoColumn for &String {
    fn into_column(self) -> Expr {
        Expr::Identifier(Identifier::parse(self))
    }
}

impl IntoColumn for Expr {
    fn into_column(self) -> Expr {
        self
    }
}

impl IntoColumn for Identifier {
    fn into_column(self) -> Expr {
        Expr::Identifier(self)
    }
}

impl IntoColumn for Select {
    fn into_column(self) -> Expr {
        Expr::Subquery(Box::new(self))
    }
}

/// Creates a column reference; dots qualify it (`users.id`).
#[must_use]
pub fn col(name: &str) -> Expr {
    Expr::Identifier(Identifier::parse(name))
}

/// Creates a table identifier; use [`Identifier::col`] for its columns.
#[must_use]
pub fn table(name: &str) -> Identifier {
    Identifier::parse(name)
}

/// `*`.
#[must_use]
pub fn star() -> Expr {
    Expr::Identifier(Identifier::star())
}

/// A literal value.
#[must_use]
pub fn lit(value: impl ToSqlValue) -> Expr {
    Expr::Literal(value.to_sql_value())
}

/// Raw SQL. Each `?` in `sql` is replaced by the next argument.
///
/// **Warning**: the text is emitted verbatim; never build it from user input.
#[must_use]
pub fn raw<T: IntoExpr>(sql: impl Into<String>, args: impl IntoIterator<Item = T>) -> Expr {
    Expr::Raw(RawSql {
        sql: sql.into(),
        args: args.into_iter().map(IntoExpr::into_expr).collect(),
    })
}

/// A SQL function call, e.g. `func("COALESCE", [col("a"), lit(0)])`.
#[must_use]
pub fn func(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Function(FunctionCall {
        name: name.into(),
        args: args.into_iter().collect(),
        distinct: false,
        over: None,
    })
}

/// `COUNT(expr)`.
#[must_use]
pub fn count(expr: impl IntoColumn) -> Expr {
    func("COUNT", [expr.into_column()])
}

/// `SUM(expr)`.
#[must_use]
pub fn sum(expr: impl IntoColumn) -> Expr {
    func("SUM", [expr.into_column()])
}

/// `MIN(expr)`.
#[must_use]
pub fn min(expr: impl IntoColumn) -> Expr {
    func("MIN", [expr.into_column()])
}

/// `MAX(expr)`.
#[must_use]
pub fn max(expr: impl IntoColumn) -> Expr {
    func("MAX", [expr.into_column()])
}

/// `AVG(expr)`.
#[must_use]
pub fn avg(expr: impl IntoColumn) -> Expr {
    func("AVG", [expr.into_column()])
}

/// A parenthesized value list.
#[must_use]
pub fn tuple<T: IntoExpr>(values: impl IntoIterator<Item = T>) -> Expr {
    Expr::Tuple(values.into_iter().map(IntoExpr::into_expr).collect())
}

/// Joins conditions with AND.
#[must_use]
pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::List(ExprList {
        kind: ListKind::And,
        items: exprs.into_iter().collect(),
    })
}

/// Joins conditions with OR.
#[must_use]
pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::List(ExprList {
        kind: ListKind::Or,
        items: exprs.into_iter().collect(),
    })
}

/// `NOT (expr)`.
#[must_use]
pub fn not(expr: Expr) -> Expr {
    Expr::Not(Box::new(expr))
}

/// The value proposed for insertion, for use inside an upsert's update.
#[must_use]
pub fn excluded(column: &str) -> Expr {
    Expr::Excluded(String::from(column))
}

/// `DEFAULT`.
#[must_use]
pub const fn default_value() -> Expr {
    Expr::Default
}

/// Builds a comparison; `=` / `!=` against NULL or a boolean become
/// `IS` / `IS NOT`.
pub(crate) fn boolean(op: BooleanOperator, lhs: Expr, rhs: Expr) -> Expr {
    let op = match op {
        BooleanOperator::Eq if rhs.is_null_or_bool() => BooleanOperator::Is,
        BooleanOperator::NotEq if rhs.is_null_or_bool() => BooleanOperator::IsNot,
        other => other,
    };
    Expr::Boolean(BooleanExpr {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    })
}

pub(crate) fn range(op: RangeOperator, lhs: Expr, start: Expr, end: Expr) -> Expr {
    Expr::Range(RangeExpr {
        op,
        lhs: Box::new(lhs),
        start: Box::new(start),
        end: Box::new(end),
    })
}

fn bitwise(op: BitwiseOperator, lhs: Option<Expr>, rhs: Expr) -> Expr {
    Expr::Bitwise(BitwiseExpr {
        op,
        lhs: lhs.map(Box::new),
        rhs: Box::new(rhs),
    })
}

macro_rules! comparison_methods {
    ($($(#[$doc:meta])* $name:ident => $op:ident,)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(self, value: impl IntoExpr) -> Self {
                boolean(BooleanOperator::$op, self, value.into_expr())
            }
        )*
    };
}

macro_rules! bitwise_methods {
    ($($(#[$doc:meta])* $name:ident => $op:ident,)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(self, value: impl IntoExpr) -> Self {
                bitwise(BitwiseOperator::$op, Some(self), value.into_expr())
            }
        )*
    };
}

impl Expr {
    comparison_methods! {
        /// Creates an equality expression (`IS` for NULL and booleans).
        eq => Eq,
        /// Creates an inequality expression (`IS NOT` for NULL and booleans).
        neq => NotEq,
        /// Creates a greater-than expression.
        gt => Gt,
        /// Creates a greater-than-or-equal expression.
        gte => Gte,
        /// Creates a less-than expression.
        lt => Lt,
        /// Creates a less-than-or-equal expression.
        lte => Lte,
        /// Creates an IS expression.
        is => Is,
        /// Creates an IS NOT expression.
        is_not => IsNot,
        /// Creates a LIKE expression.
        like => Like,
        /// Creates a NOT LIKE expression.
        not_like => NotLike,
        /// Creates a case-insensitive LIKE expression.
        ilike => ILike,
        /// Creates a case-insensitive NOT LIKE expression.
        not_ilike => NotILike,
        /// Creates a case-sensitive regular expression match.
        regexp_like => RegexpLike,
        /// Creates a negated case-sensitive regular expression match.
        regexp_not_like => RegexpNotLike,
        /// Creates a case-insensitive regular expression match.
        regexp_ilike => RegexpILike,
        /// Creates a negated case-insensitive regular expression match.
        regexp_not_ilike => RegexpNotILike,
        /// Creates an IN expression against a sub-select or tuple.
        in_ => In,
        /// Creates a NOT IN expression against a sub-select or tuple.
        not_in => NotIn,
    }

    bitwise_methods! {
        /// Creates a bitwise AND.
        bit_and => And,
        /// Creates a bitwise OR.
        bit_or => Or,
        /// Creates a bitwise XOR.
        bit_xor => Xor,
        /// Creates a left shift.
        shl => LeftShift,
        /// Creates a right shift.
        shr => RightShift,
    }

    /// Creates a bitwise inversion.
    #[must_use]
    pub fn bit_not(self) -> Self {
        bitwise(BitwiseOperator::Inversion, None, self)
    }

    /// Creates an IS NULL expression.
    #[must_use]
    pub fn is_null(self) -> Self {
        boolean(BooleanOperator::Is, self, Self::Literal(SqlValue::Null))
    }

    /// Creates an IS NOT NULL expression.
    #[must_use]
    pub fn is_not_null(self) -> Self {
        boolean(BooleanOperator::IsNot, self, Self::Literal(SqlValue::Null))
    }

    /// Creates an IS TRUE expression.
    #[must_use]
    pub fn is_true(self) -> Self {
        boolean(BooleanOperator::Is, self, Self::Literal(SqlValue::Bool(true)))
    }

    /// Creates an IS FALSE expression.
    #[must_use]
    pub fn is_false(self) -> Self {
        boolean(BooleanOperator::Is, self, Self::Literal(SqlValue::Bool(false)))
    }

    /// Creates an IN expression against a value list.
    #[must_use]
    pub fn in_list<T: IntoExpr>(self, values: impl IntoIterator<Item = T>) -> Self {
        boolean(BooleanOperator::In, self, tuple(values))
    }

    /// Creates a NOT IN expression against a value list.
    #[must_use]
    pub fn not_in_list<T: IntoExpr>(self, values: impl IntoIterator<Item = T>) -> Self {
        boolean(BooleanOperator::NotIn, self, tuple(values))
    }

    /// Creates a BETWEEN expression.
    #[must_use]
    pub fn between(self, start: impl IntoExpr, end: impl IntoExpr) -> Self {
        range(
            RangeOperator::Between,
            self,
            start.into_expr(),
            end.into_expr(),
        )
    }

    /// Creates a NOT BETWEEN expression.
    #[must_use]
    pub fn not_between(self, start: impl IntoExpr, end: impl IntoExpr) -> Self {
        range(
            RangeOperator::NotBetween,
            self,
            start.into_expr(),
            end.into_expr(),
        )
    }

    /// Creates an AND expression, flattening into an existing AND list.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::List(mut list) if list.kind == ListKind::And => {
                list.items.push(other);
                Self::List(list)
            }
            first => and([first, other]),
        }
    }

    /// Creates an OR expression, flattening into an existing OR list.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::List(mut list) if list.kind == ListKind::Or => {
                list.items.push(other);
                Self::List(list)
            }
            first => or([first, other]),
        }
    }

    /// Negates the expression with NOT.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        not(self)
    }

    /// Aliases the expression.
    #[must_use]
    pub fn as_(self, alias: &str) -> Self {
        Self::Aliased {
            expr: Box::new(self),
            alias: Identifier::name(alias),
        }
    }

    /// Casts the expression.
    #[must_use]
    pub fn cast(self, ty: impl Into<String>) -> Self {
        Self::Cast {
            expr: Box::new(self),
            ty: ty.into(),
        }
    }

    /// Sorts ascending.
    #[must_use]
    pub fn asc(self) -> Self {
        self.ordered(SortDirection::Asc)
    }

    /// Sorts descending.
    #[must_use]
    pub fn desc(self) -> Self {
        self.ordered(SortDirection::Desc)
    }

    fn ordered(self, direction: SortDirection) -> Self {
        match self {
            Self::Ordered(mut o) => {
                o.direction = direction;
                Self::Ordered(o)
            }
            other => Self::Ordered(OrderedExpr {
                expr: Box::new(other),
                direction,
                nulls: None,
            }),
        }
    }

    /// Places NULLs first; implies ascending order when no direction is set.
    #[must_use]
    pub fn nulls_first(self) -> Self {
        self.with_nulls(NullsOrder::First)
    }

    /// Places NULLs last; implies ascending order when no direction is set.
    #[must_use]
    pub fn nulls_last(self) -> Self {
        self.with_nulls(NullsOrder::Last)
    }

    fn with_nulls(self, nulls: NullsOrder) -> Self {
        match self.ordered_or_asc() {
            Self::Ordered(mut o) => {
                o.nulls = Some(nulls);
                Self::Ordered(o)
            }
            other => other,
        }
    }

    fn ordered_or_asc(self) -> Self {
        match self {
            ordered @ Self::Ordered(_) => ordered,
            other => other.asc(),
        }
    }

    /// Marks a function call as `DISTINCT`; other expressions are unchanged.
    #[must_use]
    pub fn distinct(self) -> Self {
        match self {
            Self::Function(mut f) => {
                f.distinct = true;
                Self::Function(f)
            }
            other => other,
        }
    }

    /// Turns a function call into a window function with an inline window.
    #[must_use]
    pub fn over(self, window: WindowDef) -> Self {
        self.with_window(WindowRef::Inline(window))
    }

    /// Turns a function call into a window function over a named window.
    #[must_use]
    pub fn over_named(self, name: &str) -> Self {
        self.with_window(WindowRef::Named(String::from(name)))
    }

    fn with_window(self, window: WindowRef) -> Self {
        match self {
            Self::Function(mut f) => {
                f.over = Some(window);
                Self::Function(f)
            }
            other => other,
        }
    }
}

impl Identifier {
    /// A column of this table.
    #[must_use]
    pub fn col(&self, name: &str) -> Expr {
        Expr::Identifier(self.child(name))
    }

    /// `table.*`.
    #[must_use]
    pub fn all(&self) -> Expr {
        Expr::Identifier(self.child("*"))
    }

    /// Aliases the table, e.g. in a FROM clause.
    #[must_use]
    pub fn as_(self, alias: &str) -> Expr {
        Expr::Identifier(self).as_(alias)
    }
}

impl WindowDef {
    /// Creates an anonymous window for `OVER (...)`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a named window for a WINDOW clause.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(String::from(name)),
            ..Self::default()
        }
    }

    /// Extends an existing named window.
    #[must_use]
    pub fn extends(mut self, parent: &str) -> Self {
        self.parent = Some(String::from(parent));
        self
    }

    /// Sets PARTITION BY.
    #[must_use]
    pub fn partition_by<C: IntoColumn>(mut self, cols: impl IntoIterator<Item = C>) -> Self {
        self.partition_by = cols.into_iter().map(IntoColumn::into_column).collect();
        self
    }

    /// Sets ORDER BY.
    #[must_use]
    pub fn order_by<C: IntoColumn>(mut self, cols: impl IntoIterator<Item = C>) -> Self {
        self.order_by = cols.into_iter().map(IntoColumn::into_column).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_null_becomes_is() {
        let expr = col("deleted_at").eq(None::<i64>);
        assert!(matches!(expr, Expr::Boolean(ref b) if b.op == BooleanOperator::Is));

        let expr = col("active").neq(true);
        assert!(matches!(expr, Expr::Boolean(ref b) if b.op == BooleanOperator::IsNot));

        let expr = col("age").eq(18);
        assert!(matches!(expr, Expr::Boolean(ref b) if b.op == BooleanOperator::Eq));
    }

    #[test]
    fn test_and_flattens() {
        let expr = col("a").eq(1).and(col("b").eq(2)).and(col("c").eq(3));
        let Expr::List(list) = expr else {
            panic!("expected list");
        };
        assert_eq!(list.kind, ListKind::And);
        assert_eq!(list.items.len(), 3);
    }

    #[test]
    fn test_or_inside_and_is_nested() {
        let expr = col("a").eq(1).and(col("b").eq(2).or(col("c").eq(3)));
        let Expr::List(list) = expr else {
            panic!("expected list");
        };
        assert!(matches!(&list.items[1], Expr::List(inner) if inner.kind == ListKind::Or));
    }

    #[test]
    fn test_composition_does_not_mutate_shared_nodes() {
        let id = col("id");
        let a = id.clone().eq(1);
        let b = id.clone().gt(5);
        assert_ne!(a, b);
        assert_eq!(id, col("id"));
    }

    #[test]
    fn test_nulls_first_implies_asc() {
        let expr = col("a").nulls_first();
        assert!(matches!(
            expr,
            Expr::Ordered(ref o) if o.direction == SortDirection::Asc
                && o.nulls == Some(NullsOrder::First)
        ));
        let expr = col("a").desc().nulls_last();
        assert!(matches!(
            expr,
            Expr::Ordered(ref o) if o.direction == SortDirection::Desc
        ));
    }

    #[test]
    fn test_table_columns() {
        let users = table("users");
        assert_eq!(users.col("id"), col("users.id"));
        assert_eq!(users.all(), col("users.*"));
    }

    #[test]
    fn test_values_become_literals() {
        assert_eq!("x".into_expr(), Expr::Literal(SqlValue::Text(String::from("x"))));
        assert_eq!("x".into_column(), col("x"));
    }
}
