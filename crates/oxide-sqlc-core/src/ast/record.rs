//! Column → value maps: [`Record`] for settable clauses, [`Ex`] for predicates.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::expression::{BooleanOperator, Expr, ExprList, ListKind, RangeOperator};
use super::identifier::Identifier;
use crate::builder::expr::{boolean, range, IntoExpr};

/// An ordered, unique-key column → expression map.
///
/// Used for INSERT rows, UPDATE SET and DO UPDATE SET. Columns render in
/// insertion order. Setting a column twice is an error reported when the
/// statement is compiled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    values: IndexMap<String, Expr>,
    duplicates: Vec<String>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl IntoExpr) -> Self {
        let column = column.into();
        if self.values.contains_key(&column) {
            self.duplicates.push(column);
        } else {
            self.values.insert(column, value.into_expr());
        }
        self
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Column / value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Expr> {
        self.values.get(column)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no column is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        match self.duplicates.first() {
            Some(column) => Err(format!("column \"{column}\" is set more than once")),
            None => Ok(()),
        }
    }
}

impl<K: Into<String>, V: IntoExpr> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |record, (k, v)| record.set(k, v))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum OpEntry {
    Compare(BooleanOperator, Expr),
    Range(RangeOperator, Expr, Expr),
}

/// A set of operators applied to one column inside an [`Ex`].
///
/// Several operators on the same column are joined with OR.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Op {
    entries: Vec<OpEntry>,
}

macro_rules! op_methods {
    ($($(#[$doc:meta])* $name:ident => $op:ident,)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(mut self, value: impl IntoExpr) -> Self {
                self.entries
                    .push(OpEntry::Compare(BooleanOperator::$op, value.into_expr()));
                self
            }
        )*
    };
}

impl Op {
    /// Creates an empty operator set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    op_methods! {
        /// `=`
        eq => Eq,
        /// `!=`
        neq => NotEq,
        /// `IS`
        is => Is,
        /// `IS NOT`
        is_not => IsNot,
        /// `>`
        gt => Gt,
        /// `>=`
        gte => Gte,
        /// `<`
        lt => Lt,
        /// `<=`
        lte => Lte,
        /// `LIKE`
        like => Like,
        /// `NOT LIKE`
        not_like => NotLike,
        /// `ILIKE`
        ilike => ILike,
        /// `NOT ILIKE`
        not_ilike => NotILike,
        /// Case-sensitive regular expression match.
        regexp_like => RegexpLike,
        /// Case-insensitive regular expression match.
        regexp_ilike => RegexpILike,
    }

    /// `IN (...)`
    #[must_use]
    pub fn in_list<T: IntoExpr>(mut self, values: impl IntoIterator<Item = T>) -> Self {
        let tuple = Expr::Tuple(values.into_iter().map(IntoExpr::into_expr).collect());
        self.entries.push(OpEntry::Compare(BooleanOperator::In, tuple));
        self
    }

    /// `NOT IN (...)`
    #[must_use]
    pub fn not_in_list<T: IntoExpr>(mut self, values: impl IntoIterator<Item = T>) -> Self {
        let tuple = Expr::Tuple(values.into_iter().map(IntoExpr::into_expr).collect());
        self.entries
            .push(OpEntry::Compare(BooleanOperator::NotIn, tuple));
        self
    }

    /// `BETWEEN start AND end`
    #[must_use]
    pub fn between(mut self, start: impl IntoExpr, end: impl IntoExpr) -> Self {
        self.entries.push(OpEntry::Range(
            RangeOperator::Between,
            start.into_expr(),
            end.into_expr(),
        ));
        self
    }

    /// `NOT BETWEEN start AND end`
    #[must_use]
    pub fn not_between(mut self, start: impl IntoExpr, end: impl IntoExpr) -> Self {
        self.entries.push(OpEntry::Range(
            RangeOperator::NotBetween,
            start.into_expr(),
            end.into_expr(),
        ));
        self
    }

    fn to_expr(&self, column: &Expr) -> Expr {
        let mut items: Vec<Expr> = self
            .entries
            .iter()
            .map(|entry| match entry {
                OpEntry::Compare(op, value) => boolean(*op, column.clone(), value.clone()),
                OpEntry::Range(op, start, end) => {
                    range(*op, column.clone(), start.clone(), end.clone())
                }
            })
            .collect();
        if items.len() == 1 {
            items.remove(0)
        } else {
            Expr::List(ExprList {
                kind: ListKind::Or,
                items,
            })
        }
    }
}

/// A value in an [`Ex`] map.
#[derive(Debug, Clone, PartialEq)]
pub enum ExValue {
    /// Equality (or IS / IN depending on the value).
    Value(Expr),
    /// Explicit operators.
    Ops(Op),
}

/// Conversion into an [`ExValue`].
pub trait IntoExValue {
    /// Performs the conversion.
    fn into_ex_value(self) -> ExValue;
}

impl<T: IntoExpr> IntoExValue for T {
    fn into_ex_value(self) -> ExValue {
        ExValue::Value(self.into_expr())
    }
}

impl IntoExValue for Op {
    fn into_ex_value(self) -> ExValue {
        ExValue::Ops(self)
    }
}

/// Column → value predicate shorthand.
///
/// Keys are unique (setting a key again replaces it) and render in sorted
/// order, so the output does not depend on construction order. A plain value
/// compares with `=`, `NULL` and booleans with `IS`, tuples with `IN`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ex {
    entries: BTreeMap<String, ExValue>,
    any: bool,
}

impl Ex {
    /// Creates a map whose conditions are joined with AND.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map whose conditions are joined with OR.
    #[must_use]
    pub fn any() -> Self {
        Self {
            entries: BTreeMap::new(),
            any: true,
        }
    }

    /// Sets the condition for a column.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl IntoExValue) -> Self {
        self.entries.insert(column.into(), value.into_ex_value());
        self
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map has no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expands the map into a condition list.
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        let items = self
            .entries
            .iter()
            .map(|(column, value)| {
                let lhs = Expr::Identifier(Identifier::parse(column));
                match value {
                    ExValue::Value(rhs @ Expr::Tuple(_)) => {
                        boolean(BooleanOperator::In, lhs, rhs.clone())
                    }
                    ExValue::Value(rhs) => boolean(BooleanOperator::Eq, lhs, rhs.clone()),
                    ExValue::Ops(ops) => ops.to_expr(&lhs),
                }
            })
            .collect();
        Expr::List(ExprList {
            kind: if self.any { ListKind::Or } else { ListKind::And },
            items,
        })
    }
}
