//! Expression AST types.
//!
//! The expression model is dialect-agnostic: operators are enums, and the
//! compiler looks up their spelling in the active dialect's options.

use serde::{Deserialize, Serialize};

use super::identifier::Identifier;
use super::record::Ex;
use super::statement::Select;
use crate::builder::value::SqlValue;

/// Comparison and pattern-matching operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BooleanOperator {
    Eq,
    NotEq,
    Is,
    IsNot,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Like,
    NotLike,
    ILike,
    NotILike,
    RegexpLike,
    RegexpNotLike,
    RegexpILike,
    RegexpNotILike,
}

impl BooleanOperator {
    /// Returns the operator that matches the complement.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Eq => Self::NotEq,
            Self::NotEq => Self::Eq,
            Self::Is => Self::IsNot,
            Self::IsNot => Self::Is,
            Self::Gt => Self::Lte,
            Self::Gte => Self::Lt,
            Self::Lt => Self::Gte,
            Self::Lte => Self::Gt,
            Self::In => Self::NotIn,
            Self::NotIn => Self::In,
            Self::Like => Self::NotLike,
            Self::NotLike => Self::Like,
            Self::ILike => Self::NotILike,
            Self::NotILike => Self::ILike,
            Self::RegexpLike => Self::RegexpNotLike,
            Self::RegexpNotLike => Self::RegexpLike,
            Self::RegexpILike => Self::RegexpNotILike,
            Self::RegexpNotILike => Self::RegexpILike,
        }
    }

    /// Name used when reporting that a dialect lacks the operator.
    #[must_use]
    pub const fn feature_name(self) -> &'static str {
        match self {
            Self::Eq => "= operator",
            Self::NotEq => "!= operator",
            Self::Is => "IS operator",
            Self::IsNot => "IS NOT operator",
            Self::Gt => "> operator",
            Self::Gte => ">= operator",
            Self::Lt => "< operator",
            Self::Lte => "<= operator",
            Self::In => "IN operator",
            Self::NotIn => "NOT IN operator",
            Self::Like => "LIKE operator",
            Self::NotLike => "NOT LIKE operator",
            Self::ILike => "ILIKE operator",
            Self::NotILike => "NOT ILIKE operator",
            Self::RegexpLike => "case-sensitive regexp operator",
            Self::RegexpNotLike => "negated case-sensitive regexp operator",
            Self::RegexpILike => "case-insensitive regexp operator",
            Self::RegexpNotILike => "negated case-insensitive regexp operator",
        }
    }
}

/// Bitwise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BitwiseOperator {
    And,
    Or,
    Xor,
    LeftShift,
    RightShift,
    /// Unary `~`; the left operand is ignored.
    Inversion,
}

impl BitwiseOperator {
    /// Name used when reporting that a dialect lacks the operator.
    #[must_use]
    pub const fn feature_name(self) -> &'static str {
        match self {
            Self::And => "bitwise AND",
            Self::Or => "bitwise OR",
            Self::Xor => "bitwise XOR",
            Self::LeftShift => "bitwise left shift",
            Self::RightShift => "bitwise right shift",
            Self::Inversion => "bitwise inversion",
        }
    }
}

/// Range operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeOperator {
    Between,
    NotBetween,
}

/// How the items of an [`ExprList`] are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    And,
    Or,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Placement of NULLs in an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullsOrder {
    First,
    Last,
}

/// A comparison such as `"a" = 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    /// Operator.
    pub op: BooleanOperator,
    /// Left operand.
    pub lhs: Box<Expr>,
    /// Right operand.
    pub rhs: Box<Expr>,
}

/// A bitwise expression such as `"a" & 4`.
#[derive(Debug, Clone, PartialEq)]
pub struct BitwiseExpr {
    /// Operator.
    pub op: BitwiseOperator,
    /// Left operand (absent for inversion).
    pub lhs: Option<Box<Expr>>,
    /// Right operand.
    pub rhs: Box<Expr>,
}

/// `lhs [NOT] BETWEEN start AND end`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpr {
    /// Operator.
    pub op: RangeOperator,
    /// Tested expression.
    pub lhs: Box<Expr>,
    /// Lower bound.
    pub start: Box<Expr>,
    /// Upper bound.
    pub end: Box<Expr>,
}

/// A list of conditions joined with AND or OR.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprList {
    /// Joining keyword.
    pub kind: ListKind,
    /// Items.
    pub items: Vec<Expr>,
}

/// An expression with a sort direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedExpr {
    /// Sorted expression.
    pub expr: Box<Expr>,
    /// Direction.
    pub direction: SortDirection,
    /// Optional NULLS FIRST / LAST.
    pub nulls: Option<NullsOrder>,
}

/// A window specification, either inline (`OVER (...)`) or named in a
/// `WINDOW` clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowDef {
    /// Name, for `WINDOW "w" AS (...)` definitions.
    pub name: Option<String>,
    /// Existing window this one extends.
    pub parent: Option<String>,
    /// PARTITION BY expressions.
    pub partition_by: Vec<Expr>,
    /// ORDER BY expressions.
    pub order_by: Vec<Expr>,
}

/// How a function call refers to its window.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowRef {
    /// `OVER "w"`.
    Named(String),
    /// `OVER (PARTITION BY ...)`.
    Inline(WindowDef),
}

/// A SQL function call.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Function name, written verbatim.
    pub name: String,
    /// Arguments.
    pub args: Vec<Expr>,
    /// `DISTINCT` before the arguments.
    pub distinct: bool,
    /// Window for window functions.
    pub over: Option<WindowRef>,
}

/// Raw SQL with `?` slots filled by argument expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSql {
    /// SQL text.
    pub sql: String,
    /// One expression per `?`.
    pub args: Vec<Expr>,
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A (possibly qualified) identifier.
    Identifier(Identifier),
    /// A literal value.
    Literal(SqlValue),
    /// Raw SQL.
    Raw(RawSql),
    /// `expr AS "alias"`.
    Aliased {
        /// Aliased expression.
        expr: Box<Expr>,
        /// Alias.
        alias: Identifier,
    },
    /// A comparison.
    Boolean(BooleanExpr),
    /// A bitwise operation.
    Bitwise(BitwiseExpr),
    /// A BETWEEN test.
    Range(RangeExpr),
    /// AND / OR list.
    List(ExprList),
    /// A parenthesized value list, e.g. the right side of IN.
    Tuple(Vec<Expr>),
    /// A sorted expression.
    Ordered(OrderedExpr),
    /// `CAST(expr AS type)`.
    Cast {
        /// Converted expression.
        expr: Box<Expr>,
        /// Target type, written verbatim.
        ty: String,
    },
    /// A function call.
    Function(FunctionCall),
    /// A parenthesized sub-select.
    Subquery(Box<Select>),
    /// `NOT (expr)`.
    Not(Box<Expr>),
    /// Column → value predicate map.
    Ex(Ex),
    /// The value proposed for insertion, inside an upsert's update.
    Excluded(String),
    /// `DEFAULT`.
    Default,
}

impl Expr {
    /// True when the expression is a condition list with nothing in it.
    ///
    /// Empty conditions are skipped by WHERE and HAVING.
    #[must_use]
    pub fn is_empty_condition(&self) -> bool {
        match self {
            Self::List(list) => list.items.iter().all(Self::is_empty_condition),
            Self::Ex(ex) => ex.is_empty(),
            _ => false,
        }
    }

    /// True for a literal NULL or boolean.
    #[must_use]
    pub const fn is_null_or_bool(&self) -> bool {
        matches!(self, Self::Literal(SqlValue::Null | SqlValue::Bool(_)))
    }
}
