//! Statement AST types.
//!
//! Statements are plain values: clauses are stored by kind, never by the order
//! in which the caller added them. The dialect decides the output order.

use super::expression::{Expr, WindowDef};
use super::record::Record;

/// A named sub-select in a WITH clause.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTable {
    /// Name, quoted as an identifier.
    pub name: String,
    /// The query.
    pub query: Box<Select>,
}

/// WITH clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct With {
    /// WITH RECURSIVE.
    pub recursive: bool,
    /// Tables in definition order.
    pub tables: Vec<CommonTable>,
}

impl With {
    pub(crate) fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Join types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
    Natural,
}

impl JoinType {
    /// Name used when reporting that a dialect lacks the join type.
    #[must_use]
    pub const fn feature_name(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Natural => "NATURAL JOIN",
        }
    }

    /// Whether the join takes an ON / USING condition.
    #[must_use]
    pub const fn takes_condition(self) -> bool {
        !matches!(self, Self::Cross | Self::Natural)
    }
}

/// Join condition.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    /// `ON expr`.
    On(Expr),
    /// `USING (a, b)`.
    Using(Vec<String>),
    /// No condition (cross and natural joins).
    None,
}

/// A join.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Join type.
    pub kind: JoinType,
    /// Joined source.
    pub source: Expr,
    /// Condition.
    pub condition: JoinCondition,
}

/// Set operations between selects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum CompoundKind {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
    Except,
    ExceptAll,
}

impl CompoundKind {
    /// Name used when reporting that a dialect lacks the operation.
    #[must_use]
    pub const fn feature_name(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Intersect => "INTERSECT",
            Self::IntersectAll => "INTERSECT ALL",
            Self::Except => "EXCEPT",
            Self::ExceptAll => "EXCEPT ALL",
        }
    }
}

/// A compound query appended to a select.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    /// Operation.
    pub kind: CompoundKind,
    /// Right-hand query.
    pub query: Box<Select>,
}

/// Row lock strength.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum LockStrength {
    Update,
    NoKeyUpdate,
    Share,
    KeyShare,
}

impl LockStrength {
    /// Name used when reporting that a dialect lacks the lock.
    #[must_use]
    pub const fn feature_name(self) -> &'static str {
        match self {
            Self::Update => "FOR UPDATE",
            Self::NoKeyUpdate => "FOR NO KEY UPDATE",
            Self::Share => "FOR SHARE",
            Self::KeyShare => "FOR KEY SHARE",
        }
    }
}

/// Behavior when a locked row is encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LockWait {
    #[default]
    Wait,
    NoWait,
    SkipLocked,
}

/// Row locking clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Lock {
    /// Strength.
    pub strength: LockStrength,
    /// Wait behavior.
    pub wait: LockWait,
}

/// DISTINCT variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Distinct {
    /// `DISTINCT`.
    All,
    /// `DISTINCT ON (...)`.
    On(Vec<Expr>),
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Select {
    pub(crate) with: With,
    pub(crate) distinct: Option<Distinct>,
    pub(crate) columns: Vec<Expr>,
    pub(crate) from: Vec<Expr>,
    pub(crate) joins: Vec<Join>,
    pub(crate) where_: Vec<Expr>,
    pub(crate) group_by: Vec<Expr>,
    pub(crate) having: Vec<Expr>,
    pub(crate) windows: Vec<WindowDef>,
    pub(crate) compounds: Vec<Compound>,
    pub(crate) order_by: Vec<Expr>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) lock: Option<Lock>,
}

/// Where the rows of an INSERT come from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InsertSource {
    /// `DEFAULT VALUES`.
    #[default]
    DefaultValues,
    /// Explicit rows, aligned with the insert's column list.
    Rows(Vec<Vec<Expr>>),
    /// Records; the column list comes from the first record.
    Records(Vec<Record>),
    /// `INSERT ... SELECT`.
    Query(Box<Select>),
}

/// What to do when an insert hits a unique constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    /// Skip the row.
    DoNothing,
    /// Update the existing row.
    DoUpdate {
        /// Assignments.
        set: Record,
        /// Optional condition on the update.
        where_: Option<Expr>,
    },
}

/// ON CONFLICT clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub(crate) target: Vec<String>,
    pub(crate) action: ConflictAction,
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Insert {
    pub(crate) with: With,
    pub(crate) table: Option<Expr>,
    pub(crate) columns: Vec<Expr>,
    pub(crate) source: InsertSource,
    pub(crate) conflict: Option<Conflict>,
    pub(crate) returning: Vec<Expr>,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Update {
    pub(crate) with: With,
    pub(crate) table: Option<Expr>,
    pub(crate) set: Record,
    pub(crate) from: Vec<Expr>,
    pub(crate) where_: Vec<Expr>,
    pub(crate) order_by: Vec<Expr>,
    pub(crate) limit: Option<u64>,
    pub(crate) returning: Vec<Expr>,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Delete {
    pub(crate) with: With,
    pub(crate) table: Option<Expr>,
    pub(crate) where_: Vec<Expr>,
    pub(crate) order_by: Vec<Expr>,
    pub(crate) limit: Option<u64>,
    pub(crate) returning: Vec<Expr>,
}

/// CASCADE / RESTRICT for TRUNCATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TruncateBehavior {
    Cascade,
    Restrict,
}

/// A TRUNCATE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Truncate {
    pub(crate) tables: Vec<Expr>,
    pub(crate) restart_identity: bool,
    pub(crate) behavior: Option<TruncateBehavior>,
}

/// Any compilable statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    Truncate(Truncate),
}

impl Statement {
    /// Statement kind, e.g. `select`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "select",
            Self::Insert(_) => "insert",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::Truncate(_) => "truncate",
        }
    }
}

macro_rules! statement_from {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Statement {
                fn from(stmt: $ty) -> Self {
                    Self::$ty(stmt)
                }
            }
        )*
    };
}

statement_from!(Select, Insert, Update, Delete, Truncate);
