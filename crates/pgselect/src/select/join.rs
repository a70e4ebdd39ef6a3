//! JOIN clauses.

use super::SelectStmt;
use crate::condition::Condition;

/// Kind of JOIN.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    /// Get the SQL keyword for this join type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL JOIN",
        }
    }
}

/// What a JOIN reads from.
#[derive(Clone, Debug)]
pub enum JoinSource {
    /// A table reference, emitted verbatim (may carry an alias, e.g. `orders o`).
    Table(String),
    /// A sub-query, emitted as `(<sub-query>) AS alias`.
    Select { stmt: Box<SelectStmt>, alias: String },
}

/// One JOIN clause of a statement.
#[derive(Clone, Debug)]
pub struct JoinClause {
    pub kind: JoinType,
    pub source: JoinSource,
    pub conditions: Vec<Condition>,
}

impl JoinClause {
    /// Name the joined relation is referred to by.
    pub fn table(&self) -> &str {
        match &self.source {
            JoinSource::Table(table) => table,
            JoinSource::Select { alias, .. } => alias,
        }
    }
}
