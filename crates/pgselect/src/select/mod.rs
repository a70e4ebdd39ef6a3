//! SELECT statement builder.
//!
//! A [`SelectStmt`] is plain data: configuration methods consume and return it,
//! and [`SelectStmt::to_sql`] renders it without mutation, so a configured
//! statement can be rendered any number of times (or cloned into a count query).
//!
//! Column lists and the source table are replaced by later calls; joins,
//! conditions, grouping, ordering and locks accumulate.

mod exec;
mod join;
mod lock;
mod order;

pub use join::{JoinClause, JoinSource, JoinType};
pub use lock::{
    LockClause, LockStrength, LockWait, for_key_share, for_no_key_update, for_share, for_update,
};
pub use order::{OrderColumn, asc, desc};

use crate::client::PlaceholderStyle;
use crate::condition::{Condition, parse_conditions};
use crate::param::ParamList;

/// Create a SELECT statement for the given columns.
///
/// Pass any expression your database understands, e.g. `["id", "MAX(age) max_age"]`.
/// An empty list selects `*`.
///
/// # Example
/// ```ignore
/// let stmt = pgselect::select(["id", "name"])
///     .from("users")
///     .where_([Condition::eq("active", true)])
///     .order_by([desc("id")])
///     .limit(10);
/// ```
pub fn select<I, S>(columns: I) -> SelectStmt
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SelectStmt::new().columns(columns)
}

/// A SELECT statement under construction.
#[derive(Clone, Debug, Default)]
pub struct SelectStmt {
    is_distinct: bool,
    distinct_columns: Vec<String>,
    columns: Vec<String>,
    table: String,
    joins: Vec<JoinClause>,
    conditions: Vec<Condition>,
    ordering: Vec<OrderColumn>,
    grouping: Vec<String>,
    group_conditions: Vec<Condition>,
    locks: Vec<LockClause>,
    limit: i64,
    offset_from: i64,
    offset_rows: i64,
    placeholders: PlaceholderStyle,
}

impl SelectStmt {
    /// Create an empty statement (`SELECT *`).
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Columns & source ====================

    /// Replace the selected columns.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the statement as `SELECT DISTINCT`, or `SELECT DISTINCT ON (...)`
    /// when columns are given.
    pub fn distinct<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.is_distinct = true;
        self.distinct_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the table to select from.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    // ==================== JOIN ====================

    /// Add a join on a table, or on a sub-query aliased as `table` when
    /// `result_set` is given.
    ///
    /// Join conditions usually compare two columns; use [`crate::indirect`]
    /// for the right-hand side.
    pub fn join<I>(
        mut self,
        kind: JoinType,
        table: impl Into<String>,
        result_set: Option<SelectStmt>,
        conditions: I,
    ) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        let table = table.into();
        let source = match result_set {
            Some(stmt) => JoinSource::Select {
                stmt: Box::new(stmt),
                alias: table,
            },
            None => JoinSource::Table(table),
        };
        self.joins.push(JoinClause {
            kind,
            source,
            conditions: conditions.into_iter().collect(),
        });
        self
    }

    /// Add INNER JOIN on a table.
    pub fn inner_join<I>(self, table: impl Into<String>, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        self.join(JoinType::Inner, table, None, conditions)
    }

    /// Add LEFT JOIN on a table.
    pub fn left_join<I>(self, table: impl Into<String>, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        self.join(JoinType::Left, table, None, conditions)
    }

    /// Add RIGHT JOIN on a table.
    pub fn right_join<I>(self, table: impl Into<String>, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        self.join(JoinType::Right, table, None, conditions)
    }

    /// Add FULL JOIN on a table.
    pub fn full_join<I>(self, table: impl Into<String>, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        self.join(JoinType::Full, table, None, conditions)
    }

    /// Add INNER JOIN on the results of a sub-query.
    pub fn inner_join_rs<I>(self, rs: SelectStmt, alias: impl Into<String>, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        self.join(JoinType::Inner, alias, Some(rs), conditions)
    }

    /// Add LEFT JOIN on the results of a sub-query.
    pub fn left_join_rs<I>(self, rs: SelectStmt, alias: impl Into<String>, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        self.join(JoinType::Left, alias, Some(rs), conditions)
    }

    /// Add RIGHT JOIN on the results of a sub-query.
    pub fn right_join_rs<I>(self, rs: SelectStmt, alias: impl Into<String>, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        self.join(JoinType::Right, alias, Some(rs), conditions)
    }

    /// Add FULL JOIN on the results of a sub-query.
    pub fn full_join_rs<I>(self, rs: SelectStmt, alias: impl Into<String>, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        self.join(JoinType::Full, alias, Some(rs), conditions)
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

    /// Add WHERE conditions. All conditions, across calls, are AND-ed.
    pub fn where_<I>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        self.conditions.extend(conditions);
        self
    }

    /// Add a single WHERE condition.
    pub fn and_where(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add GROUP BY columns.
    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grouping.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Add HAVING conditions. Same rules as [`SelectStmt::where_`].
    pub fn having<I>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        self.group_conditions.extend(conditions);
        self
    }

    // ==================== Ordering & pagination ====================

    /// Add ORDER BY columns, built with [`asc`] and [`desc`].
    pub fn order_by<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = OrderColumn>,
    {
        self.ordering.extend(columns);
        self
    }

    /// Set LIMIT. Zero or less means no LIMIT clause.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Set OFFSET. Zero or less means no OFFSET clause, so `OFFSET 0` cannot
    /// be expressed.
    pub fn offset(mut self, start: i64) -> Self {
        self.offset_from = start;
        self.offset_rows = 0;
        self
    }

    /// Set OFFSET with a row count, rendered as `OFFSET start rows`.
    pub fn offset_rows(mut self, start: i64, rows: i64) -> Self {
        self.offset_from = start;
        self.offset_rows = rows;
        self
    }

    // ==================== Locking ====================

    /// Append a locking clause.
    pub fn lock(mut self, lock: LockClause) -> Self {
        self.locks.push(lock);
        self
    }

    // ==================== Rendering ====================

    /// Set the placeholder syntax used by `to_sql(true)`.
    pub fn placeholder_style(mut self, style: PlaceholderStyle) -> Self {
        self.placeholders = style;
        self
    }

    /// Render the statement and its bindings.
    ///
    /// With `rebind == false` the SQL uses generic `?` placeholders; otherwise
    /// they are rewritten with the statement's [`PlaceholderStyle`]. Bindings are
    /// ordered exactly like the placeholders in the text.
    pub fn to_sql(&self, rebind: bool) -> (String, ParamList) {
        let mut sql = String::from("SELECT");
        let mut params = ParamList::new();

        if self.is_distinct {
            sql.push_str(" DISTINCT");
            if !self.distinct_columns.is_empty() {
                sql.push_str(" ON (");
                sql.push_str(&self.distinct_columns.join(", "));
                sql.push(')');
            }
        }

        if self.columns.is_empty() {
            sql.push_str(" *");
        } else {
            sql.push(' ');
            sql.push_str(&self.columns.join(", "));
        }

        sql.push_str(" FROM ");
        sql.push_str(&self.table);

        for join in &self.joins {
            let (on_sql, on_params) = parse_conditions(&join.conditions);

            sql.push(' ');
            sql.push_str(join.kind.as_str());
            match &join.source {
                JoinSource::Table(table) => {
                    sql.push(' ');
                    sql.push_str(table);
                }
                JoinSource::Select { stmt, alias } => {
                    let (rs_sql, rs_params) = stmt.to_sql(false);
                    sql.push_str(" (");
                    sql.push_str(&rs_sql);
                    sql.push_str(") AS ");
                    sql.push_str(alias);
                    // The sub-query's placeholders precede the ON clause's.
                    params.extend(&rs_params);
                }
            }
            if !on_sql.is_empty() {
                sql.push_str(" ON ");
                sql.push_str(&on_sql);
            }
            params.extend(&on_params);
        }

        if !self.conditions.is_empty() {
            let (where_sql, where_params) = parse_conditions(&self.conditions);
            if !where_sql.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&where_sql);
            }
            params.extend(&where_params);
        }

        if !self.grouping.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.grouping.join(", "));
        }

        if !self.group_conditions.is_empty() {
            let (having_sql, having_params) = parse_conditions(&self.group_conditions);
            if !having_sql.is_empty() {
                sql.push_str(" HAVING ");
                sql.push_str(&having_sql);
            }
            params.extend(&having_params);
        }

        if !self.ordering.is_empty() {
            let ordering: Vec<String> = self.ordering.iter().map(OrderColumn::to_sql).collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&ordering.join(", "));
        }

        if self.limit > 0 {
            sql.push_str(&format!(" LIMIT {}", self.limit));
        }

        if self.offset_from > 0 {
            sql.push_str(&format!(" OFFSET {}", self.offset_from));
            if self.offset_rows > 0 {
                sql.push_str(&format!(" {}", self.offset_rows));
            }
        }

        for lock in &self.locks {
            if let Some(lock_sql) = lock.to_sql() {
                sql.push(' ');
                sql.push_str(&lock_sql);
            }
        }

        if rebind {
            sql = self.placeholders.rebind(&sql);
        }

        (sql, params)
    }

    /// Derive the statement that counts this statement's matching rows.
    ///
    /// Columns become `COUNT(*)`; limit, offset and ordering are dropped.
    /// Joins, conditions, grouping and locks are kept.
    ///
    /// A DISTINCT or grouped statement yields one count per distinct row or
    /// group here; use [`SelectStmt::to_count_sql`] to count its result rows.
    pub fn count_stmt(&self) -> SelectStmt {
        let mut stmt = self.unpaged();
        stmt.columns = vec!["COUNT(*)".to_string()];
        stmt
    }

    /// Render a query returning the number of rows this statement yields,
    /// ignoring limit, offset and ordering.
    ///
    /// Plain statements render as [`SelectStmt::count_stmt`]. DISTINCT and
    /// grouped statements are counted from the outside:
    /// `SELECT COUNT(*) FROM (<statement>) AS counted`.
    pub fn to_count_sql(&self, rebind: bool) -> (String, ParamList) {
        let (sql, params) = if self.is_distinct || !self.grouping.is_empty() {
            let (inner, params) = self.unpaged().to_sql(false);
            (format!("SELECT COUNT(*) FROM ({inner}) AS counted"), params)
        } else {
            self.count_stmt().to_sql(false)
        };

        if rebind {
            (self.placeholders.rebind(&sql), params)
        } else {
            (sql, params)
        }
    }

    fn unpaged(&self) -> SelectStmt {
        let mut stmt = self.clone();
        stmt.limit = 0;
        stmt.offset_from = 0;
        stmt.offset_rows = 0;
        stmt.ordering.clear();
        stmt
    }
}
