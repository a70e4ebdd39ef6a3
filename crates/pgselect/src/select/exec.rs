//! Execution helpers on top of rendering.

use super::SelectStmt;
use crate::client::Executor;
use crate::error::SqlResult;
use crate::monitor::trace_sql;
use crate::param::ParamList;
use crate::row::FromRow;

impl SelectStmt {
    /// Render with the executor's placeholder syntax.
    fn render_for(&self, conn: &impl Executor) -> (String, ParamList) {
        rebind_for(conn, "select", self.to_sql(false))
    }

    /// Execute the statement and decode the first row.
    ///
    /// Zero rows is [`crate::SqlError::NotFound`].
    pub async fn get_row<T: FromRow>(&self, conn: &impl Executor) -> SqlResult<T> {
        let (sql, params) = self.render_for(conn);
        let row = conn.query_one(&sql, &params.as_refs()).await?;
        T::from_row(&row)
    }

    /// Execute the statement and decode every row.
    pub async fn get_all<T: FromRow>(&self, conn: &impl Executor) -> SqlResult<Vec<T>> {
        let (sql, params) = self.render_for(conn);
        let rows = conn.query(&sql, &params.as_refs()).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Count the rows the statement yields, ignoring ordering, limit and
    /// offset. Useful for pagination.
    ///
    /// DISTINCT and grouped statements count distinct rows and groups; see
    /// [`SelectStmt::to_count_sql`].
    pub async fn get_count(&self, conn: &impl Executor) -> SqlResult<i64> {
        let (sql, params) = rebind_for(conn, "count", self.to_count_sql(false));
        let row = conn.query_one(&sql, &params.as_refs()).await?;
        i64::from_row(&row)
    }
}

fn rebind_for(
    conn: &impl Executor,
    kind: &str,
    (sql, params): (String, ParamList),
) -> (String, ParamList) {
    let sql = conn.rebind(&sql);
    trace_sql(kind, &sql, params.len());
    (sql, params)
}
