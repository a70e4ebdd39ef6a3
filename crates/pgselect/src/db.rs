//! Statement factory bound to a database handle.

use crate::client::{Executor, PlaceholderStyle};
use crate::error::SqlResult;
use crate::select::SelectStmt;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Wraps a connection, pooled connection or transaction and creates
/// statements that render with its placeholder syntax.
///
/// # Example
/// ```ignore
/// let db = Db::new(client);
/// let names: Vec<String> = db
///     .select(["name"])
///     .from("users")
///     .get_all(&db)
///     .await?;
/// ```
#[derive(Debug)]
pub struct Db<C> {
    client: C,
}

impl<C: Executor> Db<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Start a SELECT statement for the given columns.
    pub fn select<I, S>(&self, columns: I) -> SelectStmt
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectStmt::new()
            .columns(columns)
            .placeholder_style(self.client.placeholder_style())
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }
}

impl<C: Executor> Executor for Db<C> {
    fn placeholder_style(&self) -> PlaceholderStyle {
        self.client.placeholder_style()
    }

    fn rebind(&self, sql: &str) -> String {
        self.client.rebind(sql)
    }

    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlResult<Vec<Row>>> + Send {
        self.client.query(sql, params)
    }

    fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlResult<Row>> + Send {
        self.client.query_one(sql, params)
    }
}
