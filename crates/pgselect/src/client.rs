//! The executor capability statements run against.

use crate::error::{SqlError, SqlResult};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Placeholder syntax of the target driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// Keep generic `?` placeholders.
    Question,
    /// PostgreSQL numbered placeholders: the n-th `?` becomes `$n`.
    #[default]
    Dollar,
}

impl PlaceholderStyle {
    /// Rewrite generic `?` placeholders into this style.
    pub fn rebind(self, sql: &str) -> String {
        match self {
            PlaceholderStyle::Question => sql.to_string(),
            PlaceholderStyle::Dollar => {
                let mut out = String::with_capacity(sql.len() + 8);
                let mut n = 0usize;
                for ch in sql.chars() {
                    if ch == '?' {
                        n += 1;
                        out.push('$');
                        out.push_str(&n.to_string());
                    } else {
                        out.push(ch);
                    }
                }
                out
            }
        }
    }
}

/// A database handle (connection, pooled connection or transaction) that can
/// run rendered statements.
///
/// Only the row-returning half of a client is needed here; decoding happens
/// through [`crate::FromRow`].
pub trait Executor: Send + Sync {
    /// Placeholder syntax this handle expects.
    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Dollar
    }

    /// Rewrite generic placeholders into this handle's native syntax.
    fn rebind(&self, sql: &str) -> String {
        self.placeholder_style().rebind(sql)
    }

    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlResult<Vec<Row>>> + Send;

    /// Execute a query and return the **first** row.
    ///
    /// Zero rows is [`SqlError::NotFound`]; extra rows are ignored.
    fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlResult<Row>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            rows.into_iter()
                .next()
                .ok_or_else(|| SqlError::not_found("Expected one row, got none"))
        }
    }
}

impl Executor for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<Vec<Row>> {
        tokio_postgres::Client::query(self, sql, params)
            .await
            .map_err(SqlError::from_db_error)
    }
}

impl Executor for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<Vec<Row>> {
        tokio_postgres::Transaction::query(self, sql, params)
            .await
            .map_err(SqlError::from_db_error)
    }
}

#[cfg(feature = "pool")]
impl Executor for deadpool_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<Vec<Row>> {
        // Deref target is ClientWrapper.
        Executor::query(&**self, sql, params).await
    }
}

#[cfg(feature = "pool")]
impl Executor for deadpool_postgres::ClientWrapper {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<Vec<Row>> {
        Executor::query(&**self, sql, params).await
    }
}

#[cfg(feature = "pool")]
impl Executor for deadpool_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<Vec<Row>> {
        Executor::query(&**self, sql, params).await
    }
}

impl<C: Executor> Executor for &C {
    fn placeholder_style(&self) -> PlaceholderStyle {
        (*self).placeholder_style()
    }

    fn rebind(&self, sql: &str) -> String {
        (*self).rebind(sql)
    }

    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlResult<Vec<Row>>> + Send {
        (*self).query(sql, params)
    }

    fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlResult<Row>> + Send {
        (*self).query_one(sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollar_numbers_placeholders_in_order() {
        let sql = "SELECT * FROM t WHERE a = ? AND b IN (?, ?)";
        assert_eq!(
            PlaceholderStyle::Dollar.rebind(sql),
            "SELECT * FROM t WHERE a = $1 AND b IN ($2, $3)"
        );
    }

    #[test]
    fn question_is_identity() {
        let sql = "SELECT * FROM t WHERE a = ?";
        assert_eq!(PlaceholderStyle::Question.rebind(sql), sql);
    }

    #[test]
    fn default_style_is_dollar() {
        assert_eq!(PlaceholderStyle::default(), PlaceholderStyle::Dollar);
    }

    #[test]
    fn rebind_past_nine() {
        let sql = vec!["?"; 11].join(",");
        assert!(PlaceholderStyle::Dollar.rebind(&sql).ends_with("$10,$11"));
    }
}
