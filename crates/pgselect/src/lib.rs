//! # pgselect
//!
//! A fluent SELECT statement builder for PostgreSQL.
//!
//! Statements are composed through chained calls, rendered to SQL text plus an
//! ordered list of bindings, and optionally executed through any
//! [`Executor`] (a `tokio_postgres` client, a transaction or a pooled client).
//!
//! ## Features
//!
//! - **Order-correct bindings**: the n-th placeholder always matches the n-th binding,
//!   including through sub-query joins and nested JSONB expressions
//! - **Deterministic SQL**: JSONB object keys are emitted in sorted order
//! - **Locking clauses**: `FOR UPDATE`, `FOR NO KEY UPDATE`, `FOR SHARE`, `FOR KEY SHARE`
//!   with `OF`, `NOWAIT` and `SKIP LOCKED`
//! - **Pagination helper**: [`SelectStmt::get_count`] counts without limit/offset/ordering
//!
//! ## Example
//!
//! ```ignore
//! use pgselect::prelude::*;
//!
//! let stmt = select(["id", "name"])
//!     .from("users")
//!     .where_([Condition::eq("active", true)])
//!     .order_by([desc("id")])
//!     .limit(10);
//!
//! let (sql, params) = stmt.to_sql(false);
//! assert_eq!(sql, "SELECT id, name FROM users WHERE active = ? ORDER BY id DESC LIMIT 10");
//!
//! let rows: Vec<(i64, String)> = stmt.get_all(&client).await?;
//! let total = stmt.get_count(&client).await?;
//! ```

pub mod client;
pub mod condition;
pub mod db;
pub mod error;
pub mod jsonb;
pub mod monitor;
pub mod param;
pub mod prelude;
pub mod row;
pub mod select;

pub use client::{Executor, PlaceholderStyle};
pub use condition::{Condition, Indirect, Operand, indirect, parse_conditions};
pub use db::Db;
pub use error::{SqlError, SqlResult};
pub use jsonb::Jsonb;
pub use param::{Param, ParamList, PgType};
pub use row::{FromRow, RowExt};
pub use select::{
    JoinClause, JoinSource, JoinType, LockClause, LockStrength, LockWait, OrderColumn,
    SelectStmt, asc, desc, for_key_share, for_no_key_update, for_share, for_update, select,
};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{
    create_pool, create_pool_with_config, create_pool_with_manager_config, create_pool_with_tls,
};
