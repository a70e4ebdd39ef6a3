//! Convenient imports for typical `pgselect` usage.
//!
//! ```ignore
//! use pgselect::prelude::*;
//! ```

pub use crate::{
    Condition, Db, Executor, FromRow, Jsonb, RowExt, SelectStmt, SqlError, SqlResult, asc, desc,
    for_key_share, for_no_key_update, for_share, for_update, indirect, select,
};

#[cfg(feature = "pool")]
pub use crate::{create_pool, create_pool_with_config};
