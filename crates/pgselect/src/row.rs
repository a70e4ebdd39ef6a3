//! Row decoding traits

use crate::error::{SqlError, SqlResult};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

/// Trait for types that can be built from a result row.
///
/// Implement it for your own structs; scalars and small tuples are covered
/// here and decode positionally.
///
/// ```ignore
/// struct User { id: i64, name: String }
///
/// impl FromRow for User {
///     fn from_row(row: &Row) -> SqlResult<Self> {
///         Ok(User {
///             id: row.try_get_column("id")?,
///             name: row.try_get_column("name")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> SqlResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning SqlError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> SqlResult<T>
    where
        T: for<'a> FromSql<'a>;

    /// Try to get a value by position, returning SqlError::Decode on failure
    fn try_get_index<T>(&self, idx: usize) -> SqlResult<T>
    where
        T: for<'a> FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> SqlResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| SqlError::decode(column, e.to_string()))
    }

    fn try_get_index<T>(&self, idx: usize) -> SqlResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(idx)
            .map_err(|e| SqlError::decode(format!("#{}", idx), e.to_string()))
    }
}

macro_rules! scalar_from_row {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromRow for $ty {
                fn from_row(row: &Row) -> SqlResult<Self> {
                    row.try_get_index(0)
                }
            }

            impl FromRow for Option<$ty> {
                fn from_row(row: &Row) -> SqlResult<Self> {
                    row.try_get_index(0)
                }
            }
        )*
    };
}

scalar_from_row!(
    i16,
    i32,
    i64,
    f32,
    f64,
    bool,
    String,
    serde_json::Value,
    uuid::Uuid,
    chrono::DateTime<chrono::Utc>,
    chrono::NaiveDateTime,
);

macro_rules! tuple_from_row {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name),+> FromRow for ($($name,)+)
        where
            $($name: for<'a> FromSql<'a>,)+
        {
            fn from_row(row: &Row) -> SqlResult<Self> {
                Ok(($(row.try_get_index::<$name>($idx)?,)+))
            }
        }
    };
}

tuple_from_row!(A: 0, B: 1);
tuple_from_row!(A: 0, B: 1, C: 2);
tuple_from_row!(A: 0, B: 1, C: 2, D: 3);
