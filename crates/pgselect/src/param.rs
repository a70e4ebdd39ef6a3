//! Binding storage shared by conditions, JSONB expressions and statements.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly binding.
///
/// Statements are cloned to derive count queries, so bindings are reference
/// counted rather than copied.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Wrap any `ToSql` value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Borrow the value in the shape tokio-postgres expects.
    pub fn as_sql_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

// `ToSql: Debug`, so the bound value itself is printed.
impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&*self.0, f)
    }
}

/// PostgreSQL type name a binding is cast to where the server cannot infer
/// one, such as the `VARIADIC "any"` arguments of `jsonb_build_object`.
pub trait PgType {
    /// Type name usable after `::`, e.g. `bigint`.
    fn pg_type() -> &'static str;
}

macro_rules! pg_type {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl PgType for $ty {
                fn pg_type() -> &'static str {
                    $name
                }
            }
        )*
    };
}

pg_type!(
    i16 => "smallint",
    i32 => "integer",
    i64 => "bigint",
    f32 => "real",
    f64 => "double precision",
    bool => "boolean",
    String => "text",
    &str => "text",
    Vec<u8> => "bytea",
    serde_json::Value => "jsonb",
    uuid::Uuid => "uuid",
    chrono::DateTime<chrono::Utc> => "timestamptz",
    chrono::NaiveDateTime => "timestamp",
    chrono::NaiveDate => "date",
);

// A typed null casts like its value type.
impl<T: PgType> PgType for Option<T> {
    fn pg_type() -> &'static str {
        T::pg_type()
    }
}

/// Ordered binding sequence, positionally aligned with the `?` placeholders
/// of the SQL it was rendered with.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a value and return its 1-based position.
    pub fn push<T: ToSql + Send + Sync + 'static>(&mut self, value: T) -> usize {
        self.push_param(Param::new(value))
    }

    /// Add a pre-wrapped Param and return its 1-based position.
    pub fn push_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Append every binding of `other`, preserving its order.
    pub fn extend(&mut self, other: &ParamList) {
        self.params.extend(other.params.iter().cloned());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.params.iter()
    }

    /// Borrow all bindings for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(Param::as_sql_ref).collect()
    }

    pub fn into_vec(self) -> Vec<Param> {
        self.params
    }
}

impl<'a> IntoIterator for &'a ParamList {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
