//! Nested JSONB construction expressions.
//!
//! A [`Jsonb`] value renders to `jsonb_build_object(...)` / `jsonb_build_array(...)`
//! calls with every leaf bound as a parameter. Both functions take
//! `VARIADIC "any"`, so each placeholder carries an explicit cast: keys are
//! `?::text` and leaves use their [`PgType`] name.
//!
//! ```ignore
//! use pgselect::Jsonb;
//!
//! let doc = Jsonb::object()
//!     .set("name", Jsonb::scalar("alice"))
//!     .set("tags", Jsonb::build_array([Jsonb::scalar("a"), Jsonb::scalar("b")]));
//!
//! let (sql, params) = doc.to_sql();
//! // jsonb_build_object(?::text, ?::text, ?::text, jsonb_build_array(?::text, ?::text))
//! ```
//!
//! Object keys are always emitted in sorted order, so the same logical object
//! renders to identical SQL regardless of insertion order.

use crate::param::{Param, ParamList, PgType};
use std::collections::BTreeMap;
use tokio_postgres::types::ToSql;

/// A nested value expression.
#[derive(Clone, Debug)]
pub enum Jsonb {
    /// SQL `NULL`, rendered inline.
    Null,
    /// A leaf value, rendered as a placeholder cast to `pg_type`.
    Scalar { value: Param, pg_type: &'static str },
    /// `jsonb_build_object`, keyed in sorted order.
    Object(BTreeMap<String, Jsonb>),
    /// `jsonb_build_array`, in insertion order.
    Array(Vec<Jsonb>),
}

impl Jsonb {
    /// Start an empty object.
    pub fn object() -> Self {
        Jsonb::Object(BTreeMap::new())
    }

    /// Start an empty array.
    pub fn array() -> Self {
        Jsonb::Array(Vec::new())
    }

    pub fn null() -> Self {
        Jsonb::Null
    }

    /// Wrap a leaf value.
    pub fn scalar<T: ToSql + PgType + Send + Sync + 'static>(value: T) -> Self {
        Jsonb::Scalar {
            value: Param::new(value),
            pg_type: T::pg_type(),
        }
    }

    /// Build an object from key/value pairs. Later duplicates win.
    pub fn build_object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Jsonb)>,
    {
        Jsonb::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an array from values.
    pub fn build_array<I: IntoIterator<Item = Jsonb>>(values: I) -> Self {
        Jsonb::Array(values.into_iter().collect())
    }

    /// Set a key on an object. No-op on anything else.
    pub fn set(mut self, key: impl Into<String>, value: Jsonb) -> Self {
        if let Jsonb::Object(ref mut entries) = self {
            entries.insert(key.into(), value);
        }
        self
    }

    /// Append to an array. No-op on anything else.
    pub fn push(mut self, value: Jsonb) -> Self {
        if let Jsonb::Array(ref mut values) = self {
            values.push(value);
        }
        self
    }

    /// Render the expression and its bindings.
    pub fn to_sql(&self) -> (String, ParamList) {
        let mut params = ParamList::new();
        let sql = self.build(&mut params);
        (sql, params)
    }

    /// Render into `params`, returning the SQL fragment.
    ///
    /// Bindings are appended depth-first, in the same order their placeholders
    /// appear in the returned text.
    pub fn build(&self, params: &mut ParamList) -> String {
        match self {
            Jsonb::Null => "NULL".to_string(),
            Jsonb::Scalar { value, pg_type } => {
                params.push_param(value.clone());
                format!("?::{pg_type}")
            }
            Jsonb::Object(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| {
                        params.push(key.clone());
                        format!("?::text, {}", value.build(params))
                    })
                    .collect();
                format!("jsonb_build_object({})", parts.join(", "))
            }
            Jsonb::Array(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.build(params)).collect();
                format!("jsonb_build_array({})", parts.join(", "))
            }
        }
    }
}

impl From<serde_json::Value> for Jsonb {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Jsonb::Null,
            Value::Bool(b) => Jsonb::scalar(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Jsonb::scalar(i)
                } else if let Some(f) = n.as_f64() {
                    Jsonb::scalar(f)
                } else {
                    Jsonb::scalar(n.to_string())
                }
            }
            Value::String(s) => Jsonb::scalar(s),
            Value::Array(values) => Jsonb::build_array(values.into_iter().map(Jsonb::from)),
            Value::Object(entries) => {
                Jsonb::build_object(entries.into_iter().map(|(k, v)| (k, Jsonb::from(v))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn debug_params(params: &ParamList) -> Vec<String> {
        params.iter().map(|p| format!("{:?}", p)).collect()
    }

    #[test]
    fn object_keys_are_sorted() {
        let a = Jsonb::object()
            .set("zeta", Jsonb::scalar(1i64))
            .set("alpha", Jsonb::scalar(2i64));
        let b = Jsonb::object()
            .set("alpha", Jsonb::scalar(2i64))
            .set("zeta", Jsonb::scalar(1i64));

        let (sql_a, params_a) = a.to_sql();
        let (sql_b, params_b) = b.to_sql();
        assert_eq!(sql_a, sql_b);
        assert_eq!(sql_a, "jsonb_build_object(?::text, ?::bigint, ?::text, ?::bigint)");
        assert_eq!(debug_params(&params_a), vec!["\"alpha\"", "2", "\"zeta\"", "1"]);
        assert_eq!(debug_params(&params_a), debug_params(&params_b));
    }

    #[test]
    fn nested_expressions_splice_in_place() {
        let doc = Jsonb::object()
            .set("name", Jsonb::scalar("alice"))
            .set(
                "roles",
                Jsonb::build_array([Jsonb::scalar("admin"), Jsonb::object().set("x", Jsonb::scalar(1i32))]),
            );

        let (sql, params) = doc.to_sql();
        assert_eq!(
            sql,
            "jsonb_build_object(?::text, ?::text, ?::text, \
             jsonb_build_array(?::text, jsonb_build_object(?::text, ?::integer)))"
        );
        assert_eq!(
            debug_params(&params),
            vec!["\"name\"", "\"alice\"", "\"roles\"", "\"admin\"", "\"x\"", "1"]
        );
    }

    #[test]
    fn null_renders_inline() {
        let (sql, params) = Jsonb::build_array([Jsonb::null(), Jsonb::scalar(5i64)]).to_sql();
        assert_eq!(sql, "jsonb_build_array(NULL, ?::bigint)");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn empty_containers() {
        assert_eq!(Jsonb::object().to_sql().0, "jsonb_build_object()");
        assert_eq!(Jsonb::array().to_sql().0, "jsonb_build_array()");
    }

    #[test]
    fn from_serde_json_matches_builder() {
        let from_json = Jsonb::from(json!({"b": [true, null], "a": "x"}));
        let (sql, params) = from_json.to_sql();
        assert_eq!(
            sql,
            "jsonb_build_object(?::text, ?::text, ?::text, jsonb_build_array(?::boolean, NULL))"
        );
        assert_eq!(debug_params(&params), vec!["\"a\"", "\"x\"", "\"b\"", "true"]);
    }

    #[test]
    fn every_placeholder_is_cast() {
        let (sql, params) = Jsonb::from(json!({"n": 1.5, "s": "x", "ok": false})).to_sql();
        assert_eq!(
            sql,
            "jsonb_build_object(?::text, ?::double precision, ?::text, ?::boolean, ?::text, ?::text)"
        );
        assert_eq!(sql.matches("?::").count(), params.len());
        assert_eq!(sql.matches('?').count(), params.len());
    }

    #[test]
    fn typed_null_scalar_keeps_its_cast() {
        let (sql, params) = Jsonb::build_array([Jsonb::scalar(None::<i32>)]).to_sql();
        assert_eq!(sql, "jsonb_build_array(?::integer)");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn set_on_array_is_noop() {
        let (sql, _) = Jsonb::array().set("k", Jsonb::null()).to_sql();
        assert_eq!(sql, "jsonb_build_array()");
    }
}
