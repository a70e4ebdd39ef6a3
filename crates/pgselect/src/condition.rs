//! Structured conditions for WHERE, HAVING and JOIN ... ON clauses.
//!
//! Conditions render with generic `?` placeholders; statements rewrite them to
//! the driver's native syntax at the very end (see [`crate::PlaceholderStyle`]).
//!
//! # Example
//! ```ignore
//! use pgselect::{Condition, indirect};
//!
//! let conds = [
//!     Condition::eq("active", true),
//!     Condition::or([Condition::gt("age", 18i32), Condition::is_null("age")]),
//! ];
//! // active = ? AND (age > ? OR age IS NULL)
//!
//! // Join-style comparison between two columns, no binding:
//! Condition::eq("orders.user_id", indirect("users.id"));
//! ```

use crate::jsonb::Jsonb;
use crate::param::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// Marker for an operand that references another column instead of a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Indirect(pub String);

/// Reference another column as the right-hand side of a comparison.
pub fn indirect(column: impl Into<String>) -> Indirect {
    Indirect(column.into())
}

/// Right-hand side of a comparison.
#[derive(Clone, Debug)]
pub enum Operand {
    /// A literal, rendered as `?`.
    Bind(Param),
    /// A column reference, rendered verbatim.
    Indirect(String),
    /// A nested JSONB construction expression.
    Jsonb(Jsonb),
}

impl<T: ToSql + Send + Sync + 'static> From<T> for Operand {
    fn from(value: T) -> Self {
        Operand::Bind(Param::new(value))
    }
}

impl From<Indirect> for Operand {
    fn from(value: Indirect) -> Self {
        Operand::Indirect(value.0)
    }
}

impl From<Jsonb> for Operand {
    fn from(value: Jsonb) -> Self {
        Operand::Jsonb(value)
    }
}

impl From<Param> for Operand {
    fn from(value: Param) -> Self {
        Operand::Bind(value)
    }
}

impl Operand {
    fn build(&self, params: &mut ParamList) -> String {
        match self {
            Operand::Bind(value) => {
                params.push_param(value.clone());
                "?".to_string()
            }
            Operand::Indirect(column) => column.clone(),
            Operand::Jsonb(expr) => expr.build(params),
        }
    }
}

/// A single predicate or a group of predicates.
#[derive(Clone, Debug)]
pub enum Condition {
    /// `column op operand`
    Compare {
        column: String,
        op: &'static str,
        operand: Operand,
    },

    /// `column IS [NOT] NULL`
    NullCheck { column: String, is_null: bool },

    /// `column [NOT] IN (?, ?, ...)`
    InList {
        column: String,
        values: Vec<Param>,
        negated: bool,
    },

    /// `column [NOT] BETWEEN ? AND ?`
    Between {
        column: String,
        from: Param,
        to: Param,
        negated: bool,
    },

    /// All conditions must hold.
    And(Vec<Condition>),

    /// At least one condition must hold.
    Or(Vec<Condition>),

    /// `NOT (inner)`
    Not(Box<Condition>),

    /// Raw SQL with `?` placeholders, bound in order.
    Template { sql: String, params: Vec<Param> },
}

macro_rules! compare_ctor {
    ($($(#[$doc:meta])* $name:ident => $op:literal;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(column: impl Into<String>, operand: impl Into<Operand>) -> Self {
                Condition::Compare {
                    column: column.into(),
                    op: $op,
                    operand: operand.into(),
                }
            }
        )*
    };
}

impl Condition {
    compare_ctor! {
        /// `column = operand`
        eq => "=";
        /// `column <> operand`
        ne => "<>";
        /// `column > operand`
        gt => ">";
        /// `column >= operand`
        gte => ">=";
        /// `column < operand`
        lt => "<";
        /// `column <= operand`
        lte => "<=";
        /// `column LIKE operand`
        like => "LIKE";
        /// `column NOT LIKE operand`
        not_like => "NOT LIKE";
        /// `column ILIKE operand`
        ilike => "ILIKE";
        /// `column NOT ILIKE operand`
        not_ilike => "NOT ILIKE";
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Condition::NullCheck {
            column: column.into(),
            is_null: true,
        }
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Condition::NullCheck {
            column: column.into(),
            is_null: false,
        }
    }

    /// `column IN (...)`. An empty list renders as `1=0`.
    pub fn in_list<T, I>(column: impl Into<String>, values: I) -> Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        Condition::InList {
            column: column.into(),
            values: values.into_iter().map(Param::new).collect(),
            negated: false,
        }
    }

    /// `column NOT IN (...)`. An empty list renders as `1=1`.
    pub fn not_in<T, I>(column: impl Into<String>, values: I) -> Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        Condition::InList {
            column: column.into(),
            values: values.into_iter().map(Param::new).collect(),
            negated: true,
        }
    }

    pub fn between<T: ToSql + Send + Sync + 'static>(column: impl Into<String>, from: T, to: T) -> Self {
        Condition::Between {
            column: column.into(),
            from: Param::new(from),
            to: Param::new(to),
            negated: false,
        }
    }

    pub fn not_between<T: ToSql + Send + Sync + 'static>(
        column: impl Into<String>,
        from: T,
        to: T,
    ) -> Self {
        Condition::Between {
            column: column.into(),
            from: Param::new(from),
            to: Param::new(to),
            negated: true,
        }
    }

    pub fn and(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::And(conditions.into_iter().collect())
    }

    pub fn or(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Or(conditions.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// Raw SQL fragment with `?` placeholders.
    ///
    /// The fragment is emitted verbatim; `params` must match its placeholders.
    pub fn sql(sql: impl Into<String>, params: Vec<Param>) -> Self {
        Condition::Template {
            sql: sql.into(),
            params,
        }
    }

    /// Whether this condition renders to nothing (an empty group).
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::And(conds) | Condition::Or(conds) => conds.iter().all(Condition::is_empty),
            Condition::Not(inner) => inner.is_empty(),
            _ => false,
        }
    }

    /// Render into `params`, returning the SQL fragment.
    pub fn build(&self, params: &mut ParamList) -> String {
        match self {
            Condition::Compare {
                column,
                op,
                operand,
            } => format!("{} {} {}", column, op, operand.build(params)),
            Condition::NullCheck { column, is_null } => {
                if *is_null {
                    format!("{} IS NULL", column)
                } else {
                    format!("{} IS NOT NULL", column)
                }
            }
            Condition::InList {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    return if *negated { "1=1" } else { "1=0" }.to_string();
                }
                for value in values {
                    params.push_param(value.clone());
                }
                let placeholders = vec!["?"; values.len()].join(", ");
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{} {} ({})", column, op, placeholders)
            }
            Condition::Between {
                column,
                from,
                to,
                negated,
            } => {
                params.push_param(from.clone());
                params.push_param(to.clone());
                let op = if *negated { "NOT BETWEEN" } else { "BETWEEN" };
                format!("{} {} ? AND ?", column, op)
            }
            Condition::And(conds) => join_group(conds, " AND ", params),
            Condition::Or(conds) => join_group(conds, " OR ", params),
            Condition::Not(inner) => {
                let sql = inner.build(params);
                if sql.is_empty() {
                    sql
                } else {
                    format!("NOT ({})", sql)
                }
            }
            Condition::Template {
                sql,
                params: template_params,
            } => {
                for value in template_params {
                    params.push_param(value.clone());
                }
                sql.clone()
            }
        }
    }
}

fn join_group(conds: &[Condition], separator: &str, params: &mut ParamList) -> String {
    let parts: Vec<String> = conds
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| {
            let sql = c.build(params);
            let needs_parens = match c {
                Condition::Or(_) => separator == " AND ",
                Condition::And(_) => separator == " OR ",
                _ => false,
            };
            if needs_parens {
                format!("({})", sql)
            } else {
                sql
            }
        })
        .collect();
    parts.join(separator)
}

/// Render a list of conditions as one AND-ed expression.
///
/// Bindings are returned in the order their placeholders appear.
pub fn parse_conditions(conditions: &[Condition]) -> (String, ParamList) {
    let mut params = ParamList::new();
    let sql = join_group(conditions, " AND ", &mut params);
    (sql, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debug_params(params: &ParamList) -> Vec<String> {
        params.iter().map(|p| format!("{:?}", p)).collect()
    }

    #[test]
    fn simple_comparisons_are_anded() {
        let (sql, params) = parse_conditions(&[
            Condition::eq("status", "active"),
            Condition::gte("age", 18i32),
            Condition::ne("role", "guest"),
        ]);
        assert_eq!(sql, "status = ? AND age >= ? AND role <> ?");
        assert_eq!(debug_params(&params), vec!["\"active\"", "18", "\"guest\""]);
    }

    #[test]
    fn indirect_operand_has_no_binding() {
        let (sql, params) = parse_conditions(&[Condition::eq("o.user_id", indirect("u.id"))]);
        assert_eq!(sql, "o.user_id = u.id");
        assert!(params.is_empty());
    }

    #[test]
    fn nested_groups_are_parenthesized() {
        let (sql, params) = parse_conditions(&[
            Condition::eq("status", "active"),
            Condition::or([
                Condition::eq("role", "admin"),
                Condition::and([Condition::eq("role", "user"), Condition::gt("reputation", 100i32)]),
            ]),
        ]);
        assert_eq!(
            sql,
            "status = ? AND (role = ? OR (role = ? AND reputation > ?))"
        );
        assert_eq!(
            debug_params(&params),
            vec!["\"active\"", "\"admin\"", "\"user\"", "100"]
        );
    }

    #[test]
    fn not_wraps_inner() {
        let (sql, _) = parse_conditions(&[Condition::not(Condition::like("name", "a%"))]);
        assert_eq!(sql, "NOT (name LIKE ?)");
    }

    #[test]
    fn in_list_binds_each_value() {
        let (sql, params) = parse_conditions(&[Condition::in_list("id", [1i64, 2, 3])]);
        assert_eq!(sql, "id IN (?, ?, ?)");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn empty_in_lists() {
        let empty: Vec<i64> = Vec::new();
        let (sql, params) = parse_conditions(&[
            Condition::in_list("id", empty.clone()),
            Condition::not_in("id", empty),
        ]);
        assert_eq!(sql, "1=0 AND 1=1");
        assert!(params.is_empty());
    }

    #[test]
    fn between_and_null_checks() {
        let (sql, params) = parse_conditions(&[
            Condition::between("age", 18i32, 65i32),
            Condition::is_not_null("email"),
            Condition::not_between("score", 0i32, 10i32),
            Condition::is_null("deleted_at"),
        ]);
        assert_eq!(
            sql,
            "age BETWEEN ? AND ? AND email IS NOT NULL AND score NOT BETWEEN ? AND ? AND deleted_at IS NULL"
        );
        assert_eq!(debug_params(&params), vec!["18", "65", "0", "10"]);
    }

    #[test]
    fn jsonb_operand_splices_bindings() {
        let (sql, params) = parse_conditions(&[
            Condition::eq("id", 7i64),
            Condition::eq("payload", Jsonb::object().set("k", Jsonb::scalar("v"))),
            Condition::eq("flag", false),
        ]);
        assert_eq!(
            sql,
            "id = ? AND payload = jsonb_build_object(?::text, ?::text) AND flag = ?"
        );
        assert_eq!(debug_params(&params), vec!["7", "\"k\"", "\"v\"", "false"]);
    }

    #[test]
    fn template_passes_through() {
        let (sql, params) = parse_conditions(&[Condition::sql(
            "tags @> ARRAY[?]::text[] OR owner = ?",
            vec![Param::new("x"), Param::new(1i64)],
        )]);
        assert_eq!(sql, "tags @> ARRAY[?]::text[] OR owner = ?");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn empty_groups_are_skipped() {
        let (sql, params) = parse_conditions(&[Condition::and([]), Condition::eq("a", 1i32)]);
        assert_eq!(sql, "a = ?");
        assert_eq!(params.len(), 1);
        assert!(Condition::or([]).is_empty());
    }

    #[test]
    fn placeholder_count_matches_bindings() {
        let (sql, params) = parse_conditions(&[
            Condition::in_list("a", ["x", "y"]),
            Condition::or([Condition::lt("b", 1i32), Condition::ilike("c", "%z%")]),
            Condition::eq("d", indirect("e")),
        ]);
        assert_eq!(sql.matches('?').count(), params.len());
    }
}
