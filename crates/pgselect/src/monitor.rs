//! SQL debug logging via `tracing`.
//!
//! Enabled by the `tracing` crate feature (on by default). Events go to the
//! `pgselect.sql` target at DEBUG level, before the query is sent.

/// Longest SQL text (in bytes) written to a log event.
pub const MAX_LOGGED_SQL: usize = 200;

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg(feature = "tracing")]
pub(crate) fn trace_sql(kind: &str, sql: &str, param_count: usize) {
    let shown = truncate_sql_bytes(sql, MAX_LOGGED_SQL);
    let truncated = shown.len() < sql.len();
    tracing::debug!(
        target: "pgselect.sql",
        kind,
        param_count,
        truncated,
        sql = %shown,
        "executing statement"
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn trace_sql(_kind: &str, _sql: &str, _param_count: usize) {}
