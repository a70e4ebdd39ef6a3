//! ORDER BY columns.

/// A column in an ORDER BY clause, with its direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderColumn {
    pub column: String,
    pub desc: bool,
}

impl OrderColumn {
    /// Render as `column ASC` or `column DESC`.
    pub fn to_sql(&self) -> String {
        if self.desc {
            format!("{} DESC", self.column)
        } else {
            format!("{} ASC", self.column)
        }
    }
}

/// Order by `column` ascending.
pub fn asc(column: impl Into<String>) -> OrderColumn {
    OrderColumn {
        column: column.into(),
        desc: false,
    }
}

/// Order by `column` descending.
pub fn desc(column: impl Into<String>) -> OrderColumn {
    OrderColumn {
        column: column.into(),
        desc: true,
    }
}
