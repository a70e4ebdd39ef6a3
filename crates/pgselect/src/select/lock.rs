//! Row-level locking clauses (`FOR UPDATE` and friends).

/// Lock strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockStrength {
    ForUpdate,
    ForNoKeyUpdate,
    ForShare,
    ForKeyShare,
}

impl LockStrength {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LockStrength::ForUpdate => "FOR UPDATE",
            LockStrength::ForNoKeyUpdate => "FOR NO KEY UPDATE",
            LockStrength::ForShare => "FOR SHARE",
            LockStrength::ForKeyShare => "FOR KEY SHARE",
        }
    }
}

/// What the database does when a row lock cannot be acquired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LockWait {
    /// Block until the lock is available.
    #[default]
    Wait,
    NoWait,
    SkipLocked,
}

/// A locking clause appended to a SELECT.
///
/// A clause without a strength (e.g. `LockClause::default()`) renders nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockClause {
    pub strength: Option<LockStrength>,
    pub tables: Vec<String>,
    pub wait: LockWait,
}

impl LockClause {
    pub fn new(strength: LockStrength) -> Self {
        Self {
            strength: Some(strength),
            tables: Vec::new(),
            wait: LockWait::Wait,
        }
    }

    /// Restrict the lock to the given tables. Repeated calls append.
    pub fn of_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables.extend(tables.into_iter().map(Into::into));
        self
    }

    /// Fail instead of waiting for locked rows.
    pub fn no_wait(mut self) -> Self {
        self.wait = LockWait::NoWait;
        self
    }

    /// Skip rows that are already locked.
    pub fn skip_locked(mut self) -> Self {
        self.wait = LockWait::SkipLocked;
        self
    }

    /// Render the clause, or `None` when it has no strength.
    pub fn to_sql(&self) -> Option<String> {
        let strength = self.strength?;
        let mut sql = strength.as_str().to_string();
        if !self.tables.is_empty() {
            sql.push_str(" OF ");
            sql.push_str(&self.tables.join(", "));
        }
        match self.wait {
            LockWait::Wait => {}
            LockWait::NoWait => sql.push_str(" NOWAIT"),
            LockWait::SkipLocked => sql.push_str(" SKIP LOCKED"),
        }
        Some(sql)
    }
}

pub fn for_update() -> LockClause {
    LockClause::new(LockStrength::ForUpdate)
}

pub fn for_no_key_update() -> LockClause {
    LockClause::new(LockStrength::ForNoKeyUpdate)
}

pub fn for_share() -> LockClause {
    LockClause::new(LockStrength::ForShare)
}

pub fn for_key_share() -> LockClause {
    LockClause::new(LockStrength::ForKeyShare)
}
