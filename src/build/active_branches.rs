use std::fmt;

/// Separator used in the `ACTIVE_BRANCHES` variable.
pub const ACTIVE_BRANCHES_DELIMITER: &str = "___";

/// Branch allow-list.
///
/// An empty list means "no filtering": every branch is allowed.
/// Matching is exact and case-sensitive, against the full branch reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveBranches(Vec<String>);

impl ActiveBranches {
    pub fn new<I, T>(branches: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self(branches.into_iter().map(Into::into).collect())
    }

    /// Parse a `___`-joined list. An empty string yields an empty list.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() {
            return Self::default();
        }

        Self::new(value.split(ACTIVE_BRANCHES_DELIMITER))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn allows(&self, branch: &str) -> bool {
        self.is_empty() || self.0.iter().any(|b| b == branch)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ActiveBranches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}
