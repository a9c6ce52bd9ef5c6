use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded unit of work attributed to a contributor.
///
/// Immutable once recorded. The `kind` field is a free-form category string
/// ("bug-fix", "feature", "documentation", ...); any string is accepted and
/// treated as its own bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub repository: String,
    pub kind: String,
    pub description: String,
    pub pull_request: Option<u32>,
    pub timestamp: DateTime<Utc>,
}

impl Contribution {
    #[must_use]
    pub const fn new(
        repository: String,
        kind: String,
        description: String,
        pull_request: Option<u32>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            repository,
            kind,
            description,
            pull_request,
            timestamp,
        }
    }

    #[must_use]
    pub const fn has_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}
