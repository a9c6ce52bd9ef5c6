use super::{COMPLETION_THRESHOLD, Contribution};
use chrono::{DateTime, Utc};
use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// A tracked participant in the contribution drive.
///
/// The `handle` is the unique, case-sensitive join key everywhere in the
/// engine; it is never normalized. The contribution list is kept in arrival
/// order, which is not guaranteed to be timestamp order if a caller backdates
/// an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub display_name: String,
    pub handle: String,
    pub email: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub contributions: Vec<Contribution>,
}

impl Contributor {
    #[must_use]
    pub const fn new(display_name: String, handle: String, email: Option<String>, joined_at: DateTime<Utc>) -> Self {
        Self {
            display_name,
            handle,
            email,
            joined_at,
            contributions: Vec::new(),
        }
    }

    #[must_use]
    pub const fn contribution_count(&self) -> usize {
        self.contributions.len()
    }

    /// Whether this contributor has reached the drive's completion threshold.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.contribution_count() >= COMPLETION_THRESHOLD
    }

    #[must_use]
    pub fn has_email(&self) -> bool {
        self.email.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Iterate over contributions of one category.
    pub fn contributions_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Contribution> {
        self.contributions.iter().filter(move |c| c.kind == kind)
    }
}

impl Display for Contributor {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.is_complete() {
            write!(f, "{} (@{}) - complete", self.display_name, self.handle)
        } else {
            write!(
                f,
                "{} (@{}) - {}/{}",
                self.display_name,
                self.handle,
                self.contribution_count(),
                COMPLETION_THRESHOLD
            )
        }
    }
}
