//! JSON persistence for the contributor roster.

use crate::Result;
use crate::model::{Contribution, Contributor};
use camino::Utf8Path;
use chrono::{DateTime, Utc};
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::fs;

/// The persisted state of one contribution drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub project_name: String,
    pub created_at: DateTime<Utc>,
    pub contributors: Vec<Contributor>,
}

impl Roster {
    #[must_use]
    pub const fn new(project_name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            project_name,
            created_at,
            contributors: Vec::new(),
        }
    }

    #[must_use]
    pub fn contributor(&self, handle: &str) -> Option<&Contributor> {
        self.contributors.iter().find(|c| c.handle == handle)
    }

    /// Register a new contributor. Handles are the primary key, so a
    /// duplicate is rejected.
    pub fn add_contributor(&mut self, contributor: Contributor) -> Result<()> {
        if self.contributor(&contributor.handle).is_some() {
            bail!("contributor '{}' is already registered", contributor.handle);
        }

        self.contributors.push(contributor);
        Ok(())
    }

    /// Append a contribution to an existing contributor's record.
    pub fn record_contribution(&mut self, handle: &str, contribution: Contribution) -> Result<()> {
        let Some(contributor) = self.contributors.iter_mut().find(|c| c.handle == handle) else {
            bail!("no contributor registered with handle '{handle}'");
        };

        contributor.contributions.push(contribution);
        Ok(())
    }
}

/// Load a roster from disk.
pub fn load_roster(path: &Utf8Path) -> Result<Roster> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("unable to read roster file '{path}'"))?;
    serde_json::from_str(&text).into_app_err_with(|| format!("unable to parse roster file '{path}'"))
}

/// Load a roster, or start a fresh one when the file does not exist yet.
pub fn load_or_create(path: &Utf8Path, project_name: &str, now: DateTime<Utc>) -> Result<Roster> {
    if path.exists() {
        load_roster(path)
    } else {
        Ok(Roster::new(project_name.to_string(), now))
    }
}

/// Write a roster to disk as pretty-printed JSON. Contributors are sorted
/// by handle first so saved files diff cleanly.
pub fn save_roster(roster: &Roster, path: &Utf8Path) -> Result<()> {
    let mut ordered = roster.clone();
    ordered.contributors.sort_by(|a, b| a.handle.cmp(&b.handle));

    let text = serde_json::to_string_pretty(&ordered).into_app_err("unable to serialize roster")?;
    fs::write(path, text).into_app_err_with(|| format!("unable to write roster file '{path}'"))
}
