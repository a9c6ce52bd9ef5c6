use crate::Result;
use crate::model::{Contribution, Contributor};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use log::debug;
use ohno::IntoAppError;

/// Conjunction of optional contributor-level criteria.
///
/// Absent criteria are no-ops; every present criterion narrows the result.
/// Both join-date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorFilter {
    pub min_contributions: Option<usize>,
    pub max_contributions: Option<usize>,
    pub completed: Option<bool>,
    pub has_email: Option<bool>,
    pub joined_after: Option<DateTime<Utc>>,
    pub joined_before: Option<DateTime<Utc>>,
    pub contribution_kind: Option<String>,
}

impl ContributorFilter {
    #[must_use]
    pub fn matches(&self, contributor: &Contributor) -> bool {
        if let Some(min) = self.min_contributions
            && contributor.contribution_count() < min
        {
            return false;
        }

        if let Some(max) = self.max_contributions
            && contributor.contribution_count() > max
        {
            return false;
        }

        if let Some(completed) = self.completed
            && contributor.is_complete() != completed
        {
            return false;
        }

        if let Some(has_email) = self.has_email
            && contributor.has_email() != has_email
        {
            return false;
        }

        if let Some(after) = self.joined_after
            && contributor.joined_at < after
        {
            return false;
        }

        if let Some(before) = self.joined_before
            && contributor.joined_at > before
        {
            return false;
        }

        if let Some(kind) = &self.contribution_kind
            && !contributor.contributions.iter().any(|c| &c.kind == kind)
        {
            return false;
        }

        true
    }

    /// Build a filter from `key=value` pairs coming from open-ended external
    /// input. Unrecognized keys are ignored so callers with a richer
    /// vocabulary keep working; malformed values for recognized keys are
    /// reported as errors.
    ///
    /// # Errors
    ///
    /// Returns an error if a pair is missing `=` or a recognized key carries
    /// a value that cannot be parsed.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut filter = Self::default();

        for pair in pairs {
            let (key, value) = split_pair(pair)?;
            match key {
                "min_contributions" => filter.min_contributions = Some(parse_count(key, value)?),
                "max_contributions" => filter.max_contributions = Some(parse_count(key, value)?),
                "completed_only" => filter.completed = Some(parse_bool(key, value)?),
                "has_email" => filter.has_email = Some(parse_bool(key, value)?),
                "joined_after" => filter.joined_after = Some(parse_instant(key, value)?),
                "joined_before" => filter.joined_before = Some(parse_instant(key, value)?),
                "contribution_type" => filter.contribution_kind = Some(value.to_string()),
                _ => debug!("ignoring unknown contributor filter key '{key}'"),
            }
        }

        Ok(filter)
    }
}

/// Conjunction of optional contribution-level criteria. Timestamp bounds are
/// inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionFilter {
    pub kind: Option<String>,
    pub repository: Option<String>,
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
    pub has_pull_request: Option<bool>,
    pub handle: Option<String>,
}

impl ContributionFilter {
    /// `handle` is the owning contributor's handle for the contribution
    /// under test.
    #[must_use]
    pub fn matches(&self, handle: &str, contribution: &Contribution) -> bool {
        if let Some(wanted) = &self.handle
            && wanted != handle
        {
            return false;
        }

        if let Some(kind) = &self.kind
            && &contribution.kind != kind
        {
            return false;
        }

        if let Some(repository) = &self.repository
            && &contribution.repository != repository
        {
            return false;
        }

        if let Some(after) = self.after
            && contribution.timestamp < after
        {
            return false;
        }

        if let Some(before) = self.before
            && contribution.timestamp > before
        {
            return false;
        }

        if let Some(has_pr) = self.has_pull_request
            && contribution.has_pull_request() != has_pr
        {
            return false;
        }

        true
    }

    /// Build a filter from `key=value` pairs; same permissive-key policy as
    /// [`ContributorFilter::from_pairs`].
    ///
    /// # Errors
    ///
    /// Returns an error if a pair is missing `=` or a recognized key carries
    /// a value that cannot be parsed.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut filter = Self::default();

        for pair in pairs {
            let (key, value) = split_pair(pair)?;
            match key {
                "contribution_type" => filter.kind = Some(value.to_string()),
                "repository" => filter.repository = Some(value.to_string()),
                "after" => filter.after = Some(parse_instant(key, value)?),
                "before" => filter.before = Some(parse_instant(key, value)?),
                "has_pr" => filter.has_pull_request = Some(parse_bool(key, value)?),
                "contributor_handle" => filter.handle = Some(value.to_string()),
                _ => debug!("ignoring unknown contribution filter key '{key}'"),
            }
        }

        Ok(filter)
    }
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .ok_or_else(|| ohno::app_err!("filter '{pair}' is not of the form key=value"))
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .into_app_err_with(|| format!("invalid count for '{key}': '{value}'"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse::<bool>()
        .into_app_err_with(|| format!("invalid boolean for '{key}': '{value}'"))
}

/// Accept either a full RFC 3339 instant or a bare date, taken as midnight UTC.
fn parse_instant(key: &str, value: &str) -> Result<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    let date = value
        .parse::<NaiveDate>()
        .into_app_err_with(|| format!("invalid timestamp for '{key}': '{value}'"))?;
    Ok(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn contributor(handle: &str, count: usize, email: Option<&str>) -> Contributor {
        let mut c = Contributor::new(
            handle.to_uppercase(),
            handle.into(),
            email.map(Into::into),
            Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap(),
        );
        for i in 0..count {
            c.contributions.push(Contribution::new(
                "repo".into(),
                "bug-fix".into(),
                format!("change {i}"),
                None,
                Utc.with_ymd_and_hms(2025, 10, 2, 0, 0, 0).unwrap(),
            ));
        }
        c
    }

    #[test]
    fn default_filter_matches_everything() {
        let filter = ContributorFilter::default();
        assert!(filter.matches(&contributor("a", 0, None)));
        assert!(filter.matches(&contributor("b", 10, Some("b@x.io"))));
    }

    #[test]
    fn count_bounds_are_inclusive() {
        let filter = ContributorFilter {
            min_contributions: Some(2),
            max_contributions: Some(4),
            ..Default::default()
        };
        assert!(!filter.matches(&contributor("a", 1, None)));
        assert!(filter.matches(&contributor("b", 2, None)));
        assert!(filter.matches(&contributor("c", 4, None)));
        assert!(!filter.matches(&contributor("d", 5, None)));
    }

    #[test]
    fn completion_is_an_equality_check() {
        let incomplete_only = ContributorFilter {
            completed: Some(false),
            ..Default::default()
        };
        assert!(incomplete_only.matches(&contributor("a", 3, None)));
        assert!(!incomplete_only.matches(&contributor("b", 4, None)));
    }

    #[test]
    fn join_bounds_are_inclusive() {
        let joined = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        let filter = ContributorFilter {
            joined_after: Some(joined),
            joined_before: Some(joined),
            ..Default::default()
        };
        assert!(filter.matches(&contributor("a", 0, None)));
    }

    #[test]
    fn unknown_pair_keys_are_ignored() {
        let filter = ContributorFilter::from_pairs(["min_contributions=2", "favorite_color=teal"]).unwrap();
        assert_eq!(filter.min_contributions, Some(2));
        assert_eq!(filter, ContributorFilter {
            min_contributions: Some(2),
            ..Default::default()
        });
    }

    #[test]
    fn boolean_and_count_pairs_parse_into_typed_fields() {
        let filter =
            ContributorFilter::from_pairs(["completed_only=true", "has_email=false", "max_contributions=7"])
                .unwrap();
        assert_eq!(filter.completed, Some(true));
        assert_eq!(filter.has_email, Some(false));
        assert_eq!(filter.max_contributions, Some(7));
    }

    #[test]
    fn malformed_values_for_known_keys_fail() {
        assert!(ContributorFilter::from_pairs(["min_contributions=lots"]).is_err());
        assert!(ContributorFilter::from_pairs(["has_email"]).is_err());
        assert!(ContributionFilter::from_pairs(["after=not-a-date"]).is_err());
    }

    #[test]
    fn pair_dates_accept_bare_days() {
        let filter = ContributorFilter::from_pairs(["joined_after=2025-10-01"]).unwrap();
        assert_eq!(
            filter.joined_after,
            Some(Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn contribution_filter_checks_owner_and_pr() {
        let filter = ContributionFilter {
            has_pull_request: Some(true),
            handle: Some("alice1".into()),
            ..Default::default()
        };

        let with_pr = Contribution::new(
            "repo".into(),
            "feature".into(),
            "adds things".into(),
            Some(7),
            Utc::now(),
        );
        let without_pr = Contribution::new("repo".into(), "feature".into(), "docs".into(), None, Utc::now());

        assert!(filter.matches("alice1", &with_pr));
        assert!(!filter.matches("alice1", &without_pr));
        assert!(!filter.matches("bob", &with_pr));
    }
}
