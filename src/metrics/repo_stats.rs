use crate::model::Contributor;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use strum::{Display, EnumString};

/// Per-repository aggregates across the whole collection.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryStats {
    pub repository: String,
    pub total_contributions: usize,
    pub unique_contributors: usize,
    pub average_per_contributor: f64,
    pub by_kind: BTreeMap<String, u64>,
    pub pull_requests: usize,
    pub pull_request_percentage: f64,
    pub first_contribution: Option<NaiveDate>,
    pub last_contribution: Option<NaiveDate>,
    /// Distinct calendar days with at least one contribution.
    pub active_days: usize,
    /// Whole days from first to last contribution, inclusive.
    pub span_days: u64,
    /// 0-100 composite of volume, contributor diversity, PR share, and
    /// consistency bands.
    pub activity_score: u32,
    pub health: HealthStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum HealthStatus {
    Healthy,
    Moderate,
    NeedsAttention,
}

/// Sort criterion for [`top_repositories`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum RepoSortBy {
    #[default]
    Contributions,
    Contributors,
    ActivityScore,
    PullRequests,
}

/// A repository with unusual recent activity.
#[derive(Debug, Clone, Serialize)]
pub struct TrendingRepository {
    pub repository: String,
    pub recent_contributions: usize,
    pub recent_contributors: usize,
    /// Recent contributions plus recent distinct contributors.
    pub trend_score: usize,
    pub last_activity: DateTime<Utc>,
}

/// Compute stats for one repository. Returns `None` when the collection has
/// no contribution to that repository at all.
#[must_use]
pub fn repository_stats(collection: &[Contributor], repository: &str) -> Option<RepositoryStats> {
    let mut total = 0;
    let mut contributors: BTreeSet<&str> = BTreeSet::new();
    let mut by_kind: BTreeMap<String, u64> = BTreeMap::new();
    let mut pull_requests = 0;
    let mut dates: Vec<NaiveDate> = Vec::new();

    for contributor in collection {
        for contribution in &contributor.contributions {
            if contribution.repository != repository {
                continue;
            }
            total += 1;
            let _ = contributors.insert(&contributor.handle);
            *by_kind.entry(contribution.kind.clone()).or_default() += 1;
            if contribution.has_pull_request() {
                pull_requests += 1;
            }
            dates.push(contribution.timestamp.date_naive());
        }
    }

    if total == 0 {
        return None;
    }

    dates.sort_unstable();
    let first = dates.first().copied();
    let last = dates.last().copied();
    let active_days = dates.iter().collect::<BTreeSet<_>>().len();
    let span_days = match (first, last) {
        (Some(f), Some(l)) => u64::try_from((l - f).num_days() + 1).unwrap_or_default(),
        _ => 0,
    };

    #[expect(clippy::cast_precision_loss, reason = "contribution counts are far below 2^52")]
    let average_per_contributor = total as f64 / contributors.len().max(1) as f64;
    #[expect(clippy::cast_precision_loss, reason = "contribution counts are far below 2^52")]
    let pull_request_percentage = pull_requests as f64 / total as f64 * 100.0;

    let activity_score = activity_score(total, contributors.len(), pull_request_percentage, active_days, span_days);

    Some(RepositoryStats {
        repository: repository.to_string(),
        total_contributions: total,
        unique_contributors: contributors.len(),
        average_per_contributor,
        by_kind,
        pull_requests,
        pull_request_percentage,
        first_contribution: first,
        last_contribution: last,
        active_days,
        span_days,
        activity_score,
        health: health_status(activity_score),
    })
}

/// Stats for every repository appearing in the collection, keyed by name.
#[must_use]
pub fn all_repository_stats(collection: &[Contributor]) -> BTreeMap<String, RepositoryStats> {
    let repositories: BTreeSet<&str> = collection
        .iter()
        .flat_map(|c| c.contributions.iter().map(|contribution| contribution.repository.as_str()))
        .collect();

    repositories
        .into_iter()
        .filter_map(|repo| repository_stats(collection, repo).map(|stats| (repo.to_string(), stats)))
        .collect()
}

/// The `limit` most notable repositories under a sort criterion, ties broken
/// by repository name ascending.
#[must_use]
pub fn top_repositories(collection: &[Contributor], limit: usize, sort_by: RepoSortBy) -> Vec<RepositoryStats> {
    let mut stats: Vec<RepositoryStats> = all_repository_stats(collection).into_values().collect();

    stats.sort_by(|a, b| {
        let ordering = match sort_by {
            RepoSortBy::Contributions => b.total_contributions.cmp(&a.total_contributions),
            RepoSortBy::Contributors => b.unique_contributors.cmp(&a.unique_contributors),
            RepoSortBy::ActivityScore => b.activity_score.cmp(&a.activity_score),
            RepoSortBy::PullRequests => b.pull_requests.cmp(&a.pull_requests),
        };
        ordering.then_with(|| a.repository.cmp(&b.repository))
    });

    stats.truncate(limit);
    stats
}

/// Repositories with activity inside the trailing window, scored by recent
/// contributions plus recent distinct contributors.
#[must_use]
pub fn trending_repositories(
    collection: &[Contributor],
    now: DateTime<Utc>,
    window_days: u32,
    limit: usize,
) -> Vec<TrendingRepository> {
    let cutoff = now - Duration::days(i64::from(window_days));

    let mut recent: BTreeMap<&str, (usize, BTreeSet<&str>, DateTime<Utc>)> = BTreeMap::new();
    for contributor in collection {
        for contribution in &contributor.contributions {
            if contribution.timestamp < cutoff {
                continue;
            }
            let entry = recent
                .entry(contribution.repository.as_str())
                .or_insert((0, BTreeSet::new(), contribution.timestamp));
            entry.0 += 1;
            let _ = entry.1.insert(&contributor.handle);
            entry.2 = entry.2.max(contribution.timestamp);
        }
    }

    let mut trending: Vec<TrendingRepository> = recent
        .into_iter()
        .map(|(repository, (contributions, handles, last_activity))| TrendingRepository {
            repository: repository.to_string(),
            recent_contributions: contributions,
            recent_contributors: handles.len(),
            trend_score: contributions + handles.len(),
            last_activity,
        })
        .collect();

    trending.sort_by(|a, b| b.trend_score.cmp(&a.trend_score).then_with(|| a.repository.cmp(&b.repository)));
    trending.truncate(limit);
    trending
}

/// Band-based 0-100 activity score, 25 points per axis.
fn activity_score(total: usize, contributors: usize, pr_percentage: f64, active_days: usize, span_days: u64) -> u32 {
    let volume = match total {
        50.. => 25,
        20..=49 => 15,
        5..=19 => 10,
        _ => 0,
    };
    let diversity = match contributors {
        10.. => 25,
        5..=9 => 15,
        2..=4 => 10,
        _ => 0,
    };
    let pr_share = if pr_percentage >= 50.0 {
        25
    } else if pr_percentage >= 30.0 {
        15
    } else if pr_percentage >= 10.0 {
        10
    } else {
        0
    };

    // Consistency: fraction of the active span that saw contributions.
    #[expect(clippy::cast_precision_loss, reason = "day counts are far below 2^52")]
    let coverage = if span_days == 0 {
        0.0
    } else {
        active_days as f64 / span_days as f64
    };
    let consistency = if coverage >= 0.75 {
        25
    } else if coverage >= 0.5 {
        15
    } else if coverage >= 0.25 {
        10
    } else {
        0
    };

    volume + diversity + pr_share + consistency
}

const fn health_status(score: u32) -> HealthStatus {
    match score {
        80.. => HealthStatus::Healthy,
        50..=79 => HealthStatus::Moderate,
        _ => HealthStatus::NeedsAttention,
    }
}
