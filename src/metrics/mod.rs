//! Derived statistics over a contributor collection.
//!
//! # Implementation Model
//!
//! Every function here is a pure computation over an immutable snapshot the
//! caller supplies; anything clock-dependent takes `now` as an explicit
//! argument so results are reproducible and trivially testable. Nothing is
//! cached between calls and nothing reaches back into the records after
//! returning.
//!
//! Four views are produced:
//! - per-contributor metrics and the 0-100 engagement score,
//! - project-wide aggregates (central tendency, completion, distributions),
//! - sparse daily/weekly/cumulative time series,
//! - per-repository activity and health.

mod contributor;
mod project;
mod repo_stats;
mod time_series;

pub use contributor::{ContributorMetrics, EngagementScore, contributor_metrics, engagement_score};
pub use project::{DISTRIBUTION_BUCKETS, ProjectMetrics, TopContributor, project_metrics};
pub use repo_stats::{
    HealthStatus, RepoSortBy, RepositoryStats, TrendingRepository, all_repository_stats, repository_stats,
    top_repositories, trending_repositories,
};
pub use time_series::{TimeSeries, time_series};
