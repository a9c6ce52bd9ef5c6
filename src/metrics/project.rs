use crate::model::Contributor;
use serde::Serialize;
use std::collections::BTreeMap;

/// Fixed contribution-count ranges used for the distribution report.
pub const DISTRIBUTION_BUCKETS: &[(&str, usize, usize)] = &[
    ("0-1", 0, 1),
    ("2-3", 2, 3),
    ("4-5", 4, 5),
    ("6-10", 6, 10),
    ("11-20", 11, 20),
    ("21+", 21, usize::MAX),
];

const TOP_LIST_LIMIT: usize = 10;

/// Project-wide aggregates over a whole collection. Every field has a
/// well-defined value for an empty collection; none of these computations
/// can fail.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectMetrics {
    pub total_contributors: usize,
    pub total_contributions: usize,
    pub mean_contributions: f64,
    pub median_contributions: f64,
    /// Sample standard deviation of per-contributor counts; zero when the
    /// collection has at most one contributor.
    pub stdev_contributions: f64,
    pub min_contributions: usize,
    pub max_contributions: usize,
    pub completed_contributors: usize,
    /// Percentage of contributors at or past the completion threshold.
    pub completion_rate: f64,
    /// Bucket label to contributor count, in bucket order.
    pub distribution: Vec<(String, usize)>,
    /// Aggregate count per repository, descending, ties lexicographic.
    pub top_repositories: Vec<(String, u64)>,
    /// Aggregate count per contribution kind, descending, ties lexicographic.
    pub top_kinds: Vec<(String, u64)>,
    /// Most prolific contributors by raw count, descending, capped at ten.
    pub top_contributors: Vec<TopContributor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopContributor {
    pub display_name: String,
    pub handle: String,
    pub contributions: usize,
}

/// Compute all project-wide aggregates in one pass over the collection.
#[must_use]
pub fn project_metrics(collection: &[Contributor]) -> ProjectMetrics {
    if collection.is_empty() {
        return ProjectMetrics::default();
    }

    let counts: Vec<usize> = collection.iter().map(Contributor::contribution_count).collect();
    let total_contributions: usize = counts.iter().sum();
    let completed = collection.iter().filter(|c| c.is_complete()).count();

    let mut repositories: BTreeMap<String, u64> = BTreeMap::new();
    let mut kinds: BTreeMap<String, u64> = BTreeMap::new();
    for contributor in collection {
        for contribution in &contributor.contributions {
            *repositories.entry(contribution.repository.clone()).or_default() += 1;
            *kinds.entry(contribution.kind.clone()).or_default() += 1;
        }
    }

    #[expect(clippy::cast_precision_loss, reason = "collection sizes are far below 2^52")]
    let n = collection.len() as f64;
    #[expect(clippy::cast_precision_loss, reason = "collection sizes are far below 2^52")]
    let completion_rate = completed as f64 / n * 100.0;

    ProjectMetrics {
        total_contributors: collection.len(),
        total_contributions,
        mean_contributions: mean(&counts),
        median_contributions: median(&counts),
        stdev_contributions: sample_stdev(&counts),
        min_contributions: counts.iter().copied().min().unwrap_or_default(),
        max_contributions: counts.iter().copied().max().unwrap_or_default(),
        completed_contributors: completed,
        completion_rate,
        distribution: distribution(&counts),
        top_repositories: ranked_counts(repositories),
        top_kinds: ranked_counts(kinds),
        top_contributors: top_contributors(collection),
    }
}

fn mean(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    #[expect(clippy::cast_precision_loss, reason = "collection sizes are far below 2^52")]
    let total = counts.iter().sum::<usize>() as f64;
    #[expect(clippy::cast_precision_loss, reason = "collection sizes are far below 2^52")]
    let n = counts.len() as f64;
    total / n
}

fn median(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }

    let mut sorted = counts.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    #[expect(clippy::cast_precision_loss, reason = "collection sizes are far below 2^52")]
    let value = if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    };
    value
}

/// Sample standard deviation (n - 1 denominator); zero when n <= 1.
fn sample_stdev(counts: &[usize]) -> f64 {
    if counts.len() <= 1 {
        return 0.0;
    }

    let avg = mean(counts);
    #[expect(clippy::cast_precision_loss, reason = "collection sizes are far below 2^52")]
    let variance = counts
        .iter()
        .map(|&c| {
            let delta = c as f64 - avg;
            delta * delta
        })
        .sum::<f64>()
        / (counts.len() - 1) as f64;

    variance.sqrt()
}

fn distribution(counts: &[usize]) -> Vec<(String, usize)> {
    DISTRIBUTION_BUCKETS
        .iter()
        .map(|&(label, low, high)| {
            let bucket = counts.iter().filter(|&&c| c >= low && c <= high).count();
            (label.to_string(), bucket)
        })
        .collect()
}

/// Order aggregate counts descending, ties broken lexicographically by name.
fn ranked_counts(counts: BTreeMap<String, u64>) -> Vec<(String, u64)> {
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

fn top_contributors(collection: &[Contributor]) -> Vec<TopContributor> {
    let mut sorted: Vec<&Contributor> = collection.iter().collect();
    sorted.sort_by(|a, b| {
        b.contribution_count()
            .cmp(&a.contribution_count())
            .then_with(|| a.handle.cmp(&b.handle))
    });

    sorted
        .into_iter()
        .take(TOP_LIST_LIMIT)
        .map(|c| TopContributor {
            display_name: c.display_name.clone(),
            handle: c.handle.clone(),
            contributions: c.contribution_count(),
        })
        .collect()
}
