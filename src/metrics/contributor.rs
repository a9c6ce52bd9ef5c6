use crate::model::Contributor;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

/// Derived statistics for a single contributor. Pure function of the record
/// and the injected `now`; nothing here reads the clock.
#[derive(Debug, Clone, Serialize)]
pub struct ContributorMetrics {
    pub handle: String,
    pub display_name: String,
    pub total_contributions: usize,
    /// Whole days since the contributor joined, clamped at zero to be safe
    /// against clock skew between the recording and computing hosts.
    pub days_active: u64,
    /// Longest run of consecutive calendar days with at least one
    /// contribution. Duplicate contributions on one day count once.
    pub contribution_streak: u64,
    /// Mean gap in days between consecutive distinct contribution dates;
    /// zero when fewer than two distinct dates exist.
    pub average_days_between_contributions: f64,
    pub by_kind: BTreeMap<String, u64>,
    pub by_repository: BTreeMap<String, u64>,
    /// Day of week with the most contributions; ties go to the earliest
    /// weekday starting from Monday. `None` without contributions.
    pub most_active_weekday: Option<Weekday>,
    pub complete: bool,
    pub engagement: EngagementScore,
}

/// Composite 0-100 engagement score. Each term is clamped independently
/// before summation, so the raw sum cannot exceed 100; callers must not
/// clamp again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EngagementScore {
    /// `min(total, 4) / 4 * 40`
    pub count_points: f64,
    /// `min(days_active, 31) / 31 * 30`
    pub tenure_points: f64,
    /// `min(distinct kinds, 5) / 5 * 20`
    pub variety_points: f64,
    /// `max(0, 10 - days_since_last / 7)`
    pub recency_points: f64,
    pub total: f64,
}

const COUNT_CAP: f64 = 4.0;
const COUNT_WEIGHT: f64 = 40.0;
const TENURE_CAP_DAYS: f64 = 31.0;
const TENURE_WEIGHT: f64 = 30.0;
const VARIETY_CAP: f64 = 5.0;
const VARIETY_WEIGHT: f64 = 20.0;
const RECENCY_WEIGHT: f64 = 10.0;
const RECENCY_DECAY_DAYS: f64 = 7.0;

/// Compute all per-contributor metrics in one pass.
#[must_use]
pub fn contributor_metrics(contributor: &Contributor, now: DateTime<Utc>) -> ContributorMetrics {
    let mut by_kind: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_repository: BTreeMap<String, u64> = BTreeMap::new();
    for contribution in &contributor.contributions {
        *by_kind.entry(contribution.kind.clone()).or_default() += 1;
        *by_repository.entry(contribution.repository.clone()).or_default() += 1;
    }

    let dates = distinct_dates(contributor);

    ContributorMetrics {
        handle: contributor.handle.clone(),
        display_name: contributor.display_name.clone(),
        total_contributions: contributor.contribution_count(),
        days_active: days_active(contributor, now),
        contribution_streak: longest_streak(&dates),
        average_days_between_contributions: average_gap(&dates),
        most_active_weekday: most_active_weekday(contributor),
        complete: contributor.is_complete(),
        engagement: engagement_score(contributor, now),
        by_kind,
        by_repository,
    }
}

/// Compute the composite engagement score. A contributor with no
/// contributions scores zero outright; tenure alone earns nothing.
#[must_use]
pub fn engagement_score(contributor: &Contributor, now: DateTime<Utc>) -> EngagementScore {
    if contributor.contributions.is_empty() {
        return EngagementScore::default();
    }

    #[expect(clippy::cast_precision_loss, reason = "contribution counts are far below 2^52")]
    let total = contributor.contribution_count() as f64;
    let count_points = (total / COUNT_CAP).min(1.0) * COUNT_WEIGHT;

    #[expect(clippy::cast_precision_loss, reason = "day counts are far below 2^52")]
    let active = days_active(contributor, now) as f64;
    let tenure_points = (active / TENURE_CAP_DAYS).min(1.0) * TENURE_WEIGHT;

    let distinct_kinds: std::collections::BTreeSet<&str> =
        contributor.contributions.iter().map(|c| c.kind.as_str()).collect();
    #[expect(clippy::cast_precision_loss, reason = "kind counts are far below 2^52")]
    let kinds = distinct_kinds.len() as f64;
    let variety_points = (kinds / VARIETY_CAP).min(1.0) * VARIETY_WEIGHT;

    let last = contributor
        .contributions
        .iter()
        .map(|c| c.timestamp)
        .max()
        .unwrap_or(now);
    #[expect(clippy::cast_precision_loss, reason = "day counts are far below 2^52")]
    let days_since_last = (now - last).num_days().max(0) as f64;
    let recency_points = (RECENCY_WEIGHT - days_since_last / RECENCY_DECAY_DAYS).clamp(0.0, RECENCY_WEIGHT);

    EngagementScore {
        count_points,
        tenure_points,
        variety_points,
        recency_points,
        total: count_points + tenure_points + variety_points + recency_points,
    }
}

fn days_active(contributor: &Contributor, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - contributor.joined_at).num_days().max(0)).unwrap_or_default()
}

/// Distinct contribution calendar dates, ascending.
fn distinct_dates(contributor: &Contributor) -> Vec<NaiveDate> {
    let set: std::collections::BTreeSet<NaiveDate> = contributor
        .contributions
        .iter()
        .map(|c| c.timestamp.date_naive())
        .collect();
    set.into_iter().collect()
}

fn longest_streak(dates: &[NaiveDate]) -> u64 {
    if dates.is_empty() {
        return 0;
    }

    let mut best = 1;
    let mut current = 1;
    for pair in dates.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            current += 1;
            best = best.max(current);
        } else {
            current = 1;
        }
    }
    best
}

fn average_gap(dates: &[NaiveDate]) -> f64 {
    if dates.len() < 2 {
        return 0.0;
    }

    let total: i64 = dates.windows(2).map(|pair| (pair[1] - pair[0]).num_days()).sum();
    #[expect(clippy::cast_precision_loss, reason = "day counts are far below 2^52")]
    let gaps = (dates.len() - 1) as f64;
    #[expect(clippy::cast_precision_loss, reason = "day counts are far below 2^52")]
    let days = total as f64;
    days / gaps
}

fn most_active_weekday(contributor: &Contributor) -> Option<Weekday> {
    if contributor.contributions.is_empty() {
        return None;
    }

    let mut counts = [0_u64; 7];
    for contribution in &contributor.contributions {
        counts[contribution.timestamp.weekday().num_days_from_monday() as usize] += 1;
    }

    let best = counts
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .map(|(index, _)| index)?;

    Weekday::try_from(u8::try_from(best).ok()?).ok()
}
