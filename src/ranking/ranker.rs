use crate::metrics::{EngagementScore, engagement_score};
use crate::model::Contributor;
use chrono::{DateTime, Utc};
use core::cmp::Ordering;
use serde::Serialize;

/// One row of the engagement leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct RankedContributor {
    /// 1-based position.
    pub rank: usize,
    pub display_name: String,
    pub handle: String,
    pub score: EngagementScore,
    pub total_contributions: usize,
    pub complete: bool,
}

/// Rank contributors by engagement score descending, breaking ties by
/// contribution count descending and then handle ascending, so repeated
/// calls over the same snapshot always produce the same order.
#[must_use]
pub fn rank_contributors(collection: &[Contributor], now: DateTime<Utc>) -> Vec<RankedContributor> {
    let mut rows: Vec<RankedContributor> = collection
        .iter()
        .map(|contributor| RankedContributor {
            rank: 0,
            display_name: contributor.display_name.clone(),
            handle: contributor.handle.clone(),
            score: engagement_score(contributor, now),
            total_contributions: contributor.contribution_count(),
            complete: contributor.is_complete(),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.score
            .total
            .partial_cmp(&a.score.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.total_contributions.cmp(&a.total_contributions))
            .then_with(|| a.handle.cmp(&b.handle))
    });

    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index + 1;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Contribution;
    use chrono::TimeZone;

    fn at(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, d, 12, 0, 0).unwrap()
    }

    fn contributor(handle: &str, days: &[u32]) -> Contributor {
        let mut c = Contributor::new(handle.to_uppercase(), handle.into(), None, at(1));
        for &d in days {
            c.contributions.push(Contribution::new(
                "tracker".into(),
                "bug-fix".into(),
                "change".into(),
                None,
                at(d),
            ));
        }
        c
    }

    #[test]
    fn ranks_are_one_based_and_ordered_by_score() {
        let roster = vec![contributor("quiet", &[]), contributor("busy", &[2, 3, 4, 5])];
        let ranked = rank_contributors(&roster, at(6));
        assert_eq!(ranked[0].handle, "busy");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].handle, "quiet");
        assert_eq!(ranked[1].rank, 2);
        assert!(ranked[0].score.total > ranked[1].score.total);
    }

    #[test]
    fn identical_scores_tie_break_by_handle_deterministically() {
        // Identical joins, identical contribution patterns: identical scores.
        let roster = vec![contributor("zed", &[2, 3]), contributor("amy", &[2, 3])];

        let first = rank_contributors(&roster, at(5));
        assert_eq!(first[0].score.total, first[1].score.total);
        assert_eq!(first[0].handle, "amy");

        for _ in 0..5 {
            let again = rank_contributors(&roster, at(5));
            let handles: Vec<_> = again.iter().map(|r| r.handle.as_str()).collect();
            assert_eq!(handles, ["amy", "zed"]);
        }
    }

    #[test]
    fn count_outranks_handle_in_tie_breaks() {
        // Different counts can still produce equal scores when both clamp at
        // the 4-contribution cap with variety/tenure/recency equal too.
        let mut bigger = contributor("zed", &[2, 3, 4, 5, 6]);
        bigger.contributions.push(Contribution::new(
            "tracker".into(),
            "bug-fix".into(),
            "one more".into(),
            None,
            at(6),
        ));
        let roster = vec![contributor("amy", &[2, 3, 4, 5, 6]), bigger];

        let ranked = rank_contributors(&roster, at(6));
        assert_eq!(ranked[0].handle, "zed");
        assert_eq!(ranked[0].total_contributions, 6);
    }
}
