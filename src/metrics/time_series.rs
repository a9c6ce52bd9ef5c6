use crate::model::Contributor;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Contribution counts bucketed by calendar time.
///
/// The representation is sparse: dates and weeks without contributions carry
/// no entry, since a drive's history can span an unbounded window and dense
/// gap-filling is a presentation concern. `cumulative` walks the daily keys
/// in order, so its last entry is the total contribution count.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimeSeries {
    pub daily: BTreeMap<NaiveDate, u64>,
    /// Keyed by ISO week, formatted `YYYY-Www` with the ISO week-based year.
    pub weekly: BTreeMap<String, u64>,
    pub cumulative: Vec<(NaiveDate, u64)>,
}

/// Bucket every contribution timestamp in the collection.
#[must_use]
pub fn time_series(collection: &[Contributor]) -> TimeSeries {
    let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut weekly: BTreeMap<String, u64> = BTreeMap::new();

    for contributor in collection {
        for contribution in &contributor.contributions {
            let date = contribution.timestamp.date_naive();
            *daily.entry(date).or_default() += 1;

            let week = date.iso_week();
            *weekly.entry(format!("{}-W{:02}", week.year(), week.week())).or_default() += 1;
        }
    }

    let mut running = 0;
    let cumulative = daily
        .iter()
        .map(|(&date, &count)| {
            running += count;
            (date, running)
        })
        .collect();

    TimeSeries { daily, weekly, cumulative }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Contribution;
    use chrono::{TimeZone, Utc};

    fn roster_with_dates(dates: &[(i32, u32, u32)]) -> Vec<Contributor> {
        let mut c = Contributor::new(
            "Alice".into(),
            "alice1".into(),
            None,
            Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap(),
        );
        for &(y, m, d) in dates {
            c.contributions.push(Contribution::new(
                "tracker".into(),
                "bug-fix".into(),
                "change".into(),
                None,
                Utc.with_ymd_and_hms(y, m, d, 15, 30, 0).unwrap(),
            ));
        }
        vec![c]
    }

    #[test]
    fn empty_collection_yields_empty_series() {
        let series = time_series(&[]);
        assert!(series.daily.is_empty());
        assert!(series.weekly.is_empty());
        assert!(series.cumulative.is_empty());
    }

    #[test]
    fn daily_counts_are_sparse() {
        let series = time_series(&roster_with_dates(&[(2025, 10, 1), (2025, 10, 1), (2025, 10, 5)]));
        assert_eq!(series.daily.len(), 2);
        let first = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let fifth = NaiveDate::from_ymd_opt(2025, 10, 5).unwrap();
        assert_eq!(series.daily.get(&first), Some(&2));
        assert_eq!(series.daily.get(&fifth), Some(&1));
        // No zero entries for the gap days.
        assert!(!series.daily.contains_key(&NaiveDate::from_ymd_opt(2025, 10, 3).unwrap()));
    }

    #[test]
    fn weekly_keys_use_iso_weeks() {
        // 2024-12-30 falls in ISO week 2025-W01.
        let series = time_series(&roster_with_dates(&[(2024, 12, 30), (2025, 10, 1)]));
        assert_eq!(series.weekly.get("2025-W01"), Some(&1));
        assert_eq!(series.weekly.get("2025-W40"), Some(&1));
    }

    #[test]
    fn cumulative_is_a_running_total() {
        let series = time_series(&roster_with_dates(&[
            (2025, 10, 1),
            (2025, 10, 1),
            (2025, 10, 5),
            (2025, 10, 9),
        ]));
        let totals: Vec<u64> = series.cumulative.iter().map(|&(_, total)| total).collect();
        assert_eq!(totals, [2, 3, 4]);
    }
}
