//! End-to-end coverage: persist a roster, search it, rank it, export it.

use camino::Utf8PathBuf;
use chrono::{DateTime, TimeZone, Utc};
use contrib_rank::metrics::project_metrics;
use contrib_rank::model::{Contribution, Contributor};
use contrib_rank::ranking::{insights, rank_contributors};
use contrib_rank::reports::csv::export_metrics;
use contrib_rank::search::{
    ContributorField, ContributorFilter, MatchMode, SortKey, SortOrder, advanced_search,
};
use contrib_rank::store::{Roster, load_roster, save_roster};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, day, hour, 0, 0).unwrap()
}

fn seeded_roster() -> Roster {
    let mut roster = Roster::new("October Drive".into(), at(1, 0));

    let mut amy = Contributor::new("Amy Chen".into(), "amy".into(), Some("amy@example.com".into()), at(1, 9));
    for (day, repo, kind, pr) in [
        (2, "tracker", "bug-fix", Some(101)),
        (3, "tracker", "feature", Some(102)),
        (5, "docs", "documentation", None),
        (8, "tracker", "bug-fix", Some(103)),
    ] {
        amy.contributions.push(Contribution::new(
            repo.into(),
            kind.into(),
            format!("{kind} in {repo}"),
            pr,
            at(day, 14),
        ));
    }

    let mut bo = Contributor::new("Bo Park".into(), "bo".into(), None, at(2, 9));
    bo.contributions.push(Contribution::new(
        "tracker".into(),
        "bug-fix".into(),
        "fixed flaky test".into(),
        None,
        at(6, 10),
    ));

    let cal = Contributor::new("Cal Reyes".into(), "cal".into(), Some("cal@example.com".into()), at(3, 9));

    roster.add_contributor(amy).unwrap();
    roster.add_contributor(bo).unwrap();
    roster.add_contributor(cal).unwrap();
    roster
}

#[test]
fn roster_survives_a_disk_round_trip_intact() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("roster.json")).unwrap();

    save_roster(&seeded_roster(), &path).unwrap();
    let loaded = load_roster(&path).unwrap();

    assert_eq!(loaded.project_name, "October Drive");
    assert_eq!(loaded.contributors.len(), 3);

    let amy = loaded.contributor("amy").unwrap();
    assert_eq!(amy.contributions.len(), 4);
    assert!(amy.is_complete());
    assert_eq!(amy.contributions[0].pull_request, Some(101));
    assert_eq!(amy.contributions[0].timestamp, at(2, 14));
}

#[test]
fn search_filter_and_sort_compose_over_a_loaded_roster() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("roster.json")).unwrap();
    save_roster(&seeded_roster(), &path).unwrap();
    let roster = load_roster(&path).unwrap();

    // Everyone whose any-field matches "a", with at least one contribution,
    // most prolific first.
    let filter = ContributorFilter::from_pairs(["min_contributions=1"]).unwrap();
    let results = advanced_search(
        &roster.contributors,
        Some("a"),
        ContributorField::All,
        MatchMode::Contains,
        false,
        &filter,
        SortKey::ContributionCount,
        SortOrder::Descending,
    );

    let handles: Vec<_> = results.iter().map(|c| c.handle.as_str()).collect();
    assert_eq!(handles, ["amy", "bo"]);
}

#[test]
fn fuzzy_search_reaches_contributors_plain_contains_misses() {
    let roster = seeded_roster();

    let fuzzy = advanced_search(
        &roster.contributors,
        Some("achn"),
        ContributorField::Name,
        MatchMode::Fuzzy,
        false,
        &ContributorFilter::default(),
        SortKey::Name,
        SortOrder::Ascending,
    );
    assert_eq!(fuzzy.len(), 1);
    assert_eq!(fuzzy[0].handle, "amy");

    let contains = advanced_search(
        &roster.contributors,
        Some("achn"),
        ContributorField::Name,
        MatchMode::Contains,
        false,
        &ContributorFilter::default(),
        SortKey::Name,
        SortOrder::Ascending,
    );
    assert!(contains.is_empty());
}

#[test]
fn leaderboard_and_insights_agree_with_project_metrics() {
    let roster = seeded_roster();
    let now = at(9, 0);

    let ranking = rank_contributors(&roster.contributors, now);
    assert_eq!(ranking.len(), 3);
    assert_eq!(ranking[0].handle, "amy");
    assert!(ranking[0].complete);
    assert_eq!(ranking[2].handle, "cal");
    assert_eq!(ranking[2].score.total, 0.0);

    let project = project_metrics(&roster.contributors);
    assert_eq!(project.total_contributions, 5);
    assert_eq!(project.completed_contributors, 1);

    let findings = insights(&project);
    // 1 of 3 complete is 33%, below the strong-completion highlight and
    // above the weak-completion concern.
    assert!(findings.highlights.iter().all(|h| !h.contains("completion goal")));
    assert!(findings.concerns.iter().all(|c| !c.contains("completion goal")));
    // Amy's 4 contributions exceed double the mean of 5/3.
    assert!(findings.highlights.iter().any(|h| h.contains("Amy Chen")));
}

#[test]
fn metrics_export_reflects_the_loaded_roster() {
    let roster = seeded_roster();
    let mut buffer = Vec::new();
    export_metrics(&roster.contributors, at(9, 0), &mut buffer).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("handle,display_name"));
    assert_eq!(lines.count(), 3);
    assert!(text.contains("amy,Amy Chen,4"));
    assert!(text.contains("cal,Cal Reyes,0"));
}
