use crate::Result;
use crate::metrics::contributor_metrics;
use crate::model::Contributor;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use std::collections::BTreeMap;
use std::io::Write;

const CONTRIBUTORS_HEADER: &[&str] = &[
    "handle",
    "display_name",
    "email",
    "joined_at",
    "contribution_count",
    "complete",
];

const CONTRIBUTIONS_HEADER: &[&str] = &[
    "handle",
    "display_name",
    "repository",
    "contribution_type",
    "description",
    "pull_request",
    "timestamp",
];

const METRICS_HEADER: &[&str] = &[
    "handle",
    "display_name",
    "total_contributions",
    "joined_at",
    "days_active",
    "complete",
    "contribution_types",
    "repositories",
    "engagement_score",
];

/// Write one row per contributor.
pub fn export_contributors<W: Write>(collection: &[Contributor], writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CONTRIBUTORS_HEADER).into_app_err("writing csv header")?;

    for contributor in collection {
        out.write_record([
            contributor.handle.as_str(),
            contributor.display_name.as_str(),
            contributor.email.as_deref().unwrap_or_default(),
            &contributor.joined_at.to_rfc3339(),
            &contributor.contribution_count().to_string(),
            yes_no(contributor.is_complete()),
        ])
        .into_app_err("writing contributor row")?;
    }

    out.flush().into_app_err("flushing csv output")?;
    Ok(())
}

/// Write one row per contribution, flattened across the whole collection.
pub fn export_contributions<W: Write>(collection: &[Contributor], writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CONTRIBUTIONS_HEADER).into_app_err("writing csv header")?;

    for contributor in collection {
        for contribution in &contributor.contributions {
            let pull_request = contribution
                .pull_request
                .map(|n| n.to_string())
                .unwrap_or_default();
            out.write_record([
                contributor.handle.as_str(),
                contributor.display_name.as_str(),
                contribution.repository.as_str(),
                contribution.kind.as_str(),
                contribution.description.as_str(),
                &pull_request,
                &contribution.timestamp.to_rfc3339(),
            ])
            .into_app_err("writing contribution row")?;
        }
    }

    out.flush().into_app_err("flushing csv output")?;
    Ok(())
}

/// Write one computed-metrics row per contributor. Per-kind and per-repository
/// breakdowns are folded into `key:count` pairs joined with "; ".
pub fn export_metrics<W: Write>(collection: &[Contributor], now: DateTime<Utc>, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(METRICS_HEADER).into_app_err("writing csv header")?;

    for contributor in collection {
        let metrics = contributor_metrics(contributor, now);
        out.write_record([
            metrics.handle.as_str(),
            metrics.display_name.as_str(),
            &metrics.total_contributions.to_string(),
            &contributor.joined_at.to_rfc3339(),
            &metrics.days_active.to_string(),
            yes_no(metrics.complete),
            &join_counts(&metrics.by_kind),
            &join_counts(&metrics.by_repository),
            &format!("{:.2}", metrics.engagement.total),
        ])
        .into_app_err("writing metrics row")?;
    }

    out.flush().into_app_err("flushing csv output")?;
    Ok(())
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn join_counts(counts: &BTreeMap<String, u64>) -> String {
    counts
        .iter()
        .map(|(key, count)| format!("{key}:{count}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Contribution;
    use chrono::TimeZone;

    fn roster() -> Vec<Contributor> {
        let joined = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        let mut amy = Contributor::new("Amy".into(), "amy".into(), Some("amy@example.com".into()), joined);
        amy.contributions.push(Contribution::new(
            "tracker".into(),
            "bug-fix".into(),
            "fixed login".into(),
            Some(123),
            Utc.with_ymd_and_hms(2025, 10, 3, 9, 0, 0).unwrap(),
        ));
        amy.contributions.push(Contribution::new(
            "docs".into(),
            "documentation".into(),
            "reworked README".into(),
            None,
            Utc.with_ymd_and_hms(2025, 10, 4, 9, 0, 0).unwrap(),
        ));
        let bob = Contributor::new("Bob".into(), "bob".into(), None, joined);
        vec![amy, bob]
    }

    #[test]
    fn contributors_export_includes_header_and_blank_email() {
        let mut buffer = Vec::new();
        export_contributors(&roster(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "handle,display_name,email,joined_at,contribution_count,complete"
        );
        assert!(text.contains("amy,Amy,amy@example.com"));
        assert!(text.contains("bob,Bob,,"));
    }

    #[test]
    fn contributions_export_flattens_and_leaves_missing_pr_blank() {
        let mut buffer = Vec::new();
        export_contributions(&roster(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        // Header plus two contribution rows; Bob contributes nothing.
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("amy,Amy,tracker,bug-fix,fixed login,123,"));
        assert!(text.contains("amy,Amy,docs,documentation,reworked README,,"));
    }

    #[test]
    fn metrics_export_folds_breakdowns_into_pairs() {
        let now = Utc.with_ymd_and_hms(2025, 10, 10, 0, 0, 0).unwrap();
        let mut buffer = Vec::new();
        export_metrics(&roster(), now, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("bug-fix:1; documentation:1"));
        assert!(text.contains("docs:1; tracker:1"));
        assert!(text.lines().count() == 3);
    }
}
