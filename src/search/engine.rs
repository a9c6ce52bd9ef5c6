use super::filter::{ContributionFilter, ContributorFilter};
use super::matcher::{MatchMode, matches};
use crate::model::Contributor;
use clap::ValueEnum;
use core::cmp::Ordering;
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString};

/// Contributor field a text search runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum ContributorField {
    Name,
    Handle,
    Email,
    /// Match if any of the three fields matches
    #[default]
    All,
}

/// Contribution field a text search runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum ContributionField {
    Description,
    Repository,
    Type,
    #[default]
    All,
}

/// Sort key for contributor orderings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Name,
    Handle,
    ContributionCount,
    JoinedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// One contribution tagged with its owning contributor, produced by
/// [`flatten_contributions`]. Contribution-level search and filtering operate
/// on this shape so results keep their attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionRecord<'a> {
    pub handle: &'a str,
    pub display_name: &'a str,
    pub contribution: &'a crate::model::Contribution,
}

/// Flatten a collection into contributor-tagged contribution records, in
/// collection order then arrival order.
#[must_use]
pub fn flatten_contributions(collection: &[Contributor]) -> Vec<ContributionRecord<'_>> {
    collection
        .iter()
        .flat_map(|c| {
            c.contributions.iter().map(|contribution| ContributionRecord {
                handle: &c.handle,
                display_name: &c.display_name,
                contribution,
            })
        })
        .collect()
}

/// Select contributors whose chosen field matches the query. An empty query
/// in the default `contains` mode matches every record; the same empty query
/// under `exact` only matches empty fields, so no empty-query shortcut is
/// taken here.
#[must_use]
pub fn search_contributors<'a>(
    collection: &'a [Contributor],
    query: &str,
    field: ContributorField,
    mode: MatchMode,
    case_sensitive: bool,
) -> Vec<&'a Contributor> {
    collection
        .iter()
        .filter(|contributor| contributor_matches(contributor, query, field, mode, case_sensitive))
        .collect()
}

fn contributor_matches(
    contributor: &Contributor,
    query: &str,
    field: ContributorField,
    mode: MatchMode,
    case_sensitive: bool,
) -> bool {
    let name = matches!(field, ContributorField::Name | ContributorField::All)
        && matches(&contributor.display_name, query, mode, case_sensitive);
    let handle = matches!(field, ContributorField::Handle | ContributorField::All)
        && matches(&contributor.handle, query, mode, case_sensitive);
    let email = matches!(field, ContributorField::Email | ContributorField::All)
        && matches(contributor.email.as_deref().unwrap_or_default(), query, mode, case_sensitive);

    name || handle || email
}

/// Select contribution records whose chosen field matches the query.
#[must_use]
pub fn search_contributions<'a>(
    records: &[ContributionRecord<'a>],
    query: &str,
    field: ContributionField,
    mode: MatchMode,
    case_sensitive: bool,
) -> Vec<ContributionRecord<'a>> {
    records
        .iter()
        .filter(|record| {
            let c = record.contribution;
            let description = matches!(field, ContributionField::Description | ContributionField::All)
                && matches(&c.description, query, mode, case_sensitive);
            let repository = matches!(field, ContributionField::Repository | ContributionField::All)
                && matches(&c.repository, query, mode, case_sensitive);
            let kind = matches!(field, ContributionField::Type | ContributionField::All)
                && matches(&c.kind, query, mode, case_sensitive);

            description || repository || kind
        })
        .copied()
        .collect()
}

/// Apply a composed contributor filter, preserving collection order.
#[must_use]
pub fn filter_contributors<'a>(collection: &'a [Contributor], filter: &ContributorFilter) -> Vec<&'a Contributor> {
    collection.iter().filter(|c| filter.matches(c)).collect()
}

/// Apply a composed contribution filter, preserving record order.
#[must_use]
pub fn filter_contributions<'a>(
    records: &[ContributionRecord<'a>],
    filter: &ContributionFilter,
) -> Vec<ContributionRecord<'a>> {
    records
        .iter()
        .filter(|r| filter.matches(r.handle, r.contribution))
        .copied()
        .collect()
}

/// Sort contributors by the given key.
///
/// Name and handle keys compare case-insensitively. Every key breaks ties by
/// handle ascending so equal-count contributors always come back in the same
/// order. Descending order reverses the ascending ordering outright, which
/// keeps that tie-break direction instead of inverting it.
#[must_use]
pub fn sort_contributors<'a>(collection: &[&'a Contributor], key: SortKey, order: SortOrder) -> Vec<&'a Contributor> {
    let mut sorted: Vec<_> = collection.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key));

    if order == SortOrder::Descending {
        sorted.reverse();
    }
    sorted
}

fn compare(a: &Contributor, b: &Contributor, key: SortKey) -> Ordering {
    let ordering = match key {
        SortKey::Name => a.display_name.to_lowercase().cmp(&b.display_name.to_lowercase()),
        SortKey::Handle => a.handle.to_lowercase().cmp(&b.handle.to_lowercase()),
        SortKey::ContributionCount => a.contribution_count().cmp(&b.contribution_count()),
        SortKey::JoinedAt => a.joined_at.cmp(&b.joined_at),
    };

    ordering.then_with(|| a.handle.cmp(&b.handle))
}

/// Text search (when a query is present) intersected with the composed
/// filter, then sorted. Both constraints must hold.
#[must_use]
pub fn advanced_search<'a>(
    collection: &'a [Contributor],
    query: Option<&str>,
    field: ContributorField,
    mode: MatchMode,
    case_sensitive: bool,
    filter: &ContributorFilter,
    key: SortKey,
    order: SortOrder,
) -> Vec<&'a Contributor> {
    let searched: Vec<&Contributor> = match query {
        Some(q) if !q.is_empty() => search_contributors(collection, q, field, mode, case_sensitive),
        _ => collection.iter().collect(),
    };

    let filtered: Vec<&Contributor> = searched.into_iter().filter(|c| filter.matches(c)).collect();
    sort_contributors(&filtered, key, order)
}

/// Aggregate counts over a whole collection, useful as a search-scope summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub total_contributors: usize,
    pub total_contributions: usize,
    pub kinds: BTreeMap<String, u64>,
    pub repositories: BTreeMap<String, u64>,
    pub contributors_with_email: usize,
    pub completed: usize,
}

#[must_use]
pub fn collection_stats(collection: &[Contributor]) -> CollectionStats {
    let mut stats = CollectionStats {
        total_contributors: collection.len(),
        ..Default::default()
    };

    for contributor in collection {
        if contributor.has_email() {
            stats.contributors_with_email += 1;
        }
        if contributor.is_complete() {
            stats.completed += 1;
        }
        for contribution in &contributor.contributions {
            stats.total_contributions += 1;
            *stats.kinds.entry(contribution.kind.clone()).or_default() += 1;
            *stats.repositories.entry(contribution.repository.clone()).or_default() += 1;
        }
    }

    stats
}

/// Quick summary of a result subset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStats {
    pub result_count: usize,
    pub total_contributions: usize,
    pub completed: usize,
    pub average_contributions: f64,
    pub completion_rate: f64,
}

#[must_use]
pub fn result_stats(results: &[&Contributor]) -> ResultStats {
    let total_contributions: usize = results.iter().map(|c| c.contribution_count()).sum();
    let completed = results.iter().filter(|c| c.is_complete()).count();

    // Guard the ratios before dividing; an empty result set is a normal state.
    let (average_contributions, completion_rate) = if results.is_empty() {
        (0.0, 0.0)
    } else {
        #[expect(clippy::cast_precision_loss, reason = "collection sizes are far below 2^52")]
        let count = results.len() as f64;
        #[expect(clippy::cast_precision_loss, reason = "collection sizes are far below 2^52")]
        let contributions = total_contributions as f64;
        #[expect(clippy::cast_precision_loss, reason = "collection sizes are far below 2^52")]
        let done = completed as f64;
        (contributions / count, done / count * 100.0)
    };

    ResultStats {
        result_count: results.len(),
        total_contributions,
        completed,
        average_contributions,
        completion_rate,
    }
}
