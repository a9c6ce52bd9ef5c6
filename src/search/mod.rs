//! Text search, composable filters, and contributor orderings.
//!
//! # Implementation Model
//!
//! Three layers, each pure over a caller-supplied snapshot:
//!
//! - [`matcher`] decides whether one field value matches one query under a
//!   [`MatchMode`].
//! - [`filter`] composes optional criteria into a single conjunction over a
//!   contributor or contribution.
//! - [`engine`] applies both across a collection and produces subsequences
//!   of the input (same element identity, never copies), optionally
//!   reordered by a deterministic sort.
//!
//! Invalid field or sort-key names fail when parsed into their enums at the
//! caller's boundary; unknown *filter* keys are deliberately tolerated
//! instead, because filter criteria arrive from open-ended external input.

mod engine;
mod filter;
mod matcher;

pub use engine::{
    CollectionStats, ContributionField, ContributionRecord, ContributorField, ResultStats, SortKey, SortOrder,
    advanced_search, collection_stats, filter_contributions, filter_contributors, flatten_contributions,
    result_stats, search_contributions, search_contributors, sort_contributors,
};
pub use filter::{ContributionFilter, ContributorFilter};
pub use matcher::{MatchMode, matches};
