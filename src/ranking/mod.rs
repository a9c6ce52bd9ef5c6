//! Leaderboard ranking and rule-driven project insights.

mod insights;
mod ranker;

pub use insights::{Insights, insights};
pub use ranker::{RankedContributor, rank_contributors};
