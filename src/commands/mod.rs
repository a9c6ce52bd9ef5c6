mod common;
mod export;
mod leaderboard;
mod repos;
mod roster;
mod search;
mod stats;
mod timeline;

pub use export::{ExportArgs, export_data};
pub use leaderboard::{LeaderboardArgs, show_leaderboard};
pub use repos::{ReposArgs, show_repos};
pub use roster::{AddArgs, RecordArgs, add_contributor, record_contribution};
pub use search::{SearchArgs, run_search};
pub use stats::{StatsArgs, show_stats};
pub use timeline::{TimelineArgs, show_timeline};
