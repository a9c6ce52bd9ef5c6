//! A tool to track, search, and rank contributors during a time-boxed
//! open-source contribution drive.
//!
//! # Overview
//!
//! `contrib-rank` keeps a roster of contributors and their contributions in a
//! JSON file, and answers questions about it: who matches a search, who leads
//! the engagement leaderboard, which repositories are busiest, and how
//! activity trends over time.
//!
//! # Quick Start
//!
//! Register a contributor and record their first contribution:
//!
//! ```bash
//! contrib-rank add "Amy Chen" amy --email amy@example.com
//! contrib-rank record amy tracker --type bug-fix --description "Fixed login retry loop" --pull-request 123
//! ```
//!
//! # Searching
//!
//! Text search supports several match modes alongside structured filters:
//!
//! ```bash
//! contrib-rank search amy
//! contrib-rank search "^a" --mode regex --field handle
//! contrib-rank search amy --mode fuzzy
//! contrib-rank search --filter min_contributions=2 --filter completed_only=true
//! contrib-rank search fix --contributions --contribution-field description
//! ```
//!
//! Unknown filter keys are ignored; malformed values are rejected.
//!
//! # Reports
//!
//! ```bash
//! contrib-rank leaderboard --limit 10
//! contrib-rank stats
//! contrib-rank stats --handle amy
//! contrib-rank timeline --granularity weekly
//! contrib-rank repos --sort-by activity-score
//! contrib-rank repos --trending --window 7
//! contrib-rank export --kind all --out-dir exports
//! ```
//!
//! # Engagement Scoring
//!
//! Each contributor receives a 0-100 engagement score combining contribution
//! volume (40 points, capped at the completion goal), tenure (30 points over
//! a month), variety of contribution types (20 points), and recency of the
//! last contribution (10 points decaying over a week). The leaderboard sorts
//! by score, breaking ties by contribution count and then handle.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use contrib_rank::Result;

mod commands;

use crate::commands::{
    AddArgs, ExportArgs, LeaderboardArgs, RecordArgs, ReposArgs, SearchArgs, StatsArgs, TimelineArgs, add_contributor,
    export_data, record_contribution, run_search, show_leaderboard, show_repos, show_stats, show_timeline,
};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "contrib-rank", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new contributor
    Add(AddArgs),
    /// Record a contribution for a registered contributor
    Record(RecordArgs),
    /// Search contributors or contributions
    Search(Box<SearchArgs>),
    /// Show the engagement leaderboard
    Leaderboard(LeaderboardArgs),
    /// Show project statistics and insights, or one contributor's metrics
    Stats(StatsArgs),
    /// Show contribution activity over time
    Timeline(TimelineArgs),
    /// Show per-repository statistics
    Repos(ReposArgs),
    /// Export roster data as CSV files
    Export(ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Add(args) => add_contributor(args),
        Command::Record(args) => record_contribution(args),
        Command::Search(args) => run_search(args),
        Command::Leaderboard(args) => show_leaderboard(args),
        Command::Stats(args) => show_stats(args),
        Command::Timeline(args) => show_timeline(args),
        Command::Repos(args) => show_repos(args),
        Command::Export(args) => export_data(args),
    }
}
