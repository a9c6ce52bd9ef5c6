use super::common::{Common, CommonArgs};
use chrono::Utc;
use clap::Parser;
use contrib_rank::Result;
use contrib_rank::metrics::{RepoSortBy, top_repositories, trending_repositories};

const DEFAULT_LIMIT: usize = 10;
const DEFAULT_TRENDING_WINDOW_DAYS: u32 = 7;

#[derive(Parser, Debug)]
pub struct ReposArgs {
    /// Sort criterion for the repository table
    #[arg(long, value_name = "KEY", default_value = "contributions")]
    pub sort_by: RepoSortBy,

    /// Show at most this many repositories
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Show repositories trending inside a recent window instead
    #[arg(long)]
    pub trending: bool,

    /// Trailing window in days used with --trending
    #[arg(long, value_name = "DAYS", default_value_t = DEFAULT_TRENDING_WINDOW_DAYS)]
    pub window: u32,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn show_repos(args: &ReposArgs) -> Result<()> {
    let common = Common::new(&args.common);
    let roster = common.load()?;

    if args.trending {
        let trending = trending_repositories(&roster.contributors, Utc::now(), args.window, args.limit);
        if trending.is_empty() {
            println!("No activity in the last {} day(s).", args.window);
            return Ok(());
        }

        for repo in &trending {
            println!(
                "{}  score {}  {} contribution(s) from {} contributor(s), last {}",
                repo.repository,
                repo.trend_score,
                repo.recent_contributions,
                repo.recent_contributors,
                repo.last_activity.format("%Y-%m-%d"),
            );
        }
        return Ok(());
    }

    let stats = top_repositories(&roster.contributors, args.limit, args.sort_by);
    if stats.is_empty() {
        println!("No contributions recorded yet.");
        return Ok(());
    }

    for repo in &stats {
        println!(
            "{}  {} contribution(s)  {} contributor(s)  {} PR(s) ({:.0}%)  activity {}  {}",
            repo.repository,
            repo.total_contributions,
            repo.unique_contributors,
            repo.pull_requests,
            repo.pull_request_percentage,
            repo.activity_score,
            repo.health,
        );
    }
    Ok(())
}
