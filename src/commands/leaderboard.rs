use super::common::{Common, CommonArgs};
use chrono::Utc;
use clap::Parser;
use contrib_rank::Result;
use contrib_rank::ranking::rank_contributors;
use contrib_rank::reports::console;

#[derive(Parser, Debug)]
pub struct LeaderboardArgs {
    /// Show at most this many rows
    #[arg(long, value_name = "COUNT")]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn show_leaderboard(args: &LeaderboardArgs) -> Result<()> {
    let common = Common::new(&args.common);
    let roster = common.load()?;

    let ranking = rank_contributors(&roster.contributors, Utc::now());

    let mut output = String::new();
    console::leaderboard(&ranking, common.color, args.limit, &mut output)?;
    print!("{output}");
    Ok(())
}
