use super::common::{Common, CommonArgs};
use chrono::Utc;
use clap::Parser;
use contrib_rank::Result;
use contrib_rank::metrics::{contributor_metrics, project_metrics};
use contrib_rank::ranking::insights;
use contrib_rank::reports::console;
use ohno::bail;

#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Show detailed metrics for a single contributor instead of the project
    #[arg(long, value_name = "HANDLE")]
    pub handle: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn show_stats(args: &StatsArgs) -> Result<()> {
    let common = Common::new(&args.common);
    let roster = common.load()?;
    let now = Utc::now();

    if let Some(handle) = &args.handle {
        let Some(contributor) = roster.contributor(handle) else {
            bail!("no contributor registered with handle '{handle}'");
        };

        let metrics = contributor_metrics(contributor, now);
        println!("Contributor        : {} ({})", metrics.display_name, metrics.handle);
        println!("Contributions      : {}", metrics.total_contributions);
        println!("Days Active        : {}", metrics.days_active);
        println!("Longest Streak     : {} day(s)", metrics.contribution_streak);
        println!("Avg Days Between   : {:.1}", metrics.average_days_between_contributions);
        println!("Completed          : {}", if metrics.complete { "yes" } else { "no" });
        if let Some(weekday) = metrics.most_active_weekday {
            println!("Most Active Weekday: {weekday}");
        }
        println!();
        println!("Engagement Score   : {:.1}", metrics.engagement.total);
        println!("  count points     : {:.1}", metrics.engagement.count_points);
        println!("  tenure points    : {:.1}", metrics.engagement.tenure_points);
        println!("  variety points   : {:.1}", metrics.engagement.variety_points);
        println!("  recency points   : {:.1}", metrics.engagement.recency_points);

        if !metrics.by_kind.is_empty() {
            println!();
            println!("By Type:");
            for (kind, count) in &metrics.by_kind {
                println!("  {kind}: {count}");
            }
        }
        if !metrics.by_repository.is_empty() {
            println!();
            println!("By Repository:");
            for (repository, count) in &metrics.by_repository {
                println!("  {repository}: {count}");
            }
        }
        return Ok(());
    }

    let project = project_metrics(&roster.contributors);
    let findings = insights(&project);

    let mut output = String::new();
    console::summary(&project, &findings, common.color, &mut output)?;
    print!("{output}");
    Ok(())
}
