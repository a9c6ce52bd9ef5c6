use super::common::{Common, CommonArgs};
use clap::{Parser, ValueEnum};
use contrib_rank::Result;
use contrib_rank::metrics::time_series;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Cumulative,
}

#[derive(Parser, Debug)]
pub struct TimelineArgs {
    /// Time bucket to report
    #[arg(long, value_name = "BUCKET", default_value = "daily")]
    pub granularity: Granularity,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn show_timeline(args: &TimelineArgs) -> Result<()> {
    let common = Common::new(&args.common);
    let roster = common.load()?;

    let series = time_series(&roster.contributors);

    match args.granularity {
        Granularity::Daily => {
            for (date, count) in &series.daily {
                println!("{date}  {count}");
            }
        }
        Granularity::Weekly => {
            for (week, count) in &series.weekly {
                println!("{week}  {count}");
            }
        }
        Granularity::Cumulative => {
            for (date, running) in &series.cumulative {
                println!("{date}  {running}");
            }
        }
    }

    Ok(())
}
