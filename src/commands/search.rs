use super::common::{Common, CommonArgs};
use clap::Parser;
use contrib_rank::Result;
use contrib_rank::search::{
    ContributionField, ContributionFilter, ContributorField, ContributorFilter, MatchMode, SortKey, SortOrder,
    advanced_search, filter_contributions, flatten_contributions, result_stats, search_contributions,
};

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Text to search for; omit to list everything the filters allow
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Search contribution records instead of contributors
    #[arg(long)]
    pub contributions: bool,

    /// Contributor field to search [default: all]
    #[arg(long, value_name = "FIELD", default_value = "all", conflicts_with = "contributions")]
    pub field: ContributorField,

    /// Contribution field to search [default: all]
    #[arg(long, value_name = "FIELD", default_value = "all")]
    pub contribution_field: ContributionField,

    /// How the query is matched against field values
    #[arg(long, value_name = "MODE", default_value = "contains")]
    pub mode: MatchMode,

    /// Match with exact letter case
    #[arg(long)]
    pub case_sensitive: bool,

    /// Structured filter as key=value; repeatable, unknown keys are ignored
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Sort key for contributor results
    #[arg(long, value_name = "KEY", default_value = "name")]
    pub sort_by: SortKey,

    /// Sort direction
    #[arg(long, value_name = "ORDER", default_value = "ascending")]
    pub order: SortOrder,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn run_search(args: &SearchArgs) -> Result<()> {
    let common = Common::new(&args.common);
    let roster = common.load()?;

    let pairs = args.filters.iter().map(String::as_str);

    if args.contributions {
        let filter = ContributionFilter::from_pairs(pairs)?;
        let records = flatten_contributions(&roster.contributors);
        let searched = match args.query.as_deref() {
            Some(q) if !q.is_empty() => {
                search_contributions(&records, q, args.contribution_field, args.mode, args.case_sensitive)
            }
            _ => records,
        };
        let results = filter_contributions(&searched, &filter);

        for record in &results {
            let contribution = record.contribution;
            let pull_request = contribution
                .pull_request
                .map_or_else(String::new, |n| format!(" (PR #{n})"));
            println!(
                "{}  {}  {}  {}  {}{pull_request}",
                contribution.timestamp.format("%Y-%m-%d"),
                record.handle,
                contribution.repository,
                contribution.kind,
                contribution.description,
            );
        }
        println!("\n{} contribution(s) matched", results.len());
        return Ok(());
    }

    let filter = ContributorFilter::from_pairs(pairs)?;
    let results = advanced_search(
        &roster.contributors,
        args.query.as_deref(),
        args.field,
        args.mode,
        args.case_sensitive,
        &filter,
        args.sort_by,
        args.order,
    );

    for contributor in &results {
        let email = contributor.email.as_deref().unwrap_or("-");
        println!(
            "{}  {}  {}  {} contribution(s)",
            contributor.handle,
            contributor.display_name,
            email,
            contributor.contribution_count(),
        );
    }

    let stats = result_stats(&results);
    println!(
        "\n{} contributor(s) matched, {} contribution(s), {} completed",
        stats.result_count, stats.total_contributions, stats.completed,
    );
    Ok(())
}
