use super::common::{Common, CommonArgs};
use chrono::Utc;
use clap::Parser;
use contrib_rank::Result;
use contrib_rank::model::{Contribution, Contributor};
use ohno::bail;

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Display name of the contributor
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Unique handle identifying the contributor
    #[arg(value_name = "HANDLE")]
    pub handle: String,

    /// Contact email address
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
pub struct RecordArgs {
    /// Handle of the contributor the contribution belongs to
    #[arg(value_name = "HANDLE")]
    pub handle: String,

    /// Repository the contribution went to
    #[arg(value_name = "REPOSITORY")]
    pub repository: String,

    /// Kind of contribution, such as bug-fix, feature, or documentation
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: String,

    /// One-line description of the change
    #[arg(long, value_name = "TEXT")]
    pub description: String,

    /// Pull request number, if one exists
    #[arg(long, value_name = "NUMBER")]
    pub pull_request: Option<u32>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn add_contributor(args: &AddArgs) -> Result<()> {
    let common = Common::new(&args.common);
    let now = Utc::now();

    let mut roster = common.load_or_create(now)?;
    roster.add_contributor(Contributor::new(
        args.name.clone(),
        args.handle.clone(),
        args.email.clone(),
        now,
    ))?;
    common.save(&roster)?;

    println!("Registered {} ({})", args.name, args.handle);
    Ok(())
}

pub fn record_contribution(args: &RecordArgs) -> Result<()> {
    let common = Common::new(&args.common);

    if args.repository.trim().is_empty() {
        bail!("repository must not be empty");
    }
    if args.kind.trim().is_empty() {
        bail!("contribution type must not be empty");
    }
    if args.pull_request == Some(0) {
        bail!("pull request number must be positive");
    }

    let mut roster = common.load()?;
    roster.record_contribution(
        &args.handle,
        Contribution::new(
            args.repository.clone(),
            args.kind.clone(),
            args.description.clone(),
            args.pull_request,
            Utc::now(),
        ),
    )?;
    common.save(&roster)?;

    println!("Recorded {} contribution to {} for {}", args.kind, args.repository, args.handle);
    Ok(())
}
