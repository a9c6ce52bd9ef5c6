use super::common::{Common, CommonArgs};
use camino::Utf8PathBuf;
use chrono::Utc;
use clap::{Parser, ValueEnum};
use contrib_rank::Result;
use contrib_rank::reports::csv::{export_contributions, export_contributors, export_metrics};
use ohno::IntoAppError;
use std::fs;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Contributors,
    Contributions,
    Metrics,
    #[default]
    All,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Which data set to export
    #[arg(long, value_name = "KIND", default_value = "all")]
    pub kind: ExportKind,

    /// Directory the CSV files are written to
    #[arg(long, value_name = "PATH", default_value = "exports")]
    pub out_dir: Utf8PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn export_data(args: &ExportArgs) -> Result<()> {
    let common = Common::new(&args.common);
    let roster = common.load()?;
    let now = Utc::now();

    fs::create_dir_all(&args.out_dir)
        .into_app_err_with(|| format!("unable to create export directory '{}'", args.out_dir))?;

    if matches!(args.kind, ExportKind::Contributors | ExportKind::All) {
        let path = args.out_dir.join("contributors.csv");
        let file = fs::File::create(&path).into_app_err_with(|| format!("unable to create '{path}'"))?;
        export_contributors(&roster.contributors, file)?;
        println!("Wrote {path}");
    }

    if matches!(args.kind, ExportKind::Contributions | ExportKind::All) {
        let path = args.out_dir.join("contributions.csv");
        let file = fs::File::create(&path).into_app_err_with(|| format!("unable to create '{path}'"))?;
        export_contributions(&roster.contributors, file)?;
        println!("Wrote {path}");
    }

    if matches!(args.kind, ExportKind::Metrics | ExportKind::All) {
        let path = args.out_dir.join("metrics.csv");
        let file = fs::File::create(&path).into_app_err_with(|| format!("unable to create '{path}'"))?;
        export_metrics(&roster.contributors, now, file)?;
        println!("Wrote {path}");
    }

    Ok(())
}
