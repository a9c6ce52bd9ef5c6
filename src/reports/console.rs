use crate::Result;
use crate::metrics::ProjectMetrics;
use crate::misc::ColorMode;
use crate::ranking::{Insights, RankedContributor};
use core::fmt::{self, Write};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, stdout};
use terminal_size::{Width, terminal_size};

const DEFAULT_TERMINAL_WIDTH: usize = 120;
const SEPARATOR_WIDTH: usize = 40;
const RANK_WIDTH: usize = 4;
const SCORE_WIDTH: usize = 6;
const COUNT_WIDTH: usize = 6;
const COLUMN_GAP: usize = 2;
const MIN_NAME_WIDTH: usize = 12;

const GREEN_BAND: f64 = 80.0;
const YELLOW_BAND: f64 = 50.0;

/// Render the engagement leaderboard as a console table.
pub fn leaderboard<W: Write>(
    ranking: &[RankedContributor],
    color: ColorMode,
    limit: Option<usize>,
    writer: &mut W,
) -> Result<()> {
    ConsoleReporter::new(writer, color).write_leaderboard(ranking, limit)
}

/// Render project metrics plus insights as a console summary.
pub fn summary<W: Write>(
    project: &ProjectMetrics,
    insights: &Insights,
    color: ColorMode,
    writer: &mut W,
) -> Result<()> {
    let mut reporter = ConsoleReporter::new(writer, color);
    reporter.write_summary(project)?;
    reporter.write_insights(insights)
}

struct ConsoleReporter<'a, W: Write> {
    writer: &'a mut W,
    colors: ColorScheme,
    layout: Layout,
}

impl<'a, W: Write> ConsoleReporter<'a, W> {
    fn new(writer: &'a mut W, color_mode: ColorMode) -> Self {
        Self {
            writer,
            colors: ColorScheme::new(color_mode),
            layout: Layout::new(),
        }
    }

    fn write_leaderboard(&mut self, ranking: &[RankedContributor], limit: Option<usize>) -> Result<()> {
        let rows = match limit {
            Some(n) => &ranking[..n.min(ranking.len())],
            None => ranking,
        };

        if rows.is_empty() {
            writeln!(self.writer, "No contributors registered.")?;
            return Ok(());
        }

        let name_width = self.layout.name_width(rows);

        write!(self.writer, "{:>RANK_WIDTH$}  ", "#")?;
        self.colors.write_styled_text(self.writer, "Contributor", TextStyle::Bold)?;
        write!(self.writer, "{:width$}  ", "", width = name_width - "Contributor".len())?;
        self.colors.write_styled_text(self.writer, "Score", TextStyle::Bold)?;
        write!(self.writer, "{:width$}  ", "", width = SCORE_WIDTH - "Score".len())?;
        self.colors.write_styled_text(self.writer, "Total", TextStyle::Bold)?;
        write!(self.writer, "{:width$}  ", "", width = COUNT_WIDTH - "Total".len())?;
        self.colors.write_styled_text(self.writer, "Done", TextStyle::Bold)?;
        writeln!(self.writer)?;

        let table_width = RANK_WIDTH + COLUMN_GAP + name_width + COLUMN_GAP + SCORE_WIDTH + COLUMN_GAP + COUNT_WIDTH + COLUMN_GAP + "Done".len();
        self.colors.write_styled_line(self.writer, "─", table_width, TextStyle::Dimmed)?;
        writeln!(self.writer)?;

        for row in rows {
            let label = format!("{} ({})", row.display_name, row.handle);
            let truncated = truncate(&label, name_width);
            write!(self.writer, "{:>RANK_WIDTH$}  {truncated:<name_width$}  ", row.rank)?;
            self.colors.write_colorized_score(self.writer, row.score.total, Some(SCORE_WIDTH))?;
            write!(self.writer, "  {:>COUNT_WIDTH$}  ", row.total_contributions)?;
            writeln!(self.writer, "{}", if row.complete { "yes" } else { "no" })?;
        }
        Ok(())
    }

    fn write_summary(&mut self, project: &ProjectMetrics) -> Result<()> {
        self.colors.write_styled_text(self.writer, "Project Summary", TextStyle::Bold)?;
        writeln!(self.writer)?;
        self.colors.write_styled_line(self.writer, "═", SEPARATOR_WIDTH, TextStyle::Dimmed)?;
        writeln!(self.writer)?;

        writeln!(self.writer, "Contributors       : {}", project.total_contributors)?;
        writeln!(self.writer, "Contributions      : {}", project.total_contributions)?;
        writeln!(self.writer, "Mean / Median      : {:.1} / {:.1}", project.mean_contributions, project.median_contributions)?;
        writeln!(self.writer, "Std Deviation      : {:.2}", project.stdev_contributions)?;
        writeln!(self.writer, "Min / Max          : {} / {}", project.min_contributions, project.max_contributions)?;
        writeln!(
            self.writer,
            "Completed          : {} ({:.1}%)",
            project.completed_contributors, project.completion_rate
        )?;

        writeln!(self.writer)?;
        self.colors.write_styled_text(self.writer, "Distribution", TextStyle::Bold)?;
        writeln!(self.writer)?;
        for (bucket, count) in &project.distribution {
            writeln!(self.writer, "  {bucket:>5} contributions: {count}")?;
        }

        if !project.top_repositories.is_empty() {
            writeln!(self.writer)?;
            self.colors.write_styled_text(self.writer, "Top Repositories", TextStyle::Bold)?;
            writeln!(self.writer)?;
            for (repository, count) in &project.top_repositories {
                writeln!(self.writer, "  {repository}: {count}")?;
            }
        }

        if !project.top_kinds.is_empty() {
            writeln!(self.writer)?;
            self.colors.write_styled_text(self.writer, "Contribution Types", TextStyle::Bold)?;
            writeln!(self.writer)?;
            for (kind, count) in &project.top_kinds {
                writeln!(self.writer, "  {kind}: {count}")?;
            }
        }

        Ok(())
    }

    fn write_insights(&mut self, insights: &Insights) -> Result<()> {
        self.write_insight_section("Highlights", &insights.highlights, TextStyle::Bold)?;
        self.write_insight_section("Concerns", &insights.concerns, TextStyle::Bold)?;
        self.write_insight_section("Recommendations", &insights.recommendations, TextStyle::Bold)?;
        Ok(())
    }

    fn write_insight_section(&mut self, title: &str, lines: &[String], style: TextStyle) -> Result<()> {
        if lines.is_empty() {
            return Ok(());
        }

        writeln!(self.writer)?;
        self.colors.write_styled_text(self.writer, title, style)?;
        writeln!(self.writer)?;
        for line in lines {
            writeln!(self.writer, "  • {line}")?;
        }
        Ok(())
    }
}

#[derive(Copy, Clone)]
enum TextStyle {
    Bold,
    Dimmed,
}

struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    fn new(color_mode: ColorMode) -> Self {
        let enabled = matches!(color_mode, ColorMode::Always) || (matches!(color_mode, ColorMode::Auto) && stdout().is_terminal());
        Self { enabled }
    }

    fn write_styled_text<W: Write>(&self, writer: &mut W, text: &str, style: TextStyle) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{text}");
        }
        match style {
            TextStyle::Bold => write!(writer, "{}", text.bold()),
            TextStyle::Dimmed => write!(writer, "{}", text.dimmed()),
        }
    }

    fn write_styled_line<W: Write>(&self, writer: &mut W, ch: &str, width: usize, style: TextStyle) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{}", ch.repeat(width));
        }
        match style {
            TextStyle::Bold => write!(writer, "{}", ch.repeat(width).bold()),
            TextStyle::Dimmed => write!(writer, "{}", ch.repeat(width).dimmed()),
        }
    }

    fn write_colorized_score<W: Write>(&self, writer: &mut W, score: f64, padding: Option<usize>) -> fmt::Result {
        let rendered = match padding {
            Some(width) => format!("{score:>width$.1}"),
            None => format!("{score:.1}"),
        };

        if !self.enabled {
            return write!(writer, "{rendered}");
        }

        if score >= GREEN_BAND {
            write!(writer, "{}", rendered.green())
        } else if score >= YELLOW_BAND {
            write!(writer, "{}", rendered.yellow())
        } else {
            write!(writer, "{}", rendered.red())
        }
    }
}

struct Layout {
    terminal_width: usize,
}

impl Layout {
    fn new() -> Self {
        Self {
            terminal_width: detect_terminal_width(),
        }
    }

    fn name_width(&self, rows: &[RankedContributor]) -> usize {
        let longest = rows
            .iter()
            .map(|row| row.display_name.len() + row.handle.len() + " ()".len())
            .max()
            .unwrap_or(MIN_NAME_WIDTH);
        let available = self
            .terminal_width
            .saturating_sub(RANK_WIDTH + 3 * COLUMN_GAP + SCORE_WIDTH + COUNT_WIDTH + "Done".len());
        longest.clamp(MIN_NAME_WIDTH.max("Contributor".len()), available.max(MIN_NAME_WIDTH))
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }

    let mut result = String::new();
    for ch in text.chars() {
        if result.chars().count() + 1 >= max_width {
            break;
        }
        result.push(ch);
    }

    format!("{result}…")
}

fn detect_terminal_width() -> usize {
    if stdout().is_terminal() {
        terminal_size().map_or(DEFAULT_TERMINAL_WIDTH, |(Width(w), _)| usize::from(w))
    } else {
        DEFAULT_TERMINAL_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{engagement_score, project_metrics};
    use crate::model::{Contribution, Contributor};
    use crate::ranking::{insights, rank_contributors};
    use chrono::{TimeZone, Utc};

    fn roster() -> Vec<Contributor> {
        let joined = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        let mut amy = Contributor::new("Amy".into(), "amy".into(), None, joined);
        for i in 0..4 {
            amy.contributions.push(Contribution::new(
                "tracker".into(),
                "bug-fix".into(),
                format!("change {i}"),
                Some(100 + i),
                Utc.with_ymd_and_hms(2025, 10, 2 + i, 9, 0, 0).unwrap(),
            ));
        }
        let bob = Contributor::new("Bob".into(), "bob".into(), None, joined);
        vec![amy, bob]
    }

    #[test]
    fn leaderboard_lists_every_row_without_color_codes() {
        let now = Utc.with_ymd_and_hms(2025, 10, 10, 0, 0, 0).unwrap();
        let ranking = rank_contributors(&roster(), now);

        let mut out = String::new();
        leaderboard(&ranking, ColorMode::Never, None, &mut out).unwrap();

        assert!(out.contains("Amy (amy)"));
        assert!(out.contains("Bob (bob)"));
        assert!(!out.contains('\u{1b}'), "Never mode must not emit ANSI escapes");
    }

    #[test]
    fn leaderboard_limit_trims_rows() {
        let now = Utc.with_ymd_and_hms(2025, 10, 10, 0, 0, 0).unwrap();
        let ranking = rank_contributors(&roster(), now);

        let mut out = String::new();
        leaderboard(&ranking, ColorMode::Never, Some(1), &mut out).unwrap();

        assert!(out.contains("Amy (amy)"));
        assert!(!out.contains("Bob (bob)"));
    }

    #[test]
    fn leaderboard_handles_empty_ranking() {
        let mut out = String::new();
        leaderboard(&[], ColorMode::Never, None, &mut out).unwrap();
        assert!(out.contains("No contributors"));
    }

    #[test]
    fn summary_includes_distribution_and_insight_sections() {
        let collection = roster();
        let project = project_metrics(&collection);
        let findings = insights(&project);

        let mut out = String::new();
        summary(&project, &findings, ColorMode::Never, &mut out).unwrap();

        assert!(out.contains("Project Summary"));
        assert!(out.contains("Contributors       : 2"));
        assert!(out.contains("0-1 contributions"));
        assert!(out.contains("Highlights") || out.contains("Concerns"));
    }

    #[test]
    fn long_labels_truncate_to_the_name_column_width() {
        let now = Utc.with_ymd_and_hms(2025, 10, 10, 0, 0, 0).unwrap();
        let joined = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        let wordy = Contributor::new(
            "An Extraordinarily Long Display Name".into(),
            "a-very-long-handle-indeed".into(),
            None,
            joined,
        );
        let ranking = rank_contributors(&[wordy], now);

        let layout = Layout { terminal_width: 40 };
        let name_width = layout.name_width(&ranking);
        let label = format!("{} ({})", ranking[0].display_name, ranking[0].handle);
        let truncated = truncate(&label, name_width);
        assert!(truncated.chars().count() <= name_width);
    }

    #[test]
    fn score_formatting_survives_zero_ranking_entries() {
        // ColorScheme renders plain digits in Never mode.
        let scheme = ColorScheme::new(ColorMode::Never);
        let mut out = String::new();
        scheme.write_colorized_score(&mut out, 87.5, Some(SCORE_WIDTH)).unwrap();
        assert_eq!(out, "  87.5");
    }

    #[test]
    fn empty_contributor_scores_zero_in_report_inputs() {
        let joined = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        let quiet = Contributor::new("Quiet".into(), "quiet".into(), None, joined);
        let now = Utc.with_ymd_and_hms(2025, 10, 10, 0, 0, 0).unwrap();
        assert_eq!(engagement_score(&quiet, now).total, 0.0);
    }
}
