use crate::metrics::{ProjectMetrics, TopContributor};
use serde::Serialize;

/// Narrative observations derived from project-level metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Insights {
    pub highlights: Vec<String>,
    pub concerns: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Inputs every insight rule is evaluated against. `top` is the most
/// prolific contributor by raw count, not the engagement leader.
struct InsightContext<'a> {
    project: &'a ProjectMetrics,
    top: Option<&'a TopContributor>,
}

#[derive(Clone, Copy)]
enum InsightKind {
    Highlight,
    Concern { recommendation: &'static str },
}

struct InsightRule {
    kind: InsightKind,
    applies: fn(&InsightContext<'_>) -> bool,
    render: fn(&InsightContext<'_>) -> String,
}

const STRONG_COMPLETION_RATE: f64 = 50.0;
const WEAK_COMPLETION_RATE: f64 = 20.0;
const STANDOUT_MULTIPLIER: f64 = 2.0;
const HEALTHY_MEAN: f64 = 3.0;
const SPREAD_MULTIPLIER: f64 = 1.5;

/// The rule table. Rules fire in order, so output ordering is stable
/// across runs for the same metrics.
const RULES: &[InsightRule] = &[
    InsightRule {
        kind: InsightKind::Highlight,
        applies: |ctx| ctx.project.completion_rate >= STRONG_COMPLETION_RATE,
        render: |ctx| {
            format!(
                "{:.1}% of contributors have reached the completion goal",
                ctx.project.completion_rate
            )
        },
    },
    InsightRule {
        kind: InsightKind::Highlight,
        applies: |ctx| {
            ctx.project.mean_contributions > 0.0
                && ctx.top.is_some_and(|top| {
                    to_f64(top.contributions) > STANDOUT_MULTIPLIER * ctx.project.mean_contributions
                })
        },
        render: |ctx| {
            ctx.top.map_or_else(String::new, |top| {
                format!(
                    "{} is a standout with {} contributions, more than double the average",
                    top.display_name, top.contributions
                )
            })
        },
    },
    InsightRule {
        kind: InsightKind::Highlight,
        applies: |ctx| ctx.project.mean_contributions >= HEALTHY_MEAN,
        render: |ctx| {
            format!(
                "healthy average of {:.1} contributions per contributor",
                ctx.project.mean_contributions
            )
        },
    },
    InsightRule {
        kind: InsightKind::Concern {
            recommendation: "recruit contributors and seed a list of starter issues",
        },
        applies: |ctx| ctx.project.total_contributors == 0,
        render: |_| "no contributors are registered yet".into(),
    },
    InsightRule {
        kind: InsightKind::Concern {
            recommendation: "pair newcomers with mentors to help them reach the completion goal",
        },
        applies: |ctx| {
            ctx.project.total_contributors > 0
                && ctx.project.completion_rate < WEAK_COMPLETION_RATE
        },
        render: |ctx| {
            format!(
                "only {:.1}% of contributors have reached the completion goal",
                ctx.project.completion_rate
            )
        },
    },
    InsightRule {
        kind: InsightKind::Concern {
            recommendation: "spread reviews and triage work beyond the most active contributors",
        },
        applies: |ctx| {
            ctx.project.mean_contributions > 0.0
                && ctx.project.stdev_contributions
                    > SPREAD_MULTIPLIER * ctx.project.mean_contributions
        },
        render: |ctx| {
            format!(
                "participation is uneven (standard deviation {:.1} vs. average {:.1})",
                ctx.project.stdev_contributions, ctx.project.mean_contributions
            )
        },
    },
];

/// Evaluate the rule table against computed project metrics. Each fired
/// concern contributes one recommendation.
#[must_use]
pub fn insights(project: &ProjectMetrics) -> Insights {
    let ctx = InsightContext {
        project,
        top: project.top_contributors.first(),
    };

    let mut result = Insights::default();
    for rule in RULES {
        if !(rule.applies)(&ctx) {
            continue;
        }

        let text = (rule.render)(&ctx);
        match rule.kind {
            InsightKind::Highlight => result.highlights.push(text),
            InsightKind::Concern { recommendation } => {
                result.concerns.push(text);
                result.recommendations.push(recommendation.into());
            }
        }
    }

    result
}

#[expect(
    clippy::cast_precision_loss,
    reason = "contribution counts are far below 2^52"
)]
const fn to_f64(count: usize) -> f64 {
    count as f64
}
