//! Weekly report layout: composes a fetched [`Report`] and the classifier
//! outputs into a fixed, renderable structure.
//!
//! Composition is deterministic and recomputed on every call; nothing here is
//! cached between renders.

use advision_core::report::{Recommendation, Report};
use serde::Serialize;

use crate::classifier::{
    category_icon, ctr_quality, growth_direction, priority_badge_text, priority_style, CtrQuality,
    GrowthDirection, IconId, PriorityStyle,
};

pub const REPORT_TITLE: &str = "Weekly Performance Report";
pub const ALL_CLEAR_MESSAGE: &str = "Everything looks great! Keep up the good work.";
pub const NO_NEXT_STEPS_MESSAGE: &str = "No action items at this time";
pub const COMPARISON_DISCLAIMER: &str = "Not enough historical data for week-over-week comparison. \
     Continue creating campaigns to see trend analysis.";

// ─── Types ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub header: ReportHeader,
    pub tiles: Vec<SummaryTile>,
    pub insights: Vec<InsightCard>,
    pub recommendations: RecommendationSection,
    pub next_steps: NextStepsSection,
    pub footer: Option<FooterNote>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportHeader {
    pub title: &'static str,
    pub period: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Campaigns,
    AdsGenerated,
    Images,
    Active,
    Engagement,
    /// The one non-numeric tile: shows the growth string verbatim, empty when absent.
    Growth,
}

impl TileKind {
    /// Display order of the summary strip.
    pub const ALL: [TileKind; 6] = [
        TileKind::Campaigns,
        TileKind::AdsGenerated,
        TileKind::Images,
        TileKind::Active,
        TileKind::Engagement,
        TileKind::Growth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TileKind::Campaigns => "Campaigns",
            TileKind::AdsGenerated => "Ads Generated",
            TileKind::Images => "Images",
            TileKind::Active => "Active",
            TileKind::Engagement => "Engagement",
            TileKind::Growth => "Growth",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTile {
    pub kind: TileKind,
    pub label: &'static str,
    pub value: String,
    /// Delta badge shown next to the value (Engagement only).
    pub change: Option<ChangeBadge>,
    /// Trend arrow (Growth only).
    pub trend: Option<GrowthDirection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeBadge {
    pub text: String,
    pub direction: GrowthDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    TopPlatform,
    TopCampaign,
    AverageCtr,
    Impressions,
    Conversions,
    Roas,
}

impl InsightKind {
    pub fn label(self) -> &'static str {
        match self {
            InsightKind::TopPlatform => "Top Platform",
            InsightKind::TopCampaign => "Top Campaign",
            InsightKind::AverageCtr => "Average CTR",
            InsightKind::Impressions => "Total Impressions",
            InsightKind::Conversions => "Total Conversions",
            InsightKind::Roas => "ROAS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightCard {
    pub kind: InsightKind,
    pub label: &'static str,
    pub value: String,
    pub caption: Option<String>,
    pub quality: Option<CtrQuality>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationCard {
    pub style: PriorityStyle,
    pub badge: String,
    pub icon: IconId,
    pub impact: Option<String>,
    pub title: String,
    pub description: String,
    pub metric: Option<MetricBlock>,
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricBlock {
    pub metric: String,
    pub current: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecommendationSection {
    Cards { cards: Vec<RecommendationCard> },
    AllClear { message: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextStep {
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NextStepsSection {
    Steps { steps: Vec<NextStep> },
    Empty { message: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterNote {
    pub message: &'static str,
}

// ─── Composition ────────────────────────────────────────────────────────────

impl ReportView {
    pub fn compose(report: &Report) -> Self {
        Self {
            header: ReportHeader {
                title: REPORT_TITLE,
                period: report.period.clone(),
            },
            tiles: summary_tiles(report),
            insights: insight_cards(report),
            recommendations: recommendation_section(&report.recommendations),
            next_steps: next_steps_section(&report.next_steps),
            footer: report
                .needs_comparison_disclaimer()
                .then_some(FooterNote {
                    message: COMPARISON_DISCLAIMER,
                }),
        }
    }

    pub fn tile(&self, kind: TileKind) -> Option<&SummaryTile> {
        self.tiles.iter().find(|t| t.kind == kind)
    }

    pub fn insight(&self, kind: InsightKind) -> Option<&InsightCard> {
        self.insights.iter().find(|c| c.kind == kind)
    }
}

fn summary_tiles(report: &Report) -> Vec<SummaryTile> {
    let summary = &report.summary;
    let growth = summary.engagement_growth.as_deref();

    TileKind::ALL
        .iter()
        .map(|&kind| {
            let mut tile = SummaryTile {
                kind,
                label: kind.label(),
                value: String::new(),
                change: None,
                trend: None,
            };
            match kind {
                TileKind::Campaigns => tile.value = count(summary.campaigns_created),
                TileKind::AdsGenerated => tile.value = count(summary.ads_generated),
                TileKind::Images => tile.value = count(summary.images_generated),
                TileKind::Active => tile.value = count(summary.active_campaigns),
                TileKind::Engagement => {
                    tile.value = grouped_count(summary.total_engagement);
                    tile.change = growth.filter(|g| !g.is_empty()).map(|g| ChangeBadge {
                        text: g.to_string(),
                        direction: growth_direction(Some(g)),
                    });
                }
                TileKind::Growth => {
                    tile.value = growth.unwrap_or_default().to_string();
                    tile.trend = Some(growth_direction(growth));
                }
            }
            tile
        })
        .collect()
}

fn insight_cards(report: &Report) -> Vec<InsightCard> {
    let insights = &report.insights;
    let mut cards = Vec::with_capacity(6);

    cards.push(InsightCard {
        kind: InsightKind::TopPlatform,
        label: InsightKind::TopPlatform.label(),
        value: insights.top_performing_platform.clone().unwrap_or_default(),
        caption: Some("Best performing channel".into()),
        quality: None,
    });

    if let Some(name) = insights.top_campaign() {
        cards.push(InsightCard {
            kind: InsightKind::TopCampaign,
            label: InsightKind::TopCampaign.label(),
            value: name.to_string(),
            caption: Some(format!(
                "Score: {}/100",
                insights.top_campaign_score.unwrap_or(0.0)
            )),
            quality: None,
        });
    }

    let avg_ctr = insights.avg_ctr.unwrap_or(0.0);
    cards.push(InsightCard {
        kind: InsightKind::AverageCtr,
        label: InsightKind::AverageCtr.label(),
        value: format!("{avg_ctr}%"),
        caption: None,
        quality: Some(ctr_quality(avg_ctr)),
    });

    cards.push(InsightCard {
        kind: InsightKind::Impressions,
        label: InsightKind::Impressions.label(),
        value: grouped_count(insights.total_impressions),
        caption: insights.impression_growth.clone(),
        quality: None,
    });

    cards.push(InsightCard {
        kind: InsightKind::Conversions,
        label: InsightKind::Conversions.label(),
        value: grouped_count(insights.total_conversions),
        caption: insights.conversion_growth.clone(),
        quality: None,
    });

    if let Some(roas) = insights.applicable_roas() {
        cards.push(InsightCard {
            kind: InsightKind::Roas,
            label: InsightKind::Roas.label(),
            value: format!("{roas}x"),
            caption: Some("Return on ad spend".into()),
            quality: None,
        });
    }

    cards
}

fn recommendation_section(recommendations: &[Recommendation]) -> RecommendationSection {
    if recommendations.is_empty() {
        return RecommendationSection::AllClear {
            message: ALL_CLEAR_MESSAGE,
        };
    }
    RecommendationSection::Cards {
        cards: recommendations.iter().map(recommendation_card).collect(),
    }
}

fn recommendation_card(rec: &Recommendation) -> RecommendationCard {
    let priority = rec.priority.as_deref().unwrap_or_default();
    let category = rec.category.as_deref().unwrap_or_default();

    RecommendationCard {
        style: priority_style(priority),
        badge: priority_badge_text(priority),
        icon: category_icon(category),
        impact: non_empty(rec.impact.as_deref()),
        title: rec.title.clone(),
        description: rec.description.clone(),
        metric: non_empty(rec.metric.as_deref()).map(|metric| MetricBlock {
            metric,
            current: display_value(rec.current.as_ref()),
            target: display_value(rec.target.as_ref()),
        }),
        action: non_empty(rec.action.as_deref()),
    }
}

fn next_steps_section(steps: &[String]) -> NextStepsSection {
    if steps.is_empty() {
        return NextStepsSection::Empty {
            message: NO_NEXT_STEPS_MESSAGE,
        };
    }
    NextStepsSection::Steps {
        steps: steps
            .iter()
            .enumerate()
            .map(|(i, text)| NextStep {
                number: i + 1,
                text: text.clone(),
            })
            .collect(),
    }
}

// ─── Formatting helpers ─────────────────────────────────────────────────────

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_string()
}

fn grouped_count(value: Option<u64>) -> String {
    group_thousands(value.unwrap_or(0))
}

/// Formats an integer with `,` every three digits (`125000` → `125,000`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn display_value(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
