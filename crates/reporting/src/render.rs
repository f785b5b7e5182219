//! Plain-text rendering of the report layout and the page shell states.

use crate::classifier::{IconId, PriorityTier, Tone};
use crate::shell::ShellState;
use crate::view::{NextStepsSection, RecommendationSection, ReportView};

pub const LOADING_TEXT: &str = "Loading weekly report...";
pub const UNAVAILABLE_TITLE: &str = "No Report Available";

fn icon_glyph(icon: IconId) -> &'static str {
    match icon {
        IconId::TrendUp => "↗",
        IconId::TrendDown => "↘",
        IconId::Bolt => "⚡",
        IconId::Target => "◎",
        IconId::Warning => "⚠",
        IconId::CheckCircle => "✔",
    }
}

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "🔥",
        Tone::NeutralPositive => "✅",
        Tone::Caution | Tone::Negative => "⚠️",
    }
}

fn tier_marker(tier: PriorityTier) -> &'static str {
    match tier {
        PriorityTier::High => "!!!",
        PriorityTier::Medium => "!! ",
        PriorityTier::Low => "!  ",
        PriorityTier::Unranked => "   ",
    }
}

/// Renders whatever the shell currently shows.
pub fn render_state(state: &ShellState) -> Vec<String> {
    match state {
        ShellState::Loading => vec![LOADING_TEXT.to_string()],
        ShellState::Loaded(report) => render_report(&ReportView::compose(report)),
        ShellState::Failed(err) => vec![
            format!("{} {UNAVAILABLE_TITLE}", icon_glyph(IconId::Warning)),
            err.user_message().to_string(),
        ],
    }
}

pub fn render_report(view: &ReportView) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(view.header.title.to_string());
    lines.push(view.header.period.clone());
    lines.push(String::new());

    for tile in &view.tiles {
        let mut line = format!("{:<14} {}", tile.label, tile.value);
        if let Some(trend) = &tile.trend {
            line.push(' ');
            line.push_str(icon_glyph(trend.icon));
        }
        if let Some(change) = &tile.change {
            line.push_str(&format!(" ({})", change.text));
        }
        lines.push(line);
    }
    lines.push(String::new());

    lines.push("Key Insights".to_string());
    for card in &view.insights {
        let mut line = format!("  {:<18} {}", card.label, card.value);
        if let Some(quality) = &card.quality {
            line.push_str(&format!("  {} {}", tone_marker(quality.tone), quality.label));
        }
        lines.push(line);
        if let Some(caption) = card.caption.as_deref().filter(|c| !c.is_empty()) {
            lines.push(format!("  {:<18} {caption}", ""));
        }
    }
    lines.push(String::new());

    lines.push("Recommendations".to_string());
    match &view.recommendations {
        RecommendationSection::AllClear { message } => {
            lines.push(format!("  {} {message}", icon_glyph(IconId::CheckCircle)));
        }
        RecommendationSection::Cards { cards } => {
            for card in cards {
                let mut head = format!(
                    "  {} {} [{}] {}",
                    tier_marker(card.style.tier),
                    icon_glyph(card.icon),
                    card.badge,
                    card.title
                );
                if let Some(impact) = &card.impact {
                    head.push_str(&format!(" ({impact})"));
                }
                lines.push(head);
                lines.push(format!("        {}", card.description));
                if let Some(metric) = &card.metric {
                    lines.push(format!(
                        "        {}: Current: {}  Target: {}",
                        metric.metric, metric.current, metric.target
                    ));
                }
                if let Some(action) = &card.action {
                    lines.push(format!("        {} {action}", icon_glyph(IconId::Bolt)));
                }
            }
        }
    }
    lines.push(String::new());

    lines.push("Next Steps".to_string());
    match &view.next_steps {
        NextStepsSection::Empty { message } => lines.push(format!("  {message}")),
        NextStepsSection::Steps { steps } => {
            for step in steps {
                lines.push(format!("  {}. {}", step.number, step.text));
            }
        }
    }

    if let Some(footer) = &view.footer {
        lines.push(String::new());
        lines.push(format!("{} {}", icon_glyph(IconId::Warning), footer.message));
    }

    lines
}
