//! Report field classification: maps raw priority, category, CTR and growth
//! values onto presentation styles. Every function here is pure.

use serde::Serialize;

// ─── Types ──────────────────────────────────────────────────────────────────

/// Known priority tiers. Anything that is not exactly `high`, `medium` or
/// `low` is `Unranked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
    Unranked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityStyle {
    pub tier: PriorityTier,
    pub border_class: &'static str,
    pub badge_class: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconId {
    TrendUp,
    TrendDown,
    Bolt,
    Target,
    Warning,
    CheckCircle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    NeutralPositive,
    Caution,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CtrQuality {
    pub label: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrowthDirection {
    pub icon: IconId,
    pub tone: Tone,
}

impl GrowthDirection {
    pub fn is_up(&self) -> bool {
        self.icon == IconId::TrendUp
    }
}

// ─── Priority ───────────────────────────────────────────────────────────────

const HIGH: PriorityStyle = PriorityStyle {
    tier: PriorityTier::High,
    border_class: "border-red-500 bg-red-500/10",
    badge_class: "bg-red-500/20 text-red-300",
};
const MEDIUM: PriorityStyle = PriorityStyle {
    tier: PriorityTier::Medium,
    border_class: "border-yellow-500 bg-yellow-500/10",
    badge_class: "bg-yellow-500/20 text-yellow-300",
};
const LOW: PriorityStyle = PriorityStyle {
    tier: PriorityTier::Low,
    border_class: "border-green-500 bg-green-500/10",
    badge_class: "bg-green-500/20 text-green-300",
};
const UNRANKED: PriorityStyle = PriorityStyle {
    tier: PriorityTier::Unranked,
    border_class: "border-gray-500 bg-gray-500/10",
    badge_class: "bg-gray-500/20 text-gray-300",
};

/// Card accent and badge classes for a priority. Case-sensitive: `"High"`
/// gets the neutral style.
pub fn priority_style(priority: &str) -> PriorityStyle {
    match priority {
        "high" => HIGH,
        "medium" => MEDIUM,
        "low" => LOW,
        _ => UNRANKED,
    }
}

/// Text shown inside the priority badge.
pub fn priority_badge_text(priority: &str) -> String {
    priority.to_uppercase()
}

// ─── Category ───────────────────────────────────────────────────────────────

/// Icon for a recommendation category. Unlike [`priority_style`] the lookup
/// ignores case.
pub fn category_icon(category: &str) -> IconId {
    match category.to_lowercase().as_str() {
        "performance" => IconId::TrendUp,
        "growth" => IconId::Bolt,
        "engagement" => IconId::Target,
        "budget" => IconId::Warning,
        _ => IconId::CheckCircle,
    }
}

// ─── Metrics ────────────────────────────────────────────────────────────────

/// CTR band thresholds, in percentage points. Lower bounds are inclusive.
pub const CTR_EXCELLENT: f64 = 5.0;
pub const CTR_GOOD: f64 = 3.0;

pub fn ctr_quality(avg_ctr: f64) -> CtrQuality {
    if avg_ctr >= CTR_EXCELLENT {
        CtrQuality {
            label: "Excellent",
            tone: Tone::Positive,
        }
    } else if avg_ctr >= CTR_GOOD {
        CtrQuality {
            label: "Good",
            tone: Tone::NeutralPositive,
        }
    } else {
        CtrQuality {
            label: "Needs work",
            tone: Tone::Caution,
        }
    }
}

/// Direction of a growth delta string. This is a substring test for `+`,
/// not a numeric parse, so `"+0%"` counts as growth.
pub fn growth_direction(growth: Option<&str>) -> GrowthDirection {
    match growth {
        Some(delta) if delta.contains('+') => GrowthDirection {
            icon: IconId::TrendUp,
            tone: Tone::Positive,
        },
        _ => GrowthDirection {
            icon: IconId::TrendDown,
            tone: Tone::Negative,
        },
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
