//! Weekly report payload as served by `GET /reports/weekly/`.
//!
//! The backend computes everything; this side only deserializes and never
//! mutates. Optional fields deserialize leniently (absent and `null` are the
//! same) so missing data degrades to documented fallbacks instead of errors.

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel the backend sends when no campaign qualifies as "top".
pub const NO_CAMPAIGN: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub period: String,
    pub summary: ReportSummary,
    pub insights: ReportInsights,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<Recommendation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub comparison_available: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(default, deserialize_with = "lenient_count")]
    pub campaigns_created: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub ads_generated: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub images_generated: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub active_campaigns: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_engagement: Option<u64>,
    #[serde(default)]
    pub engagement_growth: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportInsights {
    #[serde(default)]
    pub top_performing_platform: Option<String>,
    #[serde(default)]
    pub top_campaign_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub top_campaign_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub avg_ctr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_impressions: Option<u64>,
    #[serde(default)]
    pub impression_growth: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_conversions: Option<u64>,
    #[serde(default)]
    pub conversion_growth: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub roas: Option<f64>,
}

impl ReportInsights {
    /// The top campaign name, unless absent or the "none" sentinel.
    pub fn top_campaign(&self) -> Option<&str> {
        self.top_campaign_name
            .as_deref()
            .filter(|name| *name != NO_CAMPAIGN)
    }

    /// ROAS when applicable (strictly positive).
    pub fn applicable_roas(&self) -> Option<f64> {
        self.roas.filter(|roas| *roas > 0.0)
    }
}

/// A single suggestion. `priority` and `category` are kept as raw strings:
/// the classifier decides how unknown values look, deserialization never
/// rejects them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub current: Option<serde_json::Value>,
    #[serde(default)]
    pub target: Option<serde_json::Value>,
    #[serde(default)]
    pub action: Option<String>,
}

impl Report {
    /// Whether the week-over-week disclaimer applies. Only an explicit
    /// `false` triggers it; an absent flag does not.
    pub fn needs_comparison_disclaimer(&self) -> bool {
        self.comparison_available == Some(false)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any JSON number, or a string holding one. Everything else is `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

/// Counts arrive as integers, but floats and numeric strings are tolerated and
/// rounded. Negative or non-finite values are treated as missing.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| match v.as_u64() {
        Some(n) => Some(n),
        None => number_from_value(v)
            .filter(|n| *n >= 0.0 && *n <= u64::MAX as f64)
            .map(|n| n.round() as u64),
    }))
}

fn number_from_value(value: &serde_json::Value) -> Option<f64> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAYLOAD: &str = r#"{
        "period": "Oct 6 - Oct 12, 2026",
        "summary": {
            "campaigns_created": 4,
            "ads_generated": 18,
            "images_generated": 9,
            "active_campaigns": 3,
            "total_engagement": 125000,
            "engagement_growth": "+8%"
        },
        "insights": {
            "top_performing_platform": "Instagram",
            "top_campaign_name": "Summer Sale",
            "top_campaign_score": 87,
            "avg_ctr": 4.2,
            "total_impressions": 250000,
            "impression_growth": "+15% vs last week",
            "total_conversions": 1200,
            "conversion_growth": "-2% vs last week",
            "roas": 3.4
        },
        "recommendations": [
            {
                "priority": "high",
                "category": "Budget",
                "title": "Rebalance spend",
                "description": "Facebook CPC is rising.",
                "impact": "High impact",
                "metric": "CPC",
                "current": "$1.20",
                "target": "$0.90",
                "action": "Adjust budget",
                "extra_field": true
            }
        ],
        "next_steps": ["Launch retargeting", "Refresh creatives"],
        "comparison_available": true
    }"#;

    #[test]
    fn test_full_payload() {
        let report: Report = serde_json::from_str(FULL_PAYLOAD).unwrap();
        assert_eq!(report.period, "Oct 6 - Oct 12, 2026");
        assert_eq!(report.summary.total_engagement, Some(125_000));
        assert_eq!(report.insights.top_campaign(), Some("Summer Sale"));
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].category.as_deref(), Some("Budget"));
        assert_eq!(report.next_steps, vec!["Launch retargeting", "Refresh creatives"]);
        assert!(!report.needs_comparison_disclaimer());
    }

    #[test]
    fn test_minimal_payload_uses_fallbacks() {
        let report: Report = serde_json::from_str(
            r#"{"period": "This week", "summary": {"total_engagement": null}, "insights": {},
                "recommendations": null}"#,
        )
        .unwrap();
        assert!(report.recommendations.is_empty());
        assert!(report.next_steps.is_empty());
        assert_eq!(report.summary.total_engagement, None);
        assert_eq!(report.comparison_available, None);
        assert!(!report.needs_comparison_disclaimer());
    }

    #[test]
    fn test_numbers_decode_leniently() {
        let report: Report = serde_json::from_str(
            r#"{"period": "w",
                "summary": {"total_engagement": 1250.0, "campaigns_created": "7",
                            "ads_generated": "lots", "images_generated": -3,
                            "active_campaigns": true},
                "insights": {"top_campaign_score": 87.5, "avg_ctr": "4.2",
                             "total_impressions": "1200.4", "roas": {}}}"#,
        )
        .unwrap();
        assert_eq!(report.summary.total_engagement, Some(1250));
        assert_eq!(report.summary.campaigns_created, Some(7));
        assert_eq!(report.summary.ads_generated, None);
        assert_eq!(report.summary.images_generated, None);
        assert_eq!(report.summary.active_campaigns, None);
        assert_eq!(report.insights.top_campaign_score, Some(87.5));
        assert_eq!(report.insights.avg_ctr, Some(4.2));
        assert_eq!(report.insights.total_impressions, Some(1200));
        assert_eq!(report.insights.roas, None);
    }

    #[test]
    fn test_missing_summary_is_rejected() {
        let result: Result<Report, _> =
            serde_json::from_str(r#"{"period": "This week", "insights": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_priority_is_accepted() {
        let rec: Recommendation =
            serde_json::from_str(r#"{"priority": "URGENT", "title": "t", "description": "d"}"#)
                .unwrap();
        assert_eq!(rec.priority.as_deref(), Some("URGENT"));
        assert_eq!(rec.category, None);
    }

    #[test]
    fn test_top_campaign_sentinel() {
        let insights = ReportInsights {
            top_campaign_name: Some(NO_CAMPAIGN.into()),
            ..Default::default()
        };
        assert_eq!(insights.top_campaign(), None);
        assert_eq!(ReportInsights::default().top_campaign(), None);
    }

    #[test]
    fn test_roas_applicability() {
        let mut insights = ReportInsights::default();
        assert_eq!(insights.applicable_roas(), None);
        insights.roas = Some(0.0);
        assert_eq!(insights.applicable_roas(), None);
        insights.roas = Some(2.5);
        assert_eq!(insights.applicable_roas(), Some(2.5));
    }

    #[test]
    fn test_disclaimer_only_on_explicit_false() {
        let mut report: Report = serde_json::from_str(FULL_PAYLOAD).unwrap();
        report.comparison_available = Some(false);
        assert!(report.needs_comparison_disclaimer());
        report.comparison_available = None;
        assert!(!report.needs_comparison_disclaimer());
    }
}
