//! Cheaper tool alternatives, category suggestions and industry trends.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use super::mean;

/// Number of SaaS subscriptions the recommendations were drawn from.
pub const TOOLS_ANALYZED: usize = 23;

/// A cheaper replacement for a tool already in use. Costs are yearly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolRecommendation {
    /// Recommendation id; the key for dismissal.
    pub id: u32,
    /// Tool in use today.
    pub current: &'static str,
    /// Yearly cost of the current tool.
    pub current_cost: f64,
    /// Suggested replacement.
    pub alternative: &'static str,
    /// Yearly cost of the replacement.
    pub alternative_cost: f64,
    /// Yearly savings from switching.
    pub savings: f64,
    /// Confidence in the suggestion, in percent.
    pub confidence: u8,
    /// Why the switch makes sense.
    pub reason: &'static str,
    /// Headline features of the replacement.
    pub features: Vec<&'static str>,
    /// User base of the replacement.
    pub users: &'static str,
    /// Review rating out of five.
    pub rating: f64,
}

impl ToolRecommendation {
    /// Savings as a share of the current cost; `None` for a free tool.
    #[must_use]
    pub fn savings_percent(&self) -> Option<f64> {
        (self.current_cost != 0.0).then(|| self.savings / self.current_cost * 100.0)
    }
}

/// A suggested consolidation for a whole category of tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRecommendation {
    /// Tool category.
    pub category: &'static str,
    /// Tools in use for it today.
    pub current: Vec<&'static str>,
    /// Suggested tool.
    pub recommendation: &'static str,
    /// Why.
    pub reason: &'static str,
    /// Yearly savings; negative when the suggestion costs more.
    pub potential_savings: f64,
    /// Share of similar startups using the suggestion, in percent.
    pub adoption_rate: u8,
}

impl CategoryRecommendation {
    /// Whether switching saves money.
    #[must_use]
    pub fn saves_money(&self) -> bool {
        self.potential_savings > 0.0
    }
}

/// A tool gaining adoption among similar-stage startups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryTrend {
    /// Tool name.
    pub tool: &'static str,
    /// Tool category.
    pub category: &'static str,
    /// Trend score out of 100.
    pub trend_score: u8,
    /// Year-on-year adoption growth, in percent.
    pub adoption_growth: u32,
    /// One-line description.
    pub description: &'static str,
}

/// Headline numbers for the recommendations view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecommendationSummary {
    /// Yearly savings across the active recommendations.
    pub potential_savings: f64,
    /// Recommendations not dismissed.
    pub active: usize,
    /// Subscriptions analyzed.
    pub tools_analyzed: usize,
    /// Mean confidence of the active recommendations.
    pub average_confidence: Option<f64>,
}

/// Tool recommendations with the ids the user has dismissed.
///
/// [`dismiss`](Self::dismiss) returns a new value and leaves `self` as is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    tools: Vec<ToolRecommendation>,
    dismissed: BTreeSet<u32>,
}

impl Recommendations {
    /// Wrap `tools` with nothing dismissed.
    #[must_use]
    pub fn new(tools: Vec<ToolRecommendation>) -> Self {
        Self {
            tools,
            dismissed: BTreeSet::new(),
        }
    }

    /// Hide the recommendation with `id`. Unknown ids are recorded but
    /// match nothing.
    #[must_use]
    pub fn dismiss(&self, id: u32) -> Self {
        debug!(id, "dismissed recommendation");
        let mut dismissed = self.dismissed.clone();
        dismissed.insert(id);
        Self {
            tools: self.tools.clone(),
            dismissed,
        }
    }

    /// Whether `id` has been dismissed.
    #[must_use]
    pub fn is_dismissed(&self, id: u32) -> bool {
        self.dismissed.contains(&id)
    }

    /// Recommendations not dismissed, in order.
    pub fn active(&self) -> impl Iterator<Item = &ToolRecommendation> {
        self.tools.iter().filter(|t| !self.is_dismissed(t.id))
    }

    /// Yearly savings across the active recommendations.
    #[must_use]
    pub fn total_potential_savings(&self) -> f64 {
        self.active().map(|t| t.savings).sum()
    }

    /// Headline numbers.
    #[must_use]
    pub fn summarize(&self) -> RecommendationSummary {
        RecommendationSummary {
            potential_savings: self.total_potential_savings(),
            active: self.active().count(),
            tools_analyzed: TOOLS_ANALYZED,
            average_confidence: mean(self.active().map(|t| f64::from(t.confidence))),
        }
    }
}

impl Default for Recommendations {
    fn default() -> Self {
        Self::new(tool_recommendations())
    }
}

/// The tool-for-tool replacements.
#[must_use]
pub fn tool_recommendations() -> Vec<ToolRecommendation> {
    vec![
        ToolRecommendation {
            id: 1,
            current: "Slack Business+",
            current_cost: 960.0,
            alternative: "Microsoft Teams",
            alternative_cost: 600.0,
            savings: 360.0,
            confidence: 88,
            reason: "Similar features, better integration with existing Microsoft tools",
            features: vec![
                "Video calls up to 1000 people",
                "Unlimited chat history",
                "Advanced security",
            ],
            users: "2.1M companies",
            rating: 4.4,
        },
        ToolRecommendation {
            id: 2,
            current: "Figma Pro",
            current_cost: 144.0,
            alternative: "Adobe XD",
            alternative_cost: 120.0,
            savings: 24.0,
            confidence: 72,
            reason: "Adobe Creative Cloud integration, similar design capabilities",
            features: vec!["Advanced prototyping", "Cloud sync", "Team collaboration"],
            users: "500K+ designers",
            rating: 4.2,
        },
        ToolRecommendation {
            id: 3,
            current: "AWS EC2",
            current_cost: 280.0,
            alternative: "DigitalOcean Droplets",
            alternative_cost: 160.0,
            savings: 120.0,
            confidence: 85,
            reason: "Simpler pricing, suitable for current scale, excellent performance",
            features: vec!["SSD storage", "One-click apps", "Global data centers"],
            users: "600K+ developers",
            rating: 4.6,
        },
    ]
}

/// Category-level suggestions.
#[must_use]
pub fn category_recommendations() -> Vec<CategoryRecommendation> {
    vec![
        CategoryRecommendation {
            category: "Project Management",
            current: vec!["Notion Pro", "Trello Business"],
            recommendation: "Linear",
            reason: "Built for modern development teams, better issue tracking",
            potential_savings: 180.0,
            adoption_rate: 92,
        },
        CategoryRecommendation {
            category: "Analytics",
            current: vec!["Google Analytics", "Mixpanel"],
            recommendation: "PostHog",
            reason: "Open source, privacy-focused, all-in-one product analytics",
            potential_savings: 400.0,
            adoption_rate: 78,
        },
        CategoryRecommendation {
            category: "Customer Support",
            current: vec!["Zendesk"],
            recommendation: "Intercom",
            reason: "Better user engagement features, modern interface",
            potential_savings: -50.0,
            adoption_rate: 85,
        },
    ]
}

/// Tools trending among similar-stage startups, highest score first.
#[must_use]
pub fn industry_trends() -> Vec<IndustryTrend> {
    vec![
        IndustryTrend {
            tool: "Vercel",
            category: "Deployment",
            trend_score: 95,
            adoption_growth: 147,
            description: "Leading platform for frontend deployment with excellent DX",
        },
        IndustryTrend {
            tool: "Supabase",
            category: "Backend-as-a-Service",
            trend_score: 92,
            adoption_growth: 203,
            description: "Open source Firebase alternative with PostgreSQL",
        },
        IndustryTrend {
            tool: "Tailwind CSS",
            category: "CSS Framework",
            trend_score: 89,
            adoption_growth: 85,
            description: "Utility-first CSS framework for rapid UI development",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_savings_with_nothing_dismissed() {
        let recs = Recommendations::default();
        assert_eq!(recs.total_potential_savings(), 504.0);
        assert_eq!(recs.active().count(), 3);
    }

    #[test]
    fn test_dismiss_returns_new_value() {
        let recs = Recommendations::default();
        let updated = recs.dismiss(1);

        assert_eq!(updated.total_potential_savings(), 144.0);
        assert!(updated.is_dismissed(1));
        assert!(!recs.is_dismissed(1));
        assert_eq!(recs.total_potential_savings(), 504.0);

        let ids: Vec<_> = updated.active().map(|t| t.id).collect();
        assert_eq!(ids, [2, 3]);
    }

    #[test]
    fn test_dismiss_everything() {
        let recs = Recommendations::default().dismiss(1).dismiss(2).dismiss(3);
        assert_eq!(recs.total_potential_savings(), 0.0);

        let summary = recs.summarize();
        assert_eq!(summary.active, 0);
        assert_eq!(summary.average_confidence, None);
    }

    #[test]
    fn test_dismiss_unknown_id_changes_nothing_visible() {
        let recs = Recommendations::default().dismiss(99);
        assert_eq!(recs.total_potential_savings(), 504.0);
    }

    #[test]
    fn test_summary() {
        let summary = Recommendations::default().dismiss(2).summarize();
        assert_eq!(summary.potential_savings, 480.0);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.tools_analyzed, TOOLS_ANALYZED);
        assert_eq!(summary.average_confidence, Some(86.5));
    }

    #[test]
    fn test_savings_percent() {
        let tools = tool_recommendations();
        let slack = tools[0].savings_percent().unwrap();
        assert!((slack - 37.5).abs() < 1e-9);
        assert_eq!(tools[1].savings_percent().map(f64::round), Some(17.0));
    }

    #[test]
    fn test_category_savings_sign() {
        let saving: Vec<_> = category_recommendations()
            .iter()
            .map(CategoryRecommendation::saves_money)
            .collect();
        assert_eq!(saving, [true, true, false]);
    }

    #[test]
    fn test_trends_ordered_by_score() {
        let scores: Vec<_> = industry_trends().iter().map(|t| t.trend_score).collect();
        assert_eq!(scores, [95, 92, 89]);
    }
}
