//! Public tender notices matched to the company profile.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::{matches_query, ymd, Urgency};
use crate::config::DeadlineConfig;

/// Eligibility scores at or above this count as a strong fit.
pub const HIGH_ELIGIBILITY_SCORE: u8 = 90;

/// How well a tender matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TenderStatus {
    /// Meets the requirements.
    Eligible,
    /// Unusually strong fit.
    HighMatch,
    /// Gaps that need a human look.
    ReviewNeeded,
}

impl fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eligible => write!(f, "eligible"),
            Self::HighMatch => write!(f, "high match"),
            Self::ReviewNeeded => write!(f, "review needed"),
        }
    }
}

/// A tender notice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tender {
    /// Record id.
    pub id: u32,
    /// Tender title.
    pub title: &'static str,
    /// Issuing organization.
    pub organization: &'static str,
    /// Contract value.
    pub value: f64,
    /// Submission deadline.
    pub deadline: NaiveDate,
    /// Sector.
    pub industry: &'static str,
    /// Scope summary.
    pub description: &'static str,
    /// Fit score, in percent.
    pub eligibility_score: u8,
    /// Bidder requirements.
    pub requirements: Vec<&'static str>,
    /// Expected deliverables.
    pub deliverables: Vec<&'static str>,
    /// Match status.
    pub status: TenderStatus,
    /// Why we would (or would not) win.
    pub competitive_advantage: &'static str,
    /// Expected number of competing bids.
    pub estimated_competitors: u32,
    /// Estimated chance of winning, in percent.
    pub win_probability: u8,
}

impl Tender {
    /// Deadline urgency relative to the configured "today".
    #[must_use]
    pub fn urgency(&self, deadlines: &DeadlineConfig) -> Urgency {
        Urgency::classify(self.deadline, deadlines)
    }

    /// Contract value weighted by win probability.
    #[must_use]
    pub fn expected_value(&self) -> f64 {
        self.value * f64::from(self.win_probability) / 100.0
    }
}

/// Search and status filter for tender notices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenderFilter {
    /// Matched against title and organization.
    pub query: String,
    /// `None` means all statuses.
    pub status: Option<TenderStatus>,
}

impl TenderFilter {
    /// Whether `tender` passes this filter.
    #[must_use]
    pub fn matches(&self, tender: &Tender) -> bool {
        self.status.map_or(true, |s| s == tender.status)
            && matches_query(&self.query, &[tender.title, tender.organization])
    }
}

/// Headline numbers for the tender view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TenderSummary {
    /// Notices found.
    pub found: usize,
    /// Notices with a high eligibility score.
    pub high_eligibility: usize,
    /// Sum of contract values.
    pub pipeline_value: f64,
    /// Sum of probability-weighted values.
    pub expected_value: f64,
}

/// The matched tender notices.
#[must_use]
pub fn tender_notices() -> Vec<Tender> {
    vec![
        Tender {
            id: 1,
            title: "Digital Transformation Platform for Municipal Services",
            organization: "City of Austin",
            value: 250_000.0,
            deadline: ymd(2024, 2, 15),
            industry: "Government/Public Sector",
            description: "Development of a comprehensive digital platform to streamline municipal services including permit applications, utility billing, and citizen services portal.",
            eligibility_score: 92,
            requirements: vec![
                "Small business certification",
                "Local business preference",
                "Previous government experience",
            ],
            deliverables: vec![
                "Web platform development",
                "Mobile app",
                "API integration",
                "2-year maintenance",
            ],
            status: TenderStatus::Eligible,
            competitive_advantage: "Strong match for SaaS expertise and operations management focus",
            estimated_competitors: 12,
            win_probability: 78,
        },
        Tender {
            id: 2,
            title: "AI-Powered Inventory Management System",
            organization: "Texas Department of Transportation",
            value: 180_000.0,
            deadline: ymd(2024, 1, 30),
            industry: "Transportation/Logistics",
            description: "Implementation of machine learning algorithms for predictive inventory management across multiple depot locations.",
            eligibility_score: 88,
            requirements: vec![
                "AI/ML experience",
                "Scalable architecture",
                "Security clearance (obtainable)",
            ],
            deliverables: vec![
                "ML model development",
                "Dashboard interface",
                "Training and documentation",
            ],
            status: TenderStatus::Eligible,
            competitive_advantage: "AI prediction capabilities align perfectly with offering",
            estimated_competitors: 8,
            win_probability: 85,
        },
        Tender {
            id: 3,
            title: "Small Business Financial Management Tools",
            organization: "Austin Economic Development",
            value: 95_000.0,
            deadline: ymd(2024, 3, 1),
            industry: "Economic Development",
            description: "Development of financial planning and management tools specifically designed for small businesses and startups.",
            eligibility_score: 95,
            requirements: vec!["Local business", "FinTech experience", "Small business focus"],
            deliverables: vec![
                "Financial planning software",
                "Educational content",
                "User training",
            ],
            status: TenderStatus::HighMatch,
            competitive_advantage: "Perfect alignment with financial forecasting and what-if scenarios",
            estimated_competitors: 5,
            win_probability: 91,
        },
        Tender {
            id: 4,
            title: "Enterprise Resource Planning Integration",
            organization: "University of Texas System",
            value: 420_000.0,
            deadline: ymd(2024, 2, 28),
            industry: "Education",
            description: "Integration of multiple ERP systems across university campuses with centralized reporting and analytics.",
            eligibility_score: 65,
            requirements: vec![
                "Higher education experience",
                "Large-scale integration",
                "Certified partners",
            ],
            deliverables: vec!["System integration", "Data migration", "Training programs"],
            status: TenderStatus::ReviewNeeded,
            competitive_advantage: "Limited experience in higher education sector",
            estimated_competitors: 15,
            win_probability: 45,
        },
    ]
}

/// Tenders passing `filter`, in their original order.
#[must_use]
pub fn filter_tenders<'a>(tenders: &'a [Tender], filter: &TenderFilter) -> Vec<&'a Tender> {
    tenders.iter().filter(|t| filter.matches(t)).collect()
}

/// Summarize the tender pipeline.
#[must_use]
pub fn summarize(tenders: &[Tender]) -> TenderSummary {
    TenderSummary {
        found: tenders.len(),
        high_eligibility: tenders
            .iter()
            .filter(|t| t.eligibility_score >= HIGH_ELIGIBILITY_SCORE)
            .count(),
        pipeline_value: tenders.iter().map(|t| t.value).sum(),
        expected_value: tenders.iter().map(Tender::expected_value).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let summary = summarize(&tender_notices());

        assert_eq!(summary.found, 4);
        assert_eq!(summary.high_eligibility, 2);
        assert_eq!(summary.pipeline_value, 945_000.0);
        // 195000 + 153000 + 86450 + 189000
        assert!((summary.expected_value - 623_450.0).abs() < 1e-6);
    }

    #[test]
    fn test_filter_by_status() {
        let tenders = tender_notices();
        let filter = TenderFilter {
            query: String::new(),
            status: Some(TenderStatus::Eligible),
        };
        let ids: Vec<_> = filter_tenders(&tenders, &filter).iter().map(|t| t.id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn test_filter_by_organization() {
        let tenders = tender_notices();
        let filter = TenderFilter {
            query: "austin".to_string(),
            status: None,
        };
        let ids: Vec<_> = filter_tenders(&tenders, &filter).iter().map(|t| t.id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn test_filter_no_match() {
        let tenders = tender_notices();
        let filter = TenderFilter {
            query: "austin".to_string(),
            status: Some(TenderStatus::ReviewNeeded),
        };
        assert!(filter_tenders(&tenders, &filter).is_empty());
    }

    #[test]
    fn test_urgency() {
        let deadlines = DeadlineConfig {
            reference_date: Some(ymd(2024, 1, 25)),
            ..DeadlineConfig::default()
        };
        let tenders = tender_notices();
        let urgencies: Vec<_> = tenders.iter().map(|t| t.urgency(&deadlines)).collect();
        assert_eq!(
            urgencies,
            [Urgency::Normal, Urgency::Urgent, Urgency::Normal, Urgency::Normal]
        );
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&TenderStatus::ReviewNeeded).unwrap();
        assert_eq!(json, r#""review-needed""#);
        assert_eq!(TenderStatus::HighMatch.to_string(), "high match");
    }
}
