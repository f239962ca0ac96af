//! Matched events, funding programmes and the application tracker.

use chrono::NaiveDate;
use serde::Serialize;

use super::{matches_query, ymd, Urgency};
use crate::config::DeadlineConfig;

/// Match scores at or above this count as a strong fit.
pub const HIGH_MATCH_SCORE: u8 = 85;

/// How registration works for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// Open registration.
    Available,
    /// Entry by application only.
    Application,
}

/// What it costs to attend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum Admission {
    /// Ticket price.
    Fee(f64),
    /// Free, invitation only.
    ByInvitation,
}

/// Who an event is aimed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Eligibility {
    /// Company stage.
    pub stage: &'static str,
    /// Industry.
    pub industry: &'static str,
    /// Revenue band.
    pub revenue: &'static str,
    /// Geography.
    pub location: &'static str,
}

/// An event matched to the company profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Record id.
    pub id: u32,
    /// Event name.
    pub name: &'static str,
    /// Event type, e.g. "Conference".
    pub kind: &'static str,
    /// Venue.
    pub location: &'static str,
    /// Event date.
    pub date: NaiveDate,
    /// Registration deadline.
    pub deadline: NaiveDate,
    /// Summary.
    pub description: &'static str,
    /// Fit score, in percent.
    pub match_score: u8,
    /// Target audience.
    pub eligibility: Eligibility,
    /// What attending brings.
    pub benefits: Vec<&'static str>,
    /// Registration mode.
    pub registration: RegistrationStatus,
    /// Attendance cost.
    pub admission: Admission,
    /// Whether the registration form can be pre-filled.
    pub autofill_ready: bool,
    /// Why it fits.
    pub insights: &'static str,
}

impl Event {
    /// Deadline urgency relative to the configured "today".
    #[must_use]
    pub fn urgency(&self, deadlines: &DeadlineConfig) -> Urgency {
        Urgency::classify(self.deadline, deadlines)
    }
}

/// An accelerator, competition or grant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingOpportunity {
    /// Record id.
    pub id: u32,
    /// Programme name.
    pub name: &'static str,
    /// Programme type, e.g. "Accelerator".
    pub kind: &'static str,
    /// Cash offered.
    pub amount: f64,
    /// Equity taken, in percent.
    pub equity_percent: f64,
    /// Application deadline.
    pub deadline: NaiveDate,
    /// Fit score, in percent.
    pub match_score: u8,
    /// Programme length.
    pub duration: &'static str,
    /// Where it runs.
    pub location: &'static str,
    /// Sector focus.
    pub focus: &'static str,
    /// Entry requirements.
    pub requirements: Vec<&'static str>,
    /// What the programme offers.
    pub benefits: Vec<&'static str>,
}

impl FundingOpportunity {
    /// Whether the programme takes no equity.
    #[must_use]
    pub fn is_non_dilutive(&self) -> bool {
        self.equity_percent <= 0.0
    }
}

/// Where an application stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Sent, awaiting review.
    Submitted,
    /// Not yet sent.
    Draft,
    /// Confirmed place.
    Registered,
}

/// A tracked application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application {
    /// Record id.
    pub id: u32,
    /// Event applied to.
    pub event_name: &'static str,
    /// Current state.
    pub status: ApplicationStatus,
    /// When it was sent; `None` for drafts.
    pub submitted_on: Option<NaiveDate>,
    /// What happens next.
    pub next_step: &'static str,
    /// Completion, in percent.
    pub progress: u8,
    /// Application deadline.
    pub deadline: NaiveDate,
}

/// Search and type filter for the event list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Matched against name and description.
    pub query: String,
    /// Case-insensitive substring of the event type; empty means all.
    pub kind: String,
}

impl EventFilter {
    /// Whether `event` passes this filter.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        matches_query(&self.kind, &[event.kind])
            && matches_query(&self.query, &[event.name, event.description])
    }
}

/// Headline numbers for the events view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    /// Events matched.
    pub matched: usize,
    /// Events with a high match score.
    pub high_match: usize,
    /// Events whose form can be pre-filled.
    pub autofill_ready: usize,
    /// Events with an urgent deadline.
    pub urgent_deadlines: usize,
}

/// The matched events.
#[must_use]
pub fn matched_events() -> Vec<Event> {
    vec![
        Event {
            id: 1,
            name: "TechCrunch Disrupt 2024",
            kind: "Conference",
            location: "San Francisco, CA",
            date: ymd(2024, 3, 15),
            deadline: ymd(2024, 2, 1),
            description: "The premier startup conference featuring top entrepreneurs, investors, and tech leaders",
            match_score: 95,
            eligibility: Eligibility {
                stage: "Series A & below",
                industry: "Technology",
                revenue: "Any",
                location: "Global",
            },
            benefits: vec![
                "Networking with 10,000+ attendees",
                "Pitch competition ($100K prize)",
                "Media exposure",
                "Investor meetings",
            ],
            registration: RegistrationStatus::Available,
            admission: Admission::Fee(2995.0),
            autofill_ready: true,
            insights: "Perfect fit for your AI/SaaS startup. High networking value and investor presence.",
        },
        Event {
            id: 2,
            name: "Y Combinator Demo Day",
            kind: "Accelerator",
            location: "Mountain View, CA",
            date: ymd(2024, 4, 20),
            deadline: ymd(2024, 1, 15),
            description: "Exclusive demo day for YC alumni and portfolio companies",
            match_score: 88,
            eligibility: Eligibility {
                stage: "Pre-seed to Series A",
                industry: "Tech/SaaS",
                revenue: "$0-$10M ARR",
                location: "US preferred",
            },
            benefits: vec![
                "Access to YC network",
                "Investor introductions",
                "Mentorship opportunities",
                "Product feedback",
            ],
            registration: RegistrationStatus::Application,
            admission: Admission::ByInvitation,
            autofill_ready: true,
            insights: "Strong alignment with your business model. YC network valuable for SaaS growth.",
        },
        Event {
            id: 3,
            name: "Startup Grind Global Conference",
            kind: "Networking",
            location: "Silicon Valley, CA",
            date: ymd(2024, 2, 28),
            deadline: ymd(2024, 1, 30),
            description: "Global startup community gathering with founders, investors, and ecosystem partners",
            match_score: 72,
            eligibility: Eligibility {
                stage: "Any",
                industry: "Any",
                revenue: "Any",
                location: "Global",
            },
            benefits: vec![
                "Global founder network",
                "Investor connections",
                "Partnership opportunities",
                "Learning workshops",
            ],
            registration: RegistrationStatus::Available,
            admission: Admission::Fee(1299.0),
            autofill_ready: true,
            insights: "Good for early-stage networking and learning. Less investor-focused than other options.",
        },
        Event {
            id: 4,
            name: "SaaS Summit 2024",
            kind: "Industry Conference",
            location: "Austin, TX",
            date: ymd(2024, 5, 10),
            deadline: ymd(2024, 3, 15),
            description: "The definitive conference for SaaS founders, covering growth, metrics, and scaling",
            match_score: 85,
            eligibility: Eligibility {
                stage: "Any",
                industry: "SaaS/Software",
                revenue: "Any",
                location: "Global",
            },
            benefits: vec![
                "SaaS-specific content",
                "Growth strategies",
                "Metrics workshops",
                "Tool vendor expo",
            ],
            registration: RegistrationStatus::Available,
            admission: Admission::Fee(1899.0),
            autofill_ready: false,
            insights: "Highly relevant for SaaS-specific learning and best practices. Strong ROI for product teams.",
        },
    ]
}

/// Open funding programmes.
#[must_use]
pub fn funding_opportunities() -> Vec<FundingOpportunity> {
    vec![
        FundingOpportunity {
            id: 1,
            name: "Techstars Boston 2024",
            kind: "Accelerator",
            amount: 120_000.0,
            equity_percent: 6.0,
            deadline: ymd(2024, 2, 15),
            match_score: 92,
            duration: "3 months",
            location: "Boston, MA",
            focus: "B2B SaaS, AI/ML",
            requirements: vec!["MVP ready", "Founding team", "Market traction"],
            benefits: vec!["Funding", "Mentorship", "Demo day", "Alumni network"],
        },
        FundingOpportunity {
            id: 2,
            name: "AWS Startup Challenge",
            kind: "Competition",
            amount: 100_000.0,
            equity_percent: 0.0,
            deadline: ymd(2024, 1, 31),
            match_score: 78,
            duration: "6 months",
            location: "Remote",
            focus: "Cloud-native startups",
            requirements: vec!["AWS usage", "Scalable product", "Growth metrics"],
            benefits: vec![
                "Cash prize",
                "AWS credits",
                "Technical mentoring",
                "Customer introductions",
            ],
        },
        FundingOpportunity {
            id: 3,
            name: "Google for Startups Accelerator",
            kind: "Accelerator",
            amount: 200_000.0,
            equity_percent: 0.0,
            deadline: ymd(2024, 3, 1),
            match_score: 85,
            duration: "3 months",
            location: "Mountain View, CA",
            focus: "AI/ML applications",
            requirements: vec!["AI/ML focus", "Series A ready", "Diverse founding team"],
            benefits: vec![
                "Funding",
                "Google mentors",
                "Product credits",
                "Go-to-market support",
            ],
        },
    ]
}

/// Tracked applications.
#[must_use]
pub fn tracked_applications() -> Vec<Application> {
    vec![
        Application {
            id: 1,
            event_name: "TechCrunch Disrupt",
            status: ApplicationStatus::Submitted,
            submitted_on: Some(ymd(2024, 1, 10)),
            next_step: "Awaiting review",
            progress: 25,
            deadline: ymd(2024, 2, 1),
        },
        Application {
            id: 2,
            event_name: "Startup Grind",
            status: ApplicationStatus::Draft,
            submitted_on: None,
            next_step: "Complete application",
            progress: 60,
            deadline: ymd(2024, 1, 30),
        },
        Application {
            id: 3,
            event_name: "SaaS Summit",
            status: ApplicationStatus::Registered,
            submitted_on: Some(ymd(2024, 1, 8)),
            next_step: "Prepare presentation",
            progress: 100,
            deadline: ymd(2024, 3, 15),
        },
    ]
}

/// Events passing `filter`, in their original order.
#[must_use]
pub fn filter_events<'a>(events: &'a [Event], filter: &EventFilter) -> Vec<&'a Event> {
    events.iter().filter(|e| filter.matches(e)).collect()
}

/// Summarize the matched events.
#[must_use]
pub fn summarize(events: &[Event], deadlines: &DeadlineConfig) -> EventSummary {
    EventSummary {
        matched: events.len(),
        high_match: events
            .iter()
            .filter(|e| e.match_score >= HIGH_MATCH_SCORE)
            .count(),
        autofill_ready: events.iter().filter(|e| e.autofill_ready).count(),
        urgent_deadlines: events
            .iter()
            .filter(|e| e.urgency(deadlines) == Urgency::Urgent)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deadlines_at(today: NaiveDate) -> DeadlineConfig {
        DeadlineConfig {
            reference_date: Some(today),
            ..DeadlineConfig::default()
        }
    }

    #[test]
    fn test_summary() {
        let summary = summarize(&matched_events(), &deadlines_at(ymd(2024, 1, 26)));

        assert_eq!(summary.matched, 4);
        assert_eq!(summary.high_match, 3);
        assert_eq!(summary.autofill_ready, 3);
        // YC (past), Startup Grind (4 days), TechCrunch (6 days)
        assert_eq!(summary.urgent_deadlines, 3);
    }

    #[test]
    fn test_filter_by_kind_is_substring() {
        let events = matched_events();
        let filter = EventFilter {
            query: String::new(),
            kind: "conference".to_string(),
        };
        let ids: Vec<_> = filter_events(&events, &filter).iter().map(|e| e.id).collect();
        assert_eq!(ids, [1, 4]);
    }

    #[test]
    fn test_filter_by_description() {
        let events = matched_events();
        let filter = EventFilter {
            query: "investors".to_string(),
            kind: String::new(),
        };
        let ids: Vec<_> = filter_events(&events, &filter).iter().map(|e| e.id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let events = matched_events();
        assert_eq!(filter_events(&events, &EventFilter::default()).len(), 4);
    }

    #[test]
    fn test_funding_dilution() {
        let funding = funding_opportunities();
        let non_dilutive: Vec<_> = funding
            .iter()
            .filter(|f| f.is_non_dilutive())
            .map(|f| f.id)
            .collect();
        assert_eq!(non_dilutive, [2, 3]);
    }

    #[test]
    fn test_drafts_have_no_submission_date() {
        for app in tracked_applications() {
            assert_eq!(
                app.submitted_on.is_none(),
                app.status == ApplicationStatus::Draft,
                "{}",
                app.event_name
            );
        }
    }

    #[test]
    fn test_admission_serialization() {
        let json = serde_json::to_value(Admission::Fee(2995.0)).unwrap();
        assert_eq!(json["kind"], "fee");
        assert_eq!(json["amount"], 2995.0);
        let json = serde_json::to_value(Admission::ByInvitation).unwrap();
        assert_eq!(json["kind"], "by_invitation");
    }
}
