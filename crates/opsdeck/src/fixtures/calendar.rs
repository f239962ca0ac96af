//! Proposal calendar assembled from events, funding and applications.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::events::{
    funding_opportunities, matched_events, tracked_applications, Admission, ApplicationStatus,
};

/// What a calendar entry marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// An application already sent.
    Submitted,
    /// Something scheduled that needs no action.
    Upcoming,
    /// A date by which something must be sent.
    Deadline,
}

/// Review state of a calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Awaiting a decision.
    Pending,
    /// Accepted or registered.
    Approved,
    /// Not yet sent.
    Draft,
}

/// One dated item on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
    /// Stable id such as `event-1` or `app-3`.
    pub id: String,
    /// Display name.
    pub name: &'static str,
    /// Calendar date.
    pub date: NaiveDate,
    /// Entry kind.
    pub kind: EntryKind,
    /// Review state.
    pub status: EntryStatus,
    /// Match score, when the source has one.
    pub match_score: Option<u8>,
    /// Source type, e.g. "Conference" or "Application".
    pub source_kind: &'static str,
    /// Location, when known.
    pub location: Option<&'static str>,
    /// Attendance cost or funding amount, when known.
    pub amount: Option<f64>,
}

/// Entry counts for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthSummary {
    /// Submitted entries.
    pub submitted: usize,
    /// Deadline entries.
    pub deadlines: usize,
    /// Upcoming entries.
    pub upcoming: usize,
}

impl MonthSummary {
    /// Total entries.
    #[must_use]
    pub fn total(&self) -> usize {
        self.submitted + self.deadlines + self.upcoming
    }
}

/// Every calendar entry: event deadlines, then funding deadlines, then
/// tracked applications.
#[must_use]
pub fn calendar_entries() -> Vec<CalendarEntry> {
    let events = matched_events().into_iter().map(|e| CalendarEntry {
        id: format!("event-{}", e.id),
        name: e.name,
        date: e.deadline,
        kind: EntryKind::Deadline,
        status: EntryStatus::Draft,
        match_score: Some(e.match_score),
        source_kind: e.kind,
        location: Some(e.location),
        amount: match e.admission {
            Admission::Fee(fee) => Some(fee),
            Admission::ByInvitation => None,
        },
    });

    let funding = funding_opportunities().into_iter().map(|f| CalendarEntry {
        id: format!("funding-{}", f.id),
        name: f.name,
        date: f.deadline,
        kind: EntryKind::Deadline,
        status: EntryStatus::Draft,
        match_score: Some(f.match_score),
        source_kind: f.kind,
        location: Some(f.location),
        amount: Some(f.amount),
    });

    let applications = tracked_applications().into_iter().map(|a| {
        let (kind, status) = match a.status {
            ApplicationStatus::Submitted => (EntryKind::Submitted, EntryStatus::Pending),
            ApplicationStatus::Registered => (EntryKind::Deadline, EntryStatus::Approved),
            ApplicationStatus::Draft => (EntryKind::Deadline, EntryStatus::Draft),
        };
        CalendarEntry {
            id: format!("app-{}", a.id),
            name: a.event_name,
            date: a.deadline,
            kind,
            status,
            match_score: None,
            source_kind: "Application",
            location: None,
            amount: None,
        }
    });

    events.chain(funding).chain(applications).collect()
}

/// Entries falling on `date`.
#[must_use]
pub fn entries_on(entries: &[CalendarEntry], date: NaiveDate) -> Vec<&CalendarEntry> {
    entries.iter().filter(|e| e.date == date).collect()
}

/// Entries in the same calendar month as `month`.
#[must_use]
pub fn entries_in_month(entries: &[CalendarEntry], month: NaiveDate) -> Vec<&CalendarEntry> {
    entries
        .iter()
        .filter(|e| e.date.year() == month.year() && e.date.month() == month.month())
        .collect()
}

/// Count entries by kind.
#[must_use]
pub fn summarize<'a>(entries: impl IntoIterator<Item = &'a CalendarEntry>) -> MonthSummary {
    entries
        .into_iter()
        .fold(MonthSummary::default(), |mut summary, entry| {
            match entry.kind {
                EntryKind::Submitted => summary.submitted += 1,
                EntryKind::Deadline => summary.deadlines += 1,
                EntryKind::Upcoming => summary.upcoming += 1,
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ymd;

    #[test]
    fn test_entries_cover_all_sources() {
        let entries = calendar_entries();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].id, "event-1");
        assert_eq!(entries[4].id, "funding-1");
        assert_eq!(entries[9].id, "app-3");
    }

    #[test]
    fn test_application_mapping() {
        let entries = calendar_entries();
        let app = |id: &str| entries.iter().find(|e| e.id == id).unwrap();

        assert_eq!(app("app-1").kind, EntryKind::Submitted);
        assert_eq!(app("app-1").status, EntryStatus::Pending);
        assert_eq!(app("app-2").kind, EntryKind::Deadline);
        assert_eq!(app("app-2").status, EntryStatus::Draft);
        assert_eq!(app("app-3").kind, EntryKind::Deadline);
        assert_eq!(app("app-3").status, EntryStatus::Approved);
    }

    #[test]
    fn test_entries_on_date() {
        let entries = calendar_entries();
        let ids: Vec<_> = entries_on(&entries, ymd(2024, 2, 1))
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["event-1", "app-1"]);
        assert!(entries_on(&entries, ymd(2024, 2, 2)).is_empty());
    }

    #[test]
    fn test_month_summary() {
        let entries = calendar_entries();

        let january = summarize(entries_in_month(&entries, ymd(2024, 1, 1)));
        assert_eq!(january.deadlines, 4);
        assert_eq!(january.submitted, 0);

        let february = summarize(entries_in_month(&entries, ymd(2024, 2, 20)));
        assert_eq!(february.submitted, 1);
        assert_eq!(february.deadlines, 2);
        assert_eq!(february.total(), 3);

        assert_eq!(summarize(entries_in_month(&entries, ymd(2023, 2, 1))).total(), 0);
    }

    #[test]
    fn test_invitation_only_event_has_no_amount() {
        let entries = calendar_entries();
        assert_eq!(entries[1].id, "event-2");
        assert!(entries[1].amount.is_none());
        assert_eq!(entries[4].amount, Some(120_000.0));
    }
}
