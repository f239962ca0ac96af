//! Typed sample data behind the dashboard views.
//!
//! Every data set here is a fixed literal: procurement records, scanned
//! invoices, tender notices, events and funding programmes, stock items, the
//! expenditure history, tool recommendations and the overview's headline
//! numbers. Each module pairs its records with the filter
//! predicates and summary arithmetic the corresponding view needs.

pub mod calendar;
pub mod events;
pub mod forecast;
pub mod invoices;
pub mod overview;
pub mod procurement;
pub mod recommendations;
pub mod stock;
pub mod tenders;

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::DeadlineConfig;
use crate::error::{Error, Result};

/// Spending category shared by procurement records and invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendCategory {
    /// Software subscriptions.
    Saas,
    /// Cloud and hosting.
    Infrastructure,
    /// Consumables for the office.
    OfficeSupplies,
    /// Computers and peripherals.
    Hardware,
    /// Contractors and professional services.
    Services,
}

impl SpendCategory {
    /// All categories, in display order.
    pub const ALL: [SpendCategory; 5] = [
        Self::Saas,
        Self::Infrastructure,
        Self::OfficeSupplies,
        Self::Hardware,
        Self::Services,
    ];
}

impl fmt::Display for SpendCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saas => write!(f, "SaaS"),
            Self::Infrastructure => write!(f, "Infrastructure"),
            Self::OfficeSupplies => write!(f, "Office Supplies"),
            Self::Hardware => write!(f, "Hardware"),
            Self::Services => write!(f, "Services"),
        }
    }
}

/// How close a deadline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Within `urgent_days`, or already past.
    Urgent,
    /// Within `soon_days`.
    Soon,
    /// Further out.
    Normal,
}

impl Urgency {
    /// Bucket `deadline` relative to the configured "today".
    #[must_use]
    pub fn classify(deadline: NaiveDate, deadlines: &DeadlineConfig) -> Self {
        let days_until = days_until(deadline, deadlines.today());
        if days_until <= deadlines.urgent_days {
            Self::Urgent
        } else if days_until <= deadlines.soon_days {
            Self::Soon
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Urgent => write!(f, "urgent"),
            Self::Soon => write!(f, "soon"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

/// Whole days from `today` until `deadline`; negative once past.
#[must_use]
pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

/// Case-insensitive substring search over `fields`. An empty query matches.
#[must_use]
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

/// Percentage change from `from` to `to`; `None` when `from` is zero.
#[must_use]
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        None
    } else {
        Some((to - from) / from * 100.0)
    }
}

/// Arithmetic mean; `None` for an empty input.
#[must_use]
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if `input` is not a valid date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        input: input.to_string(),
        expected: "YYYY-MM-DD",
    })
}

/// Parse a `YYYY-MM` month into its first day.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if `input` is not a valid month.
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    parse_date(&format!("{}-01", input.trim())).map_err(|_| Error::InvalidDate {
        input: input.to_string(),
        expected: "YYYY-MM",
    })
}

/// Fixture date literal. Every call site passes a valid calendar date.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
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
    fn test_matches_query_case_insensitive() {
        assert!(matches_query("figma", &["Figma Pro Plan", "Figma Inc."]));
        assert!(matches_query("INC", &["Figma Pro Plan", "Figma Inc."]));
        assert!(!matches_query("slack", &["Figma Pro Plan"]));
    }

    #[test]
    fn test_matches_query_empty_matches_all() {
        assert!(matches_query("", &["anything"]));
        assert!(matches_query("   ", &[]));
    }

    #[test]
    fn test_percent_change() {
        let change = percent_change(6900.0, 7200.0).unwrap();
        assert!((change - 4.347_826).abs() < 1e-5);
        assert_eq!(percent_change(0.0, 10.0), None);
        assert_eq!(percent_change(100.0, 50.0), Some(-50.0));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean([96.0, 92.0, 88.0, 94.0]), Some(92.5));
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn test_urgency_buckets() {
        let today = ymd(2024, 1, 20);
        let deadlines = deadlines_at(today);

        assert_eq!(Urgency::classify(ymd(2024, 1, 15), &deadlines), Urgency::Urgent);
        assert_eq!(Urgency::classify(ymd(2024, 1, 27), &deadlines), Urgency::Urgent);
        assert_eq!(Urgency::classify(ymd(2024, 1, 28), &deadlines), Urgency::Soon);
        assert_eq!(Urgency::classify(ymd(2024, 2, 3), &deadlines), Urgency::Soon);
        assert_eq!(Urgency::classify(ymd(2024, 2, 4), &deadlines), Urgency::Normal);
    }

    #[test]
    fn test_days_until() {
        assert_eq!(days_until(ymd(2024, 2, 1), ymd(2024, 1, 30)), 2);
        assert_eq!(days_until(ymd(2024, 1, 30), ymd(2024, 2, 1)), -2);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-15").unwrap(), ymd(2024, 2, 15));
        assert!(matches!(
            parse_date("15/02/2024"),
            Err(Error::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-02").unwrap(), ymd(2024, 2, 1));
        let err = parse_month("2024-13").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM"));
    }

    #[test]
    fn test_spend_category_display() {
        assert_eq!(SpendCategory::Saas.to_string(), "SaaS");
        assert_eq!(SpendCategory::OfficeSupplies.to_string(), "Office Supplies");
    }
}
