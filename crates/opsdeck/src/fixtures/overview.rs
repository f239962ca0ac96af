//! The landing view: headline numbers, spend trend and split, alerts.

use chrono::NaiveDate;
use serde::Serialize;

use super::{events, percent_change, recommendations, tenders, ymd, SpendCategory};
use crate::scenario::FinancialBaseline;

/// Total spend for one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyExpenditure {
    /// First day of the month.
    pub month: NaiveDate,
    /// Amount spent.
    pub amount: f64,
}

/// This month's spend in one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategorySpend {
    /// Category.
    pub category: SpendCategory,
    /// Amount spent.
    pub amount: f64,
}

/// A category's slice of the month's spend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryShare {
    /// Category.
    pub category: SpendCategory,
    /// Amount spent.
    pub amount: f64,
    /// Share of the total, in percent.
    pub share_percent: f64,
}

/// How pressing an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    /// Act now.
    Urgent,
    /// Act soon.
    Medium,
}

/// Something that needs attention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// Headline.
    pub message: &'static str,
    /// Supporting detail.
    pub detail: &'static str,
    /// Level.
    pub level: AlertLevel,
}

/// Headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpis {
    /// This month's spend across categories.
    pub total_spend: f64,
    /// Change of the latest month against the one before.
    pub spend_change_percent: Option<f64>,
    /// Subscriptions in force.
    pub active_subscriptions: usize,
    /// Runway at the current burn.
    pub runway_months: f64,
    /// Matched events plus tender notices.
    pub opportunities: usize,
}

/// Everything the overview shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    /// Headline numbers.
    pub kpis: Kpis,
    /// Six months of spend, oldest first.
    pub expenditure: Vec<MonthlyExpenditure>,
    /// This month's spend by category.
    pub category_split: Vec<CategoryShare>,
    /// Open alerts, most pressing first.
    pub alerts: Vec<Alert>,
}

/// Monthly spend for the first half of 2024.
#[must_use]
pub fn expenditure_trend() -> Vec<MonthlyExpenditure> {
    [4500.0, 5200.0, 4800.0, 6100.0, 5800.0, 6900.0]
        .into_iter()
        .zip(1..)
        .map(|(amount, month)| MonthlyExpenditure {
            month: ymd(2024, month, 1),
            amount,
        })
        .collect()
}

/// This month's spend by category.
#[must_use]
pub fn category_spend() -> Vec<CategorySpend> {
    [
        (SpendCategory::Saas, 12_500.0),
        (SpendCategory::OfficeSupplies, 3200.0),
        (SpendCategory::Hardware, 8900.0),
        (SpendCategory::Services, 4300.0),
    ]
    .into_iter()
    .map(|(category, amount)| CategorySpend { category, amount })
    .collect()
}

/// Open alerts.
#[must_use]
pub fn alerts() -> Vec<Alert> {
    vec![
        Alert {
            message: "Slack subscription expires in 5 days",
            detail: "$960/year renewal",
            level: AlertLevel::Urgent,
        },
        Alert {
            message: "Office supplies running low",
            detail: "Printer paper, pens",
            level: AlertLevel::Medium,
        },
        Alert {
            message: "AWS credits 70% consumed",
            detail: "$500 remaining",
            level: AlertLevel::Medium,
        },
    ]
}

/// Each category's share of the total. Shares are zero when nothing was
/// spent.
#[must_use]
pub fn category_split(spend: &[CategorySpend]) -> Vec<CategoryShare> {
    let total: f64 = spend.iter().map(|s| s.amount).sum();
    spend
        .iter()
        .map(|s| CategoryShare {
            category: s.category,
            amount: s.amount,
            share_percent: if total == 0.0 {
                0.0
            } else {
                s.amount / total * 100.0
            },
        })
        .collect()
}

/// Change between the last two months; `None` with fewer than two or a
/// zero base.
#[must_use]
pub fn latest_change(series: &[MonthlyExpenditure]) -> Option<f64> {
    match series {
        [.., previous, latest] => percent_change(previous.amount, latest.amount),
        _ => None,
    }
}

/// Assemble the overview; the runway comes from `baseline`.
#[must_use]
pub fn overview(baseline: &FinancialBaseline) -> Overview {
    let expenditure = expenditure_trend();
    let category_split = category_split(&category_spend());

    let kpis = Kpis {
        total_spend: category_split.iter().map(|s| s.amount).sum(),
        spend_change_percent: latest_change(&expenditure),
        active_subscriptions: recommendations::TOOLS_ANALYZED,
        runway_months: baseline.current_runway_months,
        opportunities: events::matched_events().len() + tenders::tender_notices().len(),
    };

    let mut alerts = alerts();
    alerts.sort_by_key(|a| a.level);

    Overview {
        kpis,
        expenditure,
        category_split,
        alerts,
    }
}
