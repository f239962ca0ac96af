//! Consumable stock levels and replenishment rules.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::ymd;
use crate::config::StockConfig;

/// Status assigned to a stock item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// About to run out.
    Critical,
    /// Running low.
    Warning,
    /// Comfortable.
    Good,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::Warning => write!(f, "warning"),
            Self::Good => write!(f, "good"),
        }
    }
}

/// Fill level band, from the remaining percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillLevel {
    /// Under 20%.
    Low,
    /// Under 40%.
    Medium,
    /// 40% or more.
    High,
}

impl FillLevel {
    /// Band for `percent` remaining.
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent < 20.0 {
            Self::Low
        } else if percent < 40.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Forecast consumption for an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsagePrediction {
    /// Expected units consumed per day.
    pub daily_usage: f64,
    /// Forecast confidence, in percent.
    pub confidence: u8,
    /// Quantity at which an order is placed.
    pub trigger_level: f64,
}

/// A tracked consumable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockItem {
    /// Record id.
    pub id: u32,
    /// Item name.
    pub name: &'static str,
    /// Item category.
    pub category: &'static str,
    /// Quantity on hand.
    pub current: f64,
    /// Full capacity.
    pub capacity: f64,
    /// Unit of measure.
    pub unit: &'static str,
    /// Units consumed per day.
    pub burn_rate: f64,
    /// Days until empty at the current burn rate.
    pub days_left: u32,
    /// Assigned status.
    pub status: StockStatus,
    /// Whether orders are placed automatically.
    pub auto_replenish: bool,
    /// Supplier.
    pub supplier: &'static str,
    /// Last restock.
    pub last_refill: NaiveDate,
    /// Consumption forecast, when one exists.
    pub prediction: Option<UsagePrediction>,
}

impl StockItem {
    /// Share of capacity remaining, in percent.
    #[must_use]
    pub fn percent_remaining(&self) -> f64 {
        if self.capacity > 0.0 {
            self.current * 100.0 / self.capacity
        } else {
            0.0
        }
    }

    /// Fill level band.
    #[must_use]
    pub fn fill_level(&self) -> FillLevel {
        FillLevel::from_percent(self.percent_remaining())
    }

    /// Whether the item should be reordered now.
    #[must_use]
    pub fn needs_reorder(&self, config: &StockConfig) -> bool {
        self.percent_remaining() < config.reorder_threshold_percent
            || self.days_left <= config.buffer_days
    }

    /// Days until the predicted trigger level is reached.
    #[must_use]
    pub fn days_until_trigger(&self) -> Option<f64> {
        let prediction = self.prediction?;
        (prediction.daily_usage > 0.0)
            .then(|| ((self.current - prediction.trigger_level) / prediction.daily_usage).max(0.0))
    }
}

/// Monthly consumption of the main consumables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageMonth {
    /// Month label.
    pub month: &'static str,
    /// AWS credit spend.
    pub aws: f64,
    /// Office supplies spend.
    pub office: f64,
    /// GPU hours.
    pub gpu: f64,
}

/// Headline numbers for the stock view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockSummary {
    /// Items tracked.
    pub tracked: usize,
    /// Items in critical status.
    pub critical: usize,
    /// Items in warning status.
    pub warning: usize,
    /// Items due for reorder.
    pub reorder: usize,
    /// Items on automatic replenishment.
    pub auto_replenish: usize,
}

fn predicted(daily_usage: f64, confidence: u8, trigger_level: f64) -> Option<UsagePrediction> {
    Some(UsagePrediction {
        daily_usage,
        confidence,
        trigger_level,
    })
}

/// The tracked stock items.
#[must_use]
pub fn stock_items() -> Vec<StockItem> {
    vec![
        StockItem {
            id: 1,
            name: "AWS Credits",
            category: "Software Credits",
            current: 150.0,
            capacity: 500.0,
            unit: "USD",
            burn_rate: 75.0,
            days_left: 8,
            status: StockStatus::Critical,
            auto_replenish: true,
            supplier: "AWS",
            last_refill: ymd(2023, 12, 1),
            prediction: predicted(75.0, 92, 100.0),
        },
        StockItem {
            id: 2,
            name: "Printer Paper (A4)",
            category: "Office Supplies",
            current: 8.0,
            capacity: 20.0,
            unit: "reams",
            burn_rate: 2.0,
            days_left: 14,
            status: StockStatus::Warning,
            auto_replenish: false,
            supplier: "OfficeMax",
            last_refill: ymd(2024, 1, 5),
            prediction: predicted(2.0, 85, 5.0),
        },
        StockItem {
            id: 3,
            name: "Coffee Pods",
            category: "Office Supplies",
            current: 25.0,
            capacity: 100.0,
            unit: "pods",
            burn_rate: 8.0,
            days_left: 5,
            status: StockStatus::Critical,
            auto_replenish: true,
            supplier: "Nespresso",
            last_refill: ymd(2024, 1, 10),
            prediction: predicted(8.0, 88, 20.0),
        },
        StockItem {
            id: 4,
            name: "GPU Compute Hours",
            category: "Software Credits",
            current: 120.0,
            capacity: 200.0,
            unit: "hours",
            burn_rate: 15.0,
            days_left: 28,
            status: StockStatus::Good,
            auto_replenish: false,
            supplier: "Google Cloud",
            last_refill: ymd(2024, 1, 1),
            prediction: predicted(15.0, 90, 50.0),
        },
        StockItem {
            id: 5,
            name: "Sticky Notes",
            category: "Office Supplies",
            current: 3.0,
            capacity: 12.0,
            unit: "packs",
            burn_rate: 1.0,
            days_left: 21,
            status: StockStatus::Warning,
            auto_replenish: false,
            supplier: "3M",
            last_refill: ymd(2023, 12, 20),
            prediction: None,
        },
    ]
}

/// Six months of consumption history, oldest first.
#[must_use]
pub fn usage_history() -> Vec<UsageMonth> {
    let month = |month, aws, office, gpu| UsageMonth {
        month,
        aws,
        office,
        gpu,
    };
    vec![
        month("Aug", 480.0, 180.0, 150.0),
        month("Sep", 520.0, 165.0, 180.0),
        month("Oct", 450.0, 200.0, 160.0),
        month("Nov", 600.0, 190.0, 200.0),
        month("Dec", 580.0, 175.0, 185.0),
        month("Jan", 350.0, 155.0, 80.0),
    ]
}

/// Items with the given status, in their original order.
#[must_use]
pub fn with_status(items: &[StockItem], status: StockStatus) -> Vec<&StockItem> {
    items.iter().filter(|i| i.status == status).collect()
}

/// Items due for reorder under `config`.
#[must_use]
pub fn reorder_list<'a>(items: &'a [StockItem], config: &StockConfig) -> Vec<&'a StockItem> {
    items.iter().filter(|i| i.needs_reorder(config)).collect()
}

/// Summarize stock levels.
#[must_use]
pub fn summarize(items: &[StockItem], config: &StockConfig) -> StockSummary {
    StockSummary {
        tracked: items.len(),
        critical: with_status(items, StockStatus::Critical).len(),
        warning: with_status(items, StockStatus::Warning).len(),
        reorder: reorder_list(items, config).len(),
        auto_replenish: items.iter().filter(|i| i.auto_replenish).count(),
    }
}
