//! Expenditure history, forecasts and the events expected to move them.

use chrono::NaiveDate;
use serde::Serialize;

use super::{percent_change, ymd, SpendCategory};

/// Spend for one month, split by category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlySpend {
    /// First day of the month.
    pub month: NaiveDate,
    /// Recorded spend, once the month has closed.
    pub actual: Option<f64>,
    /// Forecast spend, when one was made.
    pub predicted: Option<f64>,
    /// SaaS tools.
    pub saas: f64,
    /// Infrastructure.
    pub infrastructure: f64,
    /// Office and operations.
    pub office: f64,
    /// Professional services.
    pub services: f64,
}

impl MonthlySpend {
    /// Sum of the category split.
    #[must_use]
    pub fn category_total(&self) -> f64 {
        self.saas + self.infrastructure + self.office + self.services
    }

    /// Recorded spend if known, otherwise the forecast.
    #[must_use]
    pub fn spend(&self) -> Option<f64> {
        self.actual.or(self.predicted)
    }
}

/// Current vs. forecast spend for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryForecast {
    /// Category.
    pub category: SpendCategory,
    /// Spend this month.
    pub current: f64,
    /// Spend at the end of the horizon.
    pub predicted: f64,
    /// Forecast confidence, in percent.
    pub confidence: u8,
}

impl CategoryForecast {
    /// Growth over the horizon, in percent.
    #[must_use]
    pub fn growth_percent(&self) -> Option<f64> {
        percent_change(self.current, self.predicted)
    }
}

/// A forecasting model and its backtest accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastModel {
    /// Model name.
    pub name: &'static str,
    /// Backtest accuracy, in percent.
    pub accuracy: f64,
    /// What the model does.
    pub description: &'static str,
}

/// A known upcoming change to monthly spend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpendEvent {
    /// What happens.
    pub name: &'static str,
    /// Change to monthly spend; negative for savings.
    pub impact: f64,
    /// First day of the month it lands in.
    pub month: NaiveDate,
    /// Likelihood, in percent.
    pub confidence: u8,
}

impl SpendEvent {
    /// Whether the event raises spend.
    #[must_use]
    pub fn is_increase(&self) -> bool {
        self.impact > 0.0
    }
}

/// Current month against next month's forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastSummary {
    /// Latest closed month.
    pub current_month: NaiveDate,
    /// Its recorded spend.
    pub current_spend: f64,
    /// The following month.
    pub next_month: NaiveDate,
    /// Its forecast spend.
    pub next_predicted: f64,
    /// Change between the two, in percent.
    pub change_percent: Option<f64>,
}

/// Twelve months of spend, oldest first. Closed months carry `actual`.
#[must_use]
pub fn spend_history() -> Vec<MonthlySpend> {
    let row = |year, month, actual, predicted, saas, infrastructure, office, services| {
        MonthlySpend {
            month: ymd(year, month, 1),
            actual,
            predicted,
            saas,
            infrastructure,
            office,
            services,
        }
    };

    vec![
        row(2023, 7, Some(4200.0), None, 1800.0, 1200.0, 800.0, 400.0),
        row(2023, 8, Some(4800.0), None, 2100.0, 1400.0, 900.0, 400.0),
        row(2023, 9, Some(5200.0), None, 2200.0, 1600.0, 950.0, 450.0),
        row(2023, 10, Some(4900.0), None, 2000.0, 1500.0, 900.0, 500.0),
        row(2023, 11, Some(6100.0), None, 2800.0, 1800.0, 1000.0, 500.0),
        row(2023, 12, Some(5800.0), None, 2600.0, 1700.0, 1000.0, 500.0),
        row(2024, 1, Some(6900.0), Some(6850.0), 3200.0, 2000.0, 1200.0, 500.0),
        row(2024, 2, None, Some(7200.0), 3300.0, 2100.0, 1300.0, 500.0),
        row(2024, 3, None, Some(7800.0), 3600.0, 2200.0, 1500.0, 500.0),
        row(2024, 4, None, Some(8200.0), 3800.0, 2400.0, 1500.0, 500.0),
        row(2024, 5, None, Some(8600.0), 4000.0, 2600.0, 1500.0, 500.0),
        row(2024, 6, None, Some(9100.0), 4200.0, 2800.0, 1600.0, 500.0),
    ]
}

/// Per-category forecast over the horizon.
#[must_use]
pub fn category_forecasts() -> Vec<CategoryForecast> {
    let forecast = |category, current, predicted, confidence| CategoryForecast {
        category,
        current,
        predicted,
        confidence,
    };
    vec![
        forecast(SpendCategory::Saas, 3200.0, 4200.0, 90),
        forecast(SpendCategory::Infrastructure, 2000.0, 2800.0, 85),
        forecast(SpendCategory::OfficeSupplies, 1200.0, 1600.0, 78),
        forecast(SpendCategory::Services, 500.0, 500.0, 95),
    ]
}

/// The forecasting models on offer.
#[must_use]
pub fn forecast_models() -> Vec<ForecastModel> {
    vec![
        ForecastModel {
            name: "Prophet (Time Series)",
            accuracy: 92.5,
            description: "Seasonal trend analysis with growth forecasting",
        },
        ForecastModel {
            name: "XGBoost (ML)",
            accuracy: 89.2,
            description: "Feature-based prediction using business metrics",
        },
        ForecastModel {
            name: "Linear Regression",
            accuracy: 76.8,
            description: "Simple trend-based forecasting baseline",
        },
        ForecastModel {
            name: "Ensemble Average",
            accuracy: 94.1,
            description: "Combined prediction from multiple models",
        },
    ]
}

/// Known events expected to change spend.
#[must_use]
pub fn upcoming_spend_events() -> Vec<SpendEvent> {
    let event = |name, impact, year, month, confidence| SpendEvent {
        name,
        impact,
        month: ymd(year, month, 1),
        confidence,
    };
    vec![
        event("Q1 Marketing Campaign", 2400.0, 2024, 2, 88),
        event("AWS Reserved Instance Discount", -800.0, 2024, 3, 95),
        event("New Hire (2 Developers)", 1800.0, 2024, 4, 75),
        event("Office Lease Renewal", 1200.0, 2024, 5, 92),
    ]
}

/// The most accurate model, if any.
#[must_use]
pub fn best_model(models: &[ForecastModel]) -> Option<&ForecastModel> {
    models
        .iter()
        .max_by(|a, b| a.accuracy.total_cmp(&b.accuracy))
}

/// Sum of event impacts.
#[must_use]
pub fn net_event_impact(events: &[SpendEvent]) -> f64 {
    events.iter().map(|e| e.impact).sum()
}

/// Compare the latest closed month with the forecast for the month after.
///
/// Returns `None` when there is no closed month or nothing forecast after it.
#[must_use]
pub fn forecast_summary(history: &[MonthlySpend]) -> Option<ForecastSummary> {
    let (index, current) = history
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, m)| m.actual.map(|spend| (i, (m.month, spend))))?;
    let next = history.get(index + 1)?;
    let next_predicted = next.predicted?;

    Some(ForecastSummary {
        current_month: current.0,
        current_spend: current.1,
        next_month: next.month,
        next_predicted,
        change_percent: percent_change(current.1, next_predicted),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_summary() {
        let summary = forecast_summary(&spend_history()).unwrap();

        assert_eq!(summary.current_month, ymd(2024, 1, 1));
        assert_eq!(summary.current_spend, 6900.0);
        assert_eq!(summary.next_month, ymd(2024, 2, 1));
        assert_eq!(summary.next_predicted, 7200.0);
        assert!((summary.change_percent.unwrap() - 4.347_826).abs() < 1e-5);
    }

    #[test]
    fn test_forecast_summary_without_forecast() {
        let history = spend_history();
        assert!(forecast_summary(&history[..7]).is_none());
        assert!(forecast_summary(&history[7..]).is_none());
        assert!(forecast_summary(&[]).is_none());
    }

    #[test]
    fn test_category_split_matches_spend() {
        for month in spend_history() {
            assert_eq!(Some(month.category_total()), month.spend(), "{}", month.month);
        }
    }

    #[test]
    fn test_category_growth() {
        let growth: Vec<_> = category_forecasts()
            .iter()
            .map(|c| c.growth_percent().unwrap())
            .collect();

        assert!((growth[0] - 31.25).abs() < 1e-9);
        assert!((growth[1] - 40.0).abs() < 1e-9);
        assert!((growth[2] - 33.333_333).abs() < 1e-5);
        assert_eq!(growth[3], 0.0);
    }

    #[test]
    fn test_best_model() {
        let models = forecast_models();
        assert_eq!(best_model(&models).unwrap().name, "Ensemble Average");
        assert!(best_model(&[]).is_none());
    }

    #[test]
    fn test_spend_events() {
        let events = upcoming_spend_events();
        assert_eq!(net_event_impact(&events), 4600.0);
        assert_eq!(events.iter().filter(|e| e.is_increase()).count(), 3);
    }
}
