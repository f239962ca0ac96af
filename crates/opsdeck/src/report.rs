//! Text and JSON rendering for the dashboard views.
//!
//! Every renderer returns a `String` so the binary decides where it goes.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{Config, DeadlineConfig, StockConfig};
use crate::error::Result;
use crate::fixtures::calendar::{CalendarEntry, MonthSummary};
use crate::fixtures::events::{Admission, Application, Event, EventSummary, FundingOpportunity};
use crate::fixtures::forecast::{
    CategoryForecast, ForecastModel, ForecastSummary, MonthlySpend, SpendEvent,
};
use crate::fixtures::invoices::{Invoice, InvoiceSummary, QueuedInvoice};
use crate::fixtures::overview::{AlertLevel, Overview};
use crate::fixtures::procurement::{CategoryTotal, ProcurementRecord, Renewal};
use crate::fixtures::recommendations::{CategoryRecommendation, IndustryTrend, Recommendations};
use crate::fixtures::stock::{StockItem, StockSummary};
use crate::fixtures::tenders::{Tender, TenderSummary};
use crate::fixtures::Urgency;
use crate::scenario::{
    FinancialBaseline, ProjectionPoint, Runway, Scenario, ScenarioResult, Sensitivity,
};

/// Pretty-printed JSON.
///
/// # Errors
///
/// Returns [`crate::Error::Json`] if `value` cannot be serialized.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Currency with thousands separators; cents only when non-zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match cents % 100 {
        0 => format!("{sign}${grouped}"),
        frac => format!("{sign}${grouped}.{frac:02}"),
    }
}

/// Signed currency, e.g. `+$40,500` or `-$3,000`.
#[must_use]
pub fn signed_money(amount: f64) -> String {
    if amount > 0.0 {
        format!("+{}", money(amount))
    } else {
        money(amount)
    }
}

fn months(value: f64) -> String {
    format!("{value:.1} months")
}

fn signed_months(value: f64) -> String {
    format!("{value:+.1} months")
}

#[derive(Debug, Default)]
struct Report(String);

impl Report {
    fn heading(&mut self, title: &str) -> &mut Self {
        self.line(title).line("=".repeat(title.len()))
    }

    fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.0.push_str(text.as_ref());
        self.0.push('\n');
        self
    }

    fn blank(&mut self) -> &mut Self {
        self.0.push('\n');
        self
    }

    fn field(&mut self, label: &str, value: impl AsRef<str>) -> &mut Self {
        self.line(format!("  {:<20}{}", format!("{label}:"), value.as_ref()))
    }

    fn finish(self) -> String {
        self.0
    }
}

fn runway_text(result: &ScenarioResult) -> String {
    match result.runway {
        Runway::Finite {
            new_runway_months,
            runway_change_months,
        } => format!(
            "{} ({})",
            months(new_runway_months),
            signed_months(runway_change_months)
        ),
        Runway::NotBurning => "not burning (cash grows each month)".to_string(),
    }
}

/// The financial baseline.
#[must_use]
pub fn baseline(baseline: &FinancialBaseline) -> String {
    let mut r = Report::default();
    r.heading("Financial Baseline")
        .field("Monthly burn", money(baseline.monthly_burn))
        .field("Cash on hand", money(baseline.cash_on_hand))
        .field("Runway", months(baseline.current_runway_months))
        .field("Team size", baseline.team_size.to_string());
    r.finish()
}

/// One line per scenario.
#[must_use]
pub fn scenario_list<'a>(
    scenarios: impl IntoIterator<Item = &'a Scenario>,
    critical_months: f64,
) -> String {
    let mut r = Report::default();
    r.heading("Scenarios");
    for scenario in scenarios {
        let results = scenario.results();
        let flag = if results.is_critical(critical_months) {
            "  [CRITICAL]"
        } else {
            ""
        };
        r.line(format!(
            "{:>14}  {:<22} {:>10}/mo  {}{flag}",
            scenario.id().as_str(),
            scenario.name(),
            signed_money(results.monthly_increase),
            runway_text(results),
        ));
    }
    r.finish()
}

/// A scenario with its assumptions, impact and projection.
#[must_use]
pub fn scenario_detail(
    scenario: &Scenario,
    projection: &[ProjectionPoint],
    critical_months: f64,
) -> String {
    let a = scenario.assumptions();
    let results = scenario.results();

    let mut r = Report::default();
    r.heading(&format!("{} ({})", scenario.name(), scenario.id()))
        .line(scenario.description())
        .blank()
        .line("[Assumptions]")
        .field("New hires", a.new_hires.to_string())
        .field("Salary per hire", money(a.salary_per_hire))
        .field("SaaS", signed_money(a.additional_saas))
        .field("Marketing", signed_money(a.marketing_budget_delta))
        .field("Office", signed_money(a.office_expansion_delta))
        .blank()
        .line("[Impact]")
        .field("Monthly increase", signed_money(results.monthly_increase))
        .field("New monthly burn", money(results.new_monthly_burn))
        .field("Runway", runway_text(results))
        .field("Confidence", format!("{}%", results.confidence_score));

    if results.is_critical(critical_months) {
        r.blank().line(format!(
            "WARNING: runway drops below {critical_months} months. Consider reducing costs or raising funds."
        ));
    }

    r.blank().line("[Projection]");
    for point in projection {
        let runway = point
            .runway_remaining_months
            .map_or_else(|| "-".to_string(), months);
        r.line(format!(
            "  month {:>2}  {:>12}  {runway}",
            point.month,
            money(point.cash_remaining)
        ));
    }
    r.finish()
}

/// Runway impact per lever.
#[must_use]
pub fn sensitivity(rows: &[Sensitivity]) -> String {
    let mut r = Report::default();
    r.heading("Sensitivity");
    for row in rows {
        let delta = row
            .runway_delta_months
            .map_or_else(|| "n/a".to_string(), signed_months);
        r.line(format!("  {:<34}{delta}", row.lever.to_string()));
    }
    r.finish()
}

/// Procurement records with totals.
#[must_use]
pub fn procurement(
    records: &[&ProcurementRecord],
    total_spend: f64,
    active: usize,
    totals: &[CategoryTotal],
) -> String {
    let mut r = Report::default();
    r.heading("Procurement")
        .field("Total spend", money(total_spend))
        .field("Active subs", active.to_string())
        .blank();

    for record in records {
        let renewal = match record.renewal {
            Renewal::On(date) => date.to_string(),
            Renewal::Monthly => "monthly".to_string(),
            Renewal::NotApplicable => "-".to_string(),
        };
        r.line(format!(
            "  {}  {:<20} {:<16} {:<20} {:>10}  renews {renewal}",
            record.purchased_on,
            record.item,
            record.category.to_string(),
            record.vendor,
            money(record.amount),
        ));
    }

    r.blank().line("[By category]");
    for total in totals {
        r.field(
            &total.category.to_string(),
            format!("{} ({} items)", money(total.total), total.count),
        );
    }
    r.finish()
}

/// Processed invoices and the queue.
#[must_use]
pub fn invoices(invoices: &[Invoice], queue: &[QueuedInvoice], summary: &InvoiceSummary) -> String {
    let mut r = Report::default();
    r.heading("Invoices")
        .field("Processed", summary.processed.to_string())
        .field("Total amount", money(summary.total_amount))
        .field(
            "Avg confidence",
            summary
                .average_confidence
                .map_or_else(|| "-".to_string(), |c| format!("{c:.1}%")),
        )
        .field("Queued", summary.queued.to_string())
        .blank();

    for invoice in invoices {
        let due = invoice
            .due_date
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        r.line(format!(
            "  {}  {:<22} {:<18} {:>10}  due {due}  {}%",
            invoice.date,
            invoice.vendor,
            invoice.invoice_number,
            money(invoice.total),
            invoice.confidence,
        ));
    }

    if !queue.is_empty() {
        r.blank().line("[Processing]");
        for item in queue {
            r.line(format!(
                "  {:<28} {:>3}%  {}",
                item.filename, item.progress, item.stage
            ));
        }
    }
    r.finish()
}

/// Tender notices with urgency.
#[must_use]
pub fn tenders(tenders: &[&Tender], summary: &TenderSummary, deadlines: &DeadlineConfig) -> String {
    let mut r = Report::default();
    r.heading("Tenders")
        .field("Found", summary.found.to_string())
        .field("High eligibility", summary.high_eligibility.to_string())
        .field("Pipeline value", money(summary.pipeline_value))
        .field("Expected value", money(summary.expected_value))
        .blank();

    for tender in tenders {
        r.line(format!(
            "  #{} {} ({})",
            tender.id, tender.title, tender.organization
        ))
        .line(format!(
            "     {}  deadline {} [{}]  eligibility {}%  win {}%  {}",
            money(tender.value),
            tender.deadline,
            tender.urgency(deadlines),
            tender.eligibility_score,
            tender.win_probability,
            tender.status,
        ));
    }
    r.finish()
}

fn admission_text(admission: Admission) -> String {
    match admission {
        Admission::Fee(fee) => money(fee),
        Admission::ByInvitation => "Free (by invitation)".to_string(),
    }
}

/// Events, funding programmes and tracked applications.
#[must_use]
pub fn events(
    events: &[&Event],
    summary: &EventSummary,
    funding: &[FundingOpportunity],
    applications: &[Application],
    deadlines: &DeadlineConfig,
) -> String {
    let mut r = Report::default();
    r.heading("Events")
        .field("Matched", summary.matched.to_string())
        .field("High match", summary.high_match.to_string())
        .field("Auto-fill ready", summary.autofill_ready.to_string())
        .field("Urgent deadlines", summary.urgent_deadlines.to_string())
        .blank();

    for event in events {
        let urgency = event.urgency(deadlines);
        let marker = if urgency == Urgency::Urgent { " !" } else { "" };
        r.line(format!(
            "  {} [{}] {} | {}  match {}%  {}{marker}",
            event.name,
            event.kind,
            event.location,
            event.date,
            event.match_score,
            admission_text(event.admission),
        ));
    }

    r.blank().line("[Funding]");
    for f in funding {
        r.line(format!(
            "  {} [{}] {} for {}% equity, deadline {}  match {}%",
            f.name,
            f.kind,
            money(f.amount),
            f.equity_percent,
            f.deadline,
            f.match_score,
        ));
    }

    r.blank().line("[Applications]");
    for app in applications {
        r.line(format!(
            "  {:<20} {:<10} {:>3}%  {}",
            app.event_name,
            format!("{:?}", app.status).to_lowercase(),
            app.progress,
            app.next_step,
        ));
    }
    r.finish()
}

/// Stock levels and reorder suggestions.
#[must_use]
pub fn stock(items: &[StockItem], summary: &StockSummary, config: &StockConfig) -> String {
    let mut r = Report::default();
    r.heading("Stock")
        .field("Tracked", summary.tracked.to_string())
        .field("Critical", summary.critical.to_string())
        .field("Warning", summary.warning.to_string())
        .field("Reorder now", summary.reorder.to_string())
        .field("Auto-replenish", summary.auto_replenish.to_string())
        .blank();

    for item in items {
        let reorder = if item.needs_reorder(config) {
            "  REORDER"
        } else {
            ""
        };
        r.line(format!(
            "  {:<20} {:>6}/{:<6} {:<6} {:>5.1}%  {:>2} days  {}{reorder}",
            item.name,
            item.current,
            item.capacity,
            item.unit,
            item.percent_remaining(),
            item.days_left,
            item.status,
        ));
    }
    r.finish()
}

/// Calendar entries with counts by kind.
#[must_use]
pub fn calendar(title: &str, entries: &[&CalendarEntry], summary: &MonthSummary) -> String {
    let mut r = Report::default();
    r.heading(title)
        .field("Submitted", summary.submitted.to_string())
        .field("Deadlines", summary.deadlines.to_string())
        .field("Upcoming", summary.upcoming.to_string())
        .blank();

    if entries.is_empty() {
        r.line("  (no entries)");
    }
    for entry in entries {
        r.line(format!(
            "  {}  {:<34} {:<10} {:<9} {}",
            entry.date,
            entry.name,
            format!("{:?}", entry.kind).to_lowercase(),
            format!("{:?}", entry.status).to_lowercase(),
            entry.source_kind,
        ));
    }
    r.finish()
}

fn month_label(month: NaiveDate) -> String {
    month.format("%b %Y").to_string()
}

/// Data behind the forecast view.
#[derive(Debug, Clone, Copy)]
pub struct ForecastView<'a> {
    /// Month-by-month spend.
    pub history: &'a [MonthlySpend],
    /// Current vs. next month, when available.
    pub summary: Option<&'a ForecastSummary>,
    /// Per-category forecast.
    pub categories: &'a [CategoryForecast],
    /// Most accurate model.
    pub best_model: Option<&'a ForecastModel>,
    /// Known upcoming changes.
    pub events: &'a [SpendEvent],
}

/// Expenditure history and forecast.
#[must_use]
pub fn forecast(view: &ForecastView<'_>) -> String {
    let mut r = Report::default();
    r.heading("Expenditure Forecast");

    if let Some(summary) = view.summary {
        r.field(
            &format!("Spend {}", month_label(summary.current_month)),
            money(summary.current_spend),
        )
        .field(
            &format!("Forecast {}", month_label(summary.next_month)),
            money(summary.next_predicted),
        );
        if let Some(change) = summary.change_percent {
            r.field("Change", format!("{change:+.1}%"));
        }
    }
    if let Some(model) = view.best_model {
        r.field("Model", format!("{} ({}% accurate)", model.name, model.accuracy));
    }

    r.blank().line("[History]");
    for month in view.history {
        let (label, amount) = match (month.actual, month.predicted) {
            (Some(actual), _) => ("actual", actual),
            (None, Some(predicted)) => ("forecast", predicted),
            (None, None) => continue,
        };
        r.line(format!(
            "  {}  {:>8}  {label}",
            month_label(month.month),
            money(amount)
        ));
    }

    r.blank().line("[Categories]");
    for c in view.categories {
        let growth = c
            .growth_percent()
            .map_or_else(|| "-".to_string(), |g| format!("{g:+.1}%"));
        r.field(
            &c.category.to_string(),
            format!("{} -> {}  {growth}", money(c.current), money(c.predicted)),
        );
    }

    r.blank().line("[Upcoming]");
    for event in view.events {
        r.line(format!(
            "  {}  {:<32} {:>8}/mo  {}%",
            month_label(event.month),
            event.name,
            signed_money(event.impact),
            event.confidence,
        ));
    }
    r.finish()
}

/// Headline numbers, spend trend, category split and alerts.
#[must_use]
pub fn overview(overview: &Overview) -> String {
    let kpis = &overview.kpis;
    let change = kpis
        .spend_change_percent
        .map_or_else(String::new, |c| format!(" ({c:+.1}% vs. last month)"));

    let mut r = Report::default();
    r.heading("Overview")
        .field("Total spend", format!("{}{change}", money(kpis.total_spend)))
        .field("Active subs", kpis.active_subscriptions.to_string())
        .field("Runway", months(kpis.runway_months))
        .field("Opportunities", kpis.opportunities.to_string());

    r.blank().line("[Expenditure]");
    for month in &overview.expenditure {
        r.line(format!(
            "  {}  {:>8}",
            month_label(month.month),
            money(month.amount)
        ));
    }

    r.blank().line("[This month by category]");
    for share in &overview.category_split {
        r.field(
            &share.category.to_string(),
            format!("{} ({:.0}%)", money(share.amount), share.share_percent),
        );
    }

    r.blank().line("[Alerts]");
    for alert in &overview.alerts {
        let level = match alert.level {
            AlertLevel::Urgent => "URGENT",
            AlertLevel::Medium => "medium",
        };
        r.line(format!("  [{level:<6}] {}  ({})", alert.message, alert.detail));
    }
    r.finish()
}

/// Tool alternatives, category suggestions and trending tools.
#[must_use]
pub fn recommendations(
    recs: &Recommendations,
    categories: &[CategoryRecommendation],
    trends: &[IndustryTrend],
) -> String {
    let summary = recs.summarize();

    let mut r = Report::default();
    r.heading("Recommendations")
        .field(
            "Potential savings",
            format!("{}/year", money(summary.potential_savings)),
        )
        .field("Active", summary.active.to_string())
        .field("Tools analyzed", summary.tools_analyzed.to_string())
        .field(
            "Avg confidence",
            summary
                .average_confidence
                .map_or_else(|| "-".to_string(), |c| format!("{c:.0}%")),
        );

    r.blank().line("[Alternatives]");
    for rec in recs.active() {
        let percent = rec
            .savings_percent()
            .map_or_else(String::new, |p| format!(" ({p:.0}%)"));
        r.line(format!(
            "  #{} {} -> {}: save {}/year{percent}, {}% confident, rated {:.1}",
            rec.id,
            rec.current,
            rec.alternative,
            money(rec.savings),
            rec.confidence,
            rec.rating,
        ));
    }

    r.blank().line("[Categories]");
    for rec in categories {
        r.line(format!(
            "  {:<20} {} -> {}  {}/year  {}% adoption",
            rec.category,
            rec.current.join(", "),
            rec.recommendation,
            signed_money(rec.potential_savings),
            rec.adoption_rate,
        ));
    }

    r.blank().line("[Trending]");
    for trend in trends {
        r.line(format!(
            "  {:<14} {:<22} score {:>3}  +{}% growth",
            trend.tool, trend.category, trend.trend_score, trend.adoption_growth,
        ));
    }
    r.finish()
}

/// Effective configuration.
#[must_use]
pub fn config(config: &Config) -> String {
    let runway = config
        .baseline
        .current_runway_months
        .map_or_else(|| "derived".to_string(), months);
    let reference = config
        .deadlines
        .reference_date
        .map_or_else(|| "today".to_string(), |d| d.to_string());

    let mut r = Report::default();
    r.heading("Current Configuration")
        .blank()
        .line("[Baseline]")
        .field("Monthly burn", money(config.baseline.monthly_burn))
        .field("Cash on hand", money(config.baseline.cash_on_hand))
        .field("Runway", runway)
        .field("Team size", config.baseline.team_size.to_string())
        .blank()
        .line("[Scenarios]")
        .field("Default salary", money(config.scenarios.default_salary_per_hire))
        .field("Critical runway", months(config.scenarios.critical_runway_months))
        .field("Projection", format!("{} months", config.scenarios.projection_months))
        .blank()
        .line("[Deadlines]")
        .field("Urgent within", format!("{} days", config.deadlines.urgent_days))
        .field("Soon within", format!("{} days", config.deadlines.soon_days))
        .field("Reference date", reference)
        .blank()
        .line("[Stock]")
        .field(
            "Reorder below",
            format!("{}%", config.stock.reorder_threshold_percent),
        )
        .field("Buffer", format!("{} days", config.stock.buffer_days));
    r.finish()
}
