//! `opsdeck` - CLI for the operations deck
//!
//! This binary prints the dashboard views and evaluates what-if scenarios
//! against the configured financial baseline.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use opsdeck::cli::{
    CalendarCommand, Cli, Command, ConfigCommand, EventsCommand, ProcurementCommand,
    RecommendationsCommand, ScenarioCommand, TendersCommand,
};
use opsdeck::fixtures::{
    calendar, events, forecast, invoices, overview, parse_date, parse_month, procurement,
    recommendations, stock, tenders,
};
use opsdeck::scenario::{project_runway, sensitivity, ScenarioId};
use opsdeck::{init_logging, report, Config, ScenarioStore};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // `config validate` reports load errors itself
    if let Command::Config(ConfigCommand::Validate { file }) = &cli.command {
        return handle_validate(file.clone().or_else(|| cli.config.clone()));
    }

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Overview(args) => {
            let view = overview::overview(&config.baseline());
            emit(args.json, &view, || report::overview(&view))
        }
        Command::Scenario(cmd) => handle_scenario(&config, cmd),
        Command::Baseline(args) => {
            let baseline = config.baseline();
            emit(args.json, &baseline, || report::baseline(&baseline))
        }
        Command::Procurement(cmd) => handle_procurement(&cmd),
        Command::Invoices(args) => handle_invoices(args.json),
        Command::Tenders(cmd) => handle_tenders(&config, &cmd),
        Command::Events(cmd) => handle_events(&config, &cmd),
        Command::Stock(args) => handle_stock(&config, args.json),
        Command::Calendar(cmd) => handle_calendar(&cmd),
        Command::Forecast(args) => handle_forecast(args.json),
        Command::Recommendations(cmd) => handle_recommendations(&cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Print `value` as JSON, or the text rendering.
fn emit<T: serde::Serialize + ?Sized>(
    json: bool,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<()> {
    if json {
        println!("{}", report::json(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

fn handle_scenario(config: &Config, cmd: ScenarioCommand) -> Result<()> {
    let baseline = config.baseline();
    let critical = config.scenarios.critical_runway_months;
    let store = ScenarioStore::with_presets(&baseline);

    match cmd {
        ScenarioCommand::List { json } => {
            emit(json, &store, || report::scenario_list(&store, critical))
        }
        ScenarioCommand::Show { id, months, json } => {
            let id = ScenarioId::new(id);
            let scenario = store
                .get(&id)
                .ok_or_else(|| opsdeck::Error::scenario_not_found(id.as_str()))?;
            let months = months.unwrap_or(config.scenarios.projection_months);
            let projection = project_runway(&baseline, scenario.results(), months);

            let value = serde_json::json!({
                "scenario": scenario,
                "critical": scenario.results().is_critical(critical),
                "projection": projection,
            });
            emit(json, &value, || {
                report::scenario_detail(scenario, &projection, critical)
            })
        }
        ScenarioCommand::Compute(cmd) => {
            let draft = cmd.draft(config.scenarios.default_salary_per_hire);
            let (store, id) = store
                .add(&draft, &baseline)
                .with_context(|| format!("cannot compute scenario '{}'", draft.name))?;
            let scenario = store
                .get(&id)
                .ok_or_else(|| opsdeck::Error::scenario_not_found(id.as_str()))?;
            let projection = project_runway(
                &baseline,
                scenario.results(),
                config.scenarios.projection_months,
            );

            let value = serde_json::json!({
                "scenario": scenario,
                "critical": scenario.results().is_critical(critical),
                "projection": projection,
            });
            emit(cmd.json, &value, || {
                report::scenario_detail(scenario, &projection, critical)
            })
        }
        ScenarioCommand::Sensitivity { salary, json } => {
            let salary = salary.unwrap_or(config.scenarios.default_salary_per_hire);
            let rows = sensitivity(&baseline, salary);
            emit(json, &rows, || report::sensitivity(&rows))
        }
    }
}

fn handle_procurement(cmd: &ProcurementCommand) -> Result<()> {
    let records = procurement::procurement_records();
    let found = procurement::filter_records(&records, &cmd.filter());
    let total = procurement::total_spend(&records);
    let active = procurement::active_subscriptions(&records);
    let totals = procurement::category_totals(&records);

    let value = serde_json::json!({
        "records": found,
        "total_spend": total,
        "active_subscriptions": active,
        "category_totals": totals,
    });
    emit(cmd.json, &value, || {
        report::procurement(&found, total, active, &totals)
    })
}

fn handle_invoices(json: bool) -> Result<()> {
    let scanned = invoices::scanned_invoices();
    let queue = invoices::processing_queue();
    let summary = invoices::summarize(&scanned, &queue);

    let value = serde_json::json!({
        "summary": summary,
        "invoices": scanned,
        "queue": queue,
    });
    emit(json, &value, || report::invoices(&scanned, &queue, &summary))
}

fn handle_tenders(config: &Config, cmd: &TendersCommand) -> Result<()> {
    let notices = tenders::tender_notices();
    let found = tenders::filter_tenders(&notices, &cmd.filter());
    let summary = tenders::summarize(&notices);

    let value = serde_json::json!({
        "summary": summary,
        "tenders": found,
    });
    emit(cmd.json, &value, || {
        report::tenders(&found, &summary, &config.deadlines)
    })
}

fn handle_events(config: &Config, cmd: &EventsCommand) -> Result<()> {
    let matched = events::matched_events();
    let found = events::filter_events(&matched, &cmd.filter());
    let summary = events::summarize(&matched, &config.deadlines);
    let funding = events::funding_opportunities();
    let applications = events::tracked_applications();

    let value = serde_json::json!({
        "summary": summary,
        "events": found,
        "funding": funding,
        "applications": applications,
    });
    emit(cmd.json, &value, || {
        report::events(&found, &summary, &funding, &applications, &config.deadlines)
    })
}

fn handle_stock(config: &Config, json: bool) -> Result<()> {
    let items = stock::stock_items();
    let summary = stock::summarize(&items, &config.stock);
    let reorder: Vec<_> = stock::reorder_list(&items, &config.stock)
        .iter()
        .map(|item| item.name)
        .collect();

    let value = serde_json::json!({
        "summary": summary,
        "items": items,
        "reorder": reorder,
        "usage_history": stock::usage_history(),
    });
    emit(json, &value, || report::stock(&items, &summary, &config.stock))
}

fn handle_calendar(cmd: &CalendarCommand) -> Result<()> {
    let entries = calendar::calendar_entries();

    let (title, selected) = if let Some(date) = &cmd.date {
        let date = parse_date(date)?;
        (format!("Calendar {date}"), calendar::entries_on(&entries, date))
    } else if let Some(month) = &cmd.month {
        let month = parse_month(month)?;
        (
            format!("Calendar {}", month.format("%B %Y")),
            calendar::entries_in_month(&entries, month),
        )
    } else {
        ("Calendar".to_string(), entries.iter().collect())
    };
    let summary = calendar::summarize(selected.iter().copied());

    let value = serde_json::json!({
        "summary": summary,
        "entries": selected,
    });
    emit(cmd.json, &value, || report::calendar(&title, &selected, &summary))
}

fn handle_forecast(json: bool) -> Result<()> {
    let history = forecast::spend_history();
    let summary = forecast::forecast_summary(&history);
    let categories = forecast::category_forecasts();
    let models = forecast::forecast_models();
    let upcoming = forecast::upcoming_spend_events();

    let value = serde_json::json!({
        "summary": summary,
        "history": history,
        "categories": categories,
        "models": models,
        "upcoming": upcoming,
        "net_upcoming_impact": forecast::net_event_impact(&upcoming),
    });
    emit(json, &value, || {
        report::forecast(&report::ForecastView {
            history: &history,
            summary: summary.as_ref(),
            categories: &categories,
            best_model: forecast::best_model(&models),
            events: &upcoming,
        })
    })
}

fn handle_recommendations(cmd: &RecommendationsCommand) -> Result<()> {
    let recs = cmd.recommendations();
    let active: Vec<_> = recs.active().collect();
    let categories = recommendations::category_recommendations();
    let trends = recommendations::industry_trends();

    let value = serde_json::json!({
        "summary": recs.summarize(),
        "recommendations": active,
        "categories": categories,
        "trends": trends,
    });
    emit(cmd.json, &value, || {
        report::recommendations(&recs, &categories, &trends)
    })
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => emit(json, config, || report::config(config)),
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
            Ok(())
        }
        ConfigCommand::Validate { file } => handle_validate(file),
    }
}

fn handle_validate(file: Option<std::path::PathBuf>) -> Result<()> {
    let path = file.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());
    match Config::load_from(Some(path)) {
        Ok(_) => println!("Configuration is valid."),
        Err(e) => println!("Configuration error: {e}"),
    }
    Ok(())
}
