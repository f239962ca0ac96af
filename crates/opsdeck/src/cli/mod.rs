//! Command-line interface for opsdeck.
//!
//! This module provides the CLI structure for the `opsdeck` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CalendarCommand, CategoryArg, ComputeCommand, ConfigCommand, EventsCommand, OutputArgs,
    ProcurementCommand, RecommendationsCommand, ScenarioCommand, TenderStatusArg,
    TendersCommand,
};

use crate::logging::Verbosity;

/// opsdeck - Startup operations at a glance
///
/// Runway what-if scenarios, spend tracking, tenders, events and stock
/// levels for a small company, printed as text or JSON.
#[derive(Debug, Parser)]
#[command(name = "opsdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show headline numbers, spend trend and alerts
    Overview(OutputArgs),

    /// Plan what-if scenarios against the runway
    #[command(subcommand)]
    Scenario(ScenarioCommand),

    /// Show the current financial baseline
    Baseline(OutputArgs),

    /// List purchases and subscriptions
    Procurement(ProcurementCommand),

    /// Show scanned invoices and the processing queue
    Invoices(OutputArgs),

    /// List matched tender notices
    Tenders(TendersCommand),

    /// List matched events, funding and applications
    Events(EventsCommand),

    /// Show stock levels and reorder suggestions
    Stock(OutputArgs),

    /// Show the proposal calendar
    Calendar(CalendarCommand),

    /// Show expenditure history and forecast
    Forecast(OutputArgs),

    /// Suggest cheaper tools and show industry trends
    Recommendations(RecommendationsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}
