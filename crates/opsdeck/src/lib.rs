//! `opsdeck` - Startup operations deck with a what-if runway calculator
//!
//! This library provides the scenario calculator and store, the typed data
//! sets behind each dashboard view, and the configuration, logging and
//! rendering used by the `opsdeck` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod logging;
pub mod report;
pub mod scenario;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use scenario::{
    compute_scenario, FinancialBaseline, Runway, Scenario, ScenarioAssumptions, ScenarioDraft,
    ScenarioId, ScenarioResult, ScenarioStore,
};
