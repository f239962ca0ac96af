//! Configuration management for opsdeck.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scenario::FinancialBaseline;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration directory name.
const CONFIG_DIR_NAME: &str = "opsdeck";

/// Environment variable prefix.
const ENV_PREFIX: &str = "OPSDECK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `OPSDECK_`, sections split on `__`,
///    e.g. `OPSDECK_BASELINE__CASH_ON_HAND=250000`)
/// 2. TOML config file at `~/.config/opsdeck/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Current financial position.
    pub baseline: BaselineConfig,
    /// Scenario planning settings.
    pub scenarios: ScenarioConfig,
    /// Deadline urgency buckets.
    pub deadlines: DeadlineConfig,
    /// Stock replenishment settings.
    pub stock: StockConfig,
}

/// Baseline the scenario calculator evaluates against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Net monthly cash outflow.
    pub monthly_burn: f64,
    /// Cash in the bank.
    pub cash_on_hand: f64,
    /// Current runway in months.
    /// Derived as `cash_on_hand / monthly_burn` when unset.
    pub current_runway_months: Option<f64>,
    /// Headcount.
    pub team_size: u32,
}

/// Scenario planning settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Salary pre-filled for new hires and used by sensitivity analysis.
    pub default_salary_per_hire: f64,
    /// Runways shorter than this many months are flagged as critical.
    pub critical_runway_months: f64,
    /// Number of months in a runway projection.
    pub projection_months: u32,
}

/// Deadline urgency buckets, in days from today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadlineConfig {
    /// Deadlines within this many days (or past) are urgent.
    pub urgent_days: i64,
    /// Deadlines within this many days are due soon.
    pub soon_days: i64,
    /// Fixed "today" for urgency checks.
    /// Defaults to the current local date.
    pub reference_date: Option<NaiveDate>,
}

/// Stock replenishment settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    /// Reorder when less than this percentage of capacity remains.
    pub reorder_threshold_percent: f64,
    /// Reorder when fewer than this many days of stock remain.
    pub buffer_days: u32,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        let baseline = FinancialBaseline::default();
        Self {
            monthly_burn: baseline.monthly_burn,
            cash_on_hand: baseline.cash_on_hand,
            current_runway_months: None,
            team_size: baseline.team_size,
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            default_salary_per_hire: 7500.0,
            critical_runway_months: 6.0,
            projection_months: 6,
        }
    }
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            urgent_days: 7,
            soon_days: 14,
            reference_date: None,
        }
    }
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            reorder_threshold_percent: 20.0,
            buffer_days: 7,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let baseline = &self.baseline;
        if !baseline.monthly_burn.is_finite() || baseline.monthly_burn <= 0.0 {
            return Err(invalid(format!(
                "monthly_burn must be a positive number (got {})",
                baseline.monthly_burn
            )));
        }

        if !baseline.cash_on_hand.is_finite() || baseline.cash_on_hand < 0.0 {
            return Err(invalid(format!(
                "cash_on_hand must be a non-negative number (got {})",
                baseline.cash_on_hand
            )));
        }

        if let Some(runway) = baseline.current_runway_months {
            if !runway.is_finite() || runway < 0.0 {
                return Err(invalid(format!(
                    "current_runway_months must be a non-negative number (got {runway})"
                )));
            }
        }

        let scenarios = &self.scenarios;
        if !scenarios.default_salary_per_hire.is_finite() || scenarios.default_salary_per_hire < 0.0
        {
            return Err(invalid(
                "default_salary_per_hire must be a non-negative number".to_string(),
            ));
        }

        if scenarios.projection_months == 0 {
            return Err(invalid(
                "projection_months must be greater than 0".to_string(),
            ));
        }

        if self.deadlines.urgent_days > self.deadlines.soon_days {
            return Err(invalid(format!(
                "urgent_days ({}) cannot be greater than soon_days ({})",
                self.deadlines.urgent_days, self.deadlines.soon_days
            )));
        }

        if !(0.0..=100.0).contains(&self.stock.reorder_threshold_percent) {
            return Err(invalid(format!(
                "reorder_threshold_percent must be between 0 and 100 (got {})",
                self.stock.reorder_threshold_percent
            )));
        }

        Ok(())
    }

    /// The financial baseline, deriving the current runway if unset.
    #[must_use]
    pub fn baseline(&self) -> FinancialBaseline {
        let b = &self.baseline;
        let baseline = match b.current_runway_months {
            Some(runway) => FinancialBaseline::new(b.monthly_burn, b.cash_on_hand, runway),
            None => FinancialBaseline::derived(b.monthly_burn, b.cash_on_hand),
        };
        baseline.with_team_size(b.team_size)
    }
}

impl DeadlineConfig {
    /// The date urgency is measured from.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

fn invalid(message: String) -> Error {
    Error::ConfigValidation { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.baseline.monthly_burn, 6900.0);
        assert_eq!(config.baseline.cash_on_hand, 124_200.0);
        assert!(config.baseline.current_runway_months.is_none());
        assert_eq!(config.baseline.team_size, 8);
    }

    #[test]
    fn test_default_scenario_config() {
        let scenarios = ScenarioConfig::default();

        assert_eq!(scenarios.default_salary_per_hire, 7500.0);
        assert_eq!(scenarios.critical_runway_months, 6.0);
        assert_eq!(scenarios.projection_months, 6);
    }

    #[test]
    fn test_default_deadline_config() {
        let deadlines = DeadlineConfig::default();

        assert_eq!(deadlines.urgent_days, 7);
        assert_eq!(deadlines.soon_days, 14);
        assert!(deadlines.reference_date.is_none());
    }

    #[test]
    fn test_default_stock_config() {
        let stock = StockConfig::default();

        assert_eq!(stock.reorder_threshold_percent, 20.0);
        assert_eq!(stock.buffer_days, 7);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_burn() {
        let mut config = Config::default();
        config.baseline.monthly_burn = 0.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("monthly_burn"));
    }

    #[test]
    fn test_validate_nan_burn() {
        let mut config = Config::default();
        config.baseline.monthly_burn = f64::NAN;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_negative_cash() {
        let mut config = Config::default();
        config.baseline.cash_on_hand = -1.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("cash_on_hand"));
    }

    #[test]
    fn test_validate_zero_projection_months() {
        let mut config = Config::default();
        config.scenarios.projection_months = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("projection_months"));
    }

    #[test]
    fn test_validate_deadline_order() {
        let mut config = Config::default();
        config.deadlines.urgent_days = 30;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("urgent_days"));
    }

    #[test]
    fn test_validate_reorder_threshold_range() {
        let mut config = Config::default();
        config.stock.reorder_threshold_percent = 150.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("reorder_threshold_percent"));
    }

    #[test]
    fn test_default_baseline_derives_eighteen_months() {
        let baseline = Config::default().baseline();
        assert_eq!(baseline, FinancialBaseline::default());
    }

    #[test]
    fn test_baseline_supplied_runway() {
        let mut config = Config::default();
        config.baseline.current_runway_months = Some(12.5);

        assert_eq!(config.baseline().current_runway_months, 12.5);
    }

    #[test]
    fn test_baseline_derived_runway() {
        let mut config = Config::default();
        config.baseline.current_runway_months = None;
        config.baseline.cash_on_hand = 69_000.0;

        let baseline = config.baseline();
        assert!((baseline.current_runway_months - 10.0).abs() < 1e-9);
        assert_eq!(baseline.team_size, 8);
    }

    #[test]
    fn test_today_uses_reference_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let deadlines = DeadlineConfig {
            reference_date: Some(date),
            ..DeadlineConfig::default()
        };
        assert_eq!(deadlines.today(), date);
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("opsdeck"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.scenarios, ScenarioConfig::default());
        assert_eq!(config.stock, StockConfig::default());
    }

    #[test]
    fn test_load_toml_file() {
        let path = std::env::temp_dir().join(format!("opsdeck_config_{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[baseline]\ncash_on_hand = 250000.0\n\n[deadlines]\nreference_date = \"2024-01-20\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(config.baseline.cash_on_hand, 250_000.0);
        assert_eq!(config.baseline.monthly_burn, 6900.0);
        assert_eq!(
            config.deadlines.reference_date,
            NaiveDate::from_ymd_opt(2024, 1, 20)
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_toml_values() {
        let path = std::env::temp_dir().join(format!("opsdeck_bad_{}.toml", std::process::id()));
        std::fs::write(&path, "[baseline]\nmonthly_burn = -5.0\n").unwrap();

        let err = Config::load_from(Some(path.clone())).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("monthly_burn"));
        assert!(json.contains("critical_runway_months"));
    }

    #[test]
    fn test_baseline_config_deserialize_partial() {
        let json = r#"{"monthly_burn": 10000.0}"#;
        let baseline: BaselineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(baseline.monthly_burn, 10_000.0);
        assert_eq!(baseline.cash_on_hand, 124_200.0);
    }
}
