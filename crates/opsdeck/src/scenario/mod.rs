//! What-if scenario planning.
//!
//! A scenario is a named set of hypothetical changes to the monthly burn
//! (new hires, SaaS, marketing, office) evaluated against a fixed
//! [`FinancialBaseline`]. Evaluation is a pure function,
//! [`compute_scenario`]; named scenarios live in a caller-owned
//! [`ScenarioStore`] whose add and remove operations return a new store.
//!
//! # Example
//!
//! ```
//! use opsdeck::scenario::{compute_scenario, FinancialBaseline, ScenarioAssumptions};
//!
//! let baseline = FinancialBaseline::default();
//! let assumptions = ScenarioAssumptions {
//!     new_hires: 1,
//!     salary_per_hire: 7500.0,
//!     ..ScenarioAssumptions::default()
//! };
//!
//! let result = compute_scenario(&baseline, &assumptions).unwrap();
//! assert_eq!(result.new_monthly_burn, 14_400.0);
//! ```

mod calculator;
mod presets;
mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use calculator::{
    compute_scenario, project_runway, sensitivity, Lever, ProjectionPoint, Sensitivity,
};
pub use presets::{preset_scenarios, PRESET_IDS};
pub use store::{ScenarioDraft, ScenarioStore};

/// Confidence score attached to every computed scenario.
///
/// This is a fixed placeholder, not derived from the assumptions.
pub const DEFAULT_CONFIDENCE_SCORE: u8 = 85;

/// Current financial position that scenarios are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialBaseline {
    /// Net monthly cash outflow.
    pub monthly_burn: f64,
    /// Cash in the bank.
    pub cash_on_hand: f64,
    /// Runway at the current burn, in months.
    pub current_runway_months: f64,
    /// Headcount. Display only; not used by the calculator.
    pub team_size: u32,
}

impl FinancialBaseline {
    /// Create a baseline with an explicitly supplied current runway.
    #[must_use]
    pub fn new(monthly_burn: f64, cash_on_hand: f64, current_runway_months: f64) -> Self {
        Self {
            monthly_burn,
            cash_on_hand,
            current_runway_months,
            team_size: 0,
        }
    }

    /// Create a baseline whose current runway is `cash_on_hand / monthly_burn`.
    ///
    /// `monthly_burn` should be positive; configuration validation enforces this.
    #[must_use]
    pub fn derived(monthly_burn: f64, cash_on_hand: f64) -> Self {
        Self::new(monthly_burn, cash_on_hand, cash_on_hand / monthly_burn)
    }

    /// Set the team size.
    #[must_use]
    pub fn with_team_size(mut self, team_size: u32) -> Self {
        self.team_size = team_size;
        self
    }
}

impl Default for FinancialBaseline {
    fn default() -> Self {
        Self::new(6900.0, 124_200.0, 18.0).with_team_size(8)
    }
}

/// Hypothetical monthly changes to the burn.
///
/// No cross-field invariant holds here; input validation happens in
/// [`ScenarioDraft::validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioAssumptions {
    /// Number of people hired. Negative values model departures.
    pub new_hires: i32,
    /// Monthly cost of each new hire.
    pub salary_per_hire: f64,
    /// Change in SaaS spend per month.
    pub additional_saas: f64,
    /// Change in marketing budget per month.
    pub marketing_budget_delta: f64,
    /// Change in office and infrastructure cost per month.
    pub office_expansion_delta: f64,
}

impl ScenarioAssumptions {
    /// Total change to the monthly burn implied by these assumptions.
    #[must_use]
    pub fn monthly_increase(&self) -> f64 {
        f64::from(self.new_hires) * self.salary_per_hire
            + self.additional_saas
            + self.marketing_budget_delta
            + self.office_expansion_delta
    }

    /// The opposite adjustment: head count and every delta flip sign,
    /// while the per-hire salary (a rate) is kept.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            new_hires: self.new_hires.saturating_neg(),
            salary_per_hire: self.salary_per_hire,
            additional_saas: -self.additional_saas,
            marketing_budget_delta: -self.marketing_budget_delta,
            office_expansion_delta: -self.office_expansion_delta,
        }
    }
}

/// Runway after applying a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Runway {
    /// The company still burns cash.
    Finite {
        /// `cash_on_hand / new_monthly_burn`.
        new_runway_months: f64,
        /// Difference from the baseline runway.
        runway_change_months: f64,
    },
    /// The new burn is negative: cash grows every month.
    NotBurning,
}

/// Projected impact of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Change to the monthly burn.
    pub monthly_increase: f64,
    /// Baseline burn plus `monthly_increase`.
    pub new_monthly_burn: f64,
    /// Resulting runway.
    pub runway: Runway,
    /// Fixed confidence score, in percent.
    pub confidence_score: u8,
}

impl ScenarioResult {
    /// New runway in months, if the scenario still burns cash.
    #[must_use]
    pub fn new_runway_months(&self) -> Option<f64> {
        match self.runway {
            Runway::Finite {
                new_runway_months, ..
            } => Some(new_runway_months),
            Runway::NotBurning => None,
        }
    }

    /// Change in runway vs. baseline, if the scenario still burns cash.
    #[must_use]
    pub fn runway_change_months(&self) -> Option<f64> {
        match self.runway {
            Runway::Finite {
                runway_change_months,
                ..
            } => Some(runway_change_months),
            Runway::NotBurning => None,
        }
    }

    /// Whether the runway drops below `threshold_months`.
    #[must_use]
    pub fn is_critical(&self, threshold_months: f64) -> bool {
        self.new_runway_months()
            .is_some_and(|months| months < threshold_months)
    }
}

/// Identifier of a stored scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(String);

impl ScenarioId {
    /// Wrap a raw id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScenarioId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Where a scenario came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioOrigin {
    /// Seeded example; cannot be deleted.
    Preset,
    /// Created from user input.
    Custom,
}

/// A named scenario with its cached results.
///
/// Results are computed once when the scenario is created and never
/// recomputed, even if the baseline later changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    id: ScenarioId,
    name: String,
    description: String,
    origin: ScenarioOrigin,
    assumptions: ScenarioAssumptions,
    results: ScenarioResult,
}

impl Scenario {
    /// Unique id.
    #[must_use]
    pub fn id(&self) -> &ScenarioId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Preset or custom.
    #[must_use]
    pub fn origin(&self) -> ScenarioOrigin {
        self.origin
    }

    /// Whether this is one of the seeded scenarios.
    #[must_use]
    pub fn is_preset(&self) -> bool {
        self.origin == ScenarioOrigin::Preset
    }

    /// The inputs the results were computed from.
    #[must_use]
    pub fn assumptions(&self) -> &ScenarioAssumptions {
        &self.assumptions
    }

    /// Results cached at creation time.
    #[must_use]
    pub fn results(&self) -> &ScenarioResult {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_baseline_matches_reference_company() {
        let baseline = FinancialBaseline::default();
        assert_eq!(baseline.monthly_burn, 6900.0);
        assert_eq!(baseline.cash_on_hand, 124_200.0);
        assert_eq!(baseline.current_runway_months, 18.0);
        assert_eq!(baseline.team_size, 8);
    }

    #[test]
    fn test_derived_baseline_runway() {
        let baseline = FinancialBaseline::derived(6900.0, 124_200.0);
        assert!((baseline.current_runway_months - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_increase() {
        let assumptions = ScenarioAssumptions {
            new_hires: 2,
            salary_per_hire: 7500.0,
            additional_saas: 800.0,
            marketing_budget_delta: 2000.0,
            office_expansion_delta: 0.0,
        };
        assert_eq!(assumptions.monthly_increase(), 17_800.0);
    }

    #[test]
    fn test_negated_keeps_salary_rate() {
        let assumptions = ScenarioAssumptions {
            new_hires: 3,
            salary_per_hire: 5000.0,
            additional_saas: 100.0,
            marketing_budget_delta: -50.0,
            office_expansion_delta: 25.0,
        };
        let negated = assumptions.negated();
        assert_eq!(negated.new_hires, -3);
        assert_eq!(negated.salary_per_hire, 5000.0);
        assert_eq!(negated.additional_saas, -100.0);
        assert_eq!(negated.marketing_budget_delta, 50.0);
        assert_eq!(negated.office_expansion_delta, -25.0);
    }

    #[test]
    fn test_result_accessors_not_burning() {
        let result = ScenarioResult {
            monthly_increase: -10_000.0,
            new_monthly_burn: -3100.0,
            runway: Runway::NotBurning,
            confidence_score: DEFAULT_CONFIDENCE_SCORE,
        };
        assert!(result.new_runway_months().is_none());
        assert!(result.runway_change_months().is_none());
        assert!(!result.is_critical(6.0));
    }

    #[test]
    fn test_is_critical() {
        let result = ScenarioResult {
            monthly_increase: 0.0,
            new_monthly_burn: 1.0,
            runway: Runway::Finite {
                new_runway_months: 5.9,
                runway_change_months: -12.1,
            },
            confidence_score: DEFAULT_CONFIDENCE_SCORE,
        };
        assert!(result.is_critical(6.0));
        assert!(!result.is_critical(5.0));
    }

    #[test]
    fn test_runway_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Runway::NotBurning).unwrap();
        assert_eq!(json, r#"{"kind":"not_burning"}"#);
    }

    #[test]
    fn test_scenario_id_display() {
        let id = ScenarioId::from("1700000000000");
        assert_eq!(id.to_string(), "1700000000000");
        assert_eq!(id.as_str(), "1700000000000");
    }

    #[test]
    fn test_assumptions_deserialize_partial() {
        let assumptions: ScenarioAssumptions =
            serde_json::from_str(r#"{"new_hires": 1, "salary_per_hire": 9000}"#).unwrap();
        assert_eq!(assumptions.new_hires, 1);
        assert_eq!(assumptions.additional_saas, 0.0);
    }
}
