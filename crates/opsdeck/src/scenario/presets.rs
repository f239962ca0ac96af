//! Seeded example scenarios.

use tracing::warn;

use super::{
    compute_scenario, FinancialBaseline, Scenario, ScenarioAssumptions, ScenarioId,
    ScenarioOrigin, ScenarioResult,
};
use crate::error::Result;

/// Ids reserved for the seeded scenarios.
pub const PRESET_IDS: [&str; 3] = ["1", "2", "3"];

struct Preset {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    confidence_score: u8,
    assumptions: ScenarioAssumptions,
}

fn presets() -> [Preset; 3] {
    [
        Preset {
            id: PRESET_IDS[0],
            name: "Aggressive Growth",
            description: "Rapid team expansion with increased marketing spend",
            confidence_score: 85,
            assumptions: ScenarioAssumptions {
                new_hires: 4,
                salary_per_hire: 8000.0,
                additional_saas: 2000.0,
                marketing_budget_delta: 5000.0,
                office_expansion_delta: 1500.0,
            },
        },
        Preset {
            id: PRESET_IDS[1],
            name: "Conservative Growth",
            description: "Modest expansion focusing on operational efficiency",
            confidence_score: 92,
            assumptions: ScenarioAssumptions {
                new_hires: 2,
                salary_per_hire: 7500.0,
                additional_saas: 800.0,
                marketing_budget_delta: 2000.0,
                office_expansion_delta: 0.0,
            },
        },
        Preset {
            id: PRESET_IDS[2],
            name: "Cost Optimization",
            description: "Focus on reducing expenses while maintaining team",
            confidence_score: 88,
            assumptions: ScenarioAssumptions {
                new_hires: 0,
                salary_per_hire: 0.0,
                additional_saas: -1200.0,
                marketing_budget_delta: -1000.0,
                office_expansion_delta: -800.0,
            },
        },
    ]
}

impl Preset {
    fn build(&self, baseline: &FinancialBaseline) -> Result<Scenario> {
        let computed = compute_scenario(baseline, &self.assumptions)?;
        Ok(Scenario {
            id: ScenarioId::new(self.id),
            name: self.name.to_string(),
            description: self.description.to_string(),
            origin: ScenarioOrigin::Preset,
            assumptions: self.assumptions,
            results: ScenarioResult {
                confidence_score: self.confidence_score,
                ..computed
            },
        })
    }
}

/// Build the seeded scenarios, computing their results against `baseline`.
///
/// Each preset keeps its own fixed confidence score.
///
/// # Errors
///
/// Returns [`crate::Error::RunwayUndefined`] if `baseline` makes any preset
/// land exactly on zero burn.
pub fn preset_scenarios(baseline: &FinancialBaseline) -> Result<Vec<Scenario>> {
    presets().iter().map(|preset| preset.build(baseline)).collect()
}

/// The presets that have a defined runway under `baseline`.
///
/// A preset that lands on zero burn is left out and logged.
pub(super) fn usable_presets(baseline: &FinancialBaseline) -> Vec<Scenario> {
    presets()
        .iter()
        .filter_map(|preset| match preset.build(baseline) {
            Ok(scenario) => Some(scenario),
            Err(e) => {
                warn!(id = preset.id, name = preset.name, error = %e, "skipping preset");
                None
            }
        })
        .collect()
}
