//! Caller-owned scenario collection with immutable updates.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    compute_scenario, presets::usable_presets, FinancialBaseline, Scenario, ScenarioAssumptions,
    ScenarioId, ScenarioOrigin,
};
use crate::error::{Error, Result};

/// Description given to scenarios created without one.
const CUSTOM_DESCRIPTION: &str = "Custom scenario";

/// User input for a new scenario, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDraft {
    /// Scenario name; required.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Assumptions to evaluate.
    pub assumptions: ScenarioAssumptions,
}

impl ScenarioDraft {
    /// Start a draft with the given name and zero assumptions.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the assumptions.
    #[must_use]
    pub fn with_assumptions(mut self, assumptions: ScenarioAssumptions) -> Self {
        self.assumptions = assumptions;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate the draft at the input boundary.
    ///
    /// The name must contain something other than whitespace, every amount
    /// must be finite, and hires and salary must not be negative.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_input("name", "scenario name is required"));
        }

        let a = &self.assumptions;
        if a.new_hires < 0 {
            return Err(Error::invalid_input(
                "new_hires",
                format!("must not be negative (got {})", a.new_hires),
            ));
        }

        let amounts = [
            ("salary_per_hire", a.salary_per_hire),
            ("additional_saas", a.additional_saas),
            ("marketing_budget_delta", a.marketing_budget_delta),
            ("office_expansion_delta", a.office_expansion_delta),
        ];
        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(Error::invalid_input(field, "must be a finite number"));
            }
        }

        if a.salary_per_hire < 0.0 {
            return Err(Error::invalid_input(
                "salary_per_hire",
                format!("must not be negative (got {})", a.salary_per_hire),
            ));
        }

        Ok(())
    }
}

/// An ordered collection of scenarios.
///
/// The store is a plain value: [`add`](Self::add) and
/// [`remove`](Self::remove) leave `self` untouched and return the updated
/// store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScenarioStore {
    scenarios: Vec<Scenario>,
}

impl ScenarioStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the preset scenarios.
    ///
    /// Presets whose runway is undefined under `baseline` are skipped, so
    /// the rest of the store stays usable.
    #[must_use]
    pub fn with_presets(baseline: &FinancialBaseline) -> Self {
        Self {
            scenarios: usable_presets(baseline),
        }
    }

    /// Validate `draft`, compute its results against `baseline` and append
    /// it under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a bad draft and
    /// [`Error::RunwayUndefined`] if the scenario lands on zero burn. The
    /// scenario is not created in either case.
    pub fn add(
        &self,
        draft: &ScenarioDraft,
        baseline: &FinancialBaseline,
    ) -> Result<(Self, ScenarioId)> {
        draft.validate()?;
        let results = compute_scenario(baseline, &draft.assumptions)?;

        let id = self.next_id();
        let scenario = Scenario {
            id: id.clone(),
            name: draft.name.trim().to_string(),
            description: draft
                .description
                .clone()
                .unwrap_or_else(|| CUSTOM_DESCRIPTION.to_string()),
            origin: ScenarioOrigin::Custom,
            assumptions: draft.assumptions,
            results,
        };
        debug!(%id, name = scenario.name(), "added scenario");

        let mut scenarios = self.scenarios.clone();
        scenarios.push(scenario);
        Ok((Self { scenarios }, id))
    }

    /// Remove the custom scenario with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScenarioNotFound`] for an unknown id and
    /// [`Error::PresetScenario`] for a seeded one.
    pub fn remove(&self, id: &ScenarioId) -> Result<Self> {
        let scenario = self.get(id).ok_or_else(|| Error::scenario_not_found(id.as_str()))?;
        if scenario.is_preset() {
            warn!(%id, "refusing to delete preset scenario");
            return Err(Error::PresetScenario {
                id: id.to_string(),
            });
        }

        let scenarios = self
            .scenarios
            .iter()
            .filter(|s| s.id() != id)
            .cloned()
            .collect();
        debug!(%id, "removed scenario");
        Ok(Self { scenarios })
    }

    /// Look up a scenario by id.
    #[must_use]
    pub fn get(&self, id: &ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id() == id)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    /// Number of scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the store holds no scenarios.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// The selection to show after an update: `selected` if it is still
    /// present, otherwise the first scenario.
    #[must_use]
    pub fn reselect(&self, selected: &ScenarioId) -> Option<&ScenarioId> {
        self.get(selected)
            .or_else(|| self.scenarios.first())
            .map(Scenario::id)
    }

    /// A millisecond timestamp id, bumped until unused.
    fn next_id(&self) -> ScenarioId {
        let mut candidate = Utc::now().timestamp_millis();
        loop {
            let id = ScenarioId::new(candidate.to_string());
            if self.get(&id).is_none() {
                return id;
            }
            candidate += 1;
        }
    }
}

impl<'a> IntoIterator for &'a ScenarioStore {
    type Item = &'a Scenario;
    type IntoIter = std::slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenarios.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::PRESET_IDS;

    fn baseline() -> FinancialBaseline {
        FinancialBaseline::default()
    }

    fn seeded() -> ScenarioStore {
        ScenarioStore::with_presets(&baseline())
    }

    fn launch_draft() -> ScenarioDraft {
        ScenarioDraft::new("Product Launch Phase").with_assumptions(ScenarioAssumptions {
            new_hires: 1,
            salary_per_hire: 7500.0,
            marketing_budget_delta: 3000.0,
            ..ScenarioAssumptions::default()
        })
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ScenarioStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_with_presets() {
        let store = seeded();
        assert_eq!(store.len(), 3);
        for id in PRESET_IDS {
            assert!(store.get(&ScenarioId::from(id)).is_some());
        }
    }

    #[test]
    fn test_with_presets_survives_zero_burn_preset() {
        crate::logging::init_test_logging();
        // Cost Optimization cuts exactly 3000
        let baseline = FinancialBaseline::derived(3000.0, 50_000.0);
        let store = ScenarioStore::with_presets(&baseline);

        assert_eq!(store.len(), 2);
        assert!(store.get(&ScenarioId::from("3")).is_none());

        let draft = ScenarioDraft::new("Hire one").with_assumptions(ScenarioAssumptions {
            new_hires: 1,
            salary_per_hire: 7500.0,
            ..ScenarioAssumptions::default()
        });
        let (updated, id) = store.add(&draft, &baseline).unwrap();
        assert_eq!(updated.len(), 3);
        assert_eq!(updated.get(&id).unwrap().results().new_monthly_burn, 10_500.0);
    }

    #[test]
    fn test_add_returns_new_store() {
        let store = seeded();
        let (updated, id) = store.add(&launch_draft(), &baseline()).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(updated.len(), 4);

        let added = updated.get(&id).unwrap();
        assert_eq!(added.name(), "Product Launch Phase");
        assert_eq!(added.description(), CUSTOM_DESCRIPTION);
        assert!(!added.is_preset());
        assert_eq!(added.results().monthly_increase, 10_500.0);
    }

    #[test]
    fn test_add_keeps_custom_description() {
        let draft = launch_draft().with_description("Q3 launch push");
        let (store, id) = seeded().add(&draft, &baseline()).unwrap();
        assert_eq!(store.get(&id).unwrap().description(), "Q3 launch push");
    }

    #[test]
    fn test_add_generates_unique_ids() {
        let mut store = seeded();
        let mut ids = Vec::new();
        for _ in 0..5 {
            let (next, id) = store.add(&launch_draft(), &baseline()).unwrap();
            assert!(!ids.contains(&id));
            ids.push(id);
            store = next;
        }
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let draft = ScenarioDraft::new("   ");
        let err = seeded().add(&draft, &baseline()).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_add_rejects_zero_burn() {
        let draft = ScenarioDraft::new("Break even").with_assumptions(ScenarioAssumptions {
            office_expansion_delta: -6900.0,
            ..ScenarioAssumptions::default()
        });
        let err = seeded().add(&draft, &baseline()).unwrap_err();
        assert!(err.is_runway_undefined());
    }

    #[test]
    fn test_results_are_cached_at_creation() {
        let (store, id) = seeded().add(&launch_draft(), &baseline()).unwrap();
        let before = *store.get(&id).unwrap().results();

        // A later, different baseline does not touch existing entries.
        let richer = FinancialBaseline::new(6900.0, 1_000_000.0, 144.0);
        let (store, _) = store.add(&launch_draft(), &richer).unwrap();
        assert_eq!(*store.get(&id).unwrap().results(), before);
    }

    #[test]
    fn test_remove_exactly_one() {
        let (store, first) = seeded().add(&launch_draft(), &baseline()).unwrap();
        let (store, second) = store.add(&launch_draft(), &baseline()).unwrap();
        let second_results = *store.get(&second).unwrap().results();

        let removed = store.remove(&first).unwrap();

        assert_eq!(store.len(), 5);
        assert_eq!(removed.len(), 4);
        assert!(removed.get(&first).is_none());
        assert_eq!(*removed.get(&second).unwrap().results(), second_results);
        for id in PRESET_IDS {
            let id = ScenarioId::from(id);
            assert_eq!(removed.get(&id), store.get(&id));
        }
    }

    #[test]
    fn test_remove_preset_refused() {
        let err = seeded().remove(&ScenarioId::from("1")).unwrap_err();
        assert!(matches!(err, Error::PresetScenario { .. }));
    }

    #[test]
    fn test_remove_unknown() {
        let err = seeded().remove(&ScenarioId::from("nope")).unwrap_err();
        assert!(matches!(err, Error::ScenarioNotFound { .. }));
    }

    #[test]
    fn test_reselect() {
        let (store, id) = seeded().add(&launch_draft(), &baseline()).unwrap();
        assert_eq!(store.reselect(&id), Some(&id));

        let store = store.remove(&id).unwrap();
        assert_eq!(store.reselect(&id), Some(&ScenarioId::from("1")));
        assert_eq!(ScenarioStore::new().reselect(&id), None);
    }

    #[test]
    fn test_iteration_order() {
        let (store, id) = seeded().add(&launch_draft(), &baseline()).unwrap();
        let ids: Vec<_> = store.iter().map(|s| s.id().clone()).collect();
        assert_eq!(ids.last(), Some(&id));
        assert_eq!((&store).into_iter().count(), 4);
    }

    #[test]
    fn test_validate_negative_hires() {
        let draft = ScenarioDraft::new("Layoffs").with_assumptions(ScenarioAssumptions {
            new_hires: -2,
            ..ScenarioAssumptions::default()
        });
        let err = draft.validate().unwrap_err();
        assert!(err.to_string().contains("new_hires"));
    }

    #[test]
    fn test_validate_negative_salary() {
        let draft = ScenarioDraft::new("Odd").with_assumptions(ScenarioAssumptions {
            salary_per_hire: -1.0,
            ..ScenarioAssumptions::default()
        });
        assert!(draft
            .validate()
            .unwrap_err()
            .to_string()
            .contains("salary_per_hire"));
    }

    #[test]
    fn test_validate_non_finite() {
        let draft = ScenarioDraft::new("Broken").with_assumptions(ScenarioAssumptions {
            marketing_budget_delta: f64::INFINITY,
            ..ScenarioAssumptions::default()
        });
        assert!(draft
            .validate()
            .unwrap_err()
            .to_string()
            .contains("marketing_budget_delta"));
    }

    #[test]
    fn test_validate_accepts_negative_deltas() {
        let draft = ScenarioDraft::new("Lean").with_assumptions(ScenarioAssumptions {
            additional_saas: -1200.0,
            ..ScenarioAssumptions::default()
        });
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_store_serializes_as_list() {
        let json = serde_json::to_value(seeded()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[0]["name"], "Aggressive Growth");
        assert_eq!(json[0]["origin"], "preset");
    }
}
