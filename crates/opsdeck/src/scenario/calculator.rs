//! Scenario arithmetic: impact, projection and sensitivity.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use super::{
    FinancialBaseline, Runway, ScenarioAssumptions, ScenarioResult, DEFAULT_CONFIDENCE_SCORE,
};
use crate::error::{Error, Result};

/// Compute the impact of `assumptions` on `baseline`.
///
/// The burn increase is `new_hires * salary_per_hire` plus the three deltas;
/// the new runway is `cash_on_hand / new_monthly_burn`. A negative new burn
/// yields [`Runway::NotBurning`].
///
/// # Errors
///
/// Returns [`Error::RunwayUndefined`] when the new monthly burn is zero (or
/// not a number, which only non-finite inputs can produce).
pub fn compute_scenario(
    baseline: &FinancialBaseline,
    assumptions: &ScenarioAssumptions,
) -> Result<ScenarioResult> {
    let monthly_increase = assumptions.monthly_increase();
    let new_monthly_burn = baseline.monthly_burn + monthly_increase;

    let runway = match new_monthly_burn.partial_cmp(&0.0) {
        Some(Ordering::Greater) => {
            let new_runway_months = baseline.cash_on_hand / new_monthly_burn;
            Runway::Finite {
                new_runway_months,
                runway_change_months: new_runway_months - baseline.current_runway_months,
            }
        }
        Some(Ordering::Less) => Runway::NotBurning,
        Some(Ordering::Equal) | None => {
            warn!(
                monthly_increase,
                baseline_burn = baseline.monthly_burn,
                "scenario brings monthly burn to zero; runway undefined"
            );
            return Err(Error::RunwayUndefined {
                cash_on_hand: baseline.cash_on_hand,
            });
        }
    };

    debug!(monthly_increase, new_monthly_burn, ?runway, "computed scenario");
    Ok(ScenarioResult {
        monthly_increase,
        new_monthly_burn,
        runway,
        confidence_score: DEFAULT_CONFIDENCE_SCORE,
    })
}

/// One month of a runway projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    /// Months from now; 0 is the current position.
    pub month: u32,
    /// Cash left at the start of this month.
    pub cash_remaining: f64,
    /// Runway left, or `None` once burn is negative.
    pub runway_remaining_months: Option<f64>,
}

/// Project cash and runway month by month under `result`.
///
/// Month 0 is the baseline as it stands today. Later months spend the new
/// burn; cash never goes below zero for a burning scenario. The returned
/// vector has `months + 1` points.
#[must_use]
pub fn project_runway(
    baseline: &FinancialBaseline,
    result: &ScenarioResult,
    months: u32,
) -> Vec<ProjectionPoint> {
    let burn = result.new_monthly_burn;
    let burning = matches!(result.runway, Runway::Finite { .. });

    (0..=months)
        .map(|month| {
            if month == 0 {
                return ProjectionPoint {
                    month,
                    cash_remaining: baseline.cash_on_hand,
                    runway_remaining_months: Some(baseline.current_runway_months),
                };
            }

            let spent = f64::from(month) * burn;
            if burning {
                let cash_remaining = (baseline.cash_on_hand - spent).max(0.0);
                ProjectionPoint {
                    month,
                    cash_remaining,
                    runway_remaining_months: Some(cash_remaining / burn),
                }
            } else {
                ProjectionPoint {
                    month,
                    cash_remaining: baseline.cash_on_hand - spent,
                    runway_remaining_months: None,
                }
            }
        })
        .collect()
}

/// A single-variable nudge used in sensitivity analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lever {
    /// One more hire at the configured salary.
    OneHire,
    /// $1,000 more SaaS spend per month.
    SaasPlus1000,
    /// $2,000 more marketing spend per month.
    MarketingPlus2000,
    /// $2,000 more revenue per month, i.e. $2,000 less net burn.
    RevenuePlus2000,
    /// A $500K raise at the current burn.
    FundingRaise500k,
}

impl Lever {
    /// All levers, in display order.
    pub const ALL: [Lever; 5] = [
        Lever::OneHire,
        Lever::SaasPlus1000,
        Lever::MarketingPlus2000,
        Lever::RevenuePlus2000,
        Lever::FundingRaise500k,
    ];

    /// The adjusted baseline and assumptions that express this lever.
    fn apply(
        self,
        baseline: &FinancialBaseline,
        salary_per_hire: f64,
    ) -> (FinancialBaseline, ScenarioAssumptions) {
        let none = ScenarioAssumptions::default();
        match self {
            Self::OneHire => (
                *baseline,
                ScenarioAssumptions {
                    new_hires: 1,
                    salary_per_hire,
                    ..none
                },
            ),
            Self::SaasPlus1000 => (
                *baseline,
                ScenarioAssumptions {
                    additional_saas: 1000.0,
                    ..none
                },
            ),
            Self::MarketingPlus2000 => (
                *baseline,
                ScenarioAssumptions {
                    marketing_budget_delta: 2000.0,
                    ..none
                },
            ),
            Self::RevenuePlus2000 => (
                FinancialBaseline {
                    monthly_burn: baseline.monthly_burn - 2000.0,
                    ..*baseline
                },
                none,
            ),
            Self::FundingRaise500k => (
                FinancialBaseline {
                    cash_on_hand: baseline.cash_on_hand + 500_000.0,
                    ..*baseline
                },
                none,
            ),
        }
    }
}

impl fmt::Display for Lever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneHire => write!(f, "Team size (+1 hire)"),
            Self::SaasPlus1000 => write!(f, "SaaS tools (+$1,000/month)"),
            Self::MarketingPlus2000 => write!(f, "Marketing spend (+$2,000/month)"),
            Self::RevenuePlus2000 => write!(f, "Revenue (+$2,000/month)"),
            Self::FundingRaise500k => write!(f, "Funding round ($500K raise)"),
        }
    }
}

/// Runway impact of one lever.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sensitivity {
    /// The lever pulled.
    pub lever: Lever,
    /// Change in runway months vs. the baseline; `None` when the lever
    /// leaves the company not burning or at zero burn.
    pub runway_delta_months: Option<f64>,
}

/// Runway impact of each [`Lever`] against `baseline`.
#[must_use]
pub fn sensitivity(baseline: &FinancialBaseline, salary_per_hire: f64) -> Vec<Sensitivity> {
    Lever::ALL
        .iter()
        .map(|&lever| {
            let (adjusted, assumptions) = lever.apply(baseline, salary_per_hire);
            let runway_delta_months = compute_scenario(&adjusted, &assumptions)
                .ok()
                .and_then(|result| result.runway_change_months());
            Sensitivity {
                lever,
                runway_delta_months,
            }
        })
        .collect()
}
