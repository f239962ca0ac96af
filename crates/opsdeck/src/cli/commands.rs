//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::fixtures::events::EventFilter;
use crate::fixtures::procurement::ProcurementFilter;
use crate::fixtures::recommendations::Recommendations;
use crate::fixtures::tenders::{TenderFilter, TenderStatus};
use crate::fixtures::SpendCategory;
use crate::scenario::{ScenarioAssumptions, ScenarioDraft};

/// Output selection shared by the read-only views.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Scenario planning commands.
#[derive(Debug, Subcommand)]
pub enum ScenarioCommand {
    /// List the seeded scenarios with their projected impact
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one scenario with its runway projection
    Show {
        /// Scenario id
        id: String,

        /// Months to project (defaults to the configured horizon)
        #[arg(short, long)]
        months: Option<u32>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Evaluate a new what-if scenario
    Compute(ComputeCommand),

    /// Show how single changes move the runway
    Sensitivity {
        /// Salary used for the one-hire lever (defaults to the configured salary)
        #[arg(long)]
        salary: Option<f64>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Compute command arguments.
#[derive(Debug, Args)]
pub struct ComputeCommand {
    /// Scenario name
    #[arg(short, long)]
    pub name: String,

    /// Free-text description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Number of new hires
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub hires: i32,

    /// Monthly salary per hire (defaults to the configured salary)
    #[arg(long, allow_negative_numbers = true)]
    pub salary: Option<f64>,

    /// Change in monthly SaaS spend
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub saas: f64,

    /// Change in monthly marketing budget
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub marketing: f64,

    /// Change in monthly office cost
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub office: f64,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl ComputeCommand {
    /// Build the scenario draft, filling the salary from `default_salary`.
    #[must_use]
    pub fn draft(&self, default_salary: f64) -> ScenarioDraft {
        let assumptions = ScenarioAssumptions {
            new_hires: self.hires,
            salary_per_hire: self.salary.unwrap_or(default_salary),
            additional_saas: self.saas,
            marketing_budget_delta: self.marketing,
            office_expansion_delta: self.office,
        };
        let draft = ScenarioDraft::new(self.name.clone()).with_assumptions(assumptions);
        match &self.description {
            Some(description) => draft.with_description(description.clone()),
            None => draft,
        }
    }
}

/// Procurement command arguments.
#[derive(Debug, Args)]
pub struct ProcurementCommand {
    /// Search item and vendor names
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter by category
    #[arg(short = 't', long, value_enum)]
    pub category: Option<CategoryArg>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl ProcurementCommand {
    /// The record filter these arguments describe.
    #[must_use]
    pub fn filter(&self) -> ProcurementFilter {
        ProcurementFilter {
            query: self.search.clone().unwrap_or_default(),
            category: self.category.map(Into::into),
        }
    }
}

/// Tenders command arguments.
#[derive(Debug, Args)]
pub struct TendersCommand {
    /// Search titles and organizations
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter by match status
    #[arg(short = 't', long, value_enum)]
    pub status: Option<TenderStatusArg>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl TendersCommand {
    /// The tender filter these arguments describe.
    #[must_use]
    pub fn filter(&self) -> TenderFilter {
        TenderFilter {
            query: self.search.clone().unwrap_or_default(),
            status: self.status.map(Into::into),
        }
    }
}

/// Events command arguments.
#[derive(Debug, Args)]
pub struct EventsCommand {
    /// Search event names and descriptions
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter by event type (substring, e.g. "conference")
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl EventsCommand {
    /// The event filter these arguments describe.
    #[must_use]
    pub fn filter(&self) -> EventFilter {
        EventFilter {
            query: self.search.clone().unwrap_or_default(),
            kind: self.kind.clone().unwrap_or_default(),
        }
    }
}

/// Calendar command arguments.
#[derive(Debug, Args)]
pub struct CalendarCommand {
    /// Show entries on this day (YYYY-MM-DD)
    #[arg(short, long, conflicts_with = "month")]
    pub date: Option<String>,

    /// Show entries in this month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Recommendations command arguments.
#[derive(Debug, Args)]
pub struct RecommendationsCommand {
    /// Hide the recommendation with this id (repeatable)
    #[arg(short = 'x', long, value_name = "ID")]
    pub dismiss: Vec<u32>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl RecommendationsCommand {
    /// The default recommendations with the requested ids dismissed.
    #[must_use]
    pub fn recommendations(&self) -> Recommendations {
        self.dismiss
            .iter()
            .fold(Recommendations::default(), |recs, &id| recs.dismiss(id))
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Spending category argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Software subscriptions
    Saas,
    /// Cloud and hosting
    Infrastructure,
    /// Office consumables
    OfficeSupplies,
    /// Computers and peripherals
    Hardware,
    /// Professional services
    Services,
}

impl From<CategoryArg> for SpendCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Saas => Self::Saas,
            CategoryArg::Infrastructure => Self::Infrastructure,
            CategoryArg::OfficeSupplies => Self::OfficeSupplies,
            CategoryArg::Hardware => Self::Hardware,
            CategoryArg::Services => Self::Services,
        }
    }
}

/// Tender status argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TenderStatusArg {
    /// Meets the requirements
    Eligible,
    /// Strong fit
    HighMatch,
    /// Needs a human look
    ReviewNeeded,
}

impl From<TenderStatusArg> for TenderStatus {
    fn from(arg: TenderStatusArg) -> Self {
        match arg {
            TenderStatusArg::Eligible => Self::Eligible,
            TenderStatusArg::HighMatch => Self::HighMatch,
            TenderStatusArg::ReviewNeeded => Self::ReviewNeeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(name: &str) -> ComputeCommand {
        ComputeCommand {
            name: name.to_string(),
            description: None,
            hires: 2,
            salary: None,
            saas: 800.0,
            marketing: 2000.0,
            office: 0.0,
            json: false,
        }
    }

    #[test]
    fn test_category_arg_conversion() {
        assert_eq!(SpendCategory::from(CategoryArg::Saas), SpendCategory::Saas);
        assert_eq!(
            SpendCategory::from(CategoryArg::OfficeSupplies),
            SpendCategory::OfficeSupplies
        );
        assert_eq!(
            SpendCategory::from(CategoryArg::Services),
            SpendCategory::Services
        );
    }

    #[test]
    fn test_tender_status_arg_conversion() {
        assert_eq!(
            TenderStatus::from(TenderStatusArg::HighMatch),
            TenderStatus::HighMatch
        );
        assert_eq!(
            TenderStatus::from(TenderStatusArg::ReviewNeeded),
            TenderStatus::ReviewNeeded
        );
    }

    #[test]
    fn test_compute_draft_uses_default_salary() {
        let draft = compute("Hiring").draft(7500.0);
        assert_eq!(draft.name, "Hiring");
        assert_eq!(draft.assumptions.salary_per_hire, 7500.0);
        assert_eq!(draft.assumptions.new_hires, 2);
        assert_eq!(draft.assumptions.monthly_increase(), 17_800.0);
    }

    #[test]
    fn test_compute_draft_explicit_salary_and_description() {
        let mut cmd = compute("Hiring");
        cmd.salary = Some(9000.0);
        cmd.description = Some("Two seniors".to_string());

        let draft = cmd.draft(7500.0);
        assert_eq!(draft.assumptions.salary_per_hire, 9000.0);
        assert_eq!(draft.description.as_deref(), Some("Two seniors"));
    }

    #[test]
    fn test_procurement_filter() {
        let cmd = ProcurementCommand {
            search: Some("figma".to_string()),
            category: Some(CategoryArg::Saas),
            json: false,
        };
        let filter = cmd.filter();
        assert_eq!(filter.query, "figma");
        assert_eq!(filter.category, Some(SpendCategory::Saas));
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let cmd = TendersCommand {
            search: None,
            status: None,
            json: false,
        };
        assert_eq!(cmd.filter(), TenderFilter::default());

        let cmd = EventsCommand {
            search: None,
            kind: None,
            json: true,
        };
        assert_eq!(cmd.filter(), EventFilter::default());
    }

    #[test]
    fn test_recommendations_applies_dismissals() {
        let cmd = RecommendationsCommand {
            dismiss: vec![1, 3],
            json: false,
        };
        let recs = cmd.recommendations();
        assert_eq!(recs.total_potential_savings(), 24.0);

        let none = RecommendationsCommand {
            dismiss: Vec::new(),
            json: false,
        };
        assert_eq!(none.recommendations().total_potential_savings(), 504.0);
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
