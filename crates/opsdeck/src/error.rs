//! Error types for opsdeck.
//!
//! This module defines all error types used throughout the opsdeck crate,
//! providing detailed context for debugging and user-friendly error messages.

use thiserror::Error;

/// The main error type for opsdeck operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Scenario Errors ===
    /// The assumptions bring the monthly burn to exactly zero, so runway
    /// cannot be expressed as a number of months.
    #[error("runway undefined: assumptions bring monthly burn to zero (cash on hand {cash_on_hand})")]
    RunwayUndefined {
        /// Cash on hand of the baseline the scenario was evaluated against.
        cash_on_hand: f64,
    },

    /// A scenario draft failed validation at the input boundary.
    #[error("invalid {field}: {message}")]
    InvalidInput {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the validation failure.
        message: String,
    },

    /// No scenario with the given id exists in the store.
    #[error("scenario not found: {id}")]
    ScenarioNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// Seeded scenarios cannot be deleted.
    #[error("scenario '{id}' is a preset and cannot be deleted")]
    PresetScenario {
        /// The id of the preset.
        id: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Input Parsing Errors ===
    /// A date or month argument could not be parsed.
    #[error("invalid date '{input}': expected {expected}")]
    InvalidDate {
        /// The raw input.
        input: String,
        /// The expected format.
        expected: &'static str,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for opsdeck operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new input validation error.
    #[must_use]
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Create a scenario-not-found error.
    #[must_use]
    pub fn scenario_not_found(id: impl Into<String>) -> Self {
        Self::ScenarioNotFound { id: id.into() }
    }

    /// Check if this error is the zero-burn runway case.
    #[must_use]
    pub fn is_runway_undefined(&self) -> bool {
        matches!(self, Self::RunwayUndefined { .. })
    }

    /// Check if this error was raised by input validation.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
