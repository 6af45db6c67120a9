//! Error types for rule construction and application

use classmark_model::ModelError;
use thiserror::Error;

/// Errors raised by the rule wrappers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// E-RULE-001: A configuration value cannot be determined
    #[error("configuration property `{property}` is missing or ambiguous")]
    ConfigurationMissing { property: String },

    /// E-RULE-002: The generation switches contradict each other
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// E-RULE-003: The code model rejected a mutation
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl RuleError {
    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            RuleError::ConfigurationMissing { .. } => "E-RULE-001",
            RuleError::InvalidConfiguration { .. } => "E-RULE-002",
            RuleError::Model(_) => "E-RULE-003",
        }
    }

    pub(crate) fn configuration_missing(property: &str) -> Self {
        RuleError::ConfigurationMissing {
            property: property.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuleError>;
