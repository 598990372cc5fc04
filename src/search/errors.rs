//! # Search Errors
//!
//! Failure taxonomy for the search pipeline.

use thiserror::Error;

use crate::store::StoreError;

use super::validation::ValidationErrors;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Search pipeline errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// One or more filter values failed validation (user-correctable)
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The settings record is missing (fatal configuration problem)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The record store rejected or failed the query
    #[error("Execution error: {0}")]
    Execution(String),
}

impl SearchError {
    /// Error code for logs and CLI output
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::Validation(_) => "SQLI_VALIDATION_FAILED",
            SearchError::Configuration(_) => "SQLI_SETTINGS_MISSING",
            SearchError::Execution(_) => "SQLI_EXECUTION_FAILED",
        }
    }
}

impl From<StoreError> for SearchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SettingsMissing => SearchError::Configuration(err.to_string()),
            other => SearchError::Execution(other.to_string()),
        }
    }
}
