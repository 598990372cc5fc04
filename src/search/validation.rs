//! # Validation Stage
//!
//! Field-level checks on filter values. When disabled the stage accepts
//! anything, which is the configuration that lets injection payloads reach
//! the query builder.
//!
//! Checks never short-circuit: every violation found is reported.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::criteria::FilterCriteria;

/// Insurance providers accepted when validation is enabled
pub const INSURANCE_PROVIDERS: [&str; 4] = ["HealthPlus", "MediCare", "InsureCorp", "WellnessGroup"];

pub const FIRST_NAME_VIOLATION: &str = "First name must contain only letters.";
pub const LAST_NAME_VIOLATION: &str = "Last name must contain only letters.";
pub const INSURANCE_PROVIDER_VIOLATION: &str = "Invalid insurance provider selected.";

static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn name_pattern() -> &'static Regex {
    NAME_PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z]+$").expect("name pattern is valid"))
}

/// Ordered list of violations. Empty means the criteria are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, message: &str) -> bool {
        self.0.iter().any(|m| m == message)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Check `criteria` when `enabled`, otherwise accept it unchanged.
pub fn validate(criteria: &FilterCriteria, enabled: bool) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if !enabled {
        return errors;
    }

    if let Some(first_name) = &criteria.first_name {
        if !is_letters_only(first_name) {
            errors.push(FIRST_NAME_VIOLATION);
        }
    }

    if let Some(last_name) = &criteria.last_name {
        if !is_letters_only(last_name) {
            errors.push(LAST_NAME_VIOLATION);
        }
    }

    if let Some(provider) = &criteria.insurance_provider {
        if !is_known_provider(provider) {
            errors.push(INSURANCE_PROVIDER_VIOLATION);
        }
    }

    errors
}

/// One or more ASCII letters, nothing else
pub fn is_letters_only(value: &str) -> bool {
    name_pattern().is_match(value)
}

/// Exact, case-sensitive membership in [`INSURANCE_PROVIDERS`]
pub fn is_known_provider(value: &str) -> bool {
    INSURANCE_PROVIDERS.contains(&value)
}
