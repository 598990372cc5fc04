//! # Policy Settings
//!
//! The two runtime toggles that select how a search is validated and how
//! its query is built, and the store contract that persists them.
//!
//! A request reads one [`PolicySettings`] snapshot at pipeline entry and
//! passes it by value to every stage, so a concurrent toggle can never
//! produce a half-safe, half-unsafe query.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::store::StoreResult;

/// Snapshot of the persisted toggles.
///
/// Both default to `false`, which is the vulnerable configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Bind filter values as parameters instead of interpolating them
    pub parameterized: bool,

    /// Run the validation stage before building the query
    pub validation: bool,
}

impl PolicySettings {
    pub fn new(parameterized: bool, validation: bool) -> Self {
        Self {
            parameterized,
            validation,
        }
    }

    /// Value of a single toggle
    pub fn get(&self, field: PolicyField) -> bool {
        match field {
            PolicyField::Parameterized => self.parameterized,
            PolicyField::Validation => self.validation,
        }
    }
}

/// Names one of the two toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyField {
    Parameterized,
    Validation,
}

impl PolicyField {
    /// Column name in the `settings` table, also used as the JSON key
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyField::Parameterized => "parameterized",
            PolicyField::Validation => "validation",
        }
    }
}

impl fmt::Display for PolicyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PolicyField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parameterized" => Ok(PolicyField::Parameterized),
            "validation" => Ok(PolicyField::Validation),
            other => Err(format!("Unknown policy toggle: {}", other)),
        }
    }
}

/// Persistent holder of the single [`PolicySettings`] record.
///
/// Toggles are read-modify-write operations and must be atomic per field.
/// A missing settings record is reported as
/// [`StoreError::SettingsMissing`](crate::store::StoreError::SettingsMissing).
pub trait PolicyStore: Send + Sync {
    /// Read the current snapshot
    fn get_policy(&self) -> StoreResult<PolicySettings>;

    /// Invert one toggle and return its new value
    fn toggle(&self, field: PolicyField) -> StoreResult<bool>;

    fn toggle_parameterized(&self) -> StoreResult<bool> {
        self.toggle(PolicyField::Parameterized)
    }

    fn toggle_validation(&self) -> StoreResult<bool> {
        self.toggle(PolicyField::Validation)
    }
}
