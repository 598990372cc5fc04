//! # Query Construction Stage
//!
//! Turns [`FilterCriteria`] into an executable query. Two strategies share
//! one predicate:
//!
//! - [`QueryBuilder::Parameterized`] sends filter values out of band as
//!   positional parameters (`?1`, `?2`, ...).
//! - [`QueryBuilder::Interpolated`] pastes them into the SQL text inside a
//!   quoted `LIKE` pattern without any escaping. A quote in the value ends
//!   the literal early and whatever follows runs as SQL. This is the
//!   vulnerability being demonstrated and must stay unescaped.
//!
//! Predicate, for both strategies: only active patients, each present
//! filter is a case-insensitive substring match (`LOWER(column) LIKE
//! '%value%'`), filters are AND-combined in the order first name, last name,
//! insurance provider. With no filter at all the predicate is `0 = 1`, so an
//! empty request never dumps the table. Rows are ordered by `id`.

use std::fmt;

use super::criteria::FilterCriteria;
use super::policy::PolicySettings;

/// Column list shared by every patient query
pub const PATIENT_COLUMNS: &str = "id, first_name, last_name, date_of_birth, gender, \
     phone_number, email, address, city, state, zip_code, insurance_provider, \
     insurance_number, allergies, medical_history, is_active, date_created, date_modified";

const WHERE_NO_FILTER: &str = "0 = 1";
const WHERE_ACTIVE: &str = "is_active IS TRUE";
const ORDER_BY: &str = "ORDER BY id";

/// Query text plus the values bound to its placeholders.
///
/// `bound_values[k]` belongs to placeholder `?{k + 1}`. Interpolated queries
/// carry no bound values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub text: String,
    pub bound_values: Vec<String>,
}

impl BuiltQuery {
    /// True when the store must bind values instead of running text verbatim
    pub fn has_bindings(&self) -> bool {
        !self.bound_values.is_empty()
    }
}

impl fmt::Display for BuiltQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Query construction strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryBuilder {
    /// Values bound as positional parameters
    Parameterized,
    /// Values embedded as literal text (unsafe)
    Interpolated,
}

impl QueryBuilder {
    /// Strategy selected by the `parameterized` toggle
    pub fn for_policy(policy: &PolicySettings) -> Self {
        if policy.parameterized {
            QueryBuilder::Parameterized
        } else {
            QueryBuilder::Interpolated
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryBuilder::Parameterized => "parameterized",
            QueryBuilder::Interpolated => "interpolated",
        }
    }

    /// Build the search query for `criteria`
    pub fn build(&self, criteria: &FilterCriteria) -> BuiltQuery {
        let mut conditions = Vec::new();
        let mut bound_values = Vec::new();

        for (column, value) in present_filters(criteria) {
            let pattern = value.to_ascii_lowercase();
            match self {
                QueryBuilder::Parameterized => {
                    bound_values.push(format!("%{}%", pattern));
                    conditions.push(format!("LOWER({}) LIKE ?{}", column, bound_values.len()));
                }
                QueryBuilder::Interpolated => {
                    // Deliberately unescaped.
                    conditions.push(format!("LOWER({}) LIKE '%{}%'", column, pattern));
                }
            }
        }

        let predicate = if conditions.is_empty() {
            WHERE_NO_FILTER.to_string()
        } else {
            format!("{} AND {}", WHERE_ACTIVE, conditions.join(" AND "))
        };

        BuiltQuery {
            text: format!(
                "SELECT {} FROM patients WHERE {} {}",
                PATIENT_COLUMNS, predicate, ORDER_BY
            ),
            bound_values,
        }
    }
}

/// Present filters in evaluation order, paired with the column they match
fn present_filters(criteria: &FilterCriteria) -> impl Iterator<Item = (&'static str, &str)> {
    [
        ("first_name", criteria.first_name.as_deref()),
        ("last_name", criteria.last_name.as_deref()),
        ("insurance_provider", criteria.insurance_provider.as_deref()),
    ]
    .into_iter()
    .filter_map(|(column, value)| value.map(|v| (column, v)))
}
