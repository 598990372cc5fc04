//! # Search Pipeline
//!
//! Orchestrates one search request:
//!
//! 1. read a single [`PolicySettings`] snapshot
//! 2. validation stage (may short-circuit with every violation found)
//! 3. query construction with the strategy the snapshot selects
//! 4. execution against the record store
//!
//! The snapshot is taken once and passed by value; no stage re-reads the
//! toggles mid-request.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::builder::{BuiltQuery, QueryBuilder};
use super::criteria::FilterCriteria;
use super::errors::{SearchError, SearchResult};
use super::executor::RecordStore;
use super::policy::{PolicySettings, PolicyStore};
use super::record::PatientRecord;
use super::validation::validate;

/// Store that can serve both the policy lookup and query execution
pub trait SearchBackend: PolicyStore + RecordStore {}

impl<T: PolicyStore + RecordStore + ?Sized> SearchBackend for T {}

/// Everything a finished search produced
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub policy: PolicySettings,
    pub strategy: QueryBuilder,
    pub query: BuiltQuery,
    pub records: Vec<PatientRecord>,
}

/// Validate → construct → execute, per request
pub struct SearchPipeline<S: SearchBackend> {
    store: Arc<S>,
}

impl<S: SearchBackend> Clone for SearchPipeline<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: SearchBackend> SearchPipeline<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The backing store, for settings reads and toggles
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Run a search under the currently persisted policy
    pub fn search(&self, criteria: &FilterCriteria) -> SearchResult<SearchOutcome> {
        let policy = self.store.get_policy()?;
        info!(
            event = "SEARCH_POLICY",
            parameterized = policy.parameterized,
            validation = policy.validation,
        );
        self.search_with_policy(policy, criteria)
    }

    /// Run a search under an explicit policy snapshot
    pub fn search_with_policy(
        &self,
        policy: PolicySettings,
        criteria: &FilterCriteria,
    ) -> SearchResult<SearchOutcome> {
        let violations = validate(criteria, policy.validation);
        if !violations.is_empty() {
            warn!(event = "SEARCH_REJECTED", errors = %violations);
            return Err(SearchError::Validation(violations));
        }

        let strategy = QueryBuilder::for_policy(&policy);
        let query = strategy.build(criteria);
        info!(
            event = "SEARCH_QUERY",
            strategy = strategy.as_str(),
            query = %query.text,
            bound_values = ?query.bound_values,
        );

        let records = self.store.execute(&query).map_err(|e| {
            error!(event = "SEARCH_FAILED", error = %e, query = %query.text);
            SearchError::from(e)
        })?;

        info!(event = "SEARCH_EXECUTED", rows = records.len());

        Ok(SearchOutcome {
            policy,
            strategy,
            query,
            records,
        })
    }
}
