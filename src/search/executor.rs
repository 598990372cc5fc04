//! Execution stage seam: the record store that runs built queries.

use crate::store::StoreResult;

use super::builder::BuiltQuery;
use super::record::PatientRecord;

/// Executes a [`BuiltQuery`] exactly as constructed.
///
/// Implementations bind `bound_values` positionally when there are any, and
/// run the text verbatim otherwise. Failures are returned once and never
/// retried.
pub trait RecordStore: Send + Sync {
    fn execute(&self, query: &BuiltQuery) -> StoreResult<Vec<PatientRecord>>;
}
