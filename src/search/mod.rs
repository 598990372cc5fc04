//! # Search Policy Engine
//!
//! The part of sqli-lab with real design content: the stages between an
//! incoming patient filter request and the executed query.
//!
//! - [`policy`] - the two runtime toggles and their store contract
//! - [`validation`] - optional field-level checks
//! - [`builder`] - safe (bound) or unsafe (interpolated) query construction
//! - [`executor`] - the record store seam
//! - [`pipeline`] - request orchestration over one policy snapshot

pub mod builder;
pub mod criteria;
pub mod errors;
pub mod executor;
pub mod pipeline;
pub mod policy;
pub mod record;
pub mod validation;

pub use builder::{BuiltQuery, QueryBuilder};
pub use criteria::FilterCriteria;
pub use errors::{SearchError, SearchResult};
pub use executor::RecordStore;
pub use pipeline::{SearchBackend, SearchOutcome, SearchPipeline};
pub use policy::{PolicyField, PolicySettings, PolicyStore};
pub use record::PatientRecord;
pub use validation::{validate, ValidationErrors, INSURANCE_PROVIDERS};
