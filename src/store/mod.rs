//! # Record Store
//!
//! SQLite collaborator behind the search pipeline. It owns the `patients`
//! table (seeded demo data, read-only for searches) and the singleton
//! `settings` row holding the policy toggles.

mod bootstrap;
mod errors;
mod sqlite;

pub use bootstrap::{bootstrap, BootstrapReport, SEED_PATIENTS};
pub use errors::{StoreError, StoreResult};
pub use sqlite::{SqliteStore, IN_MEMORY};
