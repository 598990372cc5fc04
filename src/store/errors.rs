//! Record store error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The singleton settings row does not exist
    #[error("Settings record not found")]
    SettingsMissing,

    /// SQLite rejected or failed a statement
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A previous holder of the connection lock panicked
    #[error("Connection lock poisoned")]
    LockPoisoned,

    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Database file has not been bootstrapped yet
    #[error("Database not initialized at {}. Run 'sqli-lab init' first.", .0.display())]
    NotInitialized(PathBuf),
}
