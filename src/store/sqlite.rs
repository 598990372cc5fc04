//! # SQLite Record Store
//!
//! Single-connection SQLite store serving both the policy toggles and the
//! patient queries. The connection sits behind a mutex; every operation
//! holds the lock for its whole duration.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params_from_iter, Batch, Connection, OptionalExtension, Row, TransactionBehavior};
use tracing::debug;

use crate::search::{BuiltQuery, PatientRecord, PolicyField, PolicySettings, PolicyStore, RecordStore};

use super::bootstrap::{bootstrap, BootstrapReport};
use super::errors::{StoreError, StoreResult};

/// Path value that selects a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// SQLite-backed patient and settings store
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open an existing, already bootstrapped database file
    pub fn open(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Err(StoreError::NotInitialized(path.to_path_buf()));
        }
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Create (if needed) and bootstrap a database file
    pub fn create(path: &Path) -> StoreResult<(Self, BootstrapReport)> {
        let mut conn = Connection::open(path)?;
        let report = bootstrap(&mut conn)?;
        let store = Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        };
        Ok((store, report))
    }

    /// Open a bootstrapped in-memory store (for demos and testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let mut conn = Connection::open_in_memory()?;
        bootstrap(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Open by configured path, where `:memory:` means in-memory
    pub fn open_configured(path: &str) -> StoreResult<Self> {
        if path == IN_MEMORY {
            Self::open_in_memory()
        } else {
            Self::open(Path::new(path))
        }
    }

    /// Database file path (None for in-memory)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw connection access, for bootstrap-level maintenance and tests
    pub fn with_connection<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Connection) -> StoreResult<T>,
    {
        let mut conn = self.lock()?;
        f(&mut conn)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl PolicyStore for SqliteStore {
    fn get_policy(&self) -> StoreResult<PolicySettings> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT parameterized, validation FROM settings WHERE id = 1",
            [],
            |row| Ok(PolicySettings::new(row.get(0)?, row.get(1)?)),
        )
        .optional()?
        .ok_or(StoreError::SettingsMissing)
    }

    fn toggle(&self, field: PolicyField) -> StoreResult<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let column = field.as_str();
        let current: bool = tx
            .query_row(
                &format!("SELECT {} FROM settings WHERE id = 1", column),
                [],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(StoreError::SettingsMissing)?;

        let updated = !current;
        tx.execute(
            &format!("UPDATE settings SET {} = ?1 WHERE id = 1", column),
            [updated],
        )?;
        tx.commit()?;

        debug!(event = "POLICY_TOGGLED", field = column, value = updated);
        Ok(updated)
    }
}

impl RecordStore for SqliteStore {
    fn execute(&self, query: &BuiltQuery) -> StoreResult<Vec<PatientRecord>> {
        let conn = self.lock()?;
        if query.has_bindings() {
            execute_bound(&conn, query)
        } else {
            execute_verbatim(&conn, &query.text)
        }
    }
}

/// Prepare once, bind values positionally
fn execute_bound(conn: &Connection, query: &BuiltQuery) -> StoreResult<Vec<PatientRecord>> {
    let mut stmt = conn.prepare(&query.text)?;
    let rows = stmt.query_map(params_from_iter(query.bound_values.iter()), patient_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Run the text as-is, statement by statement.
///
/// Rows come from the first statement that produces columns; every other
/// statement is executed for its side effects. Trailing SQL smuggled in
/// through an interpolated value therefore runs.
fn execute_verbatim(conn: &Connection, sql: &str) -> StoreResult<Vec<PatientRecord>> {
    let mut batch = Batch::new(conn, sql);
    let mut records: Option<Vec<PatientRecord>> = None;

    while let Some(mut stmt) = batch.next()? {
        if records.is_none() && stmt.column_count() > 0 {
            let rows = stmt.query_map([], patient_from_row)?;
            records = Some(rows.collect::<Result<Vec<_>, _>>()?);
        } else if stmt.column_count() > 0 {
            let mut rows = stmt.query([])?;
            while rows.next()?.is_some() {}
        } else {
            let changed = stmt.execute([])?;
            debug!(event = "TRAILING_STATEMENT", changed);
        }
    }

    Ok(records.unwrap_or_default())
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    Ok(PatientRecord {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        date_of_birth: row.get("date_of_birth")?,
        gender: row.get("gender")?,
        phone_number: row.get("phone_number")?,
        email: row.get("email")?,
        address: row.get("address")?,
        city: row.get("city")?,
        state: row.get("state")?,
        zip_code: row.get("zip_code")?,
        insurance_provider: row.get("insurance_provider")?,
        insurance_number: row.get("insurance_number")?,
        allergies: row.get("allergies")?,
        medical_history: row.get("medical_history")?,
        is_active: row.get("is_active")?,
        date_created: row.get("date_created")?,
        date_modified: row.get("date_modified")?,
    })
}
