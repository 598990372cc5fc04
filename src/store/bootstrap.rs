//! # Schema Bootstrap
//!
//! One-time creation of the `patients` and `settings` tables plus the demo
//! data set. Safe to run repeatedly: tables are created if missing and rows
//! are only seeded into empty tables.

use rusqlite::{params, Connection};
use tracing::info;

use super::errors::StoreResult;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    date_of_birth DATE NOT NULL,
    gender VARCHAR(10) NOT NULL,
    phone_number VARCHAR(20),
    email VARCHAR(100),
    address VARCHAR(100),
    city VARCHAR(50),
    state VARCHAR(50),
    zip_code VARCHAR(20),
    insurance_provider VARCHAR(100),
    insurance_number VARCHAR(50),
    allergies TEXT,
    medical_history TEXT,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    date_created TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    date_modified TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY,
    parameterized BOOLEAN NOT NULL DEFAULT 0,
    validation BOOLEAN NOT NULL DEFAULT 0
);
";

/// Seed row: first, last, dob, gender, phone, email, address, city, state,
/// zip, provider, policy number, allergies, history, active
type SeedPatient = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    bool,
);

/// Demo patients. The first two are inactive and must never appear in a
/// well-formed search.
pub const SEED_PATIENTS: [SeedPatient; 7] = [
    ("John", "Doe", "1980-05-12", "Male", "555-1234", "john.doe@example.com", "123 Main St", "Anytown", "Anystate", "12345", "HealthPlus", "HP-123456", "Peanuts", "Hypertension", false),
    ("Jane", "Smith", "1990-07-20", "Female", "555-5678", "jane.smith@example.com", "456 Oak Ave", "Otherville", "Otherstate", "67890", "MediCare", "MC-987654", "None", "Asthma", false),
    ("Carlos", "Gonzalez", "1975-03-10", "Male", "555-2468", "carlos.gonzalez@example.com", "546 Pine Rd", "Differenttown", "Diffstate", "13579", "InsureCorp", "IC-135790", "Shellfish", "Diabetes", true),
    ("Joe", "Lopez", "1975-03-10", "Male", "555-2468", "carlos.gonzalez@example.com", "643 Mill Rd", "Town", "Diffstate", "13579", "InsureCorp", "IC-864964", "Pollen", "Diabetes", true),
    ("Nick", "Gonzalez", "1975-03-10", "Male", "555-2468", "carlos.gonzalez@example.com", "945 Carrs Rd", "Towson", "Diffstate", "13579", "MediCare", "MC-456087", "None", "Broken Leg", true),
    ("Richard", "Smith", "1975-03-10", "Male", "555-2468", "carlos.gonzalez@example.com", "678 Oak Rd", "Fallston", "Diffstate", "13579", "HealthPlus", "HP-125476", "Peanuts", "None", true),
    ("Sam", "Pool", "1975-03-10", "Male", "555-2468", "carlos.gonzalez@example.com", "345 Main St", "Bel Air", "Diffstate", "13579", "InsureCorp", "IC-246790", "None", "Heart Attack", true),
];

/// What a bootstrap run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub patients_seeded: usize,
    pub settings_created: bool,
}

/// Create tables and seed data inside one transaction
pub fn bootstrap(conn: &mut Connection) -> StoreResult<BootstrapReport> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA)?;

    let mut report = BootstrapReport::default();

    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    if existing == 0 {
        let mut stmt = tx.prepare(
            "INSERT INTO patients (
                first_name, last_name, date_of_birth, gender, phone_number, email,
                address, city, state, zip_code, insurance_provider, insurance_number,
                allergies, medical_history, is_active
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        )?;
        for p in SEED_PATIENTS.iter() {
            stmt.execute(params![
                p.0, p.1, p.2, p.3, p.4, p.5, p.6, p.7, p.8, p.9, p.10, p.11, p.12, p.13, p.14
            ])?;
            report.patients_seeded += 1;
        }
    }

    let inserted = tx.execute(
        "INSERT OR IGNORE INTO settings (id, parameterized, validation) VALUES (1, 0, 0)",
        [],
    )?;
    report.settings_created = inserted == 1;

    tx.commit()?;

    info!(
        event = "STORE_BOOTSTRAPPED",
        patients_seeded = report.patients_seeded,
        settings_created = report.settings_created,
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_seeds_once() {
        let mut conn = Connection::open_in_memory().unwrap();

        let first = bootstrap(&mut conn).unwrap();
        assert_eq!(first.patients_seeded, 7);
        assert!(first.settings_created);

        let second = bootstrap(&mut conn).unwrap();
        assert_eq!(second, BootstrapReport::default());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM patients", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 7);
    }

    #[test]
    fn test_default_settings_are_false() {
        let mut conn = Connection::open_in_memory().unwrap();
        bootstrap(&mut conn).unwrap();

        let (parameterized, validation): (bool, bool) = conn
            .query_row(
                "SELECT parameterized, validation FROM settings WHERE id = 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert!(!parameterized);
        assert!(!validation);
    }

    #[test]
    fn test_two_inactive_patients() {
        let mut conn = Connection::open_in_memory().unwrap();
        bootstrap(&mut conn).unwrap();

        let inactive: i64 = conn
            .query_row("SELECT COUNT(*) FROM patients WHERE is_active IS FALSE", [], |r| r.get(0))
            .unwrap();
        assert_eq!(inactive, 2);
    }
}
