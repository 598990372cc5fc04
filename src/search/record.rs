//! Patient record returned by searches.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `patients` table.
///
/// Records are created once by the bootstrap step and are read-only from the
/// search pipeline's point of view. `id` is assigned by the store and never
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: i64,

    // Identity
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,

    // Contact
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,

    // Insurance
    pub insurance_provider: Option<String>,
    pub insurance_number: Option<String>,

    // Medical
    pub allergies: Option<String>,
    pub medical_history: Option<String>,

    pub is_active: bool,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl PatientRecord {
    /// "First Last", used in log lines and CLI output.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> PatientRecord {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        PatientRecord {
            id: 3,
            first_name: "Carlos".to_string(),
            last_name: "Gonzalez".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1975, 3, 10).unwrap(),
            gender: "Male".to_string(),
            phone_number: Some("555-2468".to_string()),
            email: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            insurance_provider: Some("InsureCorp".to_string()),
            insurance_number: Some("IC-135790".to_string()),
            allergies: Some("Shellfish".to_string()),
            medical_history: Some("Diabetes".to_string()),
            is_active: true,
            date_created: ts,
            date_modified: ts,
        }
    }

    #[test]
    fn test_serializes_with_column_names() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["first_name"], "Carlos");
        assert_eq!(json["date_of_birth"], "1975-03-10");
        assert_eq!(json["insurance_provider"], "InsureCorp");
        assert_eq!(json["is_active"], true);
        assert!(json["email"].is_null());
        assert!(json.get("date_modified").is_some());
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample().full_name(), "Carlos Gonzalez");
    }
}
