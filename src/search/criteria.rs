//! # Filter Criteria
//!
//! The per-request filter value object and its decoding from query
//! parameters.

use std::collections::HashMap;

/// Query parameter carrying the first-name filter
pub const FIRST_NAME_PARAM: &str = "firstname";

/// Query parameter carrying the last-name filter
pub const LAST_NAME_PARAM: &str = "lastname";

/// Query parameter carrying the insurance-provider filter
pub const INSURANCE_PROVIDER_PARAM: &str = "insurance_provider";

/// Up to three optional filter values supplied by the caller.
///
/// Values are kept exactly as received. Whether they are checked, escaped or
/// bound is decided later by the validation and construction stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub insurance_provider: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = non_empty(value.into());
        self
    }

    pub fn with_last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = non_empty(value.into());
        self
    }

    pub fn with_insurance_provider(mut self, value: impl Into<String>) -> Self {
        self.insurance_provider = non_empty(value.into());
        self
    }

    /// Decode criteria from raw query parameters.
    ///
    /// Empty values count as absent, and unknown parameters are ignored.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).cloned().and_then(non_empty);

        Self {
            first_name: get(FIRST_NAME_PARAM),
            last_name: get(LAST_NAME_PARAM),
            insurance_provider: get(INSURANCE_PROVIDER_PARAM),
        }
    }

    /// True when the caller supplied no filter at all
    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }

    /// Number of filter fields present
    pub fn present_count(&self) -> usize {
        [&self.first_name, &self.last_name, &self.insurance_provider]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_query_reads_all_fields() {
        let criteria = FilterCriteria::from_query(&params(&[
            ("firstname", "Joe"),
            ("lastname", "Lopez"),
            ("insurance_provider", "InsureCorp"),
        ]));

        assert_eq!(criteria.first_name.as_deref(), Some("Joe"));
        assert_eq!(criteria.last_name.as_deref(), Some("Lopez"));
        assert_eq!(criteria.insurance_provider.as_deref(), Some("InsureCorp"));
        assert_eq!(criteria.present_count(), 3);
    }

    #[test]
    fn test_empty_values_are_absent() {
        let criteria = FilterCriteria::from_query(&params(&[
            ("firstname", ""),
            ("lastname", ""),
            ("insurance_provider", ""),
        ]));

        assert!(criteria.is_empty());
    }

    #[test]
    fn test_unknown_params_ignored() {
        let criteria = FilterCriteria::from_query(&params(&[("first_name", "Joe"), ("limit", "5")]));
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_values_kept_verbatim() {
        let criteria = FilterCriteria::new().with_first_name("a' OR 1=1 --");
        assert_eq!(criteria.first_name.as_deref(), Some("a' OR 1=1 --"));
    }

    #[test]
    fn test_builder_skips_empty() {
        let criteria = FilterCriteria::new().with_last_name("").with_insurance_provider("MediCare");
        assert_eq!(criteria.last_name, None);
        assert_eq!(criteria.present_count(), 1);
    }
}
