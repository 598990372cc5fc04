//! Search Pipeline Tests against SQLite
//!
//! End-to-end behaviour of validate → build → execute on the seeded store:
//! - Well-formed filters return the same rows under both strategies
//! - Injection payloads diverge between the two strategies
//! - Validation rejects payloads before any query is built

use std::sync::Arc;

use sqli_lab::search::{
    FilterCriteria, PatientRecord, PolicySettings, PolicyStore, QueryBuilder, SearchError,
    SearchPipeline,
};
use sqli_lab::store::{SqliteStore, SEED_PATIENTS};

// =============================================================================
// Helper Functions
// =============================================================================

const TAUTOLOGY: &str = "a' OR 1=1 --";

fn pipeline() -> SearchPipeline<SqliteStore> {
    SearchPipeline::new(Arc::new(SqliteStore::open_in_memory().unwrap()))
}

fn ids(records: &[PatientRecord]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}

fn search_ids(
    pipeline: &SearchPipeline<SqliteStore>,
    policy: PolicySettings,
    criteria: &FilterCriteria,
) -> Vec<i64> {
    ids(&pipeline.search_with_policy(policy, criteria).unwrap().records)
}

fn all_policies() -> [PolicySettings; 4] {
    [
        PolicySettings::new(false, false),
        PolicySettings::new(true, false),
        PolicySettings::new(false, true),
        PolicySettings::new(true, true),
    ]
}

// =============================================================================
// Well-formed Filters
// =============================================================================

/// Benign filters select the same active rows in every configuration.
#[test]
fn test_well_formed_filters_agree_across_policies() {
    let pipeline = pipeline();
    let cases = [
        (FilterCriteria::new().with_last_name("Gonzalez"), vec![3, 5]),
        (FilterCriteria::new().with_first_name("jo"), vec![4]),
        (FilterCriteria::new().with_insurance_provider("InsureCorp"), vec![3, 4, 7]),
        (
            FilterCriteria::new()
                .with_last_name("smith")
                .with_insurance_provider("HealthPlus"),
            vec![6],
        ),
    ];

    for (criteria, expected) in cases {
        for policy in all_policies() {
            assert_eq!(
                search_ids(&pipeline, policy, &criteria),
                expected,
                "criteria {:?} under {:?}",
                criteria,
                policy
            );
        }
    }
}

/// Inactive patients never match a well-formed search.
#[test]
fn test_inactive_patients_hidden() {
    let pipeline = pipeline();
    let criteria = FilterCriteria::new().with_first_name("John");

    for policy in all_policies() {
        assert!(search_ids(&pipeline, policy, &criteria).is_empty());
    }
}

/// No filters means no rows, not every row.
#[test]
fn test_empty_filter_returns_nothing() {
    let pipeline = pipeline();
    let outcome = pipeline.search(&FilterCriteria::new()).unwrap();

    assert!(outcome.records.is_empty());
    assert!(outcome.query.text.contains("0 = 1"));
}

/// Results come back in ascending id order.
#[test]
fn test_results_ordered_by_id() {
    let pipeline = pipeline();
    let criteria = FilterCriteria::new().with_last_name("z");

    let found = search_ids(&pipeline, PolicySettings::new(true, false), &criteria);
    let mut sorted = found.clone();
    sorted.sort_unstable();
    assert_eq!(found, sorted);
    assert_eq!(found, vec![3, 4, 5]);
}

// =============================================================================
// Injection Divergence
// =============================================================================

/// The tautology payload is inert when bound and dumps the table when
/// interpolated, inactive rows included.
#[test]
fn test_tautology_diverges_between_strategies() {
    let pipeline = pipeline();
    let criteria = FilterCriteria::new().with_first_name(TAUTOLOGY);

    let safe = pipeline
        .search_with_policy(PolicySettings::new(true, false), &criteria)
        .unwrap();
    assert_eq!(safe.strategy, QueryBuilder::Parameterized);
    assert!(safe.records.is_empty());
    assert!(!safe.query.text.contains("1=1"));

    let unsafe_outcome = pipeline
        .search_with_policy(PolicySettings::new(false, false), &criteria)
        .unwrap();
    assert_eq!(unsafe_outcome.strategy, QueryBuilder::Interpolated);
    assert!(unsafe_outcome.query.text.contains("or 1=1 --"));
    assert_eq!(unsafe_outcome.records.len(), SEED_PATIENTS.len());
    assert!(unsafe_outcome.records.iter().any(|r| !r.is_active));
}

/// A stacked statement smuggled through an interpolated value runs.
#[test]
fn test_stacked_statement_executes_when_interpolated() {
    let pipeline = pipeline();
    let criteria = FilterCriteria::new().with_last_name("x'; DROP TABLE patients; --");

    let outcome = pipeline
        .search_with_policy(PolicySettings::new(false, false), &criteria)
        .unwrap();
    assert!(outcome.records.is_empty());

    let err = pipeline
        .search_with_policy(
            PolicySettings::new(true, false),
            &FilterCriteria::new().with_last_name("Pool"),
        )
        .unwrap_err();
    assert!(matches!(err, SearchError::Execution(_)));
}

/// The same stacked payload is just an odd name when bound.
#[test]
fn test_stacked_statement_inert_when_bound() {
    let pipeline = pipeline();
    let criteria = FilterCriteria::new().with_last_name("x'; DROP TABLE patients; --");

    let outcome = pipeline
        .search_with_policy(PolicySettings::new(true, false), &criteria)
        .unwrap();
    assert!(outcome.records.is_empty());

    let pool = FilterCriteria::new().with_last_name("Pool");
    assert_eq!(search_ids(&pipeline, PolicySettings::new(true, false), &pool), vec![7]);
}

/// An unbalanced quote is a syntax error under interpolation only.
#[test]
fn test_stray_quote_breaks_interpolated_query() {
    let pipeline = pipeline();
    let criteria = FilterCriteria::new().with_last_name("O'Brien");

    let err = pipeline
        .search_with_policy(PolicySettings::new(false, false), &criteria)
        .unwrap_err();
    assert!(matches!(err, SearchError::Execution(_)));

    assert!(search_ids(&pipeline, PolicySettings::new(true, false), &criteria).is_empty());
}

// =============================================================================
// Validation Stage
// =============================================================================

/// Validation rejects the payload before construction, even when the
/// builder would interpolate it.
#[test]
fn test_validation_blocks_payload_under_either_builder() {
    let pipeline = pipeline();
    let criteria = FilterCriteria::new()
        .with_first_name(TAUTOLOGY)
        .with_last_name("Smith")
        .with_insurance_provider("Acme");

    for parameterized in [false, true] {
        let err = pipeline
            .search_with_policy(PolicySettings::new(parameterized, true), &criteria)
            .unwrap_err();

        match err {
            SearchError::Validation(errors) => assert_eq!(
                errors.messages(),
                [
                    "First name must contain only letters.",
                    "Invalid insurance provider selected.",
                ]
            ),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}

// =============================================================================
// Persisted Policy
// =============================================================================

/// `search` follows the persisted toggles from one call to the next.
#[test]
fn test_search_reads_toggles_per_call() {
    let pipeline = pipeline();
    let criteria = FilterCriteria::new().with_first_name(TAUTOLOGY);

    assert_eq!(pipeline.search(&criteria).unwrap().records.len(), 7);

    assert!(pipeline.store().toggle_parameterized().unwrap());
    assert!(pipeline.search(&criteria).unwrap().records.is_empty());

    assert!(pipeline.store().toggle_validation().unwrap());
    assert!(matches!(
        pipeline.search(&criteria),
        Err(SearchError::Validation(_))
    ));
}

/// A missing settings row is a configuration failure.
#[test]
fn test_missing_settings_is_configuration_error() {
    let pipeline = pipeline();
    pipeline
        .store()
        .with_connection(|conn| {
            conn.execute("DELETE FROM settings", [])?;
            Ok(())
        })
        .unwrap();

    let err = pipeline
        .search(&FilterCriteria::new().with_last_name("Pool"))
        .unwrap_err();
    assert!(matches!(err, SearchError::Configuration(_)));
}
