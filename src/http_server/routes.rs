//! Search and Settings HTTP Routes
//!
//! - `GET /patients` - filtered patient search
//! - `GET /settings` - current policy toggles
//! - `POST /toggle-parameterized`, `POST /toggle-validation` - flip one toggle
//! - `GET /health` - liveness
//!
//! The store is a single SQLite connection behind a blocking mutex, so every
//! store call runs on tokio's blocking pool via `spawn_blocking`.

use std::collections::{BTreeMap, HashMap};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use crate::search::{
    FilterCriteria, PatientRecord, PolicyField, PolicySettings, SearchBackend, SearchPipeline,
};

use super::errors::ApiError;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create search routes
pub fn patient_routes<S: SearchBackend + 'static>(pipeline: SearchPipeline<S>) -> Router {
    Router::new()
        .route("/patients", get(list_patients_handler::<S>))
        .with_state(pipeline)
}

/// Create settings and toggle routes
pub fn settings_routes<S: SearchBackend + 'static>(pipeline: SearchPipeline<S>) -> Router {
    Router::new()
        .route("/settings", get(get_settings_handler::<S>))
        .route("/toggle-parameterized", post(toggle_parameterized_handler::<S>))
        .route("/toggle-validation", post(toggle_validation_handler::<S>))
        .with_state(pipeline)
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn list_patients_handler<S: SearchBackend + 'static>(
    State(pipeline): State<SearchPipeline<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<PatientRecord>>, ApiError> {
    let criteria = FilterCriteria::from_query(&params);
    let outcome = tokio::task::spawn_blocking(move || pipeline.search(&criteria)).await??;
    Ok(Json(outcome.records))
}

async fn get_settings_handler<S: SearchBackend + 'static>(
    State(pipeline): State<SearchPipeline<S>>,
) -> Result<Json<PolicySettings>, ApiError> {
    let policy = tokio::task::spawn_blocking(move || pipeline.store().get_policy()).await??;
    Ok(Json(policy))
}

async fn toggle_parameterized_handler<S: SearchBackend + 'static>(
    State(pipeline): State<SearchPipeline<S>>,
) -> Result<Json<BTreeMap<&'static str, bool>>, ApiError> {
    toggle(pipeline, PolicyField::Parameterized).await
}

async fn toggle_validation_handler<S: SearchBackend + 'static>(
    State(pipeline): State<SearchPipeline<S>>,
) -> Result<Json<BTreeMap<&'static str, bool>>, ApiError> {
    toggle(pipeline, PolicyField::Validation).await
}

/// Flip one toggle and answer `{"<field>": <new value>}`
async fn toggle<S: SearchBackend + 'static>(
    pipeline: SearchPipeline<S>,
    field: PolicyField,
) -> Result<Json<BTreeMap<&'static str, bool>>, ApiError> {
    let value = tokio::task::spawn_blocking(move || pipeline.store().toggle(field)).await??;
    info!(event = "POLICY_TOGGLED", field = field.as_str(), value);
    Ok(Json(BTreeMap::from([(field.as_str(), value)])))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
