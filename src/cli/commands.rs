//! CLI command implementations
//!
//! Each command loads the config, opens the store, does one thing and
//! prints one JSON object. `start` is the only long-running command.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use crate::http_server::HttpServer;
use crate::logging::init_logging;
use crate::search::{FilterCriteria, PolicyField, PolicyStore, SearchError, SearchOutcome, SearchPipeline};
use crate::store::SqliteStore;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Start { config, port } => start(&config, port),
        Command::Query {
            config,
            firstname,
            lastname,
            insurance_provider,
        } => {
            let criteria = criteria_from_args(firstname, lastname, insurance_provider);
            query(&config, &criteria)
        }
        Command::Settings { config } => settings(&config),
        Command::Toggle { config, field } => toggle(&config, field.into()),
    }
}

/// Create the database file and seed it
///
/// Re-running against an existing file leaves its rows and toggles alone.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;

    if config.is_in_memory() {
        return Err(CliError::config_error(
            "init needs a database file; ':memory:' databases are seeded on open",
        ));
    }

    let (_store, report) = SqliteStore::create(config.database_file())?;

    write_response(json!({
        "initialized": true,
        "database_path": config.database_path,
        "patients_seeded": report.patients_seeded,
        "settings_created": report.settings_created,
    }))
}

/// Serve the HTTP API until Ctrl+C
pub fn start(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    init_logging();

    let mut config = Config::load_or_default(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let store = SqliteStore::open_configured(&config.database_path)?;
    info!(event = "STORE_OPENED", database = %config.database_path);

    let server = HttpServer::with_store(config.http, Arc::new(store));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Run one search and print the outcome
///
/// Search failures are reported as an error object on stdout, the same
/// way the HTTP API reports them in its response body, and then returned
/// so the process exits non-zero.
pub fn query(config_path: &Path, criteria: &FilterCriteria) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let store = SqliteStore::open_configured(&config.database_path)?;
    let pipeline = SearchPipeline::new(Arc::new(store));

    match pipeline.search(criteria) {
        Ok(outcome) => write_response(outcome_json(&outcome)),
        Err(e) => {
            let message = match &e {
                SearchError::Validation(errors) => errors.to_string(),
                other => other.to_string(),
            };
            write_error(e.code(), &message)?;
            Err(CliError::search_failed(format!("{}: {}", e.code(), message)))
        }
    }
}

/// Print the current toggles
pub fn settings(config_path: &Path) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let store = SqliteStore::open_configured(&config.database_path)?;

    let policy = store.get_policy()?;
    write_response(serde_json::to_value(policy)?)
}

/// Flip one toggle and print its new value
pub fn toggle(config_path: &Path, field: PolicyField) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let store = SqliteStore::open_configured(&config.database_path)?;

    let value = store.toggle(field)?;
    write_response(json!({ field.as_str(): value }))
}

fn criteria_from_args(
    firstname: Option<String>,
    lastname: Option<String>,
    insurance_provider: Option<String>,
) -> FilterCriteria {
    let mut criteria = FilterCriteria::new();
    if let Some(value) = firstname {
        criteria = criteria.with_first_name(value);
    }
    if let Some(value) = lastname {
        criteria = criteria.with_last_name(value);
    }
    if let Some(value) = insurance_provider {
        criteria = criteria.with_insurance_provider(value);
    }
    criteria
}

/// JSON shape of a finished search, query text included
fn outcome_json(outcome: &SearchOutcome) -> Value {
    json!({
        "policy": outcome.policy,
        "strategy": outcome.strategy.as_str(),
        "query": outcome.query.text,
        "bound_values": outcome.query.bound_values,
        "count": outcome.records.len(),
        "records": outcome.records,
    })
}
