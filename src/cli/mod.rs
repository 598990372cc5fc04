//! CLI module for sqli-lab
//!
//! Provides command-line interface for:
//! - init: Create and seed the database
//! - start: Serve the HTTP API
//! - query: One-shot patient search
//! - settings / toggle: Inspect and flip the policy toggles

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, ToggleArg, DEFAULT_CONFIG};
pub use commands::{init, query, run, run_command, settings, start, toggle};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
