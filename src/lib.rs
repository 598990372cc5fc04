//! sqli-lab - A runtime-toggleable SQL injection demonstration server
//!
//! A patient search endpoint whose query construction flips between
//! parameterized and string-interpolated SQL, with an optional input
//! validation stage in front. Both toggles live in the database and take
//! effect on the next request.
//!
//! Layout:
//! - [`search`]: filter criteria, validation, query builders and the pipeline
//! - [`store`]: SQLite schema, seed data and the store implementation
//! - [`http_server`]: axum routes for search, settings and toggles
//! - [`cli`]: init / start / query / settings / toggle commands

pub mod cli;
pub mod http_server;
pub mod logging;
pub mod search;
pub mod store;
