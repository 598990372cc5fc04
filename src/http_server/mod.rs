//! # sqli-lab HTTP Server Module
//!
//! JSON API consumed by the demo UI.
//!
//! # Endpoints
//!
//! - `GET /patients?firstname=&lastname=&insurance_provider=` - search
//! - `GET /settings` - current toggles
//! - `POST /toggle-parameterized` / `POST /toggle-validation`
//! - `GET /health` - health check

pub mod config;
pub mod errors;
pub mod routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::ApiError;
pub use server::HttpServer;
