//! # HTTP Server
//!
//! Combines the search, settings and health routers into one axum server.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::search::{SearchBackend, SearchPipeline};

use super::config::HttpServerConfig;
use super::routes::{health_routes, patient_routes, settings_routes};

/// HTTP server for the search demo
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `store` with custom configuration
    pub fn with_store<S: SearchBackend + 'static>(config: HttpServerConfig, store: Arc<S>) -> Self {
        let router = Self::build_router(&config, SearchPipeline::new(store));
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router<S: SearchBackend + 'static>(
        config: &HttpServerConfig,
        pipeline: SearchPipeline<S>,
    ) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(patient_routes(pipeline.clone()))
            .merge(settings_routes(pipeline))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl+C
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("Invalid socket address: {}", e)))?;

        let listener = TcpListener::bind(addr).await?;
        info!(event = "HTTP_LISTENING", %addr);
        info!("Endpoints: GET /patients, GET /settings, POST /toggle-parameterized, POST /toggle-validation, GET /health");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!(event = "HTTP_SHUTDOWN", "Received Ctrl+C, shutting down gracefully");
                }
            })
            .await?;

        Ok(())
    }
}
