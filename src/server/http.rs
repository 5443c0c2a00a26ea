//! Answer HTTP server with axum router and graceful shutdown.

use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::error::ServerError;
use super::handlers::{get_health, post_answer};
use super::state::AppState;

/// Default port for the answer server.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for the answer server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable permissive CORS.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            cors_permissive: true,
        }
    }
}

/// HTTP server exposing the answer endpoint.
pub struct AnswerServer {
    /// Server configuration.
    config: ServerConfig,
    /// Application state shared across handlers.
    state: AppState,
}

impl AnswerServer {
    /// Create a new answer server with default configuration.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self {
            config: ServerConfig::default(),
            state,
        }
    }

    /// Set the server configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the configured address as a string.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router with all routes and middleware.
    #[must_use]
    pub fn build_router(&self) -> Router {
        let router = Router::new()
            .route("/api/answer", post(post_answer))
            .route("/api/health", get(get_health))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.cors_permissive {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Run the server, binding to the configured address.
    ///
    /// The server runs until the state's cancellation token is triggered, at
    /// which point it performs a graceful shutdown.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::BindError` if the address cannot be bound, or
    /// `ServerError::ServeError` if serving fails afterwards.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.address();
        let cancel = self.state.cancel.clone();
        let app = self.build_router();

        tracing::info!(address = %addr, "Starting answer server");

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::BindError {
                address: addr.clone(),
                source: e,
            })?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                tracing::info!("Answer server shutting down gracefully");
            })
            .await
            .map_err(ServerError::from)
    }
}
