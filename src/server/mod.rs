//! HTTP surface: the answer endpoint and liveness probe.

mod api;
mod error;
mod handlers;
mod http;
mod state;

pub use api::{AnswerRequest, AnswerResponse, HealthResponse, GENERIC_FAILURE_TEXT};
pub use error::ServerError;
pub use http::{AnswerServer, ServerConfig, DEFAULT_PORT};
pub use state::AppState;
