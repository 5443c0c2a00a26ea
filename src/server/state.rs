//! Shared application state.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::ai::AiClient;
use crate::knowledge::KnowledgeBase;

/// Application state shared across all handlers.
///
/// Everything here is immutable after startup; concurrent requests share it
/// without locks.
#[derive(Clone)]
pub struct AppState {
    /// Knowledge base, loaded once at process start.
    pub knowledge: Arc<KnowledgeBase>,
    /// Client for the generative-language provider.
    pub client: Arc<AiClient>,
    /// System instruction, resolved once from configuration.
    pub system_instruction: Arc<str>,
    /// Cancellation token for graceful shutdown.
    pub cancel: CancellationToken,
}

impl AppState {
    /// Create application state for a loaded knowledge base and client.
    #[must_use]
    pub fn new(knowledge: KnowledgeBase, client: AiClient, system_instruction: String) -> Self {
        Self {
            knowledge: Arc::new(knowledge),
            client: Arc::new(client),
            system_instruction: Arc::from(system_instruction),
            cancel: CancellationToken::new(),
        }
    }
}
