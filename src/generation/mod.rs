use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::GenerationConfig;

pub mod client;
pub mod fallback;
pub mod prompt;

pub use client::{ChatCompletionsClient, DisabledClient};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation service unavailable")]
    ServiceUnavailable,
    #[error("generation service error: {0}")]
    ServiceError(String),
}

/// Capability to turn a prompt into plain text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Pick the generator once at startup: live when a credential is configured.
pub fn from_config(cfg: &GenerationConfig) -> Arc<dyn TextGenerator> {
    match cfg.api_key.as_deref() {
        Some(key) => {
            info!(endpoint = %cfg.endpoint, model = %cfg.model, "generation service enabled");
            Arc::new(ChatCompletionsClient::new(cfg, key))
        }
        None => {
            warn!("no generation credential configured; using offline lesson plans");
            Arc::new(DisabledClient)
        }
    }
}
