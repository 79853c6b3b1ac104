use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::{GenerationError, TextGenerator};
use crate::config::GenerationConfig;

const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
    temperature: f32,
    top_p: f32,
}

impl ChatCompletionsClient {
    pub fn new(cfg: &GenerationConfig, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: format!("{}/chat/completions", cfg.endpoint.trim_end_matches('/')),
            model: cfg.model.clone(),
            api_key: api_key.into(),
            temperature: cfg.temperature,
            top_p: cfg.top_p,
        }
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    #[instrument(skip_all)]
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: "",
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            top_p: self.top_p,
        };

        let res = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "generation request failed");
                if e.is_connect() {
                    GenerationError::ServiceUnavailable
                } else {
                    GenerationError::ServiceError(e.to_string())
                }
            })?;

        let status = res.status();
        if !status.is_success() {
            let mut text = res.text().await.unwrap_or_default();
            if text.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| text.is_char_boundary(*i))
                    .unwrap_or(0);
                text.truncate(cut);
            }
            warn!(%status, "generation service returned an error");
            return Err(GenerationError::ServiceError(format!("{status}: {text}")));
        }

        let reply: ChatResponse = res
            .json()
            .await
            .map_err(|e| GenerationError::ServiceError(format!("malformed completion: {e}")))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| GenerationError::ServiceError("empty completion".into()))?;

        debug!(model = %self.model, chars = content.len(), "completion received");
        Ok(content)
    }
}

/// Stand-in used when no credential is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledClient;

#[async_trait]
impl TextGenerator for DisabledClient {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::ServiceUnavailable)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
