//! OpenAI chat-completions client

use async_trait::async_trait;
use duel_application::{ModelClient, ProviderError};
use duel_domain::{Message, Model};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Model client backed by the OpenAI `/chat/completions` endpoint.
pub struct OpenAiClient {
    http: reqwest::Client,
    model: Model,
    api_key: String,
    temperature: f64,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(model: Model, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            model,
            api_key,
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the API base URL (for proxies and compatible endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl ModelClient for OpenAiClient {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn generate(
        &self,
        messages: &[Message],
        max_tokens: u32,
    ) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: self.model.as_str(),
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens,
            temperature: self.temperature,
        };

        debug!(
            "OpenAI request: model={}, messages={}",
            self.model,
            messages.len()
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Auth(format!("{status}: {body}")));
        }
        if status.as_u16() == 429 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::RateLimited(format!("{status}: {body}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Transport(format!("{status}: {body}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("response contained no choices".into()))
    }
}
