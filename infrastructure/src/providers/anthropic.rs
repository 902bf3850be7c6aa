//! Anthropic messages-API client

use async_trait::async_trait;
use duel_application::{ModelClient, ProviderError};
use duel_domain::{Message, Model, Role};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Model client backed by the Anthropic `/v1/messages` endpoint.
///
/// Anthropic takes the system prompt as a top-level field rather than a
/// message, so system messages are pulled out of the conversation before
/// the request is built.
pub struct AnthropicClient {
    http: reqwest::Client,
    model: Model,
    api_key: String,
    temperature: f64,
    base_url: String,
}

impl AnthropicClient {
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

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<ApiMessage<'a>>,
    temperature: f64,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Split system messages from the conversation turns.
fn split_system(messages: &[Message]) -> (Option<String>, Vec<ApiMessage<'_>>) {
    let mut system_parts = Vec::new();
    let mut turns = Vec::new();
    for message in messages {
        match message.role {
            Role::System => system_parts.push(message.content.as_str()),
            Role::User | Role::Assistant => turns.push(ApiMessage {
                role: message.role.as_str(),
                content: &message.content,
            }),
        }
    }
    let system = if system_parts.is_empty() {
        None
    } else {
        Some(system_parts.join("\n\n"))
    };
    (system, turns)
}

#[async_trait]
impl ModelClient for AnthropicClient {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn generate(
        &self,
        messages: &[Message],
        max_tokens: u32,
    ) -> Result<String, ProviderError> {
        let (system, turns) = split_system(messages);
        let request = MessagesRequest {
            model: self.model.as_str(),
            max_tokens,
            system,
            messages: turns,
            temperature: self.temperature,
        };

        debug!(
            "Anthropic request: model={}, messages={}",
            self.model,
            messages.len()
        );

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
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

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if parsed.content.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "response contained no content blocks".into(),
            ));
        }
        Ok(parsed
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}
