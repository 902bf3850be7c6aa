//! HTTP model provider adapters
//!
//! Each adapter implements the application's [`ModelClient`] port against a
//! vendor chat API. The orchestrator never sees which vendor is behind a
//! participant; swapping providers is a construction-time decision.

mod anthropic;
mod openai;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

use duel_application::ModelClient;
use duel_domain::Model;
use std::str::FromStr;
use std::sync::Arc;

/// Supported provider backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    /// Provider inferred from a model identifier, for configs that omit it.
    pub fn for_model(model: &Model) -> Self {
        if model.is_claude() {
            Self::Anthropic
        } else {
            Self::OpenAi
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(format!(
                "Unknown provider '{other}' (expected 'openai' or 'anthropic')"
            )),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Construct a model client for the given provider.
pub fn build_client(
    kind: ProviderKind,
    model: Model,
    api_key: String,
    temperature: f64,
) -> Arc<dyn ModelClient> {
    match kind {
        ProviderKind::OpenAi => Arc::new(OpenAiClient::new(model, api_key).with_temperature(temperature)),
        ProviderKind::Anthropic => {
            Arc::new(AnthropicClient::new(model, api_key).with_temperature(temperature))
        }
    }
}
