//! Model client port
//!
//! Defines the capability contract for remote text generation. The Solver
//! and Critic are two independently configured instances of this single
//! interface, not bespoke types per backend.

use async_trait::async_trait;
use duel_domain::{Message, Model};
use thiserror::Error;

/// Errors a model backend can fail with.
///
/// All variants are treated uniformly by the retry policy; the distinction
/// exists for logging and audit records.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A remote text-generation capability.
///
/// `generate` takes the ordered role-tagged message list and a token budget
/// and returns the generated text. Implementations live in the
/// infrastructure layer.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// The model this client is bound to
    fn model(&self) -> &Model;

    /// Generate a completion for the given conversation
    async fn generate(&self, messages: &[Message], max_tokens: u32)
    -> Result<String, ProviderError>;
}
