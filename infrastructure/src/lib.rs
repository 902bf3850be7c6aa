//! Infrastructure layer for duel
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP model clients, prompt templates,
//! configuration file loading, and JSONL telemetry.

pub mod config;
pub mod prompts;
pub mod providers;
pub mod telemetry;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileDebateConfig, FilePacingConfig,
    FilePacingOverrides, FileParticipantConfig, FileTelemetryConfig,
};
pub use prompts::StaticPromptProvider;
pub use providers::{AnthropicClient, OpenAiClient, ProviderKind, build_client};
pub use telemetry::JsonlTelemetrySink;
