//! Application layer for duel
//!
//! This crate contains the debate orchestrator (use case), the port
//! definitions its collaborators implement, and the two timing disciplines
//! wrapped around every external call: bounded-backoff retry and
//! presentation pacing. It depends only on the domain layer.

pub mod error;
pub mod pacing;
pub mod ports;
pub mod retry;
pub mod use_cases;

// Re-export commonly used types
pub use error::StepError;
pub use pacing::PaceController;
pub use ports::{
    model_client::{ModelClient, ProviderError},
    progress::{NoProgress, ProgressNotifier},
    prompts::PromptProvider,
    telemetry::{DebateMetrics, NoTelemetry, TelemetrySink, TurnMetrics},
};
pub use retry::RetryPolicy;
pub use use_cases::run_debate::{DebateConfig, RunDebateInput, RunDebateUseCase};
