//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown pace mode: {0} (expected slow, medium, or fast)")]
    UnknownPaceMode(String),

    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
}
