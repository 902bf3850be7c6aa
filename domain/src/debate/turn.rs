//! Turn entity: one participant's single response.

use crate::pacing::timing::TurnTiming;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Debate participant role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    /// Proposes and argues for an answer
    Solver,
    /// Must withhold agreement until genuinely convinced
    Critic,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Solver => "solver",
            Speaker::Critic => "critic",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::Solver => write!(f, "Solver"),
            Speaker::Critic => write!(f, "Critic"),
        }
    }
}

/// A single recorded debate turn.
///
/// Immutable once recorded: the orchestrator constructs a `Turn` after the
/// model call resolves and never touches it again. The agreement flag is
/// only meaningful on Critic turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub timing: Option<TurnTiming>,
    pub agreement_flag: Option<bool>,
    pub tokens_estimate: usize,
}

impl Turn {
    /// Record a turn at the current instant.
    pub fn record(speaker: Speaker, content: impl Into<String>, timing: TurnTiming) -> Self {
        let content = content.into();
        let tokens_estimate = approx_tokens(&content);
        Self {
            speaker,
            content,
            timestamp: Utc::now(),
            timing: Some(timing),
            agreement_flag: None,
            tokens_estimate,
        }
    }

    /// Attach the Critic's extracted agreement flag.
    pub fn with_agreement(mut self, agreement: Option<bool>) -> Self {
        self.agreement_flag = agreement;
        self
    }
}

/// Rough token estimate: whitespace-split word count.
///
/// Good enough for per-turn telemetry; exact tokenizer counts are a
/// provider concern the core deliberately avoids.
pub fn approx_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn timing() -> TurnTiming {
        TurnTiming::new(
            Duration::from_millis(500),
            Duration::from_millis(1500),
            0.1,
        )
    }

    #[test]
    fn test_record_estimates_tokens() {
        let turn = Turn::record(Speaker::Solver, "two plus three is five", timing());
        assert_eq!(turn.tokens_estimate, 5);
        assert!(turn.agreement_flag.is_none());
    }

    #[test]
    fn test_with_agreement() {
        let turn = Turn::record(Speaker::Critic, "<AGREE>false</AGREE> why?", timing())
            .with_agreement(Some(false));
        assert_eq!(turn.agreement_flag, Some(false));
    }

    #[test]
    fn test_approx_tokens_empty() {
        assert_eq!(approx_tokens(""), 0);
        assert_eq!(approx_tokens("   \n  "), 0);
    }
}
