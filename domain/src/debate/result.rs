//! Debate status and the owned per-debate result.

use crate::core::expression::Expression;
use crate::debate::turn::Turn;
use crate::pacing::profile::PaceMode;
use crate::pacing::timing::TimingSummary;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Status of a debate run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateStatus {
    NotStarted,
    InProgress,
    Completed,
    Timeout,
    Error,
    Cancelled,
}

impl DebateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateStatus::NotStarted => "not_started",
            DebateStatus::InProgress => "in_progress",
            DebateStatus::Completed => "completed",
            DebateStatus::Timeout => "timeout",
            DebateStatus::Error => "error",
            DebateStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal states never transition again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DebateStatus::NotStarted | DebateStatus::InProgress)
    }
}

impl std::fmt::Display for DebateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a complete debate run.
///
/// Created in a non-terminal state at debate start, mutated only by the
/// orchestrator driving that single debate, immutable once a terminal
/// status is reached. Never shared across concurrent runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateResult {
    pub status: DebateStatus,
    pub expression: Expression,
    pub final_answer: Option<String>,
    /// Rounds entered (1-based); always ≤ the configured maximum
    pub rounds: u32,
    /// Exactly the turns that executed before termination, in order
    pub turns: Vec<Turn>,
    pub total_time: Duration,
    pub error_message: Option<String>,
    pub pace_mode: PaceMode,
    pub timing_summary: TimingSummary,
    /// True when the Solver finalized before any Critic agreement.
    ///
    /// The protocol does not expect this, but an unprompted `<FINAL>` is
    /// honored as a completion rather than rejected; the flag keeps that
    /// path visible to callers and audit records.
    pub short_circuited: bool,
}

impl DebateResult {
    /// Start a new run in the `InProgress` state.
    pub fn in_progress(expression: Expression, pace_mode: PaceMode) -> Self {
        Self {
            status: DebateStatus::InProgress,
            expression,
            final_answer: None,
            rounds: 0,
            turns: Vec::new(),
            total_time: Duration::ZERO,
            error_message: None,
            pace_mode,
            timing_summary: TimingSummary::default(),
            short_circuited: false,
        }
    }

    /// Regular completion: the Solver finalized after Critic agreement.
    pub fn complete(&mut self, answer: String) {
        self.final_answer = Some(answer);
        self.status = DebateStatus::Completed;
    }

    /// Short-circuit completion: the Solver emitted a final answer before
    /// any agreement. Kept as its own named transition.
    pub fn complete_short_circuit(&mut self, answer: String) {
        self.final_answer = Some(answer);
        self.short_circuited = true;
        self.status = DebateStatus::Completed;
    }

    /// Round budget exhausted without agreement.
    pub fn time_out(&mut self, max_rounds: u32) {
        self.status = DebateStatus::Timeout;
        self.error_message = Some(format!(
            "Debate did not reach agreement within {max_rounds} rounds"
        ));
    }

    /// Unrecoverable failure.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = DebateStatus::Error;
        self.error_message = Some(message.into());
    }

    /// Prompt abort on cancellation.
    pub fn cancel(&mut self) {
        self.status = DebateStatus::Cancelled;
        self.error_message = Some("Debate cancelled".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(DebateStatus::Completed.is_terminal());
        assert!(DebateStatus::Timeout.is_terminal());
        assert!(DebateStatus::Error.is_terminal());
        assert!(DebateStatus::Cancelled.is_terminal());
        assert!(!DebateStatus::InProgress.is_terminal());
        assert!(!DebateStatus::NotStarted.is_terminal());
    }

    #[test]
    fn test_in_progress_initial_state() {
        let result = DebateResult::in_progress("2 + 3".into(), PaceMode::Slow);
        assert_eq!(result.status, DebateStatus::InProgress);
        assert!(result.turns.is_empty());
        assert!(result.final_answer.is_none());
        assert!(!result.short_circuited);
    }

    #[test]
    fn test_complete_sets_answer() {
        let mut result = DebateResult::in_progress("2 + 3".into(), PaceMode::Fast);
        result.complete("5".to_string());
        assert_eq!(result.status, DebateStatus::Completed);
        assert_eq!(result.final_answer.as_deref(), Some("5"));
        assert!(!result.short_circuited);
    }

    #[test]
    fn test_short_circuit_is_marked() {
        let mut result = DebateResult::in_progress("2 + 3".into(), PaceMode::Fast);
        result.complete_short_circuit("5".to_string());
        assert_eq!(result.status, DebateStatus::Completed);
        assert!(result.short_circuited);
    }

    #[test]
    fn test_timeout_message_references_budget() {
        let mut result = DebateResult::in_progress("2 + 3".into(), PaceMode::Slow);
        result.time_out(12);
        assert_eq!(result.status, DebateStatus::Timeout);
        assert!(result.error_message.as_deref().unwrap().contains("12 rounds"));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&DebateStatus::Timeout).unwrap();
        assert_eq!(json, r#""timeout""#);
    }
}
