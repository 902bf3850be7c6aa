//! Prompt template provider port
//!
//! Persona wording, few-shot exemplars, and how the turn history is mapped
//! into each participant's conversation are collaborator concerns, opaque
//! to the orchestrator, which only ever hands over the expression and the
//! recorded turns.

use duel_domain::{Message, Turn};

/// Supplies the role-tagged message list for each speaker.
pub trait PromptProvider: Send + Sync {
    /// Messages for a Solver turn, built from the full prior history.
    fn solver_messages(&self, expression: &str, turns: &[Turn]) -> Vec<Message>;

    /// Messages for a Critic turn: the Solver's latest output plus history.
    fn critic_messages(&self, expression: &str, turns: &[Turn]) -> Vec<Message>;

    /// Messages for the finalization request issued to the Solver after the
    /// Critic agreed. Must carry an explicit "provide the final answer"
    /// instruction.
    fn finalization_messages(&self, expression: &str, turns: &[Turn]) -> Vec<Message>;
}
