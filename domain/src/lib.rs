//! Domain layer for duel
//!
//! This crate contains the core business logic, entities, and value objects
//! of the Solver/Critic debate protocol. It has no dependencies on
//! infrastructure or presentation concerns: no I/O, no async runtime.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! A debate is a strictly sequential exchange between two participants:
//!
//! - **Solver**: proposes an answer and argues for it
//! - **Critic**: withholds agreement until genuinely convinced
//!
//! The Solver may only finalize after the Critic signals `<AGREE>true`.
//! Both control signals are embedded in free text and extracted by the
//! [`signals`] module, so the state machine only ever observes typed values.
//!
//! ## Pacing
//!
//! Turn duration and inter-turn gaps are padded to a jittered minimum so a
//! live display reads as deliberate rather than mechanically fast. The pure
//! timing math lives here; the sleeping happens in the application layer.

pub mod conversation;
pub mod core;
pub mod debate;
pub mod pacing;

// Re-export commonly used types
pub use conversation::{Message, Role};
pub use core::{error::DomainError, expression::Expression, model::Model};
pub use debate::{
    result::{DebateResult, DebateStatus},
    signals::{extract_agreement, extract_final_answer},
    turn::{Speaker, Turn, approx_tokens},
};
pub use pacing::{
    profile::{PaceMode, PacingProfile},
    timing::{TimingSummary, TurnTiming},
};
