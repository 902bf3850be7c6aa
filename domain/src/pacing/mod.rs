//! Pacing profiles and timing records
//!
//! The presentation-pacing mechanism: named tempo bundles, the jitter
//! formula, per-turn timing records, and the aggregate summary. All pure;
//! the application layer owns the actual sleeping.

pub mod profile;
pub mod timing;

pub use profile::{DEFAULT_JITTER_PERCENTAGE, PaceMode, PacingProfile, jittered_seconds};
pub use timing::{TimingSummary, TurnTiming};
