//! Progress notification port
//!
//! Push-based, best-effort event callbacks for live display. The core never
//! owns or blocks on a rendering thread and behaves identically with no
//! listener attached: every method defaults to a no-op, and implementations
//! must return quickly and never fail.

use duel_domain::{Speaker, Turn};

/// Callback for pace events during debate execution.
///
/// Implementations live in the presentation layer (console spinner, etc.).
pub trait ProgressNotifier: Send + Sync {
    /// A speaker's model call has been issued
    fn on_thinking(&self, _speaker: Speaker) {}

    /// The model call returned early; padding sleep is in progress
    fn on_finalizing(&self, _speaker: Speaker) {}

    /// Inter-turn gap in progress
    fn on_transitioning(&self) {}

    /// A turn was recorded
    fn on_turn_complete(&self, _turn: &Turn) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {}
