//! Pace controller: presentation-rhythm enforcement around model calls.
//!
//! Guarantees a perceptible minimum cadence for live display without ever
//! shortening a naturally slow call: a turn that returns quickly is padded
//! up to a jittered minimum, a turn that ran long gets no padding. The gap
//! between turns is jittered the same way so the tempo never reads as
//! mechanically uniform.
//!
//! Measurement uses `tokio::time::Instant`, so tests run deterministically
//! under the paused clock.

use crate::error::{StepError, check_cancelled, sleep_cancellable};
use crate::ports::progress::ProgressNotifier;
use duel_domain::pacing::jittered_seconds;
use duel_domain::{PacingProfile, Speaker, TimingSummary, TurnTiming};
use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Enforces minimum turn duration and inter-turn gaps with jitter,
/// independent of model latency.
///
/// Stateless per call except for the accumulated [`TurnTiming`] list used
/// by [`summary`](PaceController::summary). One controller per debate run;
/// never shared.
pub struct PaceController {
    profile: PacingProfile,
    jitter_percentage: f64,
    timings: Vec<TurnTiming>,
}

impl PaceController {
    pub fn new(profile: PacingProfile, jitter_percentage: f64) -> Self {
        Self {
            profile,
            jitter_percentage,
            timings: Vec::new(),
        }
    }

    pub fn profile(&self) -> &PacingProfile {
        &self.profile
    }

    fn unit_draw() -> f64 {
        rand::thread_rng().gen_range(-1.0..=1.0)
    }

    /// Execute one model turn with pacing enforcement.
    ///
    /// Emits `on_thinking`, runs `call` (typically a retry-wrapped provider
    /// call), then pads the turn up to a jittered minimum if the call came
    /// back early, emitting `on_finalizing` before the padding sleep.
    /// Returns the call's value plus the recorded timing.
    pub async fn execute_turn<T, Fut>(
        &mut self,
        speaker: Speaker,
        progress: &dyn ProgressNotifier,
        cancellation: Option<&CancellationToken>,
        call: impl FnOnce() -> Fut,
    ) -> Result<(T, TurnTiming), StepError>
    where
        Fut: Future<Output = Result<T, StepError>>,
    {
        check_cancelled(cancellation)?;

        let start = Instant::now();
        progress.on_thinking(speaker);

        let value = call().await?;
        let model_latency = start.elapsed();

        let target_secs = jittered_seconds(
            self.profile.min_turn_seconds,
            self.jitter_percentage,
            Self::unit_draw(),
        );
        let jitter_delta = target_secs - self.profile.min_turn_seconds;
        let target = Duration::from_secs_f64(target_secs);

        if model_latency < target {
            progress.on_finalizing(speaker);
            sleep_cancellable(target - model_latency, cancellation).await?;
        }

        let timing = TurnTiming::new(model_latency, start.elapsed(), jitter_delta);
        debug!(
            "{} turn: latency={:.2}s padding={:.2}s total={:.2}s",
            speaker,
            timing.model_latency.as_secs_f64(),
            timing.padding_time.as_secs_f64(),
            timing.total_time.as_secs_f64(),
        );
        self.timings.push(timing);

        Ok((value, timing))
    }

    /// Suspend for the jittered inter-turn gap.
    pub async fn inter_turn_gap(
        &self,
        progress: &dyn ProgressNotifier,
        cancellation: Option<&CancellationToken>,
    ) -> Result<(), StepError> {
        progress.on_transitioning();
        let gap_secs = jittered_seconds(
            self.profile.inter_turn_gap_seconds,
            self.jitter_percentage,
            Self::unit_draw(),
        );
        sleep_cancellable(Duration::from_secs_f64(gap_secs), cancellation).await
    }

    /// Advisory typeout delay for rendering `length` characters.
    pub fn typeout_delay(&self, length: usize) -> Duration {
        Duration::from_secs_f64(self.profile.typeout_delay_seconds(length))
    }

    /// Aggregate timing statistics over all recorded turns.
    pub fn summary(&self) -> TimingSummary {
        TimingSummary::from_timings(&self.timings)
    }
}
