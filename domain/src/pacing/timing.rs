//! Per-turn timing records and their aggregate summary.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing record for a single debate turn.
///
/// Invariant: `total_time ≈ model_latency + padding_time`, and
/// `total_time ≥ jittered minimum` unless the model call alone exceeded the
/// minimum (then `padding_time` is zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnTiming {
    /// Time the model call itself took
    pub model_latency: Duration,
    /// Delay inserted to reach the jittered minimum turn duration
    pub padding_time: Duration,
    /// Full wall-clock turn duration
    pub total_time: Duration,
    /// Signed delta the jitter draw applied to the profile minimum, seconds
    pub jitter_delta_secs: f64,
}

impl TurnTiming {
    /// Build a record from measured latency and total; padding is derived.
    pub fn new(model_latency: Duration, total_time: Duration, jitter_delta_secs: f64) -> Self {
        Self {
            model_latency,
            padding_time: total_time.saturating_sub(model_latency),
            total_time,
            jitter_delta_secs,
        }
    }
}

/// Aggregate timing statistics over a debate's recorded turns.
///
/// Computed fresh at debate end from the full `TurnTiming` list; never
/// updated incrementally elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimingSummary {
    pub total_turns: usize,
    pub total_model_time: Duration,
    pub total_padding_time: Duration,
    pub total_elapsed: Duration,
    pub avg_model_latency: Duration,
    pub avg_padding_time: Duration,
    /// Padding as a percentage of total elapsed; 0 when elapsed is 0
    pub padding_percentage: f64,
}

impl TimingSummary {
    pub fn from_timings(timings: &[TurnTiming]) -> Self {
        if timings.is_empty() {
            return Self::default();
        }

        let total_model_time: Duration = timings.iter().map(|t| t.model_latency).sum();
        let total_padding_time: Duration = timings.iter().map(|t| t.padding_time).sum();
        let total_elapsed: Duration = timings.iter().map(|t| t.total_time).sum();
        let n = timings.len() as u32;

        let padding_percentage = if total_elapsed.is_zero() {
            0.0
        } else {
            total_padding_time.as_secs_f64() / total_elapsed.as_secs_f64() * 100.0
        };

        Self {
            total_turns: timings.len(),
            total_model_time,
            total_padding_time,
            total_elapsed,
            avg_model_latency: total_model_time / n,
            avg_padding_time: total_padding_time / n,
            padding_percentage,
        }
    }
}
