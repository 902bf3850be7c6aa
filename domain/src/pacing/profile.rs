//! Pacing profile value objects and the jitter formula.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default bounded perturbation applied to timing targets (±15%).
pub const DEFAULT_JITTER_PERCENTAGE: f64 = 0.15;

/// Floor for any jittered timing target, in seconds.
const JITTER_FLOOR_SECS: f64 = 0.1;

/// Named pace mode selecting an overall tempo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaceMode {
    Slow,
    Medium,
    Fast,
}

impl PaceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaceMode::Slow => "slow",
            PaceMode::Medium => "medium",
            PaceMode::Fast => "fast",
        }
    }
}

impl Default for PaceMode {
    fn default() -> Self {
        PaceMode::Slow
    }
}

impl std::fmt::Display for PaceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaceMode {
    type Err = DomainError;

    /// Fails fast on an unrecognized mode, before any turn executes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slow" => Ok(PaceMode::Slow),
            "medium" => Ok(PaceMode::Medium),
            "fast" => Ok(PaceMode::Fast),
            other => Err(DomainError::UnknownPaceMode(other.to_string())),
        }
    }
}

/// Named bundle of timing and token limits (Value Object)
///
/// Slower modes carry larger minimum/gap values and a lower typing rate.
/// Immutable once selected; constructed either from built-in defaults or a
/// config-file override, then passed by value into the pace controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacingProfile {
    /// Minimum wall-clock duration per speaker turn, seconds
    pub min_turn_seconds: f64,
    /// Pause between speaker transitions, seconds
    pub inter_turn_gap_seconds: f64,
    /// Advisory character typing rate for a presentation layer
    pub typeout_rate_chars_per_sec: f64,
    /// Maximum tokens per model response
    pub max_tokens_per_turn: u32,
}

impl PacingProfile {
    /// Built-in profile for the given pace mode.
    pub fn for_mode(mode: PaceMode) -> Self {
        match mode {
            PaceMode::Slow => Self {
                min_turn_seconds: 2.0,
                inter_turn_gap_seconds: 1.0,
                typeout_rate_chars_per_sec: 45.0,
                max_tokens_per_turn: 350,
            },
            PaceMode::Medium => Self {
                min_turn_seconds: 1.2,
                inter_turn_gap_seconds: 0.6,
                typeout_rate_chars_per_sec: 70.0,
                max_tokens_per_turn: 300,
            },
            PaceMode::Fast => Self {
                min_turn_seconds: 0.6,
                inter_turn_gap_seconds: 0.3,
                typeout_rate_chars_per_sec: 110.0,
                max_tokens_per_turn: 250,
            },
        }
    }

    /// Advisory typeout delay for rendering `length` characters, seconds.
    ///
    /// The core never renders character-by-character itself. A
    /// non-positive rate means instant rendering, so the delay is zero.
    pub fn typeout_delay_seconds(&self, length: usize) -> f64 {
        if self.typeout_rate_chars_per_sec <= 0.0 {
            return 0.0;
        }
        length as f64 / self.typeout_rate_chars_per_sec
    }
}

/// Apply the jitter formula to a base duration.
///
/// `unit_draw` is a uniform random value in `[-1, 1]` supplied by the
/// caller, keeping this function pure and testable. The result is
/// `base * (1 + pct * draw)` clamped to at least 0.1 seconds so a zero or
/// tiny base never produces a degenerate target.
pub fn jittered_seconds(base_seconds: f64, jitter_percentage: f64, unit_draw: f64) -> f64 {
    let jitter = base_seconds * jitter_percentage * unit_draw;
    (base_seconds + jitter).max(JITTER_FLOOR_SECS)
}
