//! Telemetry sink port
//!
//! Receives structured per-turn metrics and a per-debate summary record.
//! Sink failures must never abort a debate: all methods are infallible from
//! the caller's perspective and implementations swallow their own errors.

use chrono::{DateTime, Utc};
use duel_domain::{DebateResult, Turn};
use serde::{Deserialize, Serialize};

/// Metrics for a single debate turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnMetrics {
    pub speaker: String,
    pub timestamp: DateTime<Utc>,
    pub model_latency_secs: f64,
    pub padding_secs: f64,
    pub total_secs: f64,
    pub jitter_delta_secs: f64,
    pub tokens_estimate: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement_flag: Option<bool>,
}

impl TurnMetrics {
    pub fn from_turn(turn: &Turn) -> Self {
        let timing = turn.timing.as_ref();
        Self {
            speaker: turn.speaker.as_str().to_string(),
            timestamp: turn.timestamp,
            model_latency_secs: timing.map_or(0.0, |t| t.model_latency.as_secs_f64()),
            padding_secs: timing.map_or(0.0, |t| t.padding_time.as_secs_f64()),
            total_secs: timing.map_or(0.0, |t| t.total_time.as_secs_f64()),
            jitter_delta_secs: timing.map_or(0.0, |t| t.jitter_delta_secs),
            tokens_estimate: turn.tokens_estimate,
            agreement_flag: turn.agreement_flag,
        }
    }
}

/// The persisted audit record: one of these per completed debate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateMetrics {
    pub expression: String,
    pub pace_mode: String,
    pub max_rounds: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_secs: f64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_answer: Option<String>,
    pub rounds_completed: u32,
    pub short_circuited: bool,
    pub total_turns: usize,
    pub total_model_secs: f64,
    pub total_padding_secs: f64,
    pub padding_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub turns: Vec<TurnMetrics>,
}

impl DebateMetrics {
    pub fn from_result(result: &DebateResult, max_rounds: u32, started_at: DateTime<Utc>) -> Self {
        let summary = &result.timing_summary;
        Self {
            expression: result.expression.content().to_string(),
            pace_mode: result.pace_mode.to_string(),
            max_rounds,
            start_time: started_at,
            end_time: Utc::now(),
            total_secs: result.total_time.as_secs_f64(),
            status: result.status.to_string(),
            final_answer: result.final_answer.clone(),
            rounds_completed: result.rounds,
            short_circuited: result.short_circuited,
            total_turns: summary.total_turns,
            total_model_secs: summary.total_model_time.as_secs_f64(),
            total_padding_secs: summary.total_padding_time.as_secs_f64(),
            padding_percentage: summary.padding_percentage,
            error_message: result.error_message.clone(),
            turns: result.turns.iter().map(TurnMetrics::from_turn).collect(),
        }
    }
}

/// Sink for debate telemetry
pub trait TelemetrySink: Send + Sync {
    /// A debate started
    fn on_debate_start(&self, _expression: &str, _pace_mode: &str, _max_rounds: u32) {}

    /// A turn was recorded
    fn on_turn(&self, _metrics: &TurnMetrics) {}

    /// A debate reached a terminal status
    fn on_debate_end(&self, _metrics: &DebateMetrics) {}
}

/// No-op telemetry sink
pub struct NoTelemetry;

impl TelemetrySink for NoTelemetry {}
