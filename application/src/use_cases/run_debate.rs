//! Run Debate use case
//!
//! The protocol state machine: sequences Solver and Critic turns, applies
//! signal extraction to decide the next state, and terminates on agreement,
//! round-budget exhaustion, unrecovered provider failure, or cancellation.
//!
//! All failures are reported inside the returned [`DebateResult`]; nothing
//! is raised past this boundary. The turn list always reflects exactly the
//! turns that executed before termination.

use crate::error::StepError;
use crate::pacing::PaceController;
use crate::ports::model_client::ModelClient;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::prompts::PromptProvider;
use crate::ports::telemetry::{DebateMetrics, NoTelemetry, TelemetrySink, TurnMetrics};
use crate::retry::RetryPolicy;
use duel_domain::{
    DebateResult, Expression, PaceMode, PacingProfile, Speaker, Turn, extract_agreement,
    extract_final_answer, pacing::DEFAULT_JITTER_PERCENTAGE,
};
use std::sync::Arc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Explicit debate configuration, constructed once and passed by value.
///
/// No component reads process-wide mutable settings; profile lookup happens
/// here, at setup time, so an unrecognized pace mode fails before any turn
/// executes.
#[derive(Debug, Clone, Copy)]
pub struct DebateConfig {
    pub max_rounds: u32,
    pub pace_mode: PaceMode,
    pub profile: PacingProfile,
    pub jitter_percentage: f64,
}

impl DebateConfig {
    pub const DEFAULT_MAX_ROUNDS: u32 = 12;

    /// Config for a pace mode with the built-in profile.
    pub fn for_mode(mode: PaceMode) -> Self {
        Self {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            pace_mode: mode,
            profile: PacingProfile::for_mode(mode),
            jitter_percentage: DEFAULT_JITTER_PERCENTAGE,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_profile(mut self, profile: PacingProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_jitter(mut self, jitter_percentage: f64) -> Self {
        self.jitter_percentage = jitter_percentage;
        self
    }
}

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub expression: Expression,
    pub config: DebateConfig,
}

impl RunDebateInput {
    pub fn new(expression: impl Into<Expression>, config: DebateConfig) -> Self {
        Self {
            expression: expression.into(),
            config,
        }
    }
}

/// Use case for running one Solver/Critic debate.
///
/// The Solver and Critic are two instances of the same [`ModelClient`]
/// capability; prompt assembly and telemetry are injected collaborators.
pub struct RunDebateUseCase {
    solver: Arc<dyn ModelClient>,
    critic: Arc<dyn ModelClient>,
    prompts: Arc<dyn PromptProvider>,
    telemetry: Arc<dyn TelemetrySink>,
    retry: RetryPolicy,
}

impl RunDebateUseCase {
    pub fn new(
        solver: Arc<dyn ModelClient>,
        critic: Arc<dyn ModelClient>,
        prompts: Arc<dyn PromptProvider>,
    ) -> Self {
        Self {
            solver,
            critic,
            prompts,
            telemetry: Arc::new(NoTelemetry),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Execute with no progress reporting or cancellation.
    pub async fn execute(&self, input: RunDebateInput) -> DebateResult {
        self.execute_with_progress(input, &NoProgress, None).await
    }

    /// Execute with progress callbacks and optional cancellation.
    ///
    /// This is the non-blocking cooperative mode: every model call and every
    /// sleep is a suspension point, so arbitrarily many debates can share a
    /// runtime without coordination.
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn ProgressNotifier,
        cancellation: Option<CancellationToken>,
    ) -> DebateResult {
        let started_at = chrono::Utc::now();
        let start = Instant::now();

        let mut pace = PaceController::new(input.config.profile, input.config.jitter_percentage);
        let mut result = DebateResult::in_progress(input.expression.clone(), input.config.pace_mode);

        info!(
            "Debate started: {} (pace: {}, max_rounds: {})",
            input.expression, input.config.pace_mode, input.config.max_rounds
        );
        self.telemetry.on_debate_start(
            input.expression.content(),
            input.config.pace_mode.as_str(),
            input.config.max_rounds,
        );

        let outcome = self
            .drive(&input, &mut pace, &mut result, progress, cancellation.as_ref())
            .await;

        match outcome {
            Ok(()) => {}
            Err(StepError::Cancelled) => {
                info!("Debate cancelled after {} turns", result.turns.len());
                result.cancel();
            }
            Err(StepError::Provider(e)) => {
                warn!("Debate aborted on provider failure: {}", e);
                result.fail(e.to_string());
            }
        }

        result.total_time = start.elapsed();
        result.timing_summary = pace.summary();

        info!(
            "Debate finished: {} - rounds={}, total_time={:.2}s, padding={:.1}%",
            result.status,
            result.rounds,
            result.total_time.as_secs_f64(),
            result.timing_summary.padding_percentage,
        );
        self.telemetry.on_debate_end(&DebateMetrics::from_result(
            &result,
            input.config.max_rounds,
            started_at,
        ));

        result
    }

    /// Blocking mode: same pipeline, same timing semantics, but the sleeps
    /// and calls occupy the calling thread. For single-debate embedding.
    pub fn execute_blocking(
        &self,
        input: RunDebateInput,
        progress: &dyn ProgressNotifier,
        cancellation: Option<CancellationToken>,
    ) -> DebateResult {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => {
                runtime.block_on(self.execute_with_progress(input, progress, cancellation))
            }
            Err(e) => {
                let mut result =
                    DebateResult::in_progress(input.expression, input.config.pace_mode);
                result.fail(format!("Failed to start debate runtime: {e}"));
                result
            }
        }
    }

    /// The round loop. Terminal statuses are set on `result`; an `Err`
    /// means the loop was aborted (provider exhaustion or cancellation) and
    /// the caller assigns the terminal status.
    async fn drive(
        &self,
        input: &RunDebateInput,
        pace: &mut PaceController,
        result: &mut DebateResult,
        progress: &dyn ProgressNotifier,
        cancellation: Option<&CancellationToken>,
    ) -> Result<(), StepError> {
        let expression = input.expression.content();
        let max_tokens = input.config.profile.max_tokens_per_turn;

        for round in 1..=input.config.max_rounds {
            result.rounds = round;
            debug!("Round {}/{}", round, input.config.max_rounds);

            // Solver's turn
            let messages = self.prompts.solver_messages(expression, &result.turns);
            let (response, timing) = pace
                .execute_turn(Speaker::Solver, progress, cancellation, || {
                    self.retry
                        .run(cancellation, || self.solver.generate(&messages, max_tokens))
                })
                .await?;
            let turn = Turn::record(Speaker::Solver, response.clone(), timing);
            self.record_turn(result, progress, turn);

            // An unprompted final answer should not happen before agreement,
            // but is honored as a completion via its own named path.
            if let Some(answer) = extract_final_answer(&response) {
                warn!("Solver finalized before Critic agreement; accepting answer");
                result.complete_short_circuit(answer);
                return Ok(());
            }

            pace.inter_turn_gap(progress, cancellation).await?;

            // Critic's turn
            let messages = self.prompts.critic_messages(expression, &result.turns);
            let (response, timing) = pace
                .execute_turn(Speaker::Critic, progress, cancellation, || {
                    self.retry
                        .run(cancellation, || self.critic.generate(&messages, max_tokens))
                })
                .await?;
            let agreement = extract_agreement(&response);
            let turn =
                Turn::record(Speaker::Critic, response, timing).with_agreement(agreement);
            self.record_turn(result, progress, turn);

            if agreement == Some(true) {
                info!("Critic agreed in round {}; requesting final answer", round);
                pace.inter_turn_gap(progress, cancellation).await?;
                self.finalize(input, pace, result, progress, cancellation)
                    .await?;
                return Ok(());
            }

            if round < input.config.max_rounds {
                pace.inter_turn_gap(progress, cancellation).await?;
            }
        }

        result.time_out(input.config.max_rounds);
        Ok(())
    }

    /// Finalization turn: the Critic agreed, ask the Solver for the answer.
    async fn finalize(
        &self,
        input: &RunDebateInput,
        pace: &mut PaceController,
        result: &mut DebateResult,
        progress: &dyn ProgressNotifier,
        cancellation: Option<&CancellationToken>,
    ) -> Result<(), StepError> {
        let messages = self
            .prompts
            .finalization_messages(input.expression.content(), &result.turns);
        let max_tokens = input.config.profile.max_tokens_per_turn;

        let (response, timing) = pace
            .execute_turn(Speaker::Solver, progress, cancellation, || {
                self.retry
                    .run(cancellation, || self.solver.generate(&messages, max_tokens))
            })
            .await?;
        let turn = Turn::record(Speaker::Solver, response.clone(), timing);
        self.record_turn(result, progress, turn);

        match extract_final_answer(&response) {
            Some(answer) => result.complete(answer),
            None => {
                result.fail("Solver failed to provide a final answer after agreement");
            }
        }
        Ok(())
    }

    fn record_turn(&self, result: &mut DebateResult, progress: &dyn ProgressNotifier, turn: Turn) {
        self.telemetry.on_turn(&TurnMetrics::from_turn(&turn));
        progress.on_turn_complete(&turn);
        result.turns.push(turn);
    }
}
