//! End-to-end debate flow tests against scripted model clients.
//!
//! All tests run under tokio's paused clock, so pacing sleeps and retry
//! backoff advance virtual time deterministically and the suite stays fast.

use async_trait::async_trait;
use duel_application::{
    DebateConfig, ModelClient, NoProgress, PromptProvider, ProviderError, RunDebateInput,
    RunDebateUseCase,
};
use duel_domain::{DebateStatus, Message, Model, PaceMode, PacingProfile, Speaker, Turn};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Replays a fixed list of responses, one per `generate` call.
struct ScriptedClient {
    model: Model,
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
}

impl ScriptedClient {
    fn new(script: Vec<Result<String, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            model: Model::Custom("scripted".to_string()),
            script: Mutex::new(script.into()),
        })
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn generate(
        &self,
        _messages: &[Message],
        _max_tokens: u32,
    ) -> Result<String, ProviderError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::InvalidResponse("script exhausted".into())))
    }
}

/// Replays one response forever.
struct RepeatingClient {
    model: Model,
    response: String,
}

impl RepeatingClient {
    fn new(response: &str) -> Arc<Self> {
        Arc::new(Self {
            model: Model::Custom("scripted".to_string()),
            response: response.to_string(),
        })
    }
}

#[async_trait]
impl ModelClient for RepeatingClient {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn generate(
        &self,
        _messages: &[Message],
        _max_tokens: u32,
    ) -> Result<String, ProviderError> {
        Ok(self.response.clone())
    }
}

struct TestPrompts;

impl PromptProvider for TestPrompts {
    fn solver_messages(&self, expression: &str, _turns: &[Turn]) -> Vec<Message> {
        vec![
            Message::system("You are the Solver."),
            Message::user(format!("Calculate: {expression}")),
        ]
    }

    fn critic_messages(&self, _expression: &str, turns: &[Turn]) -> Vec<Message> {
        let latest = turns
            .iter()
            .rev()
            .find(|t| t.speaker == Speaker::Solver)
            .map_or(String::new(), |t| t.content.clone());
        vec![
            Message::system("You are the Critic."),
            Message::user(format!("Solver says: {latest}")),
        ]
    }

    fn finalization_messages(&self, _expression: &str, _turns: &[Turn]) -> Vec<Message> {
        vec![
            Message::system("You are the Solver."),
            Message::user("The Critic agreed. Provide your final answer as <FINAL>answer</FINAL>."),
        ]
    }
}

fn use_case(solver: Arc<dyn ModelClient>, critic: Arc<dyn ModelClient>) -> RunDebateUseCase {
    RunDebateUseCase::new(solver, critic, Arc::new(TestPrompts))
}

fn ok(s: &str) -> Result<String, ProviderError> {
    Ok(s.to_string())
}

#[tokio::test(start_paused = true)]
async fn completed_debate_after_three_rounds() {
    let solver = ScriptedClient::new(vec![
        ok("2 + 3 * 4: multiplication binds tighter, so 2 + 12 = 14."),
        ok("PEMDAS puts multiplication before addition: 3 * 4 = 12, then 2 + 12 = 14."),
        ok("Step by step: 3 * 4 = 12. 2 + 12 = 14. No parentheses change this."),
        ok("<FINAL>14</FINAL>"),
    ]);
    let critic = ScriptedClient::new(vec![
        ok("<AGREE>false</AGREE> Show why multiplication binds tighter."),
        ok("<AGREE>false</AGREE> Walk through each operation explicitly."),
        ok("<AGREE>true</AGREE> The precedence argument is airtight."),
    ]);

    let input = RunDebateInput::new("2 + 3 * 4", DebateConfig::for_mode(PaceMode::Fast));
    let result = use_case(solver, critic).execute(input).await;

    assert_eq!(result.status, DebateStatus::Completed);
    assert_eq!(result.final_answer.as_deref(), Some("14"));
    assert_eq!(result.rounds, 3);
    assert_eq!(result.turns.len(), 7);
    assert!(!result.short_circuited);
    assert!(result.error_message.is_none());

    // Critic flags in order: false, false, true
    let flags: Vec<_> = result
        .turns
        .iter()
        .filter(|t| t.speaker == Speaker::Critic)
        .map(|t| t.agreement_flag)
        .collect();
    assert_eq!(flags, vec![Some(false), Some(false), Some(true)]);

    // The final answer turn immediately follows the agreeing Critic turn,
    // and no Critic turn occurs after agreement.
    let agree_idx = result
        .turns
        .iter()
        .position(|t| t.agreement_flag == Some(true))
        .unwrap();
    assert_eq!(agree_idx, result.turns.len() - 2);
    assert_eq!(result.turns[agree_idx + 1].speaker, Speaker::Solver);
    assert!(
        result.turns[agree_idx + 1..]
            .iter()
            .all(|t| t.speaker != Speaker::Critic)
    );

    assert_eq!(result.timing_summary.total_turns, 7);
}

#[tokio::test(start_paused = true)]
async fn timeout_when_critic_never_agrees() {
    let solver = RepeatingClient::new("It is 5. Addition is commutative.");
    let critic = RepeatingClient::new("<AGREE>false</AGREE> Not convinced.");

    let config = DebateConfig::for_mode(PaceMode::Fast).with_max_rounds(2);
    let result = use_case(solver, critic)
        .execute(RunDebateInput::new("2 + 3", config))
        .await;

    assert_eq!(result.status, DebateStatus::Timeout);
    assert!(result.final_answer.is_none());
    assert_eq!(result.rounds, 2);
    assert_eq!(result.turns.len(), 4);
    assert!(
        result
            .error_message
            .as_deref()
            .unwrap()
            .contains("2 rounds")
    );
}

#[tokio::test(start_paused = true)]
async fn error_when_solver_omits_final_tag_after_agreement() {
    let solver = ScriptedClient::new(vec![
        ok("2 + 3 = 5 by basic arithmetic."),
        ok("The answer is five."), // finalization turn, tag missing
    ]);
    let critic = ScriptedClient::new(vec![ok("<AGREE>true</AGREE> Correct.")]);

    let result = use_case(solver, critic)
        .execute(RunDebateInput::new(
            "2 + 3",
            DebateConfig::for_mode(PaceMode::Fast),
        ))
        .await;

    assert_eq!(result.status, DebateStatus::Error);
    assert!(result.final_answer.is_none());
    assert_eq!(result.turns.len(), 3);
    assert!(
        result
            .error_message
            .as_deref()
            .unwrap()
            .contains("final answer after agreement")
    );
}

#[tokio::test(start_paused = true)]
async fn transient_provider_failures_are_retried_invisibly() {
    let solver = ScriptedClient::new(vec![
        Err(ProviderError::Transport("connection reset".into())),
        Err(ProviderError::RateLimited("429".into())),
        ok("2 + 3 = 5."),
        ok("<FINAL>5</FINAL>"),
    ]);
    let critic = ScriptedClient::new(vec![ok("<AGREE>true</AGREE> Fine.")]);

    let result = use_case(solver, critic)
        .execute(RunDebateInput::new(
            "2 + 3",
            DebateConfig::for_mode(PaceMode::Fast),
        ))
        .await;

    // Retries leave no trace in the protocol outcome...
    assert_eq!(result.status, DebateStatus::Completed);
    assert_eq!(result.final_answer.as_deref(), Some("5"));
    assert_eq!(result.turns.len(), 3);

    // ...but the backoff delays (2s + 4s) are part of elapsed time.
    assert!(
        result.total_time >= Duration::from_secs(6),
        "total_time={:?}",
        result.total_time
    );
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_surface_as_error() {
    let solver = ScriptedClient::new(vec![
        Err(ProviderError::Transport("down".into())),
        Err(ProviderError::Transport("still down".into())),
        Err(ProviderError::Auth("key revoked".into())),
    ]);
    let critic = RepeatingClient::new("<AGREE>false</AGREE>");

    let result = use_case(solver, critic)
        .execute(RunDebateInput::new(
            "2 + 3",
            DebateConfig::for_mode(PaceMode::Fast),
        ))
        .await;

    assert_eq!(result.status, DebateStatus::Error);
    assert!(result.turns.is_empty());
    assert_eq!(result.timing_summary.total_turns, 0);
    assert!(
        result
            .error_message
            .as_deref()
            .unwrap()
            .contains("key revoked")
    );
}

#[tokio::test(start_paused = true)]
async fn unprompted_final_answer_short_circuits() {
    let solver = ScriptedClient::new(vec![ok(
        "Trivially: <FINAL>5</FINAL> since 2 + 3 = 5.",
    )]);
    let critic = RepeatingClient::new("<AGREE>false</AGREE>");

    let result = use_case(solver, critic)
        .execute(RunDebateInput::new(
            "2 + 3",
            DebateConfig::for_mode(PaceMode::Fast),
        ))
        .await;

    assert_eq!(result.status, DebateStatus::Completed);
    assert!(result.short_circuited);
    assert_eq!(result.final_answer.as_deref(), Some("5"));
    assert_eq!(result.rounds, 1);
    assert_eq!(result.turns.len(), 1);
    assert!(result.turns.iter().all(|t| t.speaker == Speaker::Solver));
}

#[tokio::test(start_paused = true)]
async fn slow_profile_takes_longer_than_fast() {
    let run = |mode: PaceMode| async move {
        let solver = ScriptedClient::new(vec![ok("2 + 3 = 5."), ok("<FINAL>5</FINAL>")]);
        let critic = ScriptedClient::new(vec![ok("<AGREE>true</AGREE> Yes.")]);
        use_case(solver, critic)
            .execute(RunDebateInput::new("2 + 3", DebateConfig::for_mode(mode)))
            .await
    };

    let fast = run(PaceMode::Fast).await;
    let slow = run(PaceMode::Slow).await;

    assert_eq!(fast.status, DebateStatus::Completed);
    assert_eq!(slow.status, DebateStatus::Completed);
    assert!(
        slow.total_time > fast.total_time,
        "slow={:?} fast={:?}",
        slow.total_time,
        fast.total_time
    );
}

#[tokio::test(start_paused = true)]
async fn every_turn_respects_jittered_minimum() {
    let solver = ScriptedClient::new(vec![
        ok("2 + 3 = 5."),
        ok("Still 5."),
        ok("<FINAL>5</FINAL>"),
    ]);
    let critic = ScriptedClient::new(vec![
        ok("<AGREE>false</AGREE> Prove it."),
        ok("<AGREE>true</AGREE> Convinced."),
    ]);

    let config = DebateConfig::for_mode(PaceMode::Slow);
    let result = use_case(solver, critic)
        .execute(RunDebateInput::new("2 + 3", config))
        .await;

    assert_eq!(result.status, DebateStatus::Completed);
    let floor = config.profile.min_turn_seconds * (1.0 - config.jitter_percentage) - 0.101;
    for turn in &result.turns {
        let total = turn.timing.unwrap().total_time.as_secs_f64();
        assert!(total >= floor, "turn total {total} below floor {floor}");
    }
}

#[tokio::test(start_paused = true)]
async fn cancellation_aborts_promptly() {
    let solver = RepeatingClient::new("It is 5.");
    let critic = RepeatingClient::new("<AGREE>false</AGREE> No.");

    let config = DebateConfig::for_mode(PaceMode::Slow).with_max_rounds(100);
    let uc = use_case(solver, critic);
    let token = CancellationToken::new();

    let canceller = {
        let token = token.clone();
        async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            token.cancel();
        }
    };

    let debate = uc.execute_with_progress(
        RunDebateInput::new("2 + 3", config),
        &NoProgress,
        Some(token.clone()),
    );

    let (result, ()) = tokio::join!(debate, canceller);

    assert_eq!(result.status, DebateStatus::Cancelled);
    // A 100-round slow debate would run for minutes; 10 virtual seconds
    // cover only a handful of turns.
    assert!(result.turns.len() < 10);
    assert_eq!(
        result.timing_summary.total_turns,
        result.turns.len(),
        "summary reflects exactly the executed turns"
    );
}

#[tokio::test(start_paused = true)]
async fn already_cancelled_token_yields_no_turns() {
    let solver = RepeatingClient::new("It is 5.");
    let critic = RepeatingClient::new("<AGREE>false</AGREE>");

    let token = CancellationToken::new();
    token.cancel();

    let result = use_case(solver, critic)
        .execute_with_progress(
            RunDebateInput::new("2 + 3", DebateConfig::for_mode(PaceMode::Fast)),
            &NoProgress,
            Some(token),
        )
        .await;

    assert_eq!(result.status, DebateStatus::Cancelled);
    assert!(result.turns.is_empty());
}

// Blocking mode runs on the caller's thread with real sleeps, so the
// profile is shrunk to its floor to keep the test quick. The protocol
// outcome must match what the async path produces for the same script.
#[test]
fn blocking_mode_matches_async_protocol() {
    let solver = ScriptedClient::new(vec![
        ok("3 * 4 = 12, then 2 + 12 = 14."),
        ok("<FINAL>14</FINAL>"),
    ]);
    let critic = ScriptedClient::new(vec![ok("<AGREE>true</AGREE> Correct precedence.")]);

    let mut profile = PacingProfile::for_mode(PaceMode::Fast);
    profile.min_turn_seconds = 0.01;
    profile.inter_turn_gap_seconds = 0.01;
    let config = DebateConfig::for_mode(PaceMode::Fast).with_profile(profile);

    let result = use_case(solver, critic).execute_blocking(
        RunDebateInput::new("2 + 3 * 4", config),
        &NoProgress,
        None,
    );

    assert_eq!(result.status, DebateStatus::Completed);
    assert_eq!(result.final_answer.as_deref(), Some("14"));
    assert_eq!(result.rounds, 1);
    assert_eq!(result.turns.len(), 3);
    assert!(!result.short_circuited);
    assert_eq!(result.timing_summary.total_turns, 3);
    assert!(result.total_time > Duration::ZERO);
}
