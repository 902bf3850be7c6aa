//! Shared step-failure type and cancellation helpers.
//!
//! Every suspension point in a debate (provider calls, backoff waits,
//! padding sleeps, inter-turn gaps) observes the cancellation token, so a
//! cancelled debate aborts promptly instead of finishing a sleep that was
//! already rendered moot.

use crate::ports::model_client::ProviderError;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Why a debate step stopped early.
///
/// These never escape the orchestrator boundary: the use case folds them
/// into the returned [`DebateResult`](duel_domain::DebateResult).
#[derive(Error, Debug)]
pub enum StepError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Debate cancelled")]
    Cancelled,
}

/// Check if cancellation has been requested.
///
/// Returns `Err(StepError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: Option<&CancellationToken>) -> Result<(), StepError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(StepError::Cancelled);
    }
    Ok(())
}

/// Sleep that aborts as soon as the token fires.
pub(crate) async fn sleep_cancellable(
    duration: Duration,
    token: Option<&CancellationToken>,
) -> Result<(), StepError> {
    match token {
        Some(token) => {
            tokio::select! {
                _ = token.cancelled() => Err(StepError::Cancelled),
                _ = tokio::time::sleep(duration) => Ok(()),
            }
        }
        None => {
            tokio::time::sleep(duration).await;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_cancelled_none_token() {
        assert!(check_cancelled(None).is_ok());
    }

    #[test]
    fn test_check_cancelled_fired_token() {
        let token = CancellationToken::new();
        assert!(check_cancelled(Some(&token)).is_ok());
        token.cancel();
        assert!(matches!(
            check_cancelled(Some(&token)),
            Err(StepError::Cancelled)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_cancellable_interrupts() {
        let token = CancellationToken::new();
        let child = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            child.cancel();
        });

        let outcome = sleep_cancellable(Duration::from_secs(3600), Some(&token)).await;
        assert!(matches!(outcome, Err(StepError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_cancellable_completes() {
        let outcome = sleep_cancellable(Duration::from_millis(50), None).await;
        assert!(outcome.is_ok());
    }
}
