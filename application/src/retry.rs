//! Bounded exponential-backoff retry around model calls.
//!
//! Transient provider failures are invisible to the caller if a later
//! attempt succeeds; exhausting the attempt budget propagates the final
//! error unchanged.

use crate::error::{StepError, check_cancelled, sleep_cancellable};
use crate::ports::model_client::ProviderError;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Retry discipline for a single external call.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Backoff base: the wait before the first retry
    pub base_delay: Duration,
    /// Backoff cap
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Wait before retry number `retry` (1-based): `base * 2^(retry-1)`,
    /// capped.
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let doubled = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(retry.saturating_sub(1)));
        doubled.min(self.max_delay)
    }

    /// Run `attempt` until it succeeds or the budget is exhausted.
    ///
    /// Cancellation is observed before every attempt and during the backoff
    /// sleep.
    pub async fn run<T, F, Fut>(
        &self,
        cancellation: Option<&CancellationToken>,
        mut attempt: F,
    ) -> Result<T, StepError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut tries = 0u32;
        loop {
            check_cancelled(cancellation)?;
            tries += 1;

            match attempt().await {
                Ok(value) => return Ok(value),
                Err(e) if tries >= self.max_attempts => {
                    warn!("provider call failed after {} attempts: {}", tries, e);
                    return Err(StepError::Provider(e));
                }
                Err(e) => {
                    let delay = self.backoff_delay(tries);
                    warn!(
                        "provider call failed (attempt {}/{}), retrying in {:.1}s: {}",
                        tries,
                        self.max_attempts,
                        delay.as_secs_f64(),
                        e
                    );
                    sleep_cancellable(delay, cancellation).await?;
                }
            }
        }
    }
}
