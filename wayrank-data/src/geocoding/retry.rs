//! Bounded retry with linear backoff for transient upstream failures.

use std::future::Future;
use std::time::{Duration, Instant};

use log::warn;
use wayrank_core::ProviderError;

/// How a retrying client treats transient failures.
///
/// The delay before retry `k` (one-based) is `backoff_step × k`. No delay
/// follows the final attempt.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wayrank_data::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 3);
/// assert_eq!(policy.delay_before_retry(2), Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts made in total, including the first.
    pub max_attempts: u32,
    /// Backoff unit multiplied by the attempt number.
    pub backoff_step: Duration,
    /// Overall budget; retrying stops once the next wait would overrun it.
    pub deadline: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_millis(1500),
            deadline: None,
        }
    }
}

impl RetryPolicy {
    /// Set the total attempt count; zero is treated as one.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the backoff unit.
    #[must_use]
    pub const fn with_backoff_step(mut self, backoff_step: Duration) -> Self {
        self.backoff_step = backoff_step;
        self
    }

    /// Set the overall deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Wait applied after failed attempt `attempt` (one-based).
    #[must_use]
    pub fn delay_before_retry(&self, attempt: u32) -> Duration {
        self.backoff_step.saturating_mul(attempt)
    }
}

/// Result of a single attempt.
#[derive(Debug)]
pub(crate) enum Attempt<T> {
    /// The attempt produced a value.
    Done(T),
    /// The attempt failed in a way worth repeating.
    Retry(ProviderError),
    /// The attempt failed for good.
    Fail(ProviderError),
}

impl<T> From<Result<T, ProviderError>> for Attempt<T> {
    fn from(result: Result<T, ProviderError>) -> Self {
        match result {
            Ok(value) => Self::Done(value),
            Err(err) if err.is_transient() => Self::Retry(err),
            Err(err) => Self::Fail(err),
        }
    }
}

/// Run `attempt` until it succeeds, fails for good, runs out of attempts or
/// would overrun the deadline.
pub(crate) async fn run<T, F, Fut>(policy: RetryPolicy, mut attempt: F) -> Result<T, ProviderError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Attempt<T>>,
{
    let started = Instant::now();
    let max_attempts = policy.max_attempts.max(1);
    let mut number = 1;
    loop {
        let err = match attempt(number).await {
            Attempt::Done(value) => return Ok(value),
            Attempt::Fail(err) => return Err(err),
            Attempt::Retry(err) => err,
        };
        warn!("attempt {number}/{max_attempts} failed: {err}");
        if number >= max_attempts {
            return Err(ProviderError::RetriesExhausted {
                attempts: number,
                last_error: err.to_string(),
            });
        }
        let delay = policy.delay_before_retry(number);
        if let Some(deadline) = policy.deadline
            && started.elapsed().saturating_add(delay) > deadline
        {
            return Err(ProviderError::DeadlineExceeded {
                deadline_ms: deadline.as_millis(),
                attempts: number,
                last_error: err.to_string(),
            });
        }
        tokio::time::sleep(delay).await;
        number += 1;
    }
}
