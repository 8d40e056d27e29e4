//! Bounded retry with backoff.
//!
//! [`retry`] runs an async operation up to `max_attempts` times, sleeping
//! between failed attempts according to a [`RetryPolicy`]. It never sleeps
//! after the final attempt.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How the delay grows between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    /// `initial_delay * 2^attempt`.
    #[default]
    Exponential,
    /// `initial_delay` every time.
    Constant,
}

/// Attempt limit and delay schedule for [`retry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, initial_delay: Duration::from_secs(1), backoff: Backoff::Exponential }
    }
}

impl RetryPolicy {
    pub fn exponential(max_attempts: u32, initial_delay: Duration) -> Self {
        Self { max_attempts, initial_delay, backoff: Backoff::Exponential }
    }

    /// Delay to wait after the failed attempt with 0-based index `attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Exponential => {
                let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
                self.initial_delay.saturating_mul(factor)
            }
            Backoff::Constant => self.initial_delay,
        }
    }

    /// Total time spent sleeping if every attempt fails.
    pub fn worst_case_delay(&self) -> Duration {
        (0..self.max_attempts.saturating_sub(1))
            .map(|attempt| self.delay_for(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// Outcome of a retry loop that never succeeded.
#[derive(Debug, thiserror::Error)]
pub enum RetryError<E> {
    /// Every attempt failed; carries the error from the final one.
    #[error("gave up after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: E },

    /// The policy allowed zero attempts.
    #[error("retry policy allows no attempts")]
    NoAttempts,
}

impl<E> RetryError<E> {
    /// Number of attempts that were made.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
            RetryError::NoAttempts => 0,
        }
    }
}

/// Run `op` until it succeeds or the policy's attempts are used up.
///
/// `op` receives the 0-based attempt index. Failures are logged with the
/// attempt number and the upcoming delay.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut last_error = None;

    for attempt in 0..policy.max_attempts {
        tracing::info!(attempt = attempt + 1, max_attempts = policy.max_attempts, "attempt starting");

        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::error!(attempt = attempt + 1, max_attempts = policy.max_attempts, error = %e, "attempt failed");
                last_error = Some(e);
            }
        }

        if attempt + 1 < policy.max_attempts {
            let delay = policy.delay_for(attempt);
            tracing::info!(delay_ms = delay.as_millis() as u64, "retrying after delay");
            tokio::time::sleep(delay).await;
        }
    }

    match last_error {
        Some(last_error) => Err(RetryError::Exhausted { attempts: policy.max_attempts, last_error }),
        None => Err(RetryError::NoAttempts),
    }
}
