//! Retry-on-throttle discipline for Auto Scaling API calls.
//!
//! The provider rejects requests over the allowed call rate with a throttle
//! error. Those are the only errors worth retrying here: every other failure
//! is returned to the caller on the first occurrence. Backoff doubles from
//! `base_delay` up to `max_delay`, and the attempt count is bounded so a
//! persistent throttle surfaces as an error instead of looping forever.

use std::future::Future;
use std::time::Duration;

use aws_sdk_autoscaling::error::{ProvideErrorMetadata, SdkError};
use tracing::{debug, warn};

/// Error codes the provider uses for request throttling.
const THROTTLE_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "RequestThrottledException",
    "TooManyRequestsException",
];

/// Classifies an error as a throttle response or not.
pub trait MaybeThrottled {
    fn is_throttled(&self) -> bool;
}

impl<E, R> MaybeThrottled for SdkError<E, R>
where
    E: ProvideErrorMetadata,
{
    fn is_throttled(&self) -> bool {
        is_throttle_metadata(self.code(), self.message())
    }
}

/// Throttle classification on raw error metadata.
///
/// Matches the provider's documented throttle codes, falling back to the
/// "Rate exceeded" message some responses carry without a usable code.
fn is_throttle_metadata(code: Option<&str>, message: Option<&str>) -> bool {
    if let Some(code) = code
        && THROTTLE_CODES.contains(&code)
    {
        return true;
    }
    message.is_some_and(|m| m.contains("Rate exceeded"))
}

/// How throttled calls are retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of calls, counting the first.
    pub max_attempts: u32,
    /// Backoff before the second attempt.
    pub base_delay: Duration,
    /// Backoff ceiling.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// A policy with a different attempt bound and the default backoff.
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }
}

/// Outcome of a retried call that did not succeed.
#[derive(Debug)]
pub enum RetryError<E> {
    /// Throttled on every attempt up to the policy bound.
    Exhausted { attempts: u32, source: E },
    /// A non-throttle error, returned without retrying.
    Fatal(E),
}

/// Backoff before the attempt after `attempt` (1-based): doubles from
/// `base_delay`, capped at `max_delay`.
pub fn backoff_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    let shift = attempt.saturating_sub(1).min(16);
    policy
        .base_delay
        .saturating_mul(1u32 << shift)
        .min(policy.max_delay)
}

/// Run `call`, retrying while it fails with a throttle error.
///
/// Success and non-throttle errors are returned immediately. Throttles are
/// retried with exponential backoff until `policy.max_attempts` calls have
/// been made, after which the final error is returned as
/// [`RetryError::Exhausted`].
pub async fn with_throttle_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut call: F,
) -> Result<T, RetryError<E>>
where
    E: MaybeThrottled,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1u32;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_throttled() => {
                if attempt >= policy.max_attempts {
                    warn!(operation, attempts = attempt, "throttled on every attempt, giving up");
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        source: err,
                    });
                }

                let delay = backoff_delay(policy, attempt);
                debug!(
                    operation,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "request throttled, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(RetryError::Fatal(err)),
        }
    }
}
