//! Fixed-interval retry for outbound calls

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Sleep between a failed attempt and the next one. There is no
    /// sleep after the final attempt.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }
}

/// Run `op` until it succeeds, the policy runs out of attempts, or
/// `is_retryable` rejects the error. The error of the last attempt is
/// returned. `op` receives the 1-based attempt number.
pub async fn retry<T, E, F, Fut, P>(policy: &RetryPolicy, mut op: F, is_retryable: P) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= attempts || !is_retryable(&err) {
                    return Err(err);
                }
                tracing::warn!(
                    "Attempt {}/{} failed, retrying in {:?}: {}",
                    attempt,
                    attempts,
                    policy.backoff,
                    err
                );
                tokio::time::sleep(policy.backoff).await;
                attempt += 1;
            }
        }
    }
}
