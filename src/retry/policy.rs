//! Retry Mechanism Module
//!
//! This module provides retry functionality for maildesk API calls with
//! deterministic exponential backoff. The delay schedule is computed purely
//! from the attempt index (no jitter), so the operator-facing countdowns in
//! the dashboard are exact and tests can assert the schedule.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::error::ApiError;
use crate::retry::notify::{RetryNotifier, TracingNotifier};

/// Retry policy configuration, immutable per call site.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Number of extra attempts beyond the first (0 = single attempt).
    pub max_retries: u32,
    /// Base delay in seconds; the delay before attempt `n + 1` is
    /// `backoff_factor * 2^n`.
    pub backoff_factor: f64,
    /// Per-attempt timeout in seconds, passed to the operation.
    pub timeout: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 1.0,
            timeout: 20.0,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of extra attempts beyond the first.
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base backoff delay in seconds.
    pub const fn with_backoff_factor(mut self, seconds: f64) -> Self {
        self.backoff_factor = seconds;
        self
    }

    /// Set the per-attempt timeout in seconds.
    pub const fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Per-attempt timeout as a `Duration`.
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout)
    }

    /// Delay applied after a retryable failure on `attempt` (0-based):
    /// `backoff_factor`, `2 * backoff_factor`, `4 * backoff_factor`, ...
    pub fn delay_for(&self, attempt: u32) -> Duration {
        Duration::from_secs_f64(self.backoff_factor * 2f64.powi(attempt as i32))
    }
}

/// Executes an operation up to `max_retries + 1` times, backing off between
/// retryable failures.
///
/// Attempts are strictly sequential: the backoff sleep is awaited inline and
/// an in-flight attempt is never cancelled. Each `execute` call gets a fresh
/// attempt budget.
pub struct RetryExecutor {
    policy: RetryPolicy,
    notifier: Arc<dyn RetryNotifier>,
}

impl RetryExecutor {
    /// Create an executor that reports retry events through `tracing`.
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_notifier(policy, Arc::new(TracingNotifier))
    }

    /// Create an executor with an explicit notification sink.
    pub fn with_notifier(policy: RetryPolicy, notifier: Arc<dyn RetryNotifier>) -> Self {
        Self { policy, notifier }
    }

    /// Run `operation` until it succeeds, fails terminally, or the budget is
    /// exhausted.
    ///
    /// The operation receives the per-attempt timeout ceiling; enforcing it
    /// is the operation's job (the executor never pre-empts a call). A
    /// success on any attempt returns immediately. A client status error
    /// surfaces on first occurrence regardless of remaining budget. Any
    /// other failure retries after `policy.delay_for(attempt)` until
    /// `max_retries` attempts have been retried; the surfaced error carries
    /// the index of the attempt that produced it.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, ApiError>
    where
        F: FnMut(Duration) -> Fut,
        Fut: std::future::Future<Output = Result<T, ApiError>>,
    {
        let timeout = self.policy.attempt_timeout();
        let mut attempt: u32 = 0;

        loop {
            match operation(timeout).await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    let error = error.with_retry_count(attempt);

                    if !error.is_retryable() || attempt == self.policy.max_retries {
                        self.notifier.error(attempt + 1, &error.to_string());
                        return Err(error);
                    }

                    let delay = self.policy.delay_for(attempt);
                    self.notifier.warn(attempt, delay, &error.to_string());
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Convenience function to retry an operation with the default policy.
pub async fn retry_with_backoff<F, Fut, T>(operation: F) -> Result<T, ApiError>
where
    F: FnMut(Duration) -> Fut,
    Fut: std::future::Future<Output = Result<T, ApiError>>,
{
    RetryExecutor::new(RetryPolicy::default()).execute(operation).await
}
