//! Notification sink for retry events.
//!
//! The dashboard blocks while the executor backs off, so these callbacks are
//! how it tells the operator what is happening in real time. Calls are
//! synchronous, ordered, and fire-and-forget.

use std::time::Duration;

/// Sink for operator-visible retry events.
pub trait RetryNotifier: Send + Sync {
    /// A retryable failure occurred on `attempt` (0-based) and another
    /// attempt will follow after `delay`.
    fn warn(&self, attempt: u32, delay: Duration, reason: &str);

    /// The attempt budget is exhausted or the failure is not retryable.
    /// `attempts` is the number of calls actually made.
    fn error(&self, attempts: u32, reason: &str);
}

/// Default sink: structured log events via `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl RetryNotifier for TracingNotifier {
    fn warn(&self, attempt: u32, delay: Duration, reason: &str) {
        tracing::warn!(
            attempt,
            delay_secs = delay.as_secs_f64(),
            "{reason}; retrying in {:.1}s",
            delay.as_secs_f64()
        );
    }

    fn error(&self, attempts: u32, reason: &str) {
        tracing::error!(attempts, "request failed after {attempts} attempt(s): {reason}");
    }
}
